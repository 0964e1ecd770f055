pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{SchoolService, ServiceError};
pub use domain::{NewSchool, SchoolListing, SchoolRecord, SchoolSubmission, StoredSchool};
pub use storage::{MemorySchoolStore, MySqlSchoolStore, SchoolStore, StoreError};
