//! Domain model for school records: the entity, its validation rules and the
//! image encoding policy shared by the write and read paths.

pub mod card;
pub mod image;
pub mod listing;
pub mod school;
pub mod validate;

pub use card::SchoolCard;
pub use listing::SchoolListing;
pub use school::{NewSchool, SchoolRecord, SchoolSubmission, StoredSchool};
pub use validate::{validate_submission, ValidationError};
