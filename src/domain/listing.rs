//! Read-side shape of a school as served by `GET /schools`.

use crate::domain::image;
use crate::domain::school::StoredSchool;
use serde::Serialize;
use utoipa::ToSchema;

/// `state`, `contact` and `email` are left out on purpose: the listing only
/// carries what the directory cards display.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct SchoolListing {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    /// Canonical `data:image/...;base64,...` URL, or `null` when the stored value is unusable.
    pub image: Option<String>,
}

impl From<StoredSchool> for SchoolListing {
    fn from(row: StoredSchool) -> Self {
        let image = image::decode(row.image.as_deref());
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
            city: row.city,
            image,
        }
    }
}

pub fn to_listings(rows: Vec<StoredSchool>) -> Vec<SchoolListing> {
    rows.into_iter().map(SchoolListing::from).collect()
}
