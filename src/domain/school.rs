//! School record shapes as they move through the write and read paths.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// Raw `POST /schools` body. Every field is free-form and optional; the
/// validator decides what is acceptable.
#[derive(Deserialize, Debug, Default, Clone, ToSchema)]
pub struct SchoolSubmission {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub state: Option<String>,
    /// Phone number; digits, spaces, `+`, `-` and parentheses.
    #[serde(default, deserialize_with = "lenient_text")]
    pub contact: Option<String>,
    /// Older form builds post this field as `email_id`.
    #[serde(default, alias = "email_id", deserialize_with = "lenient_text")]
    pub email: Option<String>,
    /// Image as a `data:image/<subtype>;base64,...` URL.
    #[serde(default, rename = "imageDataUrl", deserialize_with = "lenient_text")]
    pub image_data_url: Option<String>,
}

/// A validated school ready to be inserted. `image` is always a canonical
/// tagged data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email: String,
    pub image: String,
}

impl NewSchool {
    pub fn with_id(self, id: i64) -> SchoolRecord {
        SchoolRecord {
            id,
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            contact: self.contact,
            email: self.email,
            image: self.image,
        }
    }
}

/// A school as returned by the insert path, with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchoolRecord {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email: String,
    pub image: String,
}

/// A row read back from the `schools` table.
///
/// `image` is whatever the row holds. Rows written before data URLs were
/// required may carry bare base64, placeholders or nothing at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSchool {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email: String,
    pub image: Option<String>,
}

impl From<SchoolRecord> for StoredSchool {
    fn from(r: SchoolRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
            city: r.city,
            state: r.state,
            contact: r.contact,
            email: r.email,
            image: Some(r.image),
        }
    }
}

// Form clients are not strict about types: numbers and booleans are accepted
// as their text form, `null` is treated as an absent field.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = JsonValue::deserialize(deserializer)?;
    match v {
        JsonValue::Null => Ok(None),
        JsonValue::String(s) => Ok(Some(s)),
        JsonValue::Number(n) => Ok(Some(n.to_string())),
        JsonValue::Bool(b) => Ok(Some(b.to_string())),
        JsonValue::Array(_) | JsonValue::Object(_) => {
            Err(serde::de::Error::custom("expected a text value"))
        }
    }
}
