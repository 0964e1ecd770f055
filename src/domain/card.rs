//! Card view model for the school directory page.

use crate::domain::image;
use crate::domain::listing::SchoolListing;
use serde::Serialize;

/// What a directory card shows. `image_src` has already been through the
/// display gate and is either a renderable data URL or the placeholder.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SchoolCard {
    pub name: String,
    pub address: String,
    pub city: String,
    pub image_src: String,
}

impl SchoolCard {
    pub fn from_listing(listing: &SchoolListing) -> Self {
        Self {
            name: listing.name.clone(),
            address: listing.address.clone(),
            city: listing.city.clone(),
            image_src: image::display_src(listing.image.as_deref()).to_string(),
        }
    }

    pub fn alt_text(&self) -> String {
        format!("{} image", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(image: Option<String>) -> SchoolListing {
        SchoolListing {
            id: 1,
            name: "Hillside".into(),
            address: "4 Lake Rd".into(),
            city: "Leeds".into(),
            image,
        }
    }

    #[test]
    fn renderable_image_is_kept() {
        let src = format!("data:image/jpg;base64,{}", "Z".repeat(60));
        let card = SchoolCard::from_listing(&listing(Some(src.clone())));
        assert_eq!(card.image_src, src);
        assert_eq!(card.alt_text(), "Hillside image");
    }

    #[test]
    fn missing_or_unsafe_image_falls_back_to_placeholder() {
        assert_eq!(
            SchoolCard::from_listing(&listing(None)).image_src,
            image::PLACEHOLDER_IMAGE
        );
        // Not one of the exact renderable prefixes.
        let odd = format!("data:image/png;charset=utf-8;base64,{}", "Z".repeat(60));
        assert_eq!(
            SchoolCard::from_listing(&listing(Some(odd))).image_src,
            image::PLACEHOLDER_IMAGE
        );
    }
}
