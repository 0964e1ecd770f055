//! Submission validation. Rules run in a fixed order and the first failure wins.

use crate::domain::image;
use crate::domain::school::{NewSchool, SchoolSubmission};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

// Applied to the contact with whitespace removed, so formatting spaces do not
// count toward the 7..=15 length bound.
static CONTACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\-()]{7,15}$").expect("valid contact pattern"));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingFields,
    #[error("Invalid email format.")]
    InvalidEmail,
    #[error("Invalid contact format.")]
    InvalidContact,
    #[error("Invalid or empty image data.")]
    InvalidImage,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Digits, spaces, `+`, `-` and parentheses only, with 7 to 15 non-space characters.
pub fn is_valid_contact(contact: &str) -> bool {
    let compact: String = contact.chars().filter(|c| !c.is_whitespace()).collect();
    CONTACT.is_match(&compact)
}

fn required(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Turns a raw submission into a [`NewSchool`] with a canonical image, or
/// reports the first rule it breaks.
pub fn validate_submission(submission: &SchoolSubmission) -> Result<NewSchool, ValidationError> {
    let (
        Some(name),
        Some(address),
        Some(city),
        Some(state),
        Some(contact),
        Some(email),
        Some(image_raw),
    ) = (
        required(&submission.name),
        required(&submission.address),
        required(&submission.city),
        required(&submission.state),
        required(&submission.contact),
        required(&submission.email),
        required(&submission.image_data_url),
    )
    else {
        return Err(ValidationError::MissingFields);
    };

    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_valid_contact(&contact) {
        return Err(ValidationError::InvalidContact);
    }
    let image = image::encode(&image_raw).ok_or(ValidationError::InvalidImage)?;

    Ok(NewSchool {
        name,
        address,
        city,
        state,
        contact,
        email,
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_url() -> String {
        format!("data:image/png;base64,{}", "QUJD".repeat(30))
    }

    fn valid() -> SchoolSubmission {
        SchoolSubmission {
            name: Some("  Green Valley High ".into()),
            address: Some("12 Hill Road".into()),
            city: Some("Pune".into()),
            state: Some("Maharashtra".into()),
            contact: Some("+1 (555) 123-4567".into()),
            email: Some("office@greenvalley.edu".into()),
            image_data_url: Some(png_url()),
        }
    }

    #[test]
    fn accepts_and_trims_valid_submission() {
        let school = validate_submission(&valid()).unwrap();
        assert_eq!(school.name, "Green Valley High");
        assert_eq!(school.contact, "+1 (555) 123-4567");
        assert_eq!(school.image, png_url());
    }

    #[test]
    fn any_missing_or_blank_field_is_reported_as_missing() {
        let blankers: [fn(&mut SchoolSubmission); 7] = [
            |s: &mut SchoolSubmission| s.name = None,
            |s: &mut SchoolSubmission| s.address = Some("   ".into()),
            |s: &mut SchoolSubmission| s.city = Some(String::new()),
            |s: &mut SchoolSubmission| s.state = None,
            |s: &mut SchoolSubmission| s.contact = Some("\t".into()),
            |s: &mut SchoolSubmission| s.email = None,
            |s: &mut SchoolSubmission| s.image_data_url = Some(" \n ".into()),
        ];
        for blank in blankers {
            let mut s = valid();
            blank(&mut s);
            assert_eq!(validate_submission(&s), Err(ValidationError::MissingFields));
        }
    }

    #[test]
    fn missing_fields_wins_over_bad_email() {
        let mut s = valid();
        s.email = Some("bad".into());
        s.city = None;
        assert_eq!(validate_submission(&s), Err(ValidationError::MissingFields));
    }

    #[test]
    fn email_pattern() {
        for bad in ["a@b", "noatsign.com", "a b@c.de", "a@@b.co", "@b.co"] {
            assert!(!is_valid_email(bad), "{}", bad);
        }
        for good in ["a@b.co", "first.last@school.edu.in"] {
            assert!(is_valid_email(good), "{}", good);
        }

        let mut s = valid();
        s.email = Some("bad".into());
        assert_eq!(validate_submission(&s), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn contact_pattern() {
        for bad in ["abc", "123", "555-CALL-NOW", "1234567890123456", "12345#67"] {
            assert!(!is_valid_contact(bad), "{}", bad);
        }
        for good in ["+1 (555) 123-4567", "9876543210", "020-2345678"] {
            assert!(is_valid_contact(good), "{}", good);
        }

        let mut s = valid();
        s.contact = Some("123".into());
        assert_eq!(validate_submission(&s), Err(ValidationError::InvalidContact));
    }

    #[test]
    fn image_must_pass_encode_rule() {
        let mut s = valid();
        s.image_data_url = Some("data:image/png;base64,abc".into());
        assert_eq!(validate_submission(&s), Err(ValidationError::InvalidImage));

        s.image_data_url = Some("QUJD".repeat(30));
        assert_eq!(validate_submission(&s), Err(ValidationError::InvalidImage));
    }
}
