//! Image payload policy.
//!
//! Images travel and are stored as data URLs: `data:image/<subtype>;base64,<payload>`.
//! Three gates apply, from most to least strict:
//! - [`encode`] runs before insert and only lets well-formed tagged URLs through.
//! - [`decode`] runs on read-back and repairs what it reasonably can, since older
//!   rows may hold bare base64 or placeholder junk.
//! - [`is_renderable`] is the display-side check: five exact prefixes, nothing else.

use once_cell::sync::Lazy;
use regex::Regex;

/// Payloads at or below this many characters are treated as truncated or placeholder uploads.
pub const MIN_PAYLOAD_LEN: usize = 50;

/// Subtype assumed when wrapping legacy bare base64. A guess, not derived from content.
pub const LEGACY_SUBTYPE: &str = "png";

/// Image reference used by the card view when a stored image is not renderable.
pub const PLACEHOLDER_IMAGE: &str = "/school-image.png";

/// Lower-cased prefixes the display gate accepts.
pub const RENDERABLE_PREFIXES: [&str; 5] = [
    "data:image/png;base64,",
    "data:image/jpeg;base64,",
    "data:image/jpg;base64,",
    "data:image/webp;base64,",
    "data:image/gif;base64,",
];

// Longest renderable prefix is 23 characters; the head window only needs to cover it.
const RENDER_HEAD_LEN: usize = 40;

static TAGGED_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^data:image/(png|jpe?g|webp|gif);base64,").expect("valid data URL pattern")
});

static BARE_BASE64: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+/]+=*$").expect("valid base64 pattern"));

/// Returns true if `value` starts with an accepted `data:image/<subtype>;base64,` tag.
pub fn has_tagged_prefix(value: &str) -> bool {
    TAGGED_PREFIX.is_match(value)
}

/// The part of a data URL after its first comma, or `""` if there is no comma.
pub fn payload(value: &str) -> &str {
    value.split_once(',').map(|(_, p)| p).unwrap_or("")
}

fn has_real_payload(value: &str) -> bool {
    payload(value).trim().chars().count() > MIN_PAYLOAD_LEN
}

/// Normalizes a submitted data URL into the form that gets stored.
///
/// Whitespace anywhere in the input is dropped first (clients wrap long base64).
/// Returns `None` when the result is not a tagged image URL with a real payload.
pub fn encode(raw: &str) -> Option<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if has_tagged_prefix(&compact) && has_real_payload(&compact) {
        Some(compact)
    } else {
        None
    }
}

/// Reconstructs a display value from a persisted image of unknown shape.
///
/// Tagged values are returned unchanged when their payload is real. Bare base64
/// longer than [`MIN_PAYLOAD_LEN`] is wrapped as `png`, whatever it actually
/// contains. Anything else is absent.
pub fn decode(stored: Option<&str>) -> Option<String> {
    let raw = stored.filter(|v| !v.is_empty())?;

    if has_tagged_prefix(raw) {
        return has_real_payload(raw).then(|| raw.to_string());
    }

    if raw.chars().count() > MIN_PAYLOAD_LEN && BARE_BASE64.is_match(raw) {
        return Some(format!("data:image/{};base64,{}", LEGACY_SUBTYPE, raw));
    }

    None
}

/// Display-side check. Only the exact [`RENDERABLE_PREFIXES`] (compared
/// case-insensitively) with a real payload are safe to hand to an `<img>` tag.
pub fn is_renderable(src: &str) -> bool {
    let head: String = src.chars().take(RENDER_HEAD_LEN).collect::<String>().to_lowercase();
    RENDERABLE_PREFIXES.iter().any(|p| head.starts_with(p)) && has_real_payload(src)
}

/// The source a card should render: `image` when renderable, otherwise [`PLACEHOLDER_IMAGE`].
pub fn display_src(image: Option<&str>) -> &str {
    match image {
        Some(src) if is_renderable(src) => src,
        _ => PLACEHOLDER_IMAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b64(len: usize) -> String {
        "iVBORw0KGgo".chars().cycle().take(len).collect()
    }

    #[test]
    fn encode_accepts_allowed_subtypes_any_case() {
        for subtype in ["png", "jpeg", "jpg", "webp", "gif", "PNG", "JpEg"] {
            let url = format!("data:image/{};base64,{}", subtype, b64(80));
            assert_eq!(encode(&url), Some(url.clone()), "subtype {}", subtype);
        }
    }

    #[test]
    fn encode_rejects_other_subtypes_and_short_payloads() {
        assert_eq!(encode(&format!("data:image/svg+xml;base64,{}", b64(80))), None);
        assert_eq!(encode(&format!("data:text/plain;base64,{}", b64(80))), None);
        assert_eq!(encode(&format!("data:image/png;base64,{}", b64(50))), None);
        assert_eq!(encode(&b64(200)), None);
        assert_eq!(encode(""), None);
    }

    #[test]
    fn encode_strips_wrapped_whitespace() {
        let payload = b64(120);
        let wrapped = format!(
            "  data:image/png;base64,{}\n{}\r\n ",
            &payload[..60],
            &payload[60..]
        );
        assert_eq!(
            encode(&wrapped),
            Some(format!("data:image/png;base64,{}", payload))
        );
    }

    #[test]
    fn decode_of_encoded_value_is_identity() {
        let url = format!("data:image/png;base64,{}", b64(400));
        let stored = encode(&url).unwrap();
        assert_eq!(decode(Some(stored.as_str())), Some(url.clone()));
        assert_eq!(decode(Some(url.as_str())), Some(url));
    }

    #[test]
    fn decode_drops_tagged_values_with_placeholder_payloads() {
        let short = format!("data:image/jpeg;base64,{}", b64(50));
        assert_eq!(decode(Some(short.as_str())), None);
        let padded = format!("data:image/png;base64,   {}   ", b64(40));
        assert_eq!(decode(Some(padded.as_str())), None);
        assert_eq!(decode(Some("data:image/png;base64,")), None);
    }

    #[test]
    fn decode_repairs_legacy_base64_as_png() {
        // Repaired images always claim png, even when the bytes are a JPEG.
        let jpeg_magic = format!("/9j/4AAQSkZJRg{}", b64(60));
        assert_eq!(
            decode(Some(jpeg_magic.as_str())),
            Some(format!("data:image/png;base64,{}", jpeg_magic))
        );

        let padded = format!("{}==", b64(60));
        assert_eq!(
            decode(Some(padded.as_str())),
            Some(format!("data:image/png;base64,{}", padded))
        );
    }

    #[test]
    fn decode_treats_junk_as_absent() {
        assert_eq!(decode(None), None);
        assert_eq!(decode(Some("")), None);
        assert_eq!(decode(Some(b64(50).as_str())), None);
        assert_eq!(decode(Some("https://example.com/school.png")), None);
        assert_eq!(decode(Some(format!("{} {}", b64(40), b64(40)).as_str())), None);
        assert_eq!(decode(Some(format!("{}=A", b64(60)).as_str())), None);
        assert_eq!(decode(Some(format!("data:image/bmp;base64,{}", b64(80)).as_str())), None);
    }

    #[test]
    fn display_gate_is_stricter_than_decode() {
        let png = format!("data:image/png;base64,{}", b64(80));
        assert!(is_renderable(&png));
        assert_eq!(display_src(Some(png.as_str())), png);

        let upper = format!("DATA:IMAGE/GIF;BASE64,{}", b64(80));
        assert!(is_renderable(&upper));

        let short = format!("data:image/webp;base64,{}", b64(10));
        assert!(!is_renderable(&short));
        assert_eq!(display_src(Some(short.as_str())), PLACEHOLDER_IMAGE);

        assert!(!is_renderable(&b64(200)));
        assert!(!is_renderable("javascript:alert(1)"));
        assert_eq!(display_src(None), PLACEHOLDER_IMAGE);
    }
}
