use std::sync::LazyLock;

use regex::Regex;

use crate::models::event::PLACEHOLDER_TITLE;

/// Organisation name the source prints in every item.
pub const ORGANIZATION_PHRASE: &str = "Správa sportovišť";

static TIME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}:[0-9]{2}$").expect("valid time token regex"));

/// Item text reads `start - end - organisation - activity`; the activity is the
/// last dash segment left after dropping times and the organisation name.
/// Activity names with their own dashes keep only their last part.
pub fn infer_title(text: &str) -> String {
    text.split('-')
        .map(str::trim)
        .rfind(|part| {
            !part.is_empty() && !TIME_TOKEN.is_match(part) && !part.contains(ORGANIZATION_PHRASE)
        })
        .unwrap_or(PLACEHOLDER_TITLE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_format_yields_activity() {
        assert_eq!(
            infer_title("16:00 - 17:30- Správa sportovišť města Žamberk-veřejné bruslení"),
            "veřejné bruslení"
        );
    }

    #[test]
    fn activity_is_trimmed() {
        assert_eq!(
            infer_title("  9:00 - 10:15- Správa sportovišť města Žamberk-   Hokej HC  \n"),
            "Hokej HC"
        );
    }

    #[test]
    fn nothing_left_gives_placeholder() {
        assert_eq!(infer_title(""), "-");
        assert_eq!(infer_title("16:00 - 17:30"), "-");
        assert_eq!(infer_title("8:00 - - Správa sportovišť"), "-");
    }

    #[test]
    fn internal_dash_keeps_last_segment() {
        assert_eq!(
            infer_title("16:00 - 17:30- Správa sportovišť-Bruslení rodiče-děti"),
            "děti"
        );
    }

    #[test]
    fn time_like_text_inside_a_segment_is_kept() {
        assert_eq!(infer_title("16:00 - Turnaj 2:1"), "Turnaj 2:1");
    }

    #[test]
    fn non_ascii_digits_are_not_time_tokens() {
        assert_eq!(infer_title("16:00 - ١٦:٠٠"), "١٦:٠٠");
        assert_eq!(infer_title("16:00 - Správa sportovišť - ١٦:٠٠"), "١٦:٠٠");
    }
}
