//! Resolution of `&#N;` character-escape placeholders in the final result
//! string. The BBQ opcode emits placeholders instead of real characters;
//! they are substituted once, after the machine halts.

use std::sync::OnceLock;

use regex::{Captures, Regex};

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| Regex::new(r"&#(\d+);").expect("placeholder pattern"))
}

/// Replace every `&#<digits>;` with the character at that code point.
/// Digits that overflow or name an invalid scalar value (surrogates,
/// beyond U+10FFFF) leave the placeholder text untouched.
pub fn resolve(text: &str) -> String {
    placeholder()
        .replace_all(text, |caps: &Captures| {
            match caps[1].parse::<u32>().ok().and_then(char::from_u32) {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_a_single_placeholder() {
        assert_eq!(resolve("&#65;"), "A");
    }

    #[test]
    fn resolves_placeholders_inside_text() {
        assert_eq!(resolve("Hello&#32;world&#33;"), "Hello world!");
    }

    #[test]
    fn resolves_code_points_beyond_ascii() {
        assert_eq!(resolve("&#129414;"), "\u{1f986}");
    }

    #[test]
    fn non_matching_text_passes_through() {
        assert_eq!(resolve("chicken"), "chicken");
        assert_eq!(resolve("&#;"), "&#;");
        assert_eq!(resolve("&#x41;"), "&#x41;");
        assert_eq!(resolve(""), "");
    }

    #[test]
    fn invalid_code_points_are_left_verbatim() {
        // Surrogate half and an overflowing code point.
        assert_eq!(resolve("&#55296;"), "&#55296;");
        assert_eq!(resolve("&#99999999999;"), "&#99999999999;");
    }
}
