//! Line normalization applied to every script line and player command.

use once_cell::sync::Lazy;
use regex::Regex;

static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("space pattern must compile"));

static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]*([,;:])[ \t]*").expect("punctuation pattern must compile"));

/// Collapse whitespace, tidy separator spacing and drop trailing punctuation.
///
/// `"the cat  is on the table ."` becomes `"the cat is on the table"`.
pub fn normalize(line: &str) -> String {
    let collapsed = SPACES.replace_all(line.trim(), " ");
    let spaced = PUNCTUATION.replace_all(&collapsed, "$1 ");
    spaced
        .trim_end_matches(|c: char| matches!(c, '.' | '!' | '?' | ';' | ',') || c.is_whitespace())
        .trim_start()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  the   cat\tis  red  "), "the cat is red");
    }

    #[test]
    fn test_trims_trailing_punctuation() {
        assert_eq!(normalize("where am I?"), "where am I");
        assert_eq!(normalize("the door is locked..."), "the door is locked");
        assert_eq!(normalize("look around !"), "look around");
    }

    #[test]
    fn test_separator_spacing() {
        assert_eq!(
            normalize("if you kick the table ,the key is visible , and the cat is red."),
            "if you kick the table, the key is visible, and the cat is red"
        );
    }

    #[test]
    fn test_keeps_quotes() {
        assert_eq!(
            normalize("the bathroom says \"you win!\"."),
            "the bathroom says \"you win!\""
        );
    }

    #[test]
    fn test_only_punctuation() {
        assert_eq!(normalize(" ... "), "");
    }
}
