use regex::Regex;

/// Literal character substitutions applied to every translated string.
///
/// LaTeX-significant characters are escaped and two glyphs the site uses for
/// struck-through text and scene dividers are rendered as dashes. Applied
/// once per key, left to right; replacement text never reintroduces a key
/// character, so no re-substitution loop is needed.
const REPLACEMENT_CHARACTERS: [(&str, &str); 7] = [
    ("\u{0336}", "---"),
    ("\u{2501}", "-"),
    ("&", "\\&"),
    ("$", "\\$"),
    ("_", "\\_"),
    ("#", "\\#"),
    ("~", "\\textasciitilde"),
];

/// Ordered spacing/punctuation normalizations for the opt-in cleanup pass.
///
/// Each substitution is applied to the output of the previous one; the order
/// is part of the contract.
const CLEANUP_REPLACEMENTS: [(&str, &str); 4] = [
    // Collapse whitespace around an emphasis-open token into one leading space.
    (r"[^\S\r\n]+(\\emph\{)[^\S\r\n]+", " $1"),
    // Collapse whitespace around a closing brace into one trailing space.
    (r"[^\S\r\n]+\}[^\S\r\n]+", "} "),
    // Remove whitespace before sentence punctuation.
    (r"[^\S\r\n]+([,.?!:])", "$1"),
    // Remove whitespace between a closing quote and an emphasis-open token.
    (r#"(")[^\S\r\n]+(\\emph\{)"#, "$1$2"),
];

/// Configuration for post-processing translated output.
#[derive(Debug, Clone, Default)]
pub struct PostProcessConfig {
    /// Whether to run the spacing/punctuation cleanup pass.
    pub cleanup: bool,
}

/// Post-process a translated string: the escaping pass always runs, the
/// cleanup pass only when enabled. Chapter title and body are processed
/// identically.
pub fn postprocess(text: &str, config: &PostProcessConfig) -> String {
    let escaped = escape_latex(text);

    if config.cleanup { cleanup_spacing(&escaped) } else { escaped }
}

/// Replace LaTeX-significant characters and special glyphs with their
/// markup-safe equivalents.
///
/// Not idempotent by design: the replacement text contains `\` and `{`,
/// which are not in the key set, so a second pass would find nothing to
/// replace in correct input but would double-escape text that already
/// contained literal backslash sequences.
pub fn escape_latex(text: &str) -> String {
    REPLACEMENT_CHARACTERS
        .iter()
        .fold(text.to_string(), |acc, (key, value)| acc.replace(key, value))
}

/// Apply the ordered cleanup substitutions, strictly in list order.
pub fn cleanup_spacing(text: &str) -> String {
    CLEANUP_REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            Regex::new(pattern).unwrap().replace_all(&acc, *replacement).to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("\u{0336}", "---")]
    #[case("\u{2501}", "-")]
    #[case("&", "\\&")]
    #[case("$", "\\$")]
    #[case("_", "\\_")]
    #[case("#", "\\#")]
    #[case("~", "\\textasciitilde")]
    fn test_escape_table_single_pass(#[case] raw: &str, #[case] escaped: &str) {
        assert_eq!(escape_latex(raw), escaped);
    }

    #[test]
    fn test_escape_replaces_every_occurrence() {
        assert_eq!(escape_latex("a & b & c"), "a \\& b \\& c");
    }

    #[test]
    fn test_escape_leaves_safe_text_alone() {
        assert_eq!(escape_latex("nothing special"), "nothing special");
    }

    #[test]
    fn test_escape_mixed_characters() {
        assert_eq!(escape_latex("cost: $5 & #1"), "cost: \\$5 \\& \\#1");
    }

    #[test]
    fn test_cleanup_removes_space_before_punctuation() {
        assert_eq!(cleanup_spacing("He said , again"), "He said, again");
        assert_eq!(cleanup_spacing("wait !"), "wait!");
    }

    #[test]
    fn test_cleanup_collapses_space_around_emph_open() {
        assert_eq!(cleanup_spacing("a  \\emph{ b}"), "a \\emph{b}");
    }

    #[test]
    fn test_cleanup_collapses_space_around_closing_brace() {
        assert_eq!(cleanup_spacing("\\emph{a }  b"), "\\emph{a} b");
    }

    #[test]
    fn test_cleanup_joins_quote_and_emph() {
        assert_eq!(cleanup_spacing("\" \\emph{hi}"), "\"\\emph{hi}");
    }

    #[test]
    fn test_cleanup_ordered_rules_end_to_end() {
        // Rule 3 tightens the comma, then rule 4 closes the gap between the
        // quote and the emphasis-open token.
        let input = "He said , \" \\emph{hi}";
        assert_eq!(cleanup_spacing(input), "He said, \"\\emph{hi}");
    }

    #[test]
    fn test_cleanup_preserves_newlines() {
        // The character classes exclude \r\n, so paragraph breaks survive.
        assert_eq!(cleanup_spacing("a\n, b"), "a\n, b");
        assert_eq!(cleanup_spacing("line one\nline two"), "line one\nline two");
    }

    #[test]
    fn test_postprocess_without_cleanup() {
        let config = PostProcessConfig::default();
        assert_eq!(postprocess("a & b ,", &config), "a \\& b ,");
    }

    #[test]
    fn test_postprocess_with_cleanup() {
        let config = PostProcessConfig { cleanup: true };
        assert_eq!(postprocess("a & b ,", &config), "a \\& b,");
    }
}
