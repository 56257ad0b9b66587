//! Text normalization shared by title parsing and page scraping.
//!
//! Scraped HTML/Atom text passes through entity decoding and whitespace
//! collapse before it is used anywhere (filenames, exports, display).

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Compiles a regex at static init; panics on invalid pattern.
pub(crate) fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"&(#\d+|#x[0-9a-fA-F]+|amp|lt|gt|quot|#39);"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"\s+"));

static ARXIV_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?i)\s*-\s*arXiv.*$"));

/// Decodes the named entities `&amp; &lt; &gt; &quot; &#39;` plus numeric and
/// hex character references. Unknown or invalid references are left as-is.
#[must_use]
pub fn decode_entities(value: &str) -> String {
    ENTITY_RE
        .replace_all(value, |caps: &Captures<'_>| {
            let token = &caps[1];
            match token {
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "#39" => "'".to_string(),
                _ => decode_numeric(token).unwrap_or_else(|| caps[0].to_string()),
            }
        })
        .into_owned()
}

fn decode_numeric(token: &str) -> Option<String> {
    let code = if let Some(hex) = token.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        token.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code).map(|c| c.to_string())
}

/// Collapses whitespace runs to single spaces and trims.
#[must_use]
pub fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_RE.replace_all(value, " ").trim().to_string()
}

/// Strips a trailing `- arXiv...` suffix that arXiv appends to page titles.
#[must_use]
pub fn strip_arxiv_suffix(value: &str) -> String {
    ARXIV_SUFFIX_RE.replace(value, "").trim().to_string()
}

/// Full normalization for scraped text: entity decode, then whitespace collapse.
#[must_use]
pub fn normalize_scraped_text(value: &str) -> String {
    collapse_whitespace(&decode_entities(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entities_named() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("&quot;x&quot;"), "\"x\"");
        assert_eq!(decode_entities("it&#39;s"), "it's");
    }

    #[test]
    fn test_decode_entities_numeric_and_hex() {
        assert_eq!(decode_entities("&#65;"), "A");
        assert_eq!(decode_entities("&#x41;"), "A");
        assert_eq!(decode_entities("&#x2013;"), "\u{2013}");
    }

    #[test]
    fn test_decode_entities_invalid_reference_left_as_is() {
        // Surrogate code point cannot be a char; the reference stays verbatim
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&unknown;"), "&unknown;");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(collapse_whitespace("\n"), "");
    }

    #[test]
    fn test_strip_arxiv_suffix_variants() {
        assert_eq!(strip_arxiv_suffix("Deep Learning - arXiv.org"), "Deep Learning");
        assert_eq!(strip_arxiv_suffix("Deep Learning - arXiv"), "Deep Learning");
        assert_eq!(strip_arxiv_suffix("Deep Learning"), "Deep Learning");
    }

    #[test]
    fn test_strip_arxiv_suffix_case_insensitive() {
        assert_eq!(strip_arxiv_suffix("Title - ARXIV e-prints"), "Title");
    }

    #[test]
    fn test_normalize_scraped_text_decodes_then_collapses() {
        assert_eq!(
            normalize_scraped_text("Graphs &amp;\n  Kernels"),
            "Graphs & Kernels"
        );
    }
}
