//! CSV rendering for reference lists.
//!
//! Standard CSV quoting: any field containing a comma, quote, or newline is
//! wrapped in double quotes with internal quotes doubled. Missing fields
//! render as empty strings; output ends with a trailing newline.

use super::ReferenceEntry;

/// Fixed header row.
const CSV_HEADER: &str = "Title,Year,DOI,arXiv,URL";

/// Renders the reference list as CSV text.
#[must_use]
pub fn render_references_csv(references: &[ReferenceEntry]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for entry in references {
        let year = entry.year.map(|y| y.to_string()).unwrap_or_default();
        let columns = [
            entry.title.as_deref().unwrap_or(""),
            &year,
            entry.doi.as_deref().unwrap_or(""),
            entry.arxiv.as_deref().unwrap_or(""),
            &entry.url,
        ];
        for (index, column) in columns.iter().enumerate() {
            if index > 0 {
                out.push(',');
            }
            push_escaped(&mut out, column);
        }
        out.push('\n');
    }
    out
}

fn push_escaped(out: &mut String, value: &str) {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        out.push('"');
        out.push_str(&value.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(value);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(title: Option<&str>, year: Option<i64>, url: &str) -> ReferenceEntry {
        ReferenceEntry {
            title: title.map(ToString::to_string),
            year,
            url: url.to_string(),
            doi: None,
            arxiv: None,
        }
    }

    #[test]
    fn test_csv_header_and_trailing_newline() {
        let csv = render_references_csv(&[entry(Some("Plain"), Some(2020), "https://x")]);
        assert!(csv.starts_with("Title,Year,DOI,arXiv,URL\n"));
        assert!(csv.ends_with('\n'));
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_csv_missing_fields_render_empty() {
        let csv = render_references_csv(&[entry(None, None, "")]);
        assert_eq!(csv, "Title,Year,DOI,arXiv,URL\n,,,,\n");
    }

    #[test]
    fn test_csv_quotes_comma_and_doubles_internal_quotes() {
        let csv = render_references_csv(&[entry(
            Some(r#"Attention, "Fast" and Slow"#),
            Some(2019),
            "https://x",
        )]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, r#""Attention, ""Fast"" and Slow",2019,,,https://x"#);
    }

    #[test]
    fn test_csv_round_trip_of_quoted_field() {
        let original = r#"Attention, "Fast" and Slow"#;
        let csv = render_references_csv(&[entry(Some(original), None, "")]);
        let row = csv.lines().nth(1).unwrap();

        // Recover the first field by the CSV quoting rule
        let inner = row
            .strip_prefix('"')
            .and_then(|rest| rest.rfind("\",").map(|end| &rest[..end]))
            .unwrap();
        assert_eq!(inner.replace("\"\"", "\""), original);
    }

    #[test]
    fn test_csv_newline_in_field_is_quoted() {
        let csv = render_references_csv(&[entry(Some("Line1\nLine2"), None, "")]);
        assert!(csv.contains("\"Line1\nLine2\""));
    }
}
