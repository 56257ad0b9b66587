//! Artifact filename construction and sanitization.
//!
//! Filenames follow the pattern `"{id} {title}{suffix}"` after cleanup, and
//! are bounded to 220 characters with the extension preserved. Collisions
//! are left to [`resolve_unique_path`]'s numeric-suffix uniquify behavior.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::text::{collapse_whitespace, compile_static_regex};

/// Maximum filename length in characters, including the extension.
const MAX_FILENAME_CHARS: usize = 220;

static COLON_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r":\s*"));

static ILLEGAL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r#"[<>:"/\\|?*\x00-\x1f]"#));

static DOT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"\.{2,}"));

/// The kind of artifact a filename is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// The paper PDF itself.
    Pdf,
    /// Reference list as CSV.
    ReferencesCsv,
    /// Reference list as JSON.
    ReferencesJson,
}

impl ArtifactKind {
    /// Filename suffix appended after the title.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::ReferencesCsv => " - references.csv",
            Self::ReferencesJson => " - references.json",
        }
    }

    /// The bare file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::ReferencesCsv => ".csv",
            Self::ReferencesJson => ".json",
        }
    }
}

/// Builds a sanitized, length-bounded filename for an artifact.
///
/// Colon sequences become `". "` (a stylistic rule, not an escaping
/// necessity); characters illegal in filenames and control characters are
/// stripped; whitespace is collapsed; an empty cleaned title falls back to
/// the identifier.
#[must_use]
pub fn build_filename(paper_id: &str, raw_title: &str, kind: ArtifactKind) -> String {
    let title = COLON_RE.replace_all(raw_title, ". ");
    let title = ILLEGAL_RE.replace_all(&title, "");
    let mut title = collapse_whitespace(&title);
    if title.is_empty() {
        title = paper_id.to_string();
    }

    let name = format!("{paper_id} {title}{}", kind.suffix());
    let name = DOT_RUN_RE.replace_all(&name, ".").into_owned();
    let name = strip_trailing_junk_before_extension(name, kind.extension());
    truncate_to_limit(name, kind.extension())
}

fn strip_trailing_junk_before_extension(name: String, extension: &str) -> String {
    let Some(stem) = name.strip_suffix(extension) else {
        return name;
    };
    let trimmed = stem.trim_end_matches(|c: char| c.is_whitespace() || c == '.');
    if trimmed.len() == stem.len() {
        name
    } else {
        format!("{trimmed}{extension}")
    }
}

fn truncate_to_limit(name: String, extension: &str) -> String {
    if name.chars().count() <= MAX_FILENAME_CHARS {
        return name;
    }
    let keep = MAX_FILENAME_CHARS - extension.len();
    let stem: String = name.chars().take(keep).collect();
    let stem = stem.trim_end_matches(|c: char| c.is_whitespace() || c == '.');
    format!("{stem}{extension}")
}

/// Sanitizes a filename for filesystem safety.
///
/// Replaces characters invalid on common filesystems and rewrites dot-only
/// segments so a name can never escape the output directory.
#[must_use]
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

/// Resolves a unique file path, adding a numeric suffix if the file exists.
///
/// Mirrors a download manager's uniquify behavior: `name.pdf`, `name_1.pdf`,
/// `name_2.pdf`, ...
#[must_use]
pub(crate) fn resolve_unique_path(dir: &Path, filename: &str) -> PathBuf {
    let filename = {
        let sanitized = sanitize_filename(filename);
        if sanitized.contains('/')
            || sanitized.contains('\\')
            || sanitized.trim_matches('_').is_empty()
        {
            "download.bin".to_string()
        } else {
            sanitized
        }
    };
    let base_path = dir.join(&filename);

    if !base_path.exists() {
        return base_path;
    }

    let (stem, ext) = match filename.rfind('.') {
        Some(pos) => (&filename[..pos], &filename[pos..]),
        None => (filename.as_str(), ""),
    };

    for i in 1..10_000 {
        let candidate = dir.join(format!("{stem}_{i}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
    }

    // Extremely unlikely; at this point overwrite the base name
    base_path
}

/// Fallback filename derived from a URL's last path segment.
#[must_use]
pub(crate) fn fallback_filename_from_url(url: &Url) -> String {
    if let Some(mut segments) = url.path_segments()
        && let Some(last) = segments.next_back()
        && !last.is_empty()
    {
        return sanitize_filename(last);
    }
    "download.bin".to_string()
}
