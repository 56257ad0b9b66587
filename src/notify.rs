//! User-facing failure classification and notification output.
//!
//! Every command failure is converted to a notification at the binary
//! boundary: the error chain verbatim, then a What/Why/Fix descriptor. No
//! failure propagates as an unhandled fault.

use crate::download::DownloadError;
use crate::parser::ParseError;
use crate::references::ReferenceError;
use crate::resolver::ResolveError;

/// Broad failure category for icons and grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    InputSource,
    Network,
    RemoteApi,
    Download,
    Other,
}

impl FailureCategory {
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::InputSource => "❌",
            Self::Network => "🌐",
            Self::RemoteApi => "📚",
            Self::Download => "⬇️",
            Self::Other => "⚠️",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::InputSource => "Input/Source",
            Self::Network => "Network",
            Self::RemoteApi => "Reference API",
            Self::Download => "Download",
            Self::Other => "Other",
        }
    }
}

/// What happened, why, and how to fix it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureDescriptor {
    pub category: FailureCategory,
    pub what: &'static str,
    pub why: &'static str,
    pub fix: &'static str,
}

/// Classifies an error into a category and descriptor, typed errors first.
#[must_use]
pub fn describe_failure(error: &anyhow::Error) -> FailureDescriptor {
    if error.downcast_ref::<ParseError>().is_some() {
        return FailureDescriptor {
            category: FailureCategory::InputSource,
            what: "Could not determine paper ID",
            why: "No extraction pattern matched the given URL or title.",
            fix: "Pass an arXiv abs/pdf URL or a bare identifier like 2508.14825.",
        };
    }

    if let Some(reference) = error.downcast_ref::<ReferenceError>() {
        return match reference {
            ReferenceError::Api { .. } | ReferenceError::Format { .. } => FailureDescriptor {
                category: FailureCategory::RemoteApi,
                what: "Could not fetch references",
                why: "The reference API rejected the request or returned an unexpected payload.",
                fix: "Verify the identifier; if it is correct, retry in a few seconds.",
            },
            ReferenceError::Network { .. } | ReferenceError::ClientConstruction { .. } => {
                FailureDescriptor {
                    category: FailureCategory::Network,
                    what: "Reference request failed",
                    why: "Connectivity, DNS, TLS, or proxy conditions interrupted the request.",
                    fix: "Check connectivity/VPN settings, then retry.",
                }
            }
        };
    }

    if let Some(download) = error.downcast_ref::<DownloadError>() {
        return match download {
            DownloadError::HttpStatus { .. } => FailureDescriptor {
                category: FailureCategory::Download,
                what: "Download refused by the server",
                why: "The server returned a non-success status for the artifact URL.",
                fix: "Verify the identifier or retry later.",
            },
            DownloadError::Io { .. } => FailureDescriptor {
                category: FailureCategory::Download,
                what: "Could not write the artifact",
                why: "The output directory rejected the write.",
                fix: "Check free disk space and directory permissions.",
            },
            _ => FailureDescriptor {
                category: FailureCategory::Network,
                what: "Download request failed",
                why: "Connectivity, DNS, TLS, or proxy conditions interrupted the request.",
                fix: "Check connectivity/VPN settings, then retry.",
            },
        };
    }

    if error.downcast_ref::<ResolveError>().is_some() {
        return FailureDescriptor {
            category: FailureCategory::Network,
            what: "Metadata fetch failed",
            why: "The paper page or metadata endpoint could not be reached.",
            fix: "Check connectivity and retry; the URL may also be stale.",
        };
    }

    FailureDescriptor {
        category: FailureCategory::Other,
        what: "Unhandled failure",
        why: "The error did not match a known category and needs closer inspection.",
        fix: "Rerun with -v and inspect the logs.",
    }
}

/// Prints a user-facing success or status notification.
pub fn notify(title: &str, message: &str) {
    println!("{title}: {message}");
}

/// Prints a failure notification for a command error.
pub fn notify_failure(error: &anyhow::Error) {
    let descriptor = describe_failure(error);
    eprintln!("{} {error:#}", descriptor.category.icon());
    eprintln!(
        "What: {}\nWhy: {}\nFix: {}",
        descriptor.what, descriptor.why, descriptor.fix
    );
}
