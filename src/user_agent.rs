//! Shared User-Agent string for outbound HTTP clients.
//!
//! Single source for project URL and UA format so metadata, reference, and
//! download traffic stay consistent and easy to update (RFC 9308).

/// Project URL for User-Agent identification (RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/arxiv-saver";

/// Default User-Agent for all outbound requests.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("arxiv-saver/{version} (research-tool; +{PROJECT_UA_URL})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_contains_version_and_project_url() {
        let ua = default_user_agent();
        assert!(ua.contains(PROJECT_UA_URL), "UA must contain project URL");
        assert_eq!(
            env!("CARGO_PKG_VERSION"),
            ua.strip_prefix("arxiv-saver/")
                .and_then(|s| s.split(' ').next())
                .unwrap_or_default(),
            "UA must contain crate version"
        );
        assert!(ua.contains("research-tool"), "UA must identify as research-tool");
    }
}
