//! Error conversion utilities for CLI.
//!
//! Converts tgrab-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use tgrab_core::FetchError;

/// Converts a `FetchError` to a user-friendly anyhow error with context.
pub fn convert_fetch_error(err: FetchError) -> anyhow::Error {
    match err {
        FetchError::Api { url, status } if status == 401 || status == 403 => {
            anyhow!(
                "Helpdesk rejected the credentials (status {status}) for {url}\n\
                 HINT: Check --mail and --password; pass --token instead if the secret is an API token."
            )
        }
        FetchError::Api { url, status } if status == 429 => {
            anyhow!(
                "Helpdesk rate limit hit (status 429) for {url}\n\
                 HINT: Wait a minute and re-run; already-downloaded attachments are skipped."
            )
        }
        FetchError::Api { url, status } => {
            anyhow!("Request to {url} failed with status {status}")
        }
        FetchError::InvalidUrl { url, reason } => {
            anyhow!(
                "Helpdesk URL {url:?} is not usable: {reason}\n\
                 HINT: Expected something like https://example.zendesk.com"
            )
        }
        FetchError::Http(e) => anyhow::Error::from(e).context("helpdesk request failed"),
        other => anyhow::Error::from(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_has_hint() {
        let err = FetchError::Api {
            url: "https://example.zendesk.com/api/v2/search.json".to_string(),
            status: 401,
        };
        let msg = format!("{:?}", convert_fetch_error(err));
        assert!(msg.contains("401"));
        assert!(msg.contains("HINT"));
        assert!(msg.contains("--token"));
    }

    #[test]
    fn test_rate_limit_mentions_rerun() {
        let err = FetchError::Api {
            url: "https://example.zendesk.com/api/v2/tickets/1/audits.json".to_string(),
            status: 429,
        };
        let msg = format!("{:?}", convert_fetch_error(err));
        assert!(msg.contains("re-run"));
    }

    #[test]
    fn test_invalid_url_shows_example() {
        let err = FetchError::InvalidUrl {
            url: "example.zendesk.com".to_string(),
            reason: "expected an http(s) URL".to_string(),
        };
        let msg = format!("{:?}", convert_fetch_error(err));
        assert!(msg.contains("https://example.zendesk.com"));
    }

    #[test]
    fn test_other_statuses_pass_through() {
        let err = FetchError::Api {
            url: "https://example.zendesk.com/x".to_string(),
            status: 500,
        };
        let msg = format!("{:?}", convert_fetch_error(err));
        assert!(msg.contains("500"));
        assert!(!msg.contains("HINT"));
    }
}
