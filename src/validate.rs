//! Checks whether a play URL resolves to a live, non-parked page.

use log::*;
use reqwest::{redirect, Client, StatusCode};
use std::time::Duration;

/// The user agent checks identify as. Game hosts routinely turn away
/// obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, \
                          like Gecko) Chrome/111.0.0.0 Safari/537.36";
/// Per-request timeout.
const TIMEOUT: Duration = Duration::from_secs(5);
/// How many redirects to follow before giving up.
const MAX_REDIRECTS: usize = 5;
/// Response fingerprints of known domain-parking pages. A parked domain
/// responds 200 but the game is long gone.
const PARKED_FINGERPRINTS: &[&str] = &["Porkbun Marketplace"];

/// The verdict for a single URL, along with the response body for downstream
/// text classification.
#[derive(Debug)]
pub struct UrlCheck {
    /// Whether the URL resolved to something that looks alive.
    pub valid: bool,
    /// The response body. Empty when the check failed.
    pub body: String,
}

impl UrlCheck {
    fn valid(body: String) -> Self {
        Self { valid: true, body }
    }

    fn invalid() -> Self {
        Self {
            valid: false,
            body: String::new(),
        }
    }
}

/// Wraps an HTTP client configured for link validation.
#[derive(Debug)]
pub struct UrlValidator {
    client: Client,
}

impl UrlValidator {
    /// Returns a new validator.
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client })
    }

    /// Checks a single URL. The empty string is the "no link" sentinel and
    /// counts as valid. Every failure mode reduces to an invalid verdict,
    /// a dead link is a data point, not an error.
    pub async fn check(&self, url: &str) -> UrlCheck {
        if url.is_empty() {
            return UrlCheck::valid(String::new());
        }

        match self.fetch(url).await {
            Ok(check) => check,
            Err(err) => {
                info!("Invalid URL ({}): {}", err, url);
                UrlCheck::invalid()
            }
        }
    }

    async fn fetch(&self, url: &str) -> anyhow::Result<UrlCheck> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !acceptable(status) {
            info!("Invalid URL (status {}): {}", status, url);
            return Ok(UrlCheck::invalid());
        }

        let body = response.text().await?;
        if body.is_empty() {
            info!("Invalid URL (empty response body): {}", url);
            return Ok(UrlCheck::invalid());
        }
        if let Some(fingerprint) = PARKED_FINGERPRINTS.iter().find(|f| body.contains(*f)) {
            info!("Invalid URL (parked domain, '{}'): {}", fingerprint, url);
            return Ok(UrlCheck::invalid());
        }

        Ok(UrlCheck::valid(body))
    }
}

/// Any status in [200, 400) is acceptable, including redirects the policy
/// didn't chase to the end.
fn acceptable(status: StatusCode) -> bool {
    status.is_success() || status.is_redirection()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_url_is_the_valid_sentinel() {
        let validator = UrlValidator::new().unwrap();
        let check = validator.check("").await;
        assert!(check.valid);
        assert!(check.body.is_empty());
    }

    #[test]
    fn acceptable_statuses() {
        assert!(acceptable(StatusCode::OK));
        assert!(acceptable(StatusCode::NO_CONTENT));
        assert!(acceptable(StatusCode::MOVED_PERMANENTLY));
        assert!(!acceptable(StatusCode::NOT_FOUND));
        assert!(!acceptable(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
