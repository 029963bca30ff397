//! Control Center access data and its validation.
//!
//! Pure functions only. Zero imports from `tokio`, `std::fs`, `crate::infra`,
//! `crate::commands`, or `crate::application`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::ValidationError;

/// Absolute `http`/`https` URL: scheme, host (DNS name, `localhost` or IPv4),
/// optional port, optional path.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(
        r"(?i)^https?://(?P<host>(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}\.?|localhost|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?::(?P<port>\d{1,5}))?(?:[/?#]\S*)?$",
    )
    .expect("valid regex")
});

/// Credentials used to talk to the Control Center.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccessData {
    pub url: String,
    pub login: String,
    pub password: String,
}

impl AccessData {
    #[must_use]
    pub fn new(url: impl Into<String>, login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            login: login.into(),
            password: password.into(),
        }
    }

    /// Base URL with any trailing slash removed, used to build endpoints.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }
}

// The password must never reach the logs.
impl fmt::Debug for AccessData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessData")
            .field("url", &self.url)
            .field("login", &self.login)
            .field("password", &"********")
            .finish()
    }
}

/// Returns `true` when `url` is an absolute `http`/`https` URL with a host.
#[must_use]
pub fn is_url(url: &str) -> bool {
    URL_RE.is_match(url.trim())
}

/// Host part of a well-formed URL, lower-cased.
#[must_use]
pub fn url_host(url: &str) -> Option<String> {
    URL_RE
        .captures(url.trim())
        .and_then(|c| c.name("host"))
        .map(|m| m.as_str().trim_end_matches('.').to_ascii_lowercase())
}

/// Checks every field of `access` in the order the user fills them in.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate_access_data(access: &AccessData) -> Result<(), ValidationError> {
    if access.url.trim().is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if !is_url(&access.url) {
        return Err(ValidationError::MalformedUrl(access.url.clone()));
    }
    if access.login.trim().is_empty() {
        return Err(ValidationError::EmptyLogin);
    }
    if access.password.trim().is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    Ok(())
}

/// Management (Chef) server URL derived from the Control Center URL:
/// same host, `https`, default port, trailing slash.
#[must_use]
pub fn management_server_url(access: &AccessData) -> Option<String> {
    url_host(&access.url).map(|host| format!("https://{host}/"))
}
