use std::borrow::Cow;
use std::time::Duration;
use url::Url;

/// Connection parameters for a single remote host.
#[derive(Debug, Clone)]
pub struct Config {
    host: Url,
    auth_token: String,
    timeout: Option<Duration>,
}

impl Config {
    pub fn new(host: Url, auth_token: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            host,
            auth_token: auth_token.into(),
            timeout,
        }
    }

    pub fn host(&self) -> &Url {
        &self.host
    }

    pub fn auth_token(&self) -> Cow<str> {
        Cow::Borrowed(&self.auth_token)
    }

    /// `None` leaves the HTTP client's own default in place.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
