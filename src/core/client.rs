use anyhow::Result;
use async_trait::async_trait;
use colored_json::to_colored_json_auto;
use reqwest::header;
use tracing::debug;
use super::config::Config;
use super::{Method, Request, Response, Transport};

pub struct Client<'a> {
    http_client: reqwest::Client,
    config: &'a Config,
}

impl<'a> Client<'a> {
    pub fn new(config: &'a Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .default_headers(Self::default_headers(config)?);

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            config,
        })
    }

    fn default_headers(config: &Config) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();

        let mut token = header::HeaderValue::from_str(&config.auth_token())?;
        token.set_sensitive(true);
        headers.insert(header::HeaderName::from_static("private-token"), token);

        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Appends `path` to the host, so a host mounted under a sub-path keeps it.
    /// Percent-encoded segments such as `%2F` are preserved.
    pub fn url(&self, path: &str) -> Result<reqwest::Url> {
        let host = self.config.host().as_str().trim_end_matches('/');

        reqwest::Url::parse(&format!("{host}{path}")).map_err(anyhow::Error::new)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
        }
    }
}

#[async_trait]
impl<'a> Transport for Client<'a> {
    async fn send(&self, request: Request) -> Result<Response> {
        let u = self.url(&request.path)?;

        debug!("{} {u} {:?}", request.method, request.query);

        let mut builder = self
            .http_client
            .request(request.method.into(), u)
            .query(&request.query);

        if let Some(body) = &request.body {
            #[cfg(windows)]
            let _enabled = colored_json::enable_ansi_support();

            debug!("{}", to_colored_json_auto(body)?);

            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("{status}");

        Ok(Response { status, body })
    }
}
