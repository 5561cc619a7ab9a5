//! In-memory [`Transport`] with scripted responses. Every request is recorded
//! so tests can assert on exactly which calls were issued.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use super::{Method, Request, Response, Transport};

struct Route {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    response: Response,
}

impl Route {
    fn matches(&self, request: &Request) -> bool {
        self.method == request.method
            && self.path == request.path
            && self
                .query
                .iter()
                .all(|(k, v)| request.query_param(k) == Some(v.as_str()))
    }
}

#[derive(Default)]
pub struct MockTransport {
    routes: Vec<Route>,
    calls: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes are matched in registration order; unmatched requests get a 404.
    pub fn on(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.on_query(method, path, &[], status, body)
    }

    pub fn on_query(
        mut self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        status: u16,
        body: Value,
    ) -> Self {
        self.routes.push(Route {
            method,
            path: path.to_owned(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            response: Response {
                status,
                body: body.to_string(),
            },
        });
        self
    }

    pub fn calls(&self) -> Vec<Request> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn calls_with(&self, method: Method) -> Vec<Request> {
        self.calls()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        let response = self
            .routes
            .iter()
            .find(|route| route.matches(&request))
            .map(|route| route.response.clone())
            .unwrap_or_else(|| Response {
                status: 404,
                body: json!({ "message": "404 Not found" }).to_string(),
            });

        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        Ok(response)
    }
}
