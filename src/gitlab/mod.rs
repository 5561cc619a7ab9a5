pub mod entity;
pub mod error;
pub mod item;
pub mod member;
pub mod project;
pub mod user;

use crate::core::{Request, Response, Transport};
use error::GitlabError;

pub const API_PREFIX: &str = "/api/v4";

/// Page size GitLab accepts at most.
pub const MAX_PER_PAGE: u32 = 100;

pub struct Client<'a> {
    transport: &'a dyn Transport,
    per_page: u32,
}

impl<'a> Client<'a> {
    pub fn new(transport: &'a dyn Transport, per_page: u32) -> Self {
        Self {
            transport,
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub(crate) async fn send(&self, request: Request) -> Result<Response, GitlabError> {
        Ok(self.transport.send(request).await?)
    }
}
