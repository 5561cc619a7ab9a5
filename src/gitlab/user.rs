use super::{error::GitlabError, Client, API_PREFIX};
use crate::core::Request;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
}

impl<'a> Client<'a> {
    /// Usernames are unique, so the first match is the user. A failed lookup
    /// counts as not found.
    pub async fn resolve_user(&self, username: &str) -> Result<User, GitlabError> {
        let request = Request::get(format!("{API_PREFIX}/users")).query("username", username);
        let response = self.send(request).await?;

        if !response.is_success() {
            debug!("user lookup for {username} returned {}", response.status);
            return Err(GitlabError::UserNotFound(username.to_owned()));
        }

        let users: Vec<User> = response.json()?;

        users
            .into_iter()
            .next()
            .ok_or_else(|| GitlabError::UserNotFound(username.to_owned()))
    }
}
