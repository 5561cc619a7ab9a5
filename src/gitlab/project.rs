use super::{error::GitlabError, Client, API_PREFIX};
use crate::core::Request;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: u64,
    pub path_with_namespace: String,
}

impl<'a> Client<'a> {
    /// Walks every page of projects visible to the token until an empty page.
    /// A failure on any page aborts the whole listing.
    pub async fn list_projects(&self) -> Result<Vec<Project>, GitlabError> {
        let mut projects = Vec::new();
        let mut page = 1;

        loop {
            let request = Request::get(format!("{API_PREFIX}/projects"))
                .query("page", page)
                .query("per_page", self.per_page());
            let response = self.send(request).await?;

            if !response.is_success() {
                return Err(GitlabError::RemoteFailure {
                    action: "Failed to fetch projects",
                    status: response.status,
                    body: response.body,
                });
            }

            let batch: Vec<Project> = response.json()?;

            if batch.is_empty() {
                break;
            }

            info!("projects page {page}: {}", batch.len());

            projects.extend(batch);
            page += 1;
        }

        Ok(projects)
    }
}
