use super::{error::GitlabError, Client, API_PREFIX};
use crate::core::Request;
use crate::normalize::{format_timestamp, YearWindow};
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use derive_more::Display;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, clap::ValueEnum)]
pub enum ItemKind {
    #[display(fmt = "merge_requests")]
    #[value(name = "mr")]
    MergeRequests,

    #[display(fmt = "issues")]
    #[value(name = "issues")]
    Issues,
}

/// An issue or a merge request; both carry the fields listed here.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub id: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn display_title(&self) -> &str {
        [&self.title, &self.description]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
            .unwrap_or("(no title)")
    }
}

#[derive(Debug, Clone, Builder)]
pub struct ItemsQuery {
    kind: ItemKind,
    window: YearWindow,
}

impl ItemsQuery {
    fn request(&self, project_id: u64, page: u32, per_page: u32) -> Request {
        Request::get(format!("{API_PREFIX}/projects/{project_id}/{}", self.kind))
            .query("created_after", format_timestamp(&self.window.since))
            .query("created_before", format_timestamp(&self.window.until))
            .query("page", page)
            .query("per_page", per_page)
    }
}

impl<'a> Client<'a> {
    /// Pages through one project's items. A page that fails in any way ends
    /// the listing quietly with whatever was collected so far.
    pub async fn list_items(&self, project_id: u64, query: &ItemsQuery) -> Vec<Item> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let batch = match self.fetch_items_page(project_id, query, page).await {
                Ok(batch) => batch,
                Err(e) => {
                    warn!("{} of project {project_id}, page {page}: {e}", query.kind);
                    break;
                }
            };

            if batch.is_empty() {
                break;
            }

            items.extend(batch.into_iter().filter(|item| {
                let inside = query.window.contains(&item.created_at);

                if !inside {
                    debug!("skipping {} created at {}", item.id, item.created_at);
                }

                inside
            }));
            page += 1;
        }

        items
    }

    async fn fetch_items_page(
        &self,
        project_id: u64,
        query: &ItemsQuery,
        page: u32,
    ) -> Result<Vec<Item>, GitlabError> {
        let response = self
            .send(query.request(project_id, page, self.per_page()))
            .await?;

        if !response.is_success() {
            return Err(GitlabError::UnexpectedResponse {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response.json()?)
    }
}
