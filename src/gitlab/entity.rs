use super::{error::GitlabError, Client, API_PREFIX};
use crate::core::Request;
use crate::normalize::encode_path;
use derive_more::Display;
use serde::Deserialize;
use tracing::debug;

/// The two kinds of access-controlled containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EntityKind {
    #[display(fmt = "project")]
    Project,

    #[display(fmt = "group")]
    Group,
}

impl EntityKind {
    /// A path that names both a project and a group resolves to the project.
    pub const LOOKUP_ORDER: [EntityKind; 2] = [EntityKind::Project, EntityKind::Group];

    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Project => "projects",
            EntityKind::Group => "groups",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRef {
    pub id: u64,
    pub kind: EntityKind,
}

impl EntityRef {
    pub fn members_path(&self) -> String {
        format!("{API_PREFIX}/{}/{}/members", self.kind.collection(), self.id)
    }

    pub fn member_path(&self, user_id: u64) -> String {
        format!("{}/{user_id}", self.members_path())
    }
}

#[derive(Debug, Deserialize)]
struct Entity {
    id: u64,
}

impl<'a> Client<'a> {
    pub async fn resolve_entity(&self, path: &str) -> Result<EntityRef, GitlabError> {
        for kind in EntityKind::LOOKUP_ORDER {
            let url = format!("{API_PREFIX}/{}/{}", kind.collection(), encode_path(path));
            let response = self.send(Request::get(url)).await?;

            if response.is_success() {
                let entity: Entity = response.json()?;

                return Ok(EntityRef { id: entity.id, kind });
            }

            debug!("no {kind} at {path}: {}", response.status);
        }

        Err(GitlabError::EntityNotFound(path.to_owned()))
    }
}
