//! Create-or-update of a user's role on a project or group.
//!
//! GitLab has separate endpoints for changing an existing membership and for
//! adding a new one, so the membership is looked up first and exactly one of
//! the two writes follows. Someone else may change the membership between the
//! lookup and the write; the API offers no single call that avoids that.

use crate::gitlab::{
    entity::{EntityKind, EntityRef},
    error::GitlabError,
    member::Role,
    Client,
};
use derive_more::Display;
use std::io::Write;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Outcome {
    #[display(
        fmt = "Access level for '{}' in {} '{}' updated to '{}'.",
        username, kind, entity, role
    )]
    Updated {
        username: String,
        kind: EntityKind,
        entity: String,
        role: Role,
    },

    #[display(
        fmt = "User '{}' added to {} '{}' with role '{}'.",
        username, kind, entity, role
    )]
    Added {
        username: String,
        kind: EntityKind,
        entity: String,
        role: Role,
    },
}

/// The role is validated before any request goes out.
pub async fn assign_role<W: Write>(
    client: &Client<'_>,
    username: &str,
    entity_name: &str,
    role: &str,
    out: &mut W,
) -> Result<Outcome, GitlabError> {
    let role: Role = role.parse()?;
    let user = client.resolve_user(username).await?;
    let entity: EntityRef = client.resolve_entity(entity_name).await?;

    debug!("{} ({}) -> {:?}, access level {}", user.username, user.id, entity, role.access_level());

    let kind = entity.kind;
    let username = username.to_owned();
    let entity_name = entity_name.to_owned();

    match client.find_member(&entity, user.id).await? {
        Some(member) => {
            debug!("{} currently at access level {}", member.username, member.access_level);

            client.update_member(&entity, user.id, role).await?;

            Ok(Outcome::Updated {
                username,
                kind,
                entity: entity_name,
                role,
            })
        }
        None => {
            writeln!(
                out,
                "User '{username}' is not a member of {kind} '{entity_name}'. Adding..."
            )?;

            client.add_member(&entity, user.id, role).await?;

            Ok(Outcome::Added {
                username,
                kind,
                entity: entity_name,
                role,
            })
        }
    }
}
