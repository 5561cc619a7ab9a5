use super::{entity::EntityRef, error::GitlabError, Client};
use crate::core::Request;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Role {
    #[display(fmt = "guest")]
    Guest,

    #[display(fmt = "reporter")]
    Reporter,

    #[display(fmt = "developer")]
    Developer,

    #[display(fmt = "maintainer")]
    Maintainer,

    #[display(fmt = "owner")]
    Owner,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Guest,
        Role::Reporter,
        Role::Developer,
        Role::Maintainer,
        Role::Owner,
    ];

    pub fn access_level(self) -> u8 {
        match self {
            Role::Guest => 10,
            Role::Reporter => 20,
            Role::Developer => 30,
            Role::Maintainer => 40,
            Role::Owner => 50,
        }
    }

    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join(", ")
    }
}

impl FromStr for Role {
    type Err = GitlabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "guest" => Ok(Role::Guest),
            "reporter" => Ok(Role::Reporter),
            "developer" => Ok(Role::Developer),
            "maintainer" => Ok(Role::Maintainer),
            "owner" => Ok(Role::Owner),
            _ => Err(GitlabError::InvalidRole {
                role: s.to_owned(),
                valid: Self::names(),
            }),
        }
    }
}

/// Only used for logging; membership itself is decided by the lookup status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Member {
    pub username: String,
    pub access_level: u8,
}

#[derive(Debug, Serialize)]
struct UpdateMemberBody {
    access_level: u8,
}

#[derive(Debug, Serialize)]
struct CreateMemberBody {
    user_id: u64,
    access_level: u8,
}

impl<'a> Client<'a> {
    /// 200 means a membership exists, whatever the body holds. `Ok(None)` only
    /// on 404; any other status is unexpected.
    pub async fn find_member(
        &self,
        entity: &EntityRef,
        user_id: u64,
    ) -> Result<Option<Member>, GitlabError> {
        let response = self.send(Request::get(entity.member_path(user_id))).await?;

        match response.status {
            200 => Ok(Some(response.json().unwrap_or_default())),
            404 => Ok(None),
            status => Err(GitlabError::UnexpectedResponse {
                status,
                body: response.body,
            }),
        }
    }

    pub async fn update_member(
        &self,
        entity: &EntityRef,
        user_id: u64,
        role: Role,
    ) -> Result<(), GitlabError> {
        let body = serde_json::to_value(UpdateMemberBody {
            access_level: role.access_level(),
        })?;
        let response = self.send(Request::put(entity.member_path(user_id), body)).await?;

        if !response.is_success() {
            return Err(GitlabError::RemoteFailure {
                action: "Failed to update access",
                status: response.status,
                body: response.body,
            });
        }

        Ok(())
    }

    /// GitLab answers a successful add with 201 Created.
    pub async fn add_member(
        &self,
        entity: &EntityRef,
        user_id: u64,
        role: Role,
    ) -> Result<(), GitlabError> {
        let body = serde_json::to_value(CreateMemberBody {
            user_id,
            access_level: role.access_level(),
        })?;
        let response = self.send(Request::post(entity.members_path(), body)).await?;

        if response.status != 201 {
            return Err(GitlabError::RemoteFailure {
                action: "Failed to add user",
                status: response.status,
                body: response.body,
            });
        }

        Ok(())
    }
}
