use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Session info for the dashboard.
///
/// Anonymous callers receive `{"discordId":null}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub discord_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SessionDto {
    pub fn anonymous() -> Self {
        Self {
            discord_id: None,
            username: None,
            avatar: None,
            email: None,
        }
    }
}

/// Role names the caller holds in the configured guild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RolesDto {
    pub roles: Vec<String>,
}
