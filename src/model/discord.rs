use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/discord/create-structure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateStructureDto {
    #[serde(default)]
    pub categories: Vec<CategorySpecDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorySpecDto {
    pub name: String,
    #[serde(default)]
    pub channels: Vec<ChannelSpecDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChannelSpecDto {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ChannelKindDto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKindDto {
    Text,
    Voice,
}

/// Body of `POST /api/discord/play`.
///
/// A missing URL deserialises to an empty string and is rejected after
/// authorization with a validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayAudioDto {
    #[serde(default)]
    pub youtube_url: String,
}

/// Body of `POST /api/discord/assign-role`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleDto {
    #[serde(default)]
    pub discord_id: String,
}

/// One audited action as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionLogDto {
    pub kind: String,
    pub outcome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Most recent actions of the caller, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActionLogListDto {
    pub actions: Vec<ActionLogDto>,
}
