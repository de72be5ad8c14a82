//! Action requests handled by the command dispatcher.
//!
//! An `ActionRequest` pairs the authenticated requester with the raw payload the
//! caller sent. The payload is only validated into a `ValidatedAction` after the
//! requester has been authorized, so an unauthorized caller learns nothing about
//! payload rules.

use url::Url;

use crate::{
    model::discord::{AssignRoleDto, ChannelKindDto, CreateStructureDto, PlayAudioDto},
    server::{error::dispatch::DispatchError, model::identity::Identity},
};

/// Discord limits channel names to 100 characters.
const MAX_CHANNEL_NAME_CHARS: usize = 100;

/// The privileged actions a requester can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    CreateStructure,
    AssignRole,
    PlayAudio,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateStructure => "create_structure",
            Self::AssignRole => "assign_role",
            Self::PlayAudio => "play_audio",
        }
    }
}

/// Kind-specific payload as received from the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionPayload {
    CreateStructure(CreateStructureDto),
    AssignRole(AssignRoleDto),
    PlayAudio(PlayAudioDto),
}

impl ActionPayload {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::CreateStructure(_) => ActionKind::CreateStructure,
            Self::AssignRole(_) => ActionKind::AssignRole,
            Self::PlayAudio(_) => ActionKind::PlayAudio,
        }
    }

    /// Checks the payload and converts it into its executable form.
    ///
    /// # Returns
    /// - `Ok(ValidatedAction)` - Payload satisfies the rules for its kind
    /// - `Err(DispatchError::Validation)` - Curated message describing the problem
    pub fn validate(self) -> Result<ValidatedAction, DispatchError> {
        match self {
            Self::CreateStructure(dto) => validate_structure(dto),
            Self::AssignRole(dto) => validate_assign_role(dto),
            Self::PlayAudio(dto) => validate_play_audio(dto),
        }
    }
}

/// A payload together with the identity that submitted it.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub requester: Identity,
    pub payload: ActionPayload,
}

impl ActionRequest {
    pub fn new(requester: Identity, payload: ActionPayload) -> Self {
        Self { requester, payload }
    }

    pub fn kind(&self) -> ActionKind {
        self.payload.kind()
    }
}

/// Channel type inside a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Text,
    Voice,
}

impl From<ChannelKindDto> for ChannelKind {
    fn from(dto: ChannelKindDto) -> Self {
        match dto {
            ChannelKindDto::Text => Self::Text,
            ChannelKindDto::Voice => Self::Voice,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPlan {
    pub name: String,
    pub kind: ChannelKind,
}

/// A category and the channels to create under it, in payload order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPlan {
    pub name: String,
    pub channels: Vec<ChannelPlan>,
}

/// Payload that passed validation and can be handed to an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    CreateStructure(Vec<CategoryPlan>),
    AssignRole { target_id: u64 },
    PlayAudio { url: Url },
}

fn validate_structure(dto: CreateStructureDto) -> Result<ValidatedAction, DispatchError> {
    if dto.categories.is_empty() {
        return Err(DispatchError::Validation(
            "At least one category is required.".to_string(),
        ));
    }

    let mut plans = Vec::with_capacity(dto.categories.len());
    for category in dto.categories {
        let name = validate_channel_name(&category.name, "Category")?;

        let channels = category
            .channels
            .into_iter()
            .map(|channel| {
                Ok(ChannelPlan {
                    name: validate_channel_name(&channel.name, "Channel")?,
                    kind: channel.kind.into(),
                })
            })
            .collect::<Result<Vec<_>, DispatchError>>()?;

        plans.push(CategoryPlan { name, channels });
    }

    Ok(ValidatedAction::CreateStructure(plans))
}

fn validate_channel_name(name: &str, label: &str) -> Result<String, DispatchError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(DispatchError::Validation(format!(
            "{} names must not be empty.",
            label
        )));
    }

    if name.chars().count() > MAX_CHANNEL_NAME_CHARS {
        return Err(DispatchError::Validation(format!(
            "{} names must be at most {} characters.",
            label, MAX_CHANNEL_NAME_CHARS
        )));
    }

    Ok(name.to_string())
}

fn validate_assign_role(dto: AssignRoleDto) -> Result<ValidatedAction, DispatchError> {
    match dto.discord_id.trim().parse::<u64>() {
        Ok(target_id) if target_id != 0 => Ok(ValidatedAction::AssignRole { target_id }),
        _ => Err(DispatchError::Validation("Invalid Discord ID.".to_string())),
    }
}

fn validate_play_audio(dto: PlayAudioDto) -> Result<ValidatedAction, DispatchError> {
    let raw = dto.youtube_url.trim();

    if raw.is_empty() {
        return Err(DispatchError::Validation("Missing YouTube URL".to_string()));
    }

    let url = Url::parse(raw)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .ok_or_else(|| DispatchError::Validation("Invalid YouTube URL".to_string()))?;

    Ok(ValidatedAction::PlayAudio { url })
}
