use thiserror::Error;

/// Faults surfaced by the Discord adapters (REST, gateway cache, voice).
///
/// The `Display` text may contain raw Discord responses and is only logged;
/// clients receive `public_message()`.
#[derive(Error, Debug)]
pub enum DiscordError {
    /// Discord REST or gateway call failed.
    ///
    /// Boxed due to the size of `serenity::Error`.
    #[error(transparent)]
    Api(#[from] Box<serenity::Error>),

    /// The user is not a member of the configured guild.
    #[error("User {0} is not a member of the guild")]
    MemberNotFound(u64),

    /// Joining, streaming to or leaving a voice channel failed.
    #[error("Voice transport failed: {0}")]
    Voice(String),
}

impl From<serenity::Error> for DiscordError {
    fn from(err: serenity::Error) -> Self {
        DiscordError::Api(Box::new(err))
    }
}

impl DiscordError {
    /// Curated message that is safe to return to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Api(_) => "Discord rejected the request, please try again later.",
            Self::MemberNotFound(_) => "That user is not a member of the Discord server.",
            Self::Voice(_) => "Could not stream audio to your voice channel.",
        }
    }
}
