//! Authorization predicates.
//!
//! Both predicates are pure with respect to server state: the admin check reads
//! the allow-list built at startup, the verified check asks Discord every time.

use std::collections::HashSet;

use serenity::all::UserId;

use crate::server::{model::identity::Identity, service::discord::GuildClient};

/// Role whose holders may play audio.
pub const VERIFIED_ROLE_NAME: &str = "chrome green verified";

/// Discord IDs allowed to perform administrative actions when
/// `ADMIN_DISCORD_IDS` is not set.
pub const DEFAULT_ADMIN_IDS: [u64; 4] = [
    1302678535831289891,
    304789212224552972,
    1368087024401252393,
    567186324591738882,
];

/// Immutable set of Discord IDs with administrative privileges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAllowList {
    ids: HashSet<u64>,
}

impl AdminAllowList {
    pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn is_admin(&self, identity: &Identity) -> bool {
        self.ids.contains(&identity.discord_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for AdminAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_IDS)
    }
}

/// Checks whether the identity holds the verified role in the guild.
///
/// Role names are fetched fresh on every call and compared exactly. Any lookup
/// failure, including the user not being a guild member, denies.
pub async fn is_verified(guild: &dyn GuildClient, identity: &Identity) -> bool {
    match guild
        .member_role_names(UserId::new(identity.discord_id))
        .await
    {
        Ok(roles) => roles.iter().any(|role| role == VERIFIED_ROLE_NAME),
        Err(err) => {
            tracing::warn!(
                "Role lookup for {} failed, treating as unverified: {}",
                identity.discord_id,
                err
            );
            false
        }
    }
}
