use crate::server::{
    error::{dispatch::DispatchError, AppError},
    middleware::{
        auth::AuthGuard,
        session::{AuthSession, CsrfSession},
    },
    model::identity::Identity,
};
use test_utils::builder::TestBuilder;


fn identity(discord_id: u64) -> Identity {
    Identity {
        discord_id,
        username: format!("user{}", discord_id),
        avatar: None,
        email: None,
    }
}
