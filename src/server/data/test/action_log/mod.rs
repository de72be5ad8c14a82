use crate::server::{
    data::action_log::ActionLogRepository,
    error::AppError,
    model::{
        action::ActionKind,
        action_log::{ActionOutcome, CreateActionLogParam},
    },
};
use test_utils::{builder::TestBuilder, factory};

mod get_recent_by_requester;
