pub use super::action_log::Entity as ActionLog;
pub use super::user::Entity as User;
