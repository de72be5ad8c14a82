use super::*;
use sea_orm::EntityTrait;

/// Tests creating a new user on first login.
///
/// Verifies that the repository inserts a row carrying every profile field
/// returned by Discord.
///
/// Expected: Ok with the user created
#[tokio::test]
async fn creates_new_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            discord_id: 304789212224552972,
            username: "keeper".to_string(),
            avatar: Some("abc123".to_string()),
            email: Some("keeper@example.com".to_string()),
        })
        .await?;

    assert_eq!(user.discord_id, 304789212224552972);
    assert_eq!(user.username, "keeper");
    assert_eq!(user.avatar.as_deref(), Some("abc123"));
    assert_eq!(user.email.as_deref(), Some("keeper@example.com"));

    Ok(())
}

/// Tests a repeat login refreshing the stored profile.
///
/// Verifies that upserting an existing Discord ID overwrites username, avatar
/// and email instead of inserting a second row, and moves the login timestamp
/// forward.
///
/// Expected: Ok with a single row holding the new profile
#[tokio::test]
async fn updates_existing_user_profile() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::user::UserFactory::new(db)
        .discord_id("304789212224552972")
        .username("old-name")
        .avatar("old-avatar")
        .email("old@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            discord_id: 304789212224552972,
            username: "new-name".to_string(),
            avatar: None,
            email: Some("new@example.com".to_string()),
        })
        .await?;

    assert_eq!(user.username, "new-name");
    assert!(user.avatar.is_none());
    assert_eq!(user.email.as_deref(), Some("new@example.com"));
    assert!(user.last_login_at >= existing.last_login_at);

    let count = entity::prelude::User::find().all(db).await?.len();
    assert_eq!(count, 1);

    Ok(())
}
