use super::*;

/// Tests every terminal outcome leaves one action log row.
///
/// Expected: Ok with rows for the forbidden, invalid and succeeded requests,
/// newest first, carrying the curated message as detail
#[tokio::test]
async fn records_each_outcome() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let harness = Harness::new(FakeGuildClient::new());
    let dispatcher = harness.dispatcher(db);

    let _ = dispatcher
        .dispatch(ActionRequest::new(
            identity(ADMIN_ID),
            play("https://youtu.be/x"),
        ))
        .await;
    let _ = dispatcher
        .dispatch(ActionRequest::new(identity(ADMIN_ID), structure(&[])))
        .await;
    let _ = dispatcher
        .dispatch(ActionRequest::new(
            identity(ADMIN_ID),
            structure(&[("Events", &[])]),
        ))
        .await;

    let entries = ActionLogRepository::new(db)
        .get_recent_by_requester(ADMIN_ID, 10)
        .await?;

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].kind, "create_structure");
    assert_eq!(entries[0].outcome, "succeeded");
    assert!(entries[0].detail.is_none());
    assert_eq!(entries[1].outcome, "invalid");
    assert_eq!(
        entries[1].detail.as_deref(),
        Some("At least one category is required.")
    );
    assert_eq!(entries[2].kind, "play_audio");
    assert_eq!(entries[2].outcome, "forbidden");

    Ok(())
}

/// Tests a failing audit write does not change the action result.
///
/// The context has no `action_log` table, so every insert fails.
///
/// Expected: Ok(ActionOutput::Completed)
#[tokio::test]
async fn audit_failure_does_not_fail_action() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let harness = Harness::new(FakeGuildClient::new());

    let result = harness
        .dispatcher(db)
        .dispatch(ActionRequest::new(
            identity(ADMIN_ID),
            structure(&[("Events", &[])]),
        ))
        .await;

    assert_eq!(result.unwrap(), ActionOutput::Completed);

    Ok(())
}
