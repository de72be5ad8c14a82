use super::*;

/// Tests a non-admin cannot create channel structures.
///
/// Verifies that the dispatcher rejects the request before any channel is
/// created, even when the payload itself is valid.
///
/// Expected: Err(DispatchError::Forbidden) with zero guild calls
#[tokio::test]
async fn rejects_non_admin_without_side_effects() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let harness = Harness::new(FakeGuildClient::new());

    let result = harness
        .dispatcher(db)
        .dispatch(ActionRequest::new(
            identity(MEMBER_ID),
            structure(&[("Events", &[("general", ChannelKindDto::Text)])]),
        ))
        .await;

    assert!(matches!(result, Err(DispatchError::Forbidden(_))));
    assert!(harness.guild.calls().is_empty());

    Ok(())
}

/// Tests authorization is decided before the payload is inspected.
///
/// Expected: Err(DispatchError::Forbidden) rather than a validation error
#[tokio::test]
async fn authorizes_before_validating() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let harness = Harness::new(FakeGuildClient::new());

    let result = harness
        .dispatcher(db)
        .dispatch(ActionRequest::new(identity(MEMBER_ID), structure(&[])))
        .await;

    assert!(matches!(result, Err(DispatchError::Forbidden(_))));

    Ok(())
}

/// Tests every allow-listed admin passes the admin gate.
///
/// Expected: Ok(ActionOutput::Completed) for each of the four default admins
#[tokio::test]
async fn allows_every_default_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let harness = Harness::new(FakeGuildClient::new());

    for admin in crate::server::service::policy::DEFAULT_ADMIN_IDS {
        let result = harness
            .dispatcher(db)
            .dispatch(ActionRequest::new(
                identity(admin),
                structure(&[("Events", &[])]),
            ))
            .await;

        assert_eq!(result.unwrap(), ActionOutput::Completed);
    }

    assert_eq!(harness.guild.calls().len(), 4);

    Ok(())
}

/// Tests categories and channels are created in payload order.
///
/// Verifies one call per category followed by one call per channel of that
/// category, each channel parented to the category created just before it.
///
/// Expected: Ok with the exact call sequence
#[tokio::test]
async fn creates_one_call_per_category_and_channel_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let harness = Harness::new(FakeGuildClient::new());

    let result = harness
        .dispatcher(db)
        .dispatch(ActionRequest::new(
            identity(ADMIN_ID),
            structure(&[
                (
                    "Events",
                    &[
                        ("general", ChannelKindDto::Text),
                        ("stage", ChannelKindDto::Voice),
                    ],
                ),
                ("Archive", &[("old", ChannelKindDto::Text)]),
            ]),
        ))
        .await;

    assert_eq!(result.unwrap(), ActionOutput::Completed);

    // The fake hands out ids sequentially from 500.
    assert_eq!(
        harness.guild.calls(),
        vec![
            GuildCall::CreateCategory("Events".to_string()),
            GuildCall::CreateChannel {
                name: "general".to_string(),
                kind: ChannelKind::Text,
                parent: ChannelId::new(500),
            },
            GuildCall::CreateChannel {
                name: "stage".to_string(),
                kind: ChannelKind::Voice,
                parent: ChannelId::new(500),
            },
            GuildCall::CreateCategory("Archive".to_string()),
            GuildCall::CreateChannel {
                name: "old".to_string(),
                kind: ChannelKind::Text,
                parent: ChannelId::new(503),
            },
        ]
    );

    Ok(())
}

/// Tests an admin with an empty category list gets a validation error.
///
/// Expected: Err(DispatchError::Validation) with zero guild calls
#[tokio::test]
async fn rejects_empty_structure_for_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let harness = Harness::new(FakeGuildClient::new());

    let result = harness
        .dispatcher(db)
        .dispatch(ActionRequest::new(identity(ADMIN_ID), structure(&[])))
        .await;

    match result {
        Err(DispatchError::Validation(message)) => {
            assert_eq!(message, "At least one category is required.")
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(harness.guild.calls().is_empty());

    Ok(())
}

/// Tests an adapter failure stops the structure and is reported curated.
///
/// Expected: Err(DispatchError::External) with no calls after the failing one
/// and a public message that does not echo Discord's response
#[tokio::test]
async fn stops_at_first_adapter_failure() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let harness = Harness::new(FakeGuildClient::new().failing_create("stage"));

    let result = harness
        .dispatcher(db)
        .dispatch(ActionRequest::new(
            identity(ADMIN_ID),
            structure(&[
                (
                    "Events",
                    &[
                        ("stage", ChannelKindDto::Voice),
                        ("general", ChannelKindDto::Text),
                    ],
                ),
                ("Archive", &[]),
            ]),
        ))
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, DispatchError::External(_)));
    assert!(!err.public_message().contains("Missing Permissions"));
    assert_eq!(harness.guild.calls().len(), 2);

    Ok(())
}

/// Tests a slow adapter is cut off by the action timeout.
///
/// Expected: Err(DispatchError::Timeout)
#[tokio::test]
async fn times_out_slow_adapter() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let harness = Harness::new(FakeGuildClient::new().with_delay(Duration::from_millis(200)))
        .with_timeout(Duration::from_millis(20));

    let result = harness
        .dispatcher(db)
        .dispatch(ActionRequest::new(
            identity(ADMIN_ID),
            structure(&[("Events", &[])]),
        ))
        .await;

    assert!(matches!(result, Err(DispatchError::Timeout(_))));

    Ok(())
}
