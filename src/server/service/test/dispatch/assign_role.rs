use super::*;

/// Tests assigning the verified role is an admin-only action.
///
/// Expected: Err(DispatchError::Forbidden) with zero guild calls
#[tokio::test]
async fn rejects_non_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let harness = Harness::new(FakeGuildClient::new());

    let result = harness
        .dispatcher(db)
        .dispatch(ActionRequest::new(identity(MEMBER_ID), assign("42")))
        .await;

    assert!(matches!(result, Err(DispatchError::Forbidden(_))));
    assert!(harness.guild.calls().is_empty());

    Ok(())
}

/// Tests an admin assigns the verified role, creating it as needed.
///
/// Expected: Ok with a find-or-create of the green role followed by the grant
#[tokio::test]
async fn admin_assigns_verified_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let harness = Harness::new(FakeGuildClient::new().with_member(1368087024401252393));

    let result = harness
        .dispatcher(db)
        .dispatch(ActionRequest::new(
            identity(ADMIN_ID),
            assign("1368087024401252393"),
        ))
        .await;

    assert_eq!(result.unwrap(), ActionOutput::Completed);
    assert_eq!(
        harness.guild.calls(),
        vec![
            GuildCall::FindOrCreateRole {
                name: "chrome green verified".to_string(),
                colour: 0x00FF00,
            },
            GuildCall::AddMemberRole {
                user_id: UserId::new(1368087024401252393),
                role_id: serenity::all::RoleId::new(500),
            },
        ]
    );

    Ok(())
}

/// Tests an unparsable target id is a validation error.
///
/// Expected: Err(DispatchError::Validation) with zero guild calls
#[tokio::test]
async fn rejects_invalid_target_id() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let harness = Harness::new(FakeGuildClient::new());

    let result = harness
        .dispatcher(db)
        .dispatch(ActionRequest::new(identity(ADMIN_ID), assign("not-an-id")))
        .await;

    assert!(matches!(result, Err(DispatchError::Validation(_))));
    assert!(harness.guild.calls().is_empty());

    Ok(())
}

/// Tests a well-formed target id that does not belong to a guild member.
///
/// Expected: Err(DispatchError::Validation) naming the target, with zero guild
/// calls so the verified role is not created as a side effect
#[tokio::test]
async fn rejects_target_outside_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let harness = Harness::new(FakeGuildClient::new());

    let result = harness
        .dispatcher(db)
        .dispatch(ActionRequest::new(
            identity(ADMIN_ID),
            assign("123456789012345678"),
        ))
        .await;

    match result {
        Err(DispatchError::Validation(message)) => {
            assert_eq!(message, "That user is not a member of the Discord server.")
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(harness.guild.calls().is_empty());

    Ok(())
}
