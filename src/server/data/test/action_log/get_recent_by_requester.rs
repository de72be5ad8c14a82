use super::*;
use chrono::{Duration, Utc};

/// Tests entries come back newest first and limited.
///
/// Expected: Ok with the two most recent entries in descending time order
#[tokio::test]
async fn returns_newest_entries_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ActionLog)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::action_log::ActionLogFactory::new(db, "1")
        .kind("create_structure")
        .created_at(now - Duration::minutes(10))
        .build()
        .await?;
    factory::action_log::ActionLogFactory::new(db, "1")
        .kind("assign_role")
        .created_at(now - Duration::minutes(5))
        .build()
        .await?;
    factory::action_log::ActionLogFactory::new(db, "1")
        .kind("play_audio")
        .created_at(now)
        .build()
        .await?;

    let repo = ActionLogRepository::new(db);
    let entries = repo.get_recent_by_requester(1, 2).await?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].kind, "play_audio");
    assert_eq!(entries[1].kind, "assign_role");

    Ok(())
}

/// Tests entries of other requesters are excluded.
///
/// Expected: Ok with only the requested user's entry
#[tokio::test]
async fn excludes_other_requesters() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ActionLog)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_action_log(db, "1").await?;
    factory::action_log::ActionLogFactory::new(db, "2")
        .outcome("forbidden")
        .build()
        .await?;

    let repo = ActionLogRepository::new(db);
    let entries = repo.get_recent_by_requester(2, 10).await?;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].requester_id, 2);
    assert_eq!(entries[0].outcome, "forbidden");

    Ok(())
}
