// ABOUTME: Integration tests for the storage layer on a file-backed database
// ABOUTME: Verifies cascading deletes and persistence across reconnects

use realworlded_core::{AgentType, Mode, Stage};
use realworlded_storage::{DbState, NewMessage, NewUser, ReportCreateInput, SessionCreateInput};
use tempfile::TempDir;

async fn file_db(dir: &TempDir) -> DbState {
    let url = format!("sqlite:{}", dir.path().join("realworlded.db").display());
    DbState::init(&url).await.unwrap()
}

fn demo_user() -> NewUser {
    NewUser {
        email: "cascade@example.com".to_string(),
        username: "cascade".to_string(),
        hashed_password: "hash".to_string(),
        full_name: Some("Cascade Tester".to_string()),
    }
}

#[tokio::test]
async fn test_deleting_session_removes_messages_and_reports() {
    let dir = TempDir::new().unwrap();
    let db = file_db(&dir).await;

    let user = db.user_storage.create_user(demo_user()).await.unwrap();
    let session = db
        .session_storage
        .create_session(user.id, SessionCreateInput::new(Mode::Education))
        .await
        .unwrap();

    for i in 0..3 {
        db.message_storage
            .add_message(NewMessage::from_user(session.id, format!("message {i}")))
            .await
            .unwrap();
    }
    db.report_storage
        .create_report_and_complete_session(user.id, session.id, ReportCreateInput::default())
        .await
        .unwrap();

    assert!(db
        .session_storage
        .delete_session(user.id, session.id)
        .await
        .unwrap());

    assert_eq!(db.message_storage.count_messages(session.id).await.unwrap(), 0);
    assert!(db.report_storage.list_reports(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_data_survives_reconnect() {
    let dir = TempDir::new().unwrap();

    let (user_id, session_id) = {
        let db = file_db(&dir).await;
        let user = db.user_storage.create_user(demo_user()).await.unwrap();
        let session = db
            .session_storage
            .create_session(user.id, SessionCreateInput::new(Mode::Business))
            .await
            .unwrap();
        db.session_storage
            .set_stage(session.id, Stage::Simulation)
            .await
            .unwrap();
        db.message_storage
            .add_message(NewMessage::from_agent(session.id, AgentType::Client, "Where is my order?"))
            .await
            .unwrap();
        db.pool.close().await;
        (user.id, session.id)
    };

    let db = file_db(&dir).await;
    let session = db
        .session_storage
        .get_session(user_id, session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.current_stage, Stage::Simulation);

    let messages = db.message_storage.list_messages(session_id).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].agent_type, Some(AgentType::Client));
}
