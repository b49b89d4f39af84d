//! Repository Integration Tests

use chrono::{DateTime, Utc};
use lynix::domain::call::{CallRepository, CallStatus};
use lynix::domain::contact::{ContactData, ContactRepository};
use lynix::domain::localmail::LocalMailRepository;
use lynix::domain::message::MessageRepository;
use lynix::domain::note::NoteRepository;
use lynix::domain::session::SessionRepository;
use lynix::domain::user::{Billing, CreateUser, Plan, UserRepository, UserRole};
use lynix::domain::voice_room::VoiceRoomRepository;
use lynix::infrastructure::persistence::{
    create_pool, ensure_schema, DatabaseConfig, PgCallRepository, PgContactRepository,
    PgLocalMailRepository, PgMessageRepository, PgNoteRepository, PgSessionRepository,
    PgUserRepository, PgVoiceRoomRepository,
};
use lynix::DomainError;
use sqlx::PgPool;
use uuid::Uuid;

#[tokio::test]
#[ignore] // Requires database
async fn test_user_create_and_verify() {
    let pool = setup_database().await;
    let repo = PgUserRepository::new(pool.clone());

    let username = test_name("Alice");
    let user = repo
        .create(new_user(&username), "secret123")
        .await
        .expect("Failed to create user");

    // The ID is the lowercased username
    assert_eq!(user.id, username.to_lowercase());
    assert_eq!(user.username, username);

    let verified = repo
        .verify_credentials(&username, "secret123")
        .await
        .expect("Failed to verify");
    assert!(verified.is_some());

    let rejected = repo
        .verify_credentials(&username, "wrong")
        .await
        .expect("Failed to verify");
    assert!(rejected.is_none());

    cleanup_users(&pool, &[&user.id]).await;
}

#[tokio::test]
#[ignore] // Requires database
async fn test_duplicate_username_is_conflict() {
    let pool = setup_database().await;
    let repo = PgUserRepository::new(pool.clone());

    let username = test_name("dup");
    let user = repo
        .create(new_user(&username), "pw")
        .await
        .expect("Failed to create user");

    let second = repo.create(new_user(&username), "pw").await;
    assert!(matches!(second, Err(DomainError::AlreadyExists(_))));

    cleanup_users(&pool, &[&user.id]).await;
}

#[tokio::test]
#[ignore] // Requires database
async fn test_call_signaling_round_trip() {
    let pool = setup_database().await;
    let users = PgUserRepository::new(pool.clone());
    let calls = PgCallRepository::new(pool.clone());

    let alice = users
        .create(new_user(&test_name("caller")), "pw")
        .await
        .expect("Failed to create caller");
    let bob = users
        .create(new_user(&test_name("callee")), "pw")
        .await
        .expect("Failed to create callee");

    let call = calls
        .create(&alice.id, &bob.id)
        .await
        .expect("Failed to create call");
    assert_eq!(call.status, CallStatus::Ringing);
    assert_eq!(call.caller_username.as_deref(), Some(alice.username.as_str()));

    // Both parties see the ringing call as their current one
    for party in [&alice.id, &bob.id] {
        let current = calls
            .current_for_user(party)
            .await
            .expect("Failed to fetch current call");
        assert_eq!(current.map(|c| c.id), Some(call.id));
    }

    let mut call = call;
    call.transition(CallStatus::Active).expect("answer failed");
    calls.update(&call).await.expect("Failed to persist answer");

    let fetched = calls
        .find_by_id(call.id)
        .await
        .expect("Failed to fetch call")
        .expect("Call vanished");
    assert_eq!(fetched.status, CallStatus::Active);
    assert!(fetched.answered_at.is_some());

    call.transition(CallStatus::Ended).expect("hangup failed");
    calls.update(&call).await.expect("Failed to persist hangup");

    // A terminal call is no longer anyone's current call
    let current = calls
        .current_for_user(&alice.id)
        .await
        .expect("Failed to fetch current call");
    assert!(current.is_none());

    cleanup_users(&pool, &[&alice.id, &bob.id]).await;
}

#[tokio::test]
#[ignore] // Requires database
async fn test_conversation_fetch_marks_read() {
    let pool = setup_database().await;
    let users = PgUserRepository::new(pool.clone());
    let messages = PgMessageRepository::new(pool.clone());

    let alice = users
        .create(new_user(&test_name("reader")), "pw")
        .await
        .expect("Failed to create user");
    let bob = users
        .create(new_user(&test_name("writer")), "pw")
        .await
        .expect("Failed to create user");

    messages
        .send(&bob.id, &alice.id, "are you around? I wanted to ask about the new phone plan")
        .await
        .expect("Failed to send");
    messages
        .send(&bob.id, &alice.id, "ping")
        .await
        .expect("Failed to send");

    let alerts = messages.alerts(&alice.id).await.expect("Failed to fetch alerts");
    assert_eq!(alerts.len(), 2);
    // Snippets are capped at 50 characters
    assert!(alerts.iter().all(|a| a.message_snippet.len() <= 50));
    assert_eq!(alerts[0].message_snippet, "ping");

    let conversation = messages
        .conversation(&alice.id, &bob.id)
        .await
        .expect("Failed to fetch conversation");
    assert_eq!(conversation.len(), 2);
    // Ascending order
    assert!(conversation[0].timestamp <= conversation[1].timestamp);

    // Fetching the conversation cleared the unread flags
    let alerts = messages.alerts(&alice.id).await.expect("Failed to fetch alerts");
    assert!(alerts.is_empty());

    // The sender's own fetch must not mark anything for the peer
    let conversation = messages
        .conversation(&bob.id, &alice.id)
        .await
        .expect("Failed to fetch conversation");
    assert_eq!(conversation.len(), 2);

    cleanup_users(&pool, &[&alice.id, &bob.id]).await;
}

#[tokio::test]
#[ignore] // Requires database
async fn test_note_upsert() {
    let pool = setup_database().await;
    let users = PgUserRepository::new(pool.clone());
    let notes = PgNoteRepository::new(pool.clone());

    let user = users
        .create(new_user(&test_name("scribe")), "pw")
        .await
        .expect("Failed to create user");

    assert!(notes.get(&user.id).await.expect("Failed to get note").is_none());

    notes.save(&user.id, "first draft").await.expect("Failed to save");
    assert_eq!(
        notes.get(&user.id).await.expect("Failed to get note").as_deref(),
        Some("first draft")
    );

    // Last write wins
    notes.save(&user.id, "").await.expect("Failed to save");
    assert_eq!(
        notes.get(&user.id).await.expect("Failed to get note").as_deref(),
        Some("")
    );

    cleanup_users(&pool, &[&user.id]).await;
}

#[tokio::test]
#[ignore] // Requires database
async fn test_contact_ownership() {
    let pool = setup_database().await;
    let users = PgUserRepository::new(pool.clone());
    let contacts = PgContactRepository::new(pool.clone());

    let alice = users
        .create(new_user(&test_name("owner")), "pw")
        .await
        .expect("Failed to create user");
    let bob = users
        .create(new_user(&test_name("other")), "pw")
        .await
        .expect("Failed to create user");

    let contact = contacts
        .create(
            &alice.id,
            ContactData {
                name: "Plumber".to_string(),
                email: None,
                phone: Some("555-0100".to_string()),
                notes: None,
            },
        )
        .await
        .expect("Failed to create contact");

    // A foreign user can neither see nor touch the row
    let foreign_update = contacts
        .update(
            &bob.id,
            contact.id,
            ContactData {
                name: "Hijacked".to_string(),
                email: None,
                phone: None,
                notes: None,
            },
        )
        .await
        .expect("Update query failed");
    assert!(foreign_update.is_none());

    contacts
        .delete(&bob.id, contact.id)
        .await
        .expect("Delete query failed");

    let listed = contacts.list(&alice.id).await.expect("Failed to list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Plumber");

    cleanup_users(&pool, &[&alice.id, &bob.id]).await;
}

#[tokio::test]
#[ignore] // Requires database
async fn test_voice_room_flow() {
    let pool = setup_database().await;
    let users = PgUserRepository::new(pool.clone());
    let rooms = PgVoiceRoomRepository::new(pool.clone());

    let user = users
        .create(new_user(&test_name("speaker")), "pw")
        .await
        .expect("Failed to create user");

    let all_rooms = rooms.rooms().await.expect("Failed to list rooms");
    assert!(all_rooms.iter().any(|r| r.id == "general"));

    // Joining twice is a no-op
    rooms.join("general", &user.id).await.expect("Failed to join");
    rooms.join("general", &user.id).await.expect("Failed to re-join");

    let participants = rooms
        .participants("general")
        .await
        .expect("Failed to list participants");
    assert_eq!(
        participants.iter().filter(|p| p.user_id == user.id).count(),
        1
    );

    let before_post = Utc::now();
    rooms
        .post_message("general", &user.id, b"fake opus frame")
        .await
        .expect("Failed to post");

    let since_epoch = rooms
        .messages_since("general", DateTime::<Utc>::UNIX_EPOCH)
        .await
        .expect("Failed to fetch messages");
    let mine: Vec<_> = since_epoch
        .iter()
        .filter(|m| m.sender_id == user.id)
        .collect();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].audio, b"fake opus frame");
    assert!(mine[0].created_at >= before_post);

    // The since filter is strict, so the last-seen mark is not replayed
    let after = rooms
        .messages_since("general", mine[0].created_at)
        .await
        .expect("Failed to fetch messages");
    assert!(!after.iter().any(|m| m.id == mine[0].id));

    rooms.leave("general", &user.id).await.expect("Failed to leave");
    let participants = rooms
        .participants("general")
        .await
        .expect("Failed to list participants");
    assert!(!participants.iter().any(|p| p.user_id == user.id));

    cleanup_users(&pool, &[&user.id]).await;
}

#[tokio::test]
#[ignore] // Requires database
async fn test_localmail_send_and_inbox() {
    let pool = setup_database().await;
    let users = PgUserRepository::new(pool.clone());
    let mail = PgLocalMailRepository::new(pool.clone());

    let alice = users
        .create(new_user(&test_name("sender")), "pw")
        .await
        .expect("Failed to create user");
    let bob = users
        .create(new_user(&test_name("rcpt")), "pw")
        .await
        .expect("Failed to create user");

    mail.send(
        &alice.id,
        &[bob.username.clone()],
        "meeting",
        "tomorrow at noon",
    )
    .await
    .expect("Failed to send mail");

    let inbox = mail.inbox(&bob.id).await.expect("Failed to fetch inbox");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].subject, "meeting");
    assert_eq!(inbox[0].sender_id, alice.id);

    let sent = mail.sent(&alice.id).await.expect("Failed to fetch sent");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient_username, bob.username);

    // The sender's inbox is untouched
    let inbox = mail.inbox(&alice.id).await.expect("Failed to fetch inbox");
    assert!(inbox.is_empty());

    cleanup_users(&pool, &[&alice.id, &bob.id]).await;
}

#[tokio::test]
#[ignore] // Requires database
async fn test_schema_bootstrap_is_idempotent() {
    let pool = setup_database().await;

    // Rerunning the bootstrap must neither fail nor duplicate the
    // seeded rooms, even against an already populated store.
    ensure_schema(&pool).await.expect("Failed to re-run schema");
    ensure_schema(&pool).await.expect("Failed to re-run schema");

    let rooms = PgVoiceRoomRepository::new(pool.clone())
        .rooms()
        .await
        .expect("Failed to list rooms");
    assert_eq!(rooms.iter().filter(|r| r.id == "general").count(), 1);
    assert_eq!(rooms.iter().filter(|r| r.id == "tech").count(), 1);
    assert_eq!(rooms.iter().filter(|r| r.id == "support").count(), 1);
}

#[tokio::test]
#[ignore] // Requires database
async fn test_login_sweeps_expired_sessions() {
    let pool = setup_database().await;
    let users = PgUserRepository::new(pool.clone());

    let user = users
        .create(new_user(&test_name("sweep")), "pw")
        .await
        .expect("Failed to create user");

    // A negative TTL mints an already-expired session
    let expired_sessions = PgSessionRepository::new(pool.clone(), -1);
    let stale = expired_sessions
        .create(&user.id)
        .await
        .expect("Failed to create session");
    assert!(stale.is_expired());

    let sessions = PgSessionRepository::new(pool.clone(), 3600);
    assert!(sessions
        .find_valid(stale.token)
        .await
        .expect("Failed to look up session")
        .is_none());

    // The next login removes the stale row, not just hides it
    let live = sessions.create(&user.id).await.expect("Failed to create session");

    let remaining: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE token = $1")
            .bind(stale.token)
            .fetch_one(&pool)
            .await
            .expect("Failed to count sessions");
    assert_eq!(remaining, 0);

    assert!(sessions
        .find_valid(live.token)
        .await
        .expect("Failed to look up session")
        .is_some());

    cleanup_users(&pool, &[&user.id]).await;
}

#[tokio::test]
#[ignore] // Requires database
async fn test_session_lifecycle() {
    let pool = setup_database().await;
    let users = PgUserRepository::new(pool.clone());
    let sessions = PgSessionRepository::new(pool.clone(), 3600);

    let user = users
        .create(new_user(&test_name("sess")), "pw")
        .await
        .expect("Failed to create user");

    let session = sessions.create(&user.id).await.expect("Failed to create session");
    assert!(!session.is_expired());

    let found = sessions
        .find_valid(session.token)
        .await
        .expect("Failed to look up session");
    assert_eq!(found.map(|s| s.user_id), Some(user.id.clone()));

    sessions.delete(session.token).await.expect("Failed to delete session");
    let found = sessions
        .find_valid(session.token)
        .await
        .expect("Failed to look up session");
    assert!(found.is_none());

    cleanup_users(&pool, &[&user.id]).await;
}

// -- helpers --

async fn setup_database() -> PgPool {
    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://postgres@localhost/lynix_test".to_string());

    let pool = create_pool(&DatabaseConfig::with_url(db_url))
        .await
        .expect("Failed to create pool");
    ensure_schema(&pool).await.expect("Failed to create schema");
    pool
}

/// Unique username so parallel test runs never collide.
fn test_name(prefix: &str) -> String {
    format!("it_{}_{}", prefix, Uuid::new_v4().simple())
}

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        role: UserRole::Standard,
        plan: Plan {
            name: "Basic".to_string(),
            cost: "$9/mo".to_string(),
            details: "Chat and calls".to_string(),
        },
        email: format!("{username}@example.com"),
        sip: "1001".to_string(),
        billing: Billing {
            status: "On Time".to_string(),
            owes: None,
        },
        chat_enabled: true,
        ai_enabled: true,
        localmail_enabled: true,
    }
}

/// Deleting the users cascades to every dependent row.
async fn cleanup_users(pool: &PgPool, ids: &[&str]) {
    for id in ids {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .expect("Failed to clean up user");
    }
}
