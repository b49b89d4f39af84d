//! Schema bootstrap
//!
//! The portal creates its tables on demand rather than through a
//! migration history; every statement here is idempotent so startup can
//! run the full set unconditionally.

use sqlx::PgPool;
use tracing::info;

const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id VARCHAR(255) PRIMARY KEY,
        username VARCHAR(255) NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        role VARCHAR(50) NOT NULL,
        plan JSONB NOT NULL,
        email VARCHAR(255) NOT NULL DEFAULT '',
        sip VARCHAR(255) NOT NULL DEFAULT '',
        billing JSONB NOT NULL,
        chat_enabled BOOLEAN NOT NULL DEFAULT FALSE,
        ai_enabled BOOLEAN NOT NULL DEFAULT FALSE,
        localmail_enabled BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sessions (
        token UUID PRIMARY KEY,
        user_id VARCHAR(255) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        expires_at TIMESTAMPTZ NOT NULL,
        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS messages (
        id SERIAL PRIMARY KEY,
        sender_id VARCHAR(255) NOT NULL,
        recipient_id VARCHAR(255) NOT NULL,
        text TEXT NOT NULL,
        is_read BOOLEAN NOT NULL DEFAULT FALSE,
        timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        FOREIGN KEY (sender_id) REFERENCES users(id) ON DELETE CASCADE,
        FOREIGN KEY (recipient_id) REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS calls (
        id SERIAL PRIMARY KEY,
        caller_id VARCHAR(255) NOT NULL,
        callee_id VARCHAR(255) NOT NULL,
        status VARCHAR(50) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        answered_at TIMESTAMPTZ,
        ended_at TIMESTAMPTZ,
        FOREIGN KEY (caller_id) REFERENCES users(id) ON DELETE CASCADE,
        FOREIGN KEY (callee_id) REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS voice_rooms (
        id VARCHAR(255) PRIMARY KEY,
        name VARCHAR(255) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS voice_room_participants (
        room_id VARCHAR(255) NOT NULL,
        user_id VARCHAR(255) NOT NULL,
        PRIMARY KEY (room_id, user_id),
        FOREIGN KEY (room_id) REFERENCES voice_rooms(id) ON DELETE CASCADE,
        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS voice_messages (
        id SERIAL PRIMARY KEY,
        room_id VARCHAR(255) NOT NULL,
        sender_id VARCHAR(255) NOT NULL,
        audio_data BYTEA NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        FOREIGN KEY (room_id) REFERENCES voice_rooms(id) ON DELETE CASCADE,
        FOREIGN KEY (sender_id) REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS notes (
        user_id VARCHAR(255) PRIMARY KEY,
        content TEXT,
        updated_at TIMESTAMPTZ,
        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS contacts (
        id SERIAL PRIMARY KEY,
        user_id VARCHAR(255) NOT NULL,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255),
        phone VARCHAR(50),
        notes TEXT,
        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS localmails (
        id SERIAL PRIMARY KEY,
        sender_id VARCHAR(255) NOT NULL,
        recipient_username VARCHAR(255) NOT NULL,
        subject TEXT NOT NULL,
        body TEXT NOT NULL,
        timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        is_read BOOLEAN NOT NULL DEFAULT FALSE,
        FOREIGN KEY (sender_id) REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
];

/// Create all portal tables and seed the static voice rooms.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring database schema");

    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    seed_voice_rooms(pool).await?;

    info!("Database schema ready");
    Ok(())
}

/// Rooms are static; insert the default set only when the table is empty.
async fn seed_voice_rooms(pool: &PgPool) -> Result<(), sqlx::Error> {
    let existing: Option<i32> = sqlx::query_scalar("SELECT 1 FROM voice_rooms LIMIT 1")
        .fetch_optional(pool)
        .await?;

    if existing.is_none() {
        // Two instances can pass the emptiness check at once; the
        // conflict clause lets the loser's insert degrade to a no-op.
        sqlx::query(
            "INSERT INTO voice_rooms (id, name) VALUES ('general', 'General'), ('tech', 'Tech'), ('support', 'Support') \
             ON CONFLICT (id) DO NOTHING",
        )
        .execute(pool)
        .await?;
        info!("Seeded default voice rooms");
    }

    Ok(())
}
