//! API Router configuration

use super::assistant_handler::chat;
use super::call_handler::{current_call, initiate_call, list_peers, update_call};
use super::chat_handler::{alerts, chat_users, conversation, send_message};
use super::contact_handler::{create_contact, delete_contact, list_contacts, update_contact};
use super::localmail_handler::{mailbox, send_mail};
use super::metrics_handler::metrics_handler;
use super::note_handler::{get_note, save_note};
use super::user_handler::{
    create_user, delete_user, health_check, list_users, login, logout, set_password, update_user,
    AppState,
};
use super::voice_room_handler::{
    join_room, leave_room, list_participants, list_rooms, messages_since, post_message,
};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the API router
pub fn build_router(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    // Health check route (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    // Session routes
    let auth_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout));

    // User management routes
    let user_routes = Router::new()
        .route("/users", get(list_users))
        .route("/users", post(create_user))
        .route("/users/:id", put(update_user))
        .route("/users/:id", delete(delete_user))
        .route("/users/:id/password", post(set_password));

    // Direct messaging routes
    let chat_routes = Router::new()
        .route("/chat/users", get(chat_users))
        .route("/chat/messages", get(conversation))
        .route("/chat/messages", post(send_message))
        .route("/chat/alerts", get(alerts));

    // Call signaling routes
    let call_routes = Router::new()
        .route("/calls", post(initiate_call))
        .route("/calls/current", get(current_call))
        .route("/calls/peers", get(list_peers))
        .route("/calls/:id/status", put(update_call));

    // Voice room routes
    let voice_routes = Router::new()
        .route("/voice/rooms", get(list_rooms))
        .route("/voice/rooms/:room_id/participants", get(list_participants))
        .route("/voice/rooms/:room_id/join", post(join_room))
        .route("/voice/rooms/:room_id/leave", post(leave_room))
        .route("/voice/rooms/:room_id/messages", get(messages_since))
        .route("/voice/rooms/:room_id/messages", post(post_message));

    // Personal tool routes
    let tool_routes = Router::new()
        .route("/notepad", get(get_note))
        .route("/notepad", put(save_note))
        .route("/contacts", get(list_contacts))
        .route("/contacts", post(create_contact))
        .route("/contacts/:id", put(update_contact))
        .route("/contacts/:id", delete(delete_contact))
        .route("/localmail", get(mailbox))
        .route("/localmail", post(send_mail))
        .route("/assistant/chat", post(chat));

    let api_routes = Router::new()
        .merge(auth_routes)
        .merge(user_routes)
        .merge(chat_routes)
        .merge(call_routes)
        .merge(voice_routes)
        .merge(tool_routes);

    // Metrics route (separate state)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    // Combine routes with state
    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .with_state(state)
        .merge(metrics_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
