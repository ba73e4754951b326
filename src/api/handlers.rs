//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::{
    gesture::PointerEvent,
    state::{AppState, Event, Viewport},
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse, VisibilityRequest};

pub type HandlerResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

fn widget_stopped(action: &str) -> (StatusCode, Json<Value>) {
    error!("Widget is not mounted, cannot handle {}", action);
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "status": "error", "message": "rest timer is not mounted" })),
    )
}

/// Dispatch an event and wrap the resulting snapshot
async fn act(
    state: &AppState,
    action: &str,
    event: Event,
    message: &str,
) -> HandlerResult<ApiResponse> {
    match state.dispatch(action, event).await {
        Ok(snapshot) => Ok(Json(ApiResponse::new(message, snapshot))),
        Err(_) => Err(widget_stopped(action)),
    }
}

/// Handle POST /timer/toggle - Start or pause the countdown
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    let response = act(&state, "toggle", Event::Toggle, "Countdown toggled").await?;
    info!(
        "Toggle endpoint called - countdown {} at {}",
        if response.timer.running { "running" } else { "stopped" },
        response.timer.display
    );
    Ok(response)
}

/// Handle POST /timer/reset - Restore the full duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    act(&state, "reset", Event::Reset, "Countdown reset").await
}

/// Handle POST /timer/increment - Add one step to the duration
pub async fn increment_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    act(&state, "increment", Event::Increment, "Rest duration increased").await
}

/// Handle POST /timer/decrement - Remove one step from the duration
pub async fn decrement_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    act(&state, "decrement", Event::Decrement, "Rest duration decreased").await
}

/// Handle POST /timer/minimize
pub async fn minimize_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    act(&state, "minimize", Event::Minimize, "Widget minimized").await
}

/// Handle POST /timer/expand
pub async fn expand_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    act(&state, "expand", Event::Expand, "Widget expanded").await
}

/// Handle POST /timer/outside - Interaction outside the expanded widget
pub async fn outside_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    act(
        &state,
        "outside",
        Event::OutsideInteraction,
        "Outside interaction recorded",
    )
    .await
}

/// Handle POST /timer/pointer - Raw pointer report for drag and tap
pub async fn pointer_handler(
    State(state): State<Arc<AppState>>,
    Json(pointer): Json<PointerEvent>,
) -> HandlerResult<ApiResponse> {
    act(&state, "pointer", Event::Pointer(pointer), "Pointer event applied").await
}

/// Handle POST /timer/viewport - Host viewport was resized
pub async fn viewport_handler(
    State(state): State<Arc<AppState>>,
    Json(viewport): Json<Viewport>,
) -> HandlerResult<ApiResponse> {
    act(
        &state,
        "viewport",
        Event::ViewportResized(viewport),
        "Viewport updated",
    )
    .await
}

/// Handle POST /timer/visibility - Parent shows or hides the widget
pub async fn visibility_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VisibilityRequest>,
) -> HandlerResult<ApiResponse> {
    let message = if request.visible { "Widget shown" } else { "Widget hidden" };
    act(&state, "visibility", Event::SetVisible(request.visible), message).await
}

/// Handle POST /timer/close - User dismissed the widget
pub async fn close_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    act(&state, "close", Event::Close, "Widget closed").await
}

/// Handle POST /timer/permission - Ask the host for notification permission
pub async fn permission_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    act(
        &state,
        "permission",
        Event::RequestPermission,
        "Notification permission requested",
    )
    .await
}

/// Handle GET /timer - Return the current widget state
pub async fn status_handler(State(state): State<Arc<AppState>>) -> HandlerResult<StatusResponse> {
    let timer = match state.snapshot() {
        Ok(snapshot) => snapshot,
        Err(_) => return Err(widget_stopped("status")),
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
