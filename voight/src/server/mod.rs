//! HTTP/WebSocket controller for interview sessions.
//!
//! Thin transport layer over the engine:
//! - clients join an interview with an opaque connection id; the first two
//!   arrivals take the interviewer and suspect seats
//! - setup, allocation, and finalization routes map 1:1 onto engine calls
//! - every successful state change is broadcast to WebSocket subscribers
//!
//! Endpoints:
//! - POST /api/interviews - Create an interview
//! - GET /api/interviews - List interviews
//! - GET /api/interviews/{id} - Fetch one interview
//! - POST /api/interviews/{id}/join - Seat a connection
//! - POST /api/interviews/{id}/positions - Begin position selection
//! - POST /api/interviews/{id}/packet - Select the content packet
//! - POST /api/interviews/{id}/penalties|roles|questions|notes - Draw content
//! - POST /api/interviews/{id}/start - Begin the interview
//! - POST /api/interviews/{id}/guess - Finalize with a guess
//! - POST /api/interviews/{id}/kill - Finalize with a kill
//! - POST /api/interviews/{id}/reset - Recycle a finished interview
//! - DELETE /api/interviews/{id} - Tear an interview down
//! - GET /api/packets - List packet names
//! - GET /api/packets/{index} - Fetch one packet
//! - WS /ws - Real-time interview events

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State, WebSocketUpgrade},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::GameConfig;
use crate::engine::InterviewService;
use crate::error::Error;
use crate::models::{InterviewOutcome, InterviewSnapshot, Packet, SuspectRole};

/// Shared server state.
pub struct ServerState {
    /// The session engine.
    service: InterviewService,
    /// Broadcast channel for real-time updates.
    tx: broadcast::Sender<InterviewEvent>,
}

impl ServerState {
    fn broadcast(&self, event: &'static str, interview: InterviewSnapshot) {
        let _ = self.tx.send(InterviewEvent {
            interview_id: interview.id,
            event,
            interview,
        });
    }
}

/// Event broadcast to WebSocket subscribers after a state change.
#[derive(Clone, Debug, Serialize)]
pub struct InterviewEvent {
    /// Interview the event concerns.
    pub interview_id: u64,
    /// What happened ("created", "joined", "finished", ...).
    pub event: &'static str,
    /// Snapshot after the change.
    pub interview: InterviewSnapshot,
}

// === Request/Response Types ===

/// Request to seat a connection.
#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    /// Opaque connection handle supplied by the caller's transport.
    pub connection: String,
}

#[derive(Debug, Serialize)]
pub struct JoinResponse {
    /// Whether a seat was taken.
    pub accepted: bool,
}

/// Request to select the content packet.
#[derive(Debug, Deserialize)]
pub struct ChoosePacketRequest {
    /// Catalog index of the packet.
    pub index: usize,
}

/// Request to finalize with a guess.
#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    /// Whether the interviewer says the suspect is a robot.
    pub is_robot: bool,
}

#[derive(Debug, Serialize)]
pub struct PenaltiesResponse {
    pub penalties: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<SuspectRole>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub primary_questions: Vec<String>,
    pub secondary_questions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuspectNotesResponse {
    pub suspect_notes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct OutcomeResponse {
    pub outcome: InterviewOutcome,
    pub interview: InterviewSnapshot,
}

// === Server Lifecycle ===

/// Start the server on the given port.
pub async fn start_server(config: GameConfig, port: u16) -> Result<()> {
    let (tx, _rx) = broadcast::channel(1000);

    let state = Arc::new(ServerState {
        service: InterviewService::new(config),
        tx,
    });

    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!(%addr, "voight server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Build the router over the given state.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/interviews", post(create_interview))
        .route("/api/interviews", get(list_interviews))
        .route("/api/interviews/{id}", get(get_interview))
        .route("/api/interviews/{id}", delete(remove_interview))
        .route("/api/interviews/{id}/join", post(join_interview))
        .route("/api/interviews/{id}/positions", post(start_positions))
        .route("/api/interviews/{id}/packet", post(choose_packet))
        .route("/api/interviews/{id}/penalties", post(allocate_penalties))
        .route("/api/interviews/{id}/roles", post(allocate_roles))
        .route("/api/interviews/{id}/questions", post(allocate_questions))
        .route("/api/interviews/{id}/notes", post(allocate_suspect_notes))
        .route("/api/interviews/{id}/start", post(start_interview))
        .route("/api/interviews/{id}/guess", post(guess_role))
        .route("/api/interviews/{id}/kill", post(kill_interviewer))
        .route("/api/interviews/{id}/reset", post(reset_interview))
        .route("/api/packets", get(list_packets))
        .route("/api/packets/{index}", get(get_packet))
        .route("/ws", get(websocket_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// === Handlers ===

async fn create_interview(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<InterviewSnapshot>, Error> {
    let snapshot = state.service.create_interview();
    state.broadcast("created", snapshot.clone());
    Ok(Json(snapshot))
}

async fn list_interviews(State(state): State<Arc<ServerState>>) -> Json<Vec<InterviewSnapshot>> {
    Json(state.service.list_interviews())
}

async fn get_interview(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<InterviewSnapshot>, Error> {
    Ok(Json(state.service.get_snapshot(id)?))
}

async fn join_interview(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
    Json(req): Json<JoinRequest>,
) -> Result<Json<JoinResponse>, Error> {
    let accepted = state.service.bind_connection(id, &req.connection)?;

    if accepted {
        state.broadcast("joined", state.service.get_snapshot(id)?);
    }

    Ok(Json(JoinResponse { accepted }))
}

async fn start_positions(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<InterviewSnapshot>, Error> {
    let snapshot = state.service.start_position_selection(id)?;
    state.broadcast("selecting-positions", snapshot.clone());
    Ok(Json(snapshot))
}

async fn choose_packet(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
    Json(req): Json<ChoosePacketRequest>,
) -> Result<Json<InterviewSnapshot>, Error> {
    let snapshot = state.service.choose_packet(id, req.index)?;
    state.broadcast("packet-chosen", snapshot.clone());
    Ok(Json(snapshot))
}

async fn allocate_penalties(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<PenaltiesResponse>, Error> {
    let penalties = state.service.allocate_penalties(id)?;
    Ok(Json(PenaltiesResponse { penalties }))
}

async fn allocate_roles(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<RolesResponse>, Error> {
    let roles = state.service.allocate_roles(id)?;
    Ok(Json(RolesResponse { roles }))
}

async fn allocate_questions(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<QuestionsResponse>, Error> {
    let (primary_questions, secondary_questions) = state.service.allocate_questions(id)?;
    Ok(Json(QuestionsResponse {
        primary_questions,
        secondary_questions,
    }))
}

async fn allocate_suspect_notes(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<SuspectNotesResponse>, Error> {
    let suspect_notes = state.service.allocate_suspect_notes(id)?;
    Ok(Json(SuspectNotesResponse { suspect_notes }))
}

async fn start_interview(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<InterviewSnapshot>, Error> {
    let snapshot = state.service.start_interview(id)?;
    state.broadcast("started", snapshot.clone());
    Ok(Json(snapshot))
}

async fn guess_role(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
    Json(req): Json<GuessRequest>,
) -> Result<Json<OutcomeResponse>, Error> {
    let outcome = state.service.guess_role(id, req.is_robot)?;
    let interview = state.service.get_snapshot(id)?;

    state.broadcast("finished", interview.clone());
    Ok(Json(OutcomeResponse { outcome, interview }))
}

async fn kill_interviewer(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<OutcomeResponse>, Error> {
    let outcome = state.service.kill_interviewer(id)?;
    let interview = state.service.get_snapshot(id)?;

    state.broadcast("finished", interview.clone());
    Ok(Json(OutcomeResponse { outcome, interview }))
}

async fn reset_interview(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<InterviewSnapshot>, Error> {
    let snapshot = state.service.reset_interview(id)?;
    state.broadcast("reset", snapshot.clone());
    Ok(Json(snapshot))
}

async fn remove_interview(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, Error> {
    state.service.remove_interview(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_packets(State(state): State<Arc<ServerState>>) -> Json<Vec<String>> {
    Json(state.service.packet_names())
}

async fn get_packet(
    State(state): State<Arc<ServerState>>,
    Path(index): Path<usize>,
) -> Result<Json<Packet>, Error> {
    Ok(Json(state.service.packet(index)?))
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_websocket(socket, state))
}

async fn handle_websocket(mut socket: axum::extract::ws::WebSocket, state: Arc<ServerState>) {
    use axum::extract::ws::Message;

    let mut rx = state.tx.subscribe();

    while let Ok(event) = rx.recv().await {
        if let Ok(json) = serde_json::to_string(&event) {
            if socket.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    }
}
