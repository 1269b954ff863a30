//! Nine Men's Morris Web API
//!
//! Serves one in-memory game session to a browser client. The client
//! never chooses an action type: it sends bare point ids to `/click` and
//! the engine decides whether that click places, selects, moves, or
//! removes based on its own phase and removal flag. After every call the
//! full state snapshot comes back for redrawing; `/hints` exposes the
//! derived highlight sets (selectable pieces, legal destinations,
//! removable targets).

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use morris_core::{Event, Game, Point, Snapshot};

// =============================================================================
// Session State
// =============================================================================

/// Shared application state: a single game behind a lock
struct AppStateInner {
    session: Mutex<Game>,
}

type AppState = Arc<AppStateInner>;

// =============================================================================
// JSON Models
// =============================================================================

#[derive(Deserialize)]
struct ClickRequest {
    point: u8,
}

#[derive(Serialize)]
struct ClickResponse {
    event: Event,
    state: Snapshot,
}

#[derive(Serialize)]
struct HintsModel {
    /// Pieces the current player could pick up
    selectable: Vec<u8>,
    /// Legal destinations for the selected piece, if any
    destinations: Vec<u8>,
    /// Opposing pieces that may be removed right now
    removable: Vec<u8>,
}

#[derive(Serialize)]
struct HealthModel {
    status: String,
}

#[derive(Serialize)]
struct ErrorModel {
    detail: String,
}

fn to_ids(points: Vec<Point>) -> Vec<u8> {
    points.into_iter().map(|p| p.0).collect()
}

// =============================================================================
// API Endpoints
// =============================================================================

async fn get_game(State(state): State<AppState>) -> Json<Snapshot> {
    let session = state.session.lock().unwrap();
    Json(session.snapshot())
}

async fn get_hints(State(state): State<AppState>) -> Json<HintsModel> {
    let session = state.session.lock().unwrap();
    let destinations = session
        .selection()
        .map(|from| session.legal_destinations(from))
        .unwrap_or_default();
    Json(HintsModel {
        selectable: to_ids(session.selectable_points()),
        destinations: to_ids(destinations),
        removable: to_ids(session.removable_points()),
    })
}

async fn click(
    State(state): State<AppState>,
    Json(req): Json<ClickRequest>,
) -> Result<Json<ClickResponse>, (StatusCode, Json<ErrorModel>)> {
    let mut session = state.session.lock().unwrap();
    match session.handle_point(Point(req.point)) {
        Ok(event) => {
            log::debug!("point {} -> {:?}", req.point, event);
            Ok(Json(ClickResponse {
                event,
                state: session.snapshot(),
            }))
        }
        Err(err) => {
            log::debug!("point {} rejected: {}", req.point, err);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorModel {
                    detail: err.to_string(),
                }),
            ))
        }
    }
}

async fn reset_game(State(state): State<AppState>) -> Json<Snapshot> {
    let mut session = state.session.lock().unwrap();
    *session = Game::new();
    log::info!("session reset, new game started");
    Json(session.snapshot())
}

async fn health() -> Json<HealthModel> {
    Json(HealthModel {
        status: "ok".to_string(),
    })
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() {
    env_logger::init();

    let state: AppState = Arc::new(AppStateInner {
        session: Mutex::new(Game::new()),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/game", get(get_game))
        .route("/hints", get(get_hints))
        .route("/click", post(click))
        .route("/reset", post(reset_game))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap();
    log::info!("morris API running on http://localhost:{}", port);
    axum::serve(listener, app).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_for_the_client() {
        let game = Game::new();
        let value = serde_json::to_value(game.snapshot()).unwrap();

        assert_eq!(value["current_player"], "white");
        assert_eq!(value["phase"], "placement");
        assert_eq!(value["in_hand"]["white"], 9);
        assert_eq!(value["in_hand"]["black"], 9);
        assert_eq!(value["pending_removal"], false);
        assert_eq!(value["board"].as_array().unwrap().len(), 24);
        assert!(value["board"][0].is_null());
    }

    #[test]
    fn click_request_parses() {
        let req: ClickRequest = serde_json::from_str(r#"{"point": 12}"#).unwrap();
        assert_eq!(req.point, 12);
    }

    #[test]
    fn click_response_carries_event_and_state() {
        let mut game = Game::new();
        let event = game.handle_point(Point(0)).unwrap();
        let value = serde_json::to_value(ClickResponse {
            event,
            state: game.snapshot(),
        })
        .unwrap();

        assert_eq!(value["event"], "placed");
        assert_eq!(value["state"]["board"][0], "white");
        assert_eq!(value["state"]["current_player"], "black");
    }
}
