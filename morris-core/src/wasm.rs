//! WASM bindings for morris-core
//!
//! Provides a JavaScript-friendly API for the game logic, for running the
//! engine directly in a browser page.

use wasm_bindgen::prelude::*;

use crate::{Game, Phase, Player, Point};

/// WASM-friendly wrapper around Game
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { inner: Game::new() }
    }

    /// Start over with a fresh game
    pub fn reset(&mut self) {
        self.inner = Game::new();
    }

    /// Apply a point click.
    ///
    /// Returns the event name ("placed", "mill_formed", "selected",
    /// "deselected", "moved", "invalid_move", "removed", "won") or throws
    /// with the rejection reason.
    #[wasm_bindgen(js_name = handlePoint)]
    pub fn handle_point(&mut self, point: u8) -> Result<JsValue, JsValue> {
        match self.inner.handle_point(Point(point)) {
            Ok(event) => Ok(serde_wasm_bindgen::to_value(&event).unwrap()),
            Err(err) => Err(JsValue::from_str(&err.to_string())),
        }
    }

    /// Full game state as a JS object (board, counts, phase, selection,
    /// pending removal, winner)
    pub fn snapshot(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.snapshot()).unwrap()
    }

    /// Current player: "white" or "black"
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> String {
        match self.inner.current_player() {
            Player::White => "white".to_string(),
            Player::Black => "black".to_string(),
        }
    }

    /// Check if a removal is due before the next regular action
    #[wasm_bindgen(js_name = pendingRemoval)]
    pub fn pending_removal(&self) -> bool {
        self.inner.pending_removal()
    }

    /// Check if the game has been decided
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.phase() == Phase::GameOver
    }

    /// Winner: "white", "black", or null while the game is ongoing
    pub fn winner(&self) -> Option<String> {
        self.inner.winner().map(|p| match p {
            Player::White => "white".to_string(),
            Player::Black => "black".to_string(),
        })
    }

    /// Points the current player could pick up, for highlighting
    #[wasm_bindgen(js_name = selectablePoints)]
    pub fn selectable_points(&self) -> Vec<u8> {
        self.inner
            .selectable_points()
            .into_iter()
            .map(|p| p.0)
            .collect()
    }

    /// Legal destinations for the piece at `from`, for highlighting
    #[wasm_bindgen(js_name = legalDestinations)]
    pub fn legal_destinations(&self, from: u8) -> Vec<u8> {
        self.inner
            .legal_destinations(Point(from))
            .into_iter()
            .map(|p| p.0)
            .collect()
    }

    /// Opposing pieces that may be removed right now, for highlighting
    #[wasm_bindgen(js_name = removablePoints)]
    pub fn removable_points(&self) -> Vec<u8> {
        self.inner
            .removable_points()
            .into_iter()
            .map(|p| p.0)
            .collect()
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
