//! WASM bindings for tak-core
//!
//! Provides a JavaScript-friendly API for the rules engine. Turns and
//! reports cross the boundary as plain JS objects in the serde shape of
//! [`Turn`] and [`TakReport`](crate::TakReport).

use wasm_bindgen::prelude::*;

use crate::{block_tak, check_roads, check_tak, count_flats, Color, GameState, Space, Turn};

/// WASM-friendly wrapper around GameState
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameState,
}

fn color_from_js(color: &str) -> Result<Color, JsError> {
    match color {
        "white" => Ok(Color::White),
        "black" => Ok(Color::Black),
        other => Err(JsError::new(&format!("unknown color: {}", other))),
    }
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game on an empty board of the given size (3-8)
    #[wasm_bindgen(constructor)]
    pub fn new(size: u8) -> Result<WasmGame, JsError> {
        Ok(WasmGame {
            inner: GameState::new(size)?,
        })
    }

    pub fn size(&self) -> u8 {
        self.inner.size()
    }

    /// Color to move: "white" or "black"
    #[wasm_bindgen(js_name = nextColor)]
    pub fn next_color(&self) -> String {
        self.inner.next_color().name().to_string()
    }

    /// Reserves for a color as [flats, caps]
    pub fn reserves(&self, color: &str) -> Result<Vec<u8>, JsError> {
        let reserves = self.inner.reserves(color_from_js(color)?);
        Ok(vec![reserves.flats, reserves.caps])
    }

    /// Legal moves for the side to move, as an array of turn objects
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.legal_moves())?)
    }

    /// Play a turn object. Rejects anything not in `legalMoves`, including
    /// turns by the side that just moved.
    pub fn play(&mut self, turn: JsValue) -> Result<(), JsError> {
        let turn: Turn = serde_wasm_bindgen::from_value(turn)?;
        if !self.inner.is_legal(&turn) {
            return Err(JsError::new(&format!("illegal turn: {}", turn)));
        }
        self.inner.play(turn)?;
        Ok(())
    }

    /// Stack at a square as [{ color, piece }, ...], bottom to top
    #[wasm_bindgen(js_name = cellStack)]
    pub fn cell_stack(&self, row: u8, file: u8) -> Result<JsValue, JsError> {
        let stack = self.inner.board().stack(Space::new(row, file))?;
        Ok(serde_wasm_bindgen::to_value(stack.stones())?)
    }

    /// Road presence as { white, black }
    pub fn roads(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&check_roads(self.inner.board()))?)
    }

    /// Flat counts as { white, black }
    pub fn flats(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&count_flats(self.inner.board()))?)
    }

    /// One-ply threat report for both movers
    #[wasm_bindgen(js_name = checkTak)]
    pub fn check_tak(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&check_tak(&self.inner)?)?)
    }

    /// Moves for `color` that defuse the opponent's road threats
    #[wasm_bindgen(js_name = blockTak)]
    pub fn block_tak(&self, color: &str) -> Result<JsValue, JsError> {
        let blocks = block_tak(&self.inner, color_from_js(color)?)?;
        Ok(serde_wasm_bindgen::to_value(&blocks)?)
    }

    /// Clone the game
    #[wasm_bindgen(js_name = clone)]
    pub fn clone_game(&self) -> WasmGame {
        WasmGame {
            inner: self.inner.clone(),
        }
    }
}
