//! DOM overlay and HUD layer
//!
//! Pure effect executor over the elements in index.html. Everything here
//! is fire-and-forget: a missing element loses that readout, never panics.

use web_sys::Document;

use crate::sim::{GameEvent, GameState};

/// The hidden line shown once the collect threshold is reached
const SECRET_MESSAGE: &str = "\u{1f48c} I love you more than all the stars in the sky...";

fn show(document: &Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.set_attribute("class", "");
    }
}

fn hide(document: &Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.set_attribute("class", "hidden");
    }
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Per-frame HUD refresh: score and session best
pub fn sync_hud(state: &GameState) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    set_text(&document, "hearts-collected", &state.score.to_string());
    set_text(&document, "best-score", &state.best.to_string());
}

/// Map one simulation event onto the overlay panels
pub fn apply_event(event: &GameEvent) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    match event {
        GameEvent::Started => {
            hide(&document, "start-screen");
            hide(&document, "game-over-screen");
            hide(&document, "pause-screen");
            show(&document, "game-hud");
        }
        GameEvent::Paused => show(&document, "pause-screen"),
        GameEvent::Resumed => hide(&document, "pause-screen"),
        // The per-frame HUD sync already covers the score readouts
        GameEvent::HeartCollected { .. } | GameEvent::NewBest { .. } => {}
        GameEvent::SecretRevealed => {
            set_text(&document, "love-message", SECRET_MESSAGE);
            show(&document, "secret-message");
        }
        GameEvent::RunEnded { score } => {
            set_text(&document, "final-score", &score.to_string());
            show(&document, "game-over-screen");
        }
    }
}
