//! NeroMax chat client — WASM entry point.
//!
//! This crate is the composition root (DI wiring layer). `bootstrap`
//! assembles the platform adapters and hands them to the chat
//! workflows in [`ChatApp`]; the embedding UI drives those workflows
//! and drains the event bus.

mod app;

#[cfg(test)]
mod tests;

pub use app::{bootstrap, ChatApp};

use wasm_bindgen::prelude::*;

/// WASM entry point — called when the module loads
#[wasm_bindgen(start)]
pub fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("NeroMax chat client starting...");
}
