//! Platform abstraction layer
//!
//! Concrete render, audio and HUD sinks:
//! - `headless`: in-memory recorders driven by the native runner and tests
//! - `web`: canvas 2D, HTML audio and DOM elements (wasm32 only)

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;
