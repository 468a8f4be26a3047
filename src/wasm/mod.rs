//! WebAssembly bindings for the DCPU-16 emulator.
//!
//! This module provides JavaScript-callable interfaces to the emulator,
//! enabling browser-based execution of DCPU-16 images.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Dcpu16Emulator;
