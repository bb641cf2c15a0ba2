//! WebAssembly bindings for the N8X305 disassembler.
//!
//! This module lets a browser page load the three MVME320 PROM dumps and
//! render the annotated listing without a native build.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::{disassemble_rom, ListingLine};
