//! WASM API for the N8X305 disassembler.
//!
//! Provides a JavaScript-callable entry point that assembles a ROM image
//! from PROM dumps and returns the listing line by line.

use crate::disassembler::{disassemble_parts, DisassemblyLine, DisassemblyOptions};
use crate::rom::RomSize;
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// One listing line as seen from JavaScript
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct ListingLine {
    line: DisassemblyLine,
}

#[wasm_bindgen]
impl ListingLine {
    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.line.pc
    }

    #[wasm_bindgen(getter)]
    pub fn label(&self) -> Option<String> {
        self.line.label.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.line.text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn fields(&self) -> String {
        self.line.fields.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn word(&self) -> u16 {
        self.line.word
    }

    #[wasm_bindgen(getter)]
    pub fn fast_io(&self) -> u8 {
        self.line.fast_io
    }

    #[wasm_bindgen(getter)]
    pub fn fast_io_text(&self) -> String {
        self.line.fast_io_text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn comment(&self) -> String {
        self.line.comment.clone()
    }

    /// The full line in listing-file layout
    #[wasm_bindgen(getter)]
    pub fn rendered(&self) -> String {
        self.line.to_string()
    }
}

/// Disassemble a ROM given its three PROM dumps
///
/// `labels_csv` is the text of a label table, or `undefined`.
#[wasm_bindgen]
pub fn disassemble_rom(
    even: &[u8],
    odd: &[u8],
    fast_io: &[u8],
    labels_csv: Option<String>,
    size_4k: bool,
    auto_comment: bool,
) -> Result<Vec<JsValue>, JsError> {
    let size = if size_4k {
        RomSize::Words4K
    } else {
        RomSize::Words1K
    };
    let options = DisassemblyOptions { auto_comment };

    let lines = disassemble_parts(even, odd, fast_io, size, labels_csv.as_deref(), options)
        .map_err(|e| JsError::new(&e.to_string()))?;

    Ok(lines
        .into_iter()
        .map(|line| JsValue::from(ListingLine { line }))
        .collect())
}
