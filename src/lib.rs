//! # N8X305 Microcode Disassembler
//!
//! Decodes the microcode PROMs of the Motorola MVME320 disk controller, a
//! board built around the Signetics N8X305 bipolar microcontroller, into an
//! annotated assembly listing.
//!
//! Each ROM address holds a 16-bit microinstruction plus an 8-bit "Fast I/O"
//! byte fetched in parallel. The disassembler decodes both, renders them as
//! text, and attaches a comment that is either supplied by a label table or
//! inferred from known MVME320 register conventions.
//!
//! ## Quick Start
//!
//! ```rust
//! use n8x305_dasm::{Disassembler, DisassemblyOptions, RomImage};
//!
//! // XMIT #$2A to AUX, with an empty Fast-I/O byte
//! let mut program = vec![0u16; 1024];
//! program[0] = 0xC02A;
//! let rom = RomImage::new(program, vec![0u8; 1024]).unwrap();
//!
//! let dasm = Disassembler::new(&rom, None, DisassemblyOptions::default());
//! let lines = dasm.disassemble().unwrap();
//!
//! assert_eq!(lines.len(), 1024);
//! assert_eq!(lines[0].text, "XMIT #$2A, ,AUX");
//! assert_eq!(lines[0].comment, "#$2A -> AUX");
//! ```
//!
//! ## Modules
//!
//! - `fields` - bit-field accessors for the 16-bit instruction word
//! - `fast_io` - decoding of the Fast-I/O control byte
//! - `tables` - register, port and board-line name tables
//! - `disassembler` - per-address decode, formatting and the listing driver
//! - `autocomment` - inferred comments for MVME320 register idioms
//! - `labels` - label/comment table keyed by program counter
//! - `rom` - assembly of the three PROM images into a ROM image

pub mod autocomment;
pub mod disassembler;
pub mod fast_io;
pub mod fields;
pub mod labels;
pub mod rom;
pub mod tables;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use disassembler::{disassemble, Disassembler, DisassemblyLine, DisassemblyOptions};
pub use fast_io::FastIo;
pub use fields::{Bank, InstructionClass, InstructionWord, Operand};
pub use labels::{LabelEntry, LabelError, LabelTable};
pub use rom::{RomError, RomImage, RomPart, RomSize};

use thiserror::Error;

/// Errors raised while decoding a single microinstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// MOVE, ADD, AND and XOR do not accept a destination selector of 8.
    ///
    /// The hardware reserves that encoding, so there is no meaningful text
    /// to render for it.
    #[error("illegal encoding at ${pc:04X}: [${word:04X}] {class} with D == 8")]
    IllegalDestination {
        pc: u16,
        word: u16,
        class: InstructionClass,
    },
}

impl DecodeError {
    /// Address of the offending instruction.
    pub fn pc(&self) -> u16 {
        match self {
            DecodeError::IllegalDestination { pc, .. } => *pc,
        }
    }
}

/// Any failure from the one-shot entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Rom(#[from] RomError),

    #[error(transparent)]
    Labels(#[from] LabelError),
}
