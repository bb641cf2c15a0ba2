//! Fuzz target for the disassembler.
//!
//! This target feeds arbitrary PROM contents to the driver to find edge
//! cases and crashes in instruction decoding and comment inference.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use n8x305_dasm::{disassemble, DecodeError, DisassemblyOptions, InstructionWord, RomImage};

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Words to place at the start of the ROM; the rest stays zero
    words: Vec<u16>,
    fast_io: Vec<u8>,
    auto_comment: bool,
}

fuzz_target!(|input: FuzzInput| {
    let mut program = vec![0u16; 1024];
    let mut fast_io = vec![0u8; 1024];

    for (slot, word) in program.iter_mut().zip(&input.words) {
        *slot = *word;
    }
    for (slot, byte) in fast_io.iter_mut().zip(&input.fast_io) {
        *slot = *byte;
    }

    let rom = RomImage::new(program.clone(), fast_io.clone()).unwrap();
    let options = DisassemblyOptions {
        auto_comment: input.auto_comment,
    };

    match disassemble(&rom, None, options) {
        Ok(lines) => {
            // One line per address, in order
            assert_eq!(lines.len(), 1024);

            for (pc, line) in lines.iter().enumerate() {
                assert_eq!(line.pc as usize, pc);
                assert_eq!(line.word, program[pc]);
                assert_eq!(line.fast_io, fast_io[pc]);
                assert!(!line.text.is_empty());

                if !input.auto_comment {
                    assert!(line.comment.is_empty());
                }
            }
        }
        Err(DecodeError::IllegalDestination { pc, word, class }) => {
            // Must be the first MOVE/ADD/AND/XOR with D == 8
            let first = program
                .iter()
                .position(|&w| {
                    let w = InstructionWord(w);
                    w.class().is_move_format() && w.d() == 8
                })
                .unwrap();

            assert_eq!(pc as usize, first);
            assert_eq!(word, program[first]);
            assert!(class.is_move_format());
        }
    }
});
