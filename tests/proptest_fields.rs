//! Property-based tests for instruction word and Fast-I/O decoding.
//!
//! These tests check that field extraction covers every 16-bit word, that
//! operand banks follow the selector ranges, and that only the reserved
//! MOVE-family destination fails to decode.

use n8x305_dasm::disassembler::decoder::{decode_instruction, nzt_target};
use n8x305_dasm::disassembler::formatter::{format_fields, format_instruction};
use n8x305_dasm::{Bank, FastIo, InstructionClass, InstructionWord, Operand};
use proptest::prelude::*;

/// Rebuild a word from its S, L and D fields
fn compose(opcode: u16, s: u16, l: u16, d: u16) -> u16 {
    (opcode << 13) | (s << 8) | (l << 5) | d
}

// ========== Field Extraction ==========

proptest! {
    /// Property: S, L and D together with the opcode reconstruct the word
    #[test]
    fn prop_fields_partition_word(raw in any::<u16>()) {
        let word = InstructionWord(raw);

        prop_assert!(word.opcode() < 8);
        prop_assert!(word.s() < 32);
        prop_assert!(word.l() < 8);
        prop_assert!(word.d() < 32);
        prop_assert_eq!(
            compose(word.opcode() as u16, word.s() as u16, word.l() as u16, word.d() as u16),
            raw
        );
    }

    /// Property: sub-fields split their parent fields
    #[test]
    fn prop_sub_fields(raw in any::<u16>()) {
        let word = InstructionWord(raw);

        prop_assert_eq!((word.s1() << 3) | word.s0(), word.s());
        prop_assert_eq!((word.d1() << 3) | word.d0(), word.d());
        prop_assert_eq!(word.j(), ((word.l() << 5) | word.d()));
        prop_assert_eq!(word.a(), raw & 0x1FFF);
    }

    /// Property: the opcode alone selects the instruction class
    #[test]
    fn prop_class_follows_opcode(raw in any::<u16>()) {
        let class = InstructionWord(raw).class();

        prop_assert_eq!(class.opcode() as u16, raw >> 13);
        prop_assert_eq!(InstructionClass::from_opcode(class.opcode()), class);
    }
}

// ========== Operand Banks ==========

proptest! {
    /// Property: selectors 0-15 name registers, 16-23 the left IV bank
    /// and 24-31 the right IV bank
    #[test]
    fn prop_bank_follows_selector(selector in 0u8..32) {
        let operand = Operand::new(selector);

        let expected = match selector {
            0..=15 => Bank::Register,
            16..=23 => Bank::Left,
            _ => Bank::Right,
        };
        prop_assert_eq!(operand.bank(), expected);
        prop_assert_eq!(operand.is_register(), selector < 16);
    }

    /// Property: IV operands render with their 3-bit index
    #[test]
    fn prop_iv_operand_names(selector in 16u8..32) {
        let name = Operand::new(selector).to_string();
        let index = selector & 7;

        if selector < 24 {
            prop_assert_eq!(name, format!("IVl{}", index));
        } else {
            prop_assert_eq!(name, format!("IVr{}", index));
        }
    }
}

// ========== Decoding ==========

proptest! {
    /// Property: every word decodes unless it is a MOVE-family word with D == 8
    #[test]
    fn prop_decode_is_total_except_reserved_destination(raw in any::<u16>(), pc in 0u16..4096) {
        let word = InstructionWord(raw);
        let result = decode_instruction(word, pc);

        if word.class().is_move_format() && word.d() == 8 {
            let err = result.unwrap_err();
            prop_assert_eq!(err.pc(), pc);
        } else {
            let instr = result.unwrap();
            prop_assert_eq!(instr.class, word.class());
            prop_assert!(!format_instruction(&instr, None).is_empty());
            let expected_prefix = format!("[{}|", word.opcode());
            prop_assert!(format_fields(&instr).starts_with(&expected_prefix));
        }
    }

    /// Property: the reserved destination fails for each MOVE-family opcode
    #[test]
    fn prop_reserved_destination_rejected(opcode in 0u16..4, s in 0u16..32, l in 0u16..8) {
        let raw = compose(opcode, s, l, 8);
        prop_assert!(decode_instruction(InstructionWord(raw), 0).is_err());
    }

    /// Property: the mnemonic is right-aligned in the first four columns
    #[test]
    fn prop_mnemonic_column(raw in any::<u16>()) {
        let word = InstructionWord(raw);
        prop_assume!(!(word.class().is_move_format() && word.d() == 8));

        let instr = decode_instruction(word, 0).unwrap();
        let text = format_instruction(&instr, None);

        prop_assert_eq!(&text[..4], format!("{:>4}", word.class().mnemonic()));
        prop_assert_eq!(&text[4..5], " ");
    }
}

// ========== NZT Targets ==========

proptest! {
    /// Property: a register-source NZT stays in the 256-word page of the PC
    #[test]
    fn prop_nzt_register_stays_in_page(s in 0u16..16, j in any::<u8>(), pc in 0u16..4096) {
        let word = InstructionWord((5 << 13) | (s << 8) | j as u16);
        let target = nzt_target(pc, word);

        prop_assert_eq!(target & 0xFF00, pc & 0xFF00);
        prop_assert_eq!(target & 0x00FF, j as u16);
    }

    /// Property: an IV-source NZT stays in the 32-word block of the PC
    #[test]
    fn prop_nzt_iv_stays_in_block(s in 16u16..32, l in 0u16..8, d in 0u16..32, pc in 0u16..4096) {
        let word = InstructionWord(compose(5, s, l, d));
        let target = nzt_target(pc, word);

        prop_assert_eq!(target & 0xFFE0, pc & 0xFFE0);
        prop_assert_eq!(target & 0x001F, d);
    }
}

// ========== XMIT Targets ==========

proptest! {
    /// Property: XMIT with S == 7 always addresses the left IV latch
    #[test]
    fn prop_xmit_left_address(j in any::<u8>()) {
        let instr = decode_instruction(InstructionWord(0xC700 | j as u16), 0).unwrap();
        let text = format_instruction(&instr, None);

        prop_assert_eq!(text, format!("XMIT #${:02X}, ,R07lA", j));
    }
}

// ========== Fast-I/O ==========

proptest! {
    /// Property: the B flag selects the upper half of the Op1 table
    #[test]
    fn prop_fast_io_op1_widened_by_b(raw in any::<u8>()) {
        let io = FastIo(raw);

        prop_assert!(io.op1() < 16);
        prop_assert!(io.op2() < 8);
        prop_assert_eq!(io.op1() >= 8, io.b());
        prop_assert_eq!(io.op1() & 7, (raw >> 3) & 7);
    }

    /// Property: each flag position shows its letter or a dash
    #[test]
    fn prop_fast_io_flags(raw in any::<u8>()) {
        let io = FastIo(raw);
        let flags: Vec<char> = io.flags().chars().collect();

        prop_assert_eq!(flags.len(), 3);
        prop_assert_eq!(flags[0] == 'W', io.w());
        prop_assert_eq!(flags[1] == 'B', io.b());
        prop_assert_eq!(flags[2] == 'S', io.s());
        prop_assert!(io.to_string().starts_with("FAST_IO "));
    }
}
