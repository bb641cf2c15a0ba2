//! # Inferred Comments
//!
//! Recognises a handful of MVME320 microcode idioms and describes what they
//! do in board terms: which VCR lines a literal asserts, which VSR2 bit an
//! NZT tests, and so on.
//!
//! The rules are deliberately narrow. Each one matches a literal encoding
//! pattern seen in the MVME320 firmware and nothing more general. They are
//! checked in [`RULES`] order and the first rule whose guard matches decides
//! the comment, even when it then declines to produce one. A VCR strobe on
//! Op1 or a VSR2 read on Op2 therefore claims the address for its own rule.

use crate::disassembler::decoder::Instruction;
use crate::fast_io::FastIo;
use crate::fields::InstructionClass;
use crate::tables::{is_active_low, FAST_IO_OP1_VCR, FAST_IO_OP2_VSR2, VCR_LINES, VSR2_BITS};

/// Fast-I/O byte that latches the DBU address while R07 is loaded.
pub const DBU_LATCH_FAST_IO: u8 = 0x87;

/// Fast-I/O byte that strobes the Disk Bit Control Register.
pub const DBCR_FAST_IO: u8 = 0xCF;

/// One entry in the ordered rule list.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Short identifier used in trace logging
    pub name: &'static str,

    /// Whether the rule claims this instruction and Fast-I/O byte
    pub matches: fn(&Instruction, FastIo) -> bool,

    /// Comment text, only called when `matches` returned true
    pub comment: fn(&Instruction, FastIo) -> Option<String>,
}

/// Rules in priority order.
pub const RULES: [Rule; 7] = [
    Rule {
        name: "vcr-write",
        matches: is_vcr_write,
        comment: vcr_write,
    },
    Rule {
        name: "vsr2-test",
        matches: is_vsr2_test,
        comment: vsr2_test,
    },
    Rule {
        name: "iv-accumulate",
        matches: is_iv_accumulate,
        comment: iv_accumulate,
    },
    Rule {
        name: "xmit-aux",
        matches: is_xmit_aux,
        comment: xmit_aux,
    },
    Rule {
        name: "dbu-latch",
        matches: is_dbu_latch,
        comment: dbu_latch,
    },
    Rule {
        name: "dbcr-write",
        matches: is_dbcr_write,
        comment: dbcr_write,
    },
    Rule {
        name: "register-to-port",
        matches: is_register_to_port,
        comment: register_to_port,
    },
];

/// Op1 strobes the VCR.
fn is_vcr_write(_instr: &Instruction, io: FastIo) -> bool {
    io.op1() == FAST_IO_OP1_VCR
}

/// Only an XMIT of a literal to IVlD (selector 11) is described.
fn vcr_write(instr: &Instruction, _io: FastIo) -> Option<String> {
    let xmit_ivld =
        instr.class == InstructionClass::Xmit && instr.word.s1() == 1 && instr.word.s0() == 3;

    xmit_ivld.then(|| format!("Assert VCR: ({})", vcr_asserted_lines(instr.word.j())))
}

/// Op2 enables VSR2 onto the bus.
fn is_vsr2_test(_instr: &Instruction, io: FastIo) -> bool {
    io.op2() == FAST_IO_OP2_VSR2
}

/// Only an NZT on a right-bank IV bit is described.
fn vsr2_test(instr: &Instruction, _io: FastIo) -> Option<String> {
    if instr.class != InstructionClass::Nzt || instr.word.s1() != 3 {
        return None;
    }

    // IV bit addresses count from the most significant bit
    let bit = 7 - instr.word.s0() as usize;
    Some(format!("Branch if VSR2.{} asserted", VSR2_BITS[bit]))
}

/// ADD/AND/XOR of a right-bank IV field into a low register.
fn is_iv_accumulate(instr: &Instruction, _io: FastIo) -> bool {
    matches!(
        instr.class,
        InstructionClass::Add | InstructionClass::And | InstructionClass::Xor
    ) && instr.word.s1() == 3
        && instr.word.d1() == 0
}

fn iv_accumulate(instr: &Instruction, io: FastIo) -> Option<String> {
    let op = match instr.class {
        InstructionClass::Add => '+',
        InstructionClass::And => '&',
        _ => '^',
    };

    Some(format!(
        "(({} >> {}) {} AUX) -> {}",
        io.op2_name(),
        7 - instr.word.s0(),
        op,
        instr.word.destination()
    ))
}

fn is_xmit_aux(instr: &Instruction, _io: FastIo) -> bool {
    instr.class == InstructionClass::Xmit && instr.word.s() == 0
}

fn xmit_aux(instr: &Instruction, _io: FastIo) -> Option<String> {
    Some(format!("#${:02X} -> AUX", instr.word.j()))
}

fn is_dbu_latch(instr: &Instruction, io: FastIo) -> bool {
    instr.class == InstructionClass::Xmit && instr.word.s() == 7 && io.raw() == DBU_LATCH_FAST_IO
}

fn dbu_latch(instr: &Instruction, _io: FastIo) -> Option<String> {
    Some(format!("#${:02X} -> DBU address latch", instr.word.j()))
}

fn is_dbcr_write(instr: &Instruction, io: FastIo) -> bool {
    instr.class == InstructionClass::Xmit && instr.word.s() == 11 && io.raw() == DBCR_FAST_IO
}

fn dbcr_write(instr: &Instruction, _io: FastIo) -> Option<String> {
    Some(format!("#${:02X} -> Disk Bit Control Register", instr.word.j()))
}

/// MOVE from a low register to right-bank IV byte 7, the port Op1 strobes.
fn is_register_to_port(instr: &Instruction, _io: FastIo) -> bool {
    instr.class == InstructionClass::Move
        && instr.word.s1() == 0
        && instr.word.d1() == 3
        && instr.word.d0() == 7
}

fn register_to_port(instr: &Instruction, io: FastIo) -> Option<String> {
    Some(format!("{} -> {}", instr.word.source(), io.op1_name()))
}

/// Infer a comment for an instruction and its Fast-I/O byte.
///
/// Returns `None` when no rule matches, or when the first matching rule
/// has nothing to say about this instruction.
pub fn auto_comment(instr: &Instruction, io: FastIo) -> Option<String> {
    let rule = RULES.iter().find(|rule| (rule.matches)(instr, io))?;

    log::trace!("${:04X}: auto-comment rule {}", instr.pc, rule.name);
    (rule.comment)(instr, io)
}

/// List the VCR lines a literal asserts.
///
/// The VCR latches the inverse of the bus value. A line is listed when its
/// inverted bit is 1, or 0 for active-low lines. The result starts with a
/// space and every name is followed by one: `" CDS0 CWRT "`, or `" "` when
/// nothing is asserted.
pub fn vcr_asserted_lines(value: u8) -> String {
    let latched = !value;
    let mut output = String::from(" ");

    for (bit, name) in VCR_LINES.iter().enumerate() {
        let high = latched & (1 << bit) != 0;

        if high != is_active_low(name) {
            output.push_str(name);
            output.push(' ');
        }
    }

    output
}
