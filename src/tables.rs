//! # Static Name Tables
//!
//! Every name the disassembler prints comes from one of the fixed tables in
//! this module. The tables are indexed by bit fields pulled out of the
//! instruction word or the Fast-I/O byte, so each one covers its index range
//! exactly:
//!
//! - [`INSTRUCTION_NAMES`] - 8 entries, indexed by the 3-bit opcode
//! - [`REGISTER_NAMES`] - 16 entries, indexed by a register-bank selector
//! - [`FAST_IO_OP1_NAMES`] - 16 entries, indexed by the B-widened Op1 field
//! - [`FAST_IO_OP2_NAMES`] - 8 entries, indexed by the Op2 field
//! - [`VCR_LINES`] - 8 entries, one per bit of the MVME320 VCR
//! - [`VSR2_BITS`] - 8 entries, one per bit of the MVME320 VSR2

/// Instruction mnemonics, indexed by opcode (bits 15-13).
pub const INSTRUCTION_NAMES: [&str; 8] = ["MOVE", "ADD", "AND", "XOR", "XEC", "NZT", "XMIT", "JMP"];

/// Register file names, indexed by selector values 0-15.
///
/// Selectors 7 and 15 are not storage registers: they address the left and
/// right IV bus latches (`IVL`/`IVR`). The remaining names follow the octal
/// numbering used in Signetics documentation, which is why `R7`-`R9` are
/// absent.
pub const REGISTER_NAMES: [&str; 16] = [
    "AUX", "R1", "R2", "R3", "R4", "R5", "R6", "IVL", "R10", "R11", "R12", "R13", "R14", "R15",
    "R16", "IVR",
];

/// Fast-I/O write-strobe port names.
///
/// Entries 0-7 are selected when the B flag is clear, 8-15 when it is set.
/// Unused slots carry a `NOPn` placeholder so every index renders.
pub const FAST_IO_OP1_NAMES: [&str; 16] = [
    // B == 0
    "NOP0", "WUASn", "WUDSn", "WRDn", "WLDSn", "VCR", "WMASn", "WLASn",
    // B == 1
    "WDC1n", "WDBCn", "WDC3n", "NOP3", "WDC2n", "NOP5", "WBUn", "NOP7",
];

/// Op1 index of the VCR write strobe.
pub const FAST_IO_OP1_VCR: u8 = 5;

/// Fast-I/O read-enable port names.
pub const FAST_IO_OP2_NAMES: [&str; 8] = [
    "VSR1", "RDBCn", "VRDLn", "RBUn", "VSR2", "RDSn", "VRDUn", "NOP7",
];

/// Op2 index of the VSR2 read enable.
pub const FAST_IO_OP2_VSR2: u8 = 4;

/// VMEbus control register (VCR) output lines, indexed by bit number.
///
/// A trailing `n` marks an active-low line.
pub const VCR_LINES: [&str; 8] = ["CLED1n", "CDS0", "CDS1", "CWRT", "nc", "CBERR", "CBR", "STARTn"];

/// VMEbus status register 2 (VSR2) inputs, indexed by bit number.
pub const VSR2_BITS: [&str; 8] = ["n/c", "n/c", "n/c", "n/c", "ACFAIL", "BCLR", "LBERRn", "CYACTIV"];

/// Whether a named line is asserted when its bit is low.
///
/// Board signal names carry a lowercase `n` suffix for active-low lines.
pub fn is_active_low(name: &str) -> bool {
    name.ends_with('n')
}
