//! # Fast-I/O Control Byte
//!
//! Alongside each microinstruction the MVME320 fetches one byte from a
//! parallel PROM that drives the board's I/O strobes directly:
//!
//! ```text
//!   7   6   5   4   3   2   1   0
//!   W   B   S  |  Op1 |    Op2
//! ```
//!
//! `W` kicks the watchdog, `B` selects the upper half of the Op1 port table,
//! `S` is the strobe flag. Op1 is bits 5-3 widened by `B` to a 0-15 index.

use std::fmt;

use crate::tables::{FAST_IO_OP1_NAMES, FAST_IO_OP2_NAMES};

/// A decoded Fast-I/O byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FastIo(pub u8);

impl FastIo {
    pub fn raw(self) -> u8 {
        self.0
    }

    /// Watchdog flag (bit 7).
    pub fn w(self) -> bool {
        self.0 & 0x80 != 0
    }

    /// Buffer-bank flag (bit 6).
    pub fn b(self) -> bool {
        self.0 & 0x40 != 0
    }

    /// Strobe flag (bit 5).
    pub fn s(self) -> bool {
        self.0 & 0x20 != 0
    }

    /// Op1 index, 0-15.
    pub fn op1(self) -> u8 {
        ((self.0 >> 3) & 0x7) | ((self.b() as u8) << 3)
    }

    /// Op2 index, 0-7.
    pub fn op2(self) -> u8 {
        self.0 & 0x7
    }

    pub fn op1_name(self) -> &'static str {
        FAST_IO_OP1_NAMES[self.op1() as usize]
    }

    pub fn op2_name(self) -> &'static str {
        FAST_IO_OP2_NAMES[self.op2() as usize]
    }

    /// The three flags as `W`/`B`/`S`, with `-` for a clear flag.
    pub fn flags(self) -> String {
        let flag = |set: bool, c: char| if set { c } else { '-' };

        [flag(self.w(), 'W'), flag(self.b(), 'B'), flag(self.s(), 'S')]
            .iter()
            .collect()
    }
}

impl From<u8> for FastIo {
    fn from(byte: u8) -> Self {
        FastIo(byte)
    }
}

impl fmt::Display for FastIo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FAST_IO {} {:>5},{:>5}",
            self.flags(),
            self.op1_name(),
            self.op2_name()
        )
    }
}
