//! # Instruction Word Fields
//!
//! The N8X305 executes 16-bit microinstructions. Every field is a fixed bit
//! slice of the word, and several fields overlap:
//!
//! ```text
//!  15 14 13 | 12 11 10  9  8 |  7  6  5 |  4  3  2  1  0
//!  opcode   |  S1  |   S0    |     L    |  D1  |   D0
//!           |       S        |     L    |       D
//!           |       S        |           J
//!           |                A
//! ```
//!
//! The 5-bit `S` and `D` selectors name an operand. Their top two bits pick
//! a bank: values 0-15 address the register file, 16-23 the left IV bank and
//! 24-31 the right IV bank.

use std::fmt;

use crate::tables::{INSTRUCTION_NAMES, REGISTER_NAMES};

/// The eight N8X305 instruction classes, in opcode order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionClass {
    /// Rotate/mask source into destination.
    Move,
    /// Add source to AUX.
    Add,
    /// AND source with AUX.
    And,
    /// XOR source with AUX.
    Xor,
    /// Execute the instruction at a computed address.
    Xec,
    /// Branch within the current page if the source is non-zero.
    Nzt,
    /// Load a literal.
    Xmit,
    /// Absolute jump.
    Jmp,
}

impl InstructionClass {
    /// All classes indexed by opcode value.
    pub const ALL: [InstructionClass; 8] = [
        InstructionClass::Move,
        InstructionClass::Add,
        InstructionClass::And,
        InstructionClass::Xor,
        InstructionClass::Xec,
        InstructionClass::Nzt,
        InstructionClass::Xmit,
        InstructionClass::Jmp,
    ];

    /// Map a 3-bit opcode to its class. Bits above bit 2 are ignored.
    pub fn from_opcode(opcode: u8) -> Self {
        Self::ALL[(opcode & 0x7) as usize]
    }

    /// The opcode value for this class.
    pub fn opcode(self) -> u8 {
        self as u8
    }

    /// Upper-case mnemonic, e.g. `"XMIT"`.
    pub fn mnemonic(self) -> &'static str {
        INSTRUCTION_NAMES[self as usize]
    }

    /// MOVE, ADD, AND and XOR share the `S,L,D` layout.
    pub fn is_move_format(self) -> bool {
        matches!(
            self,
            InstructionClass::Move
                | InstructionClass::Add
                | InstructionClass::And
                | InstructionClass::Xor
        )
    }
}

impl fmt::Display for InstructionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}

/// Operand bank selected by the top two bits of a 5-bit selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bank {
    /// Register file (selector 0-15).
    Register,
    /// Left-bank IV byte (selector 16-23).
    Left,
    /// Right-bank IV byte (selector 24-31).
    Right,
}

impl Bank {
    /// Derive the bank of a 5-bit operand selector.
    ///
    /// # Panics
    ///
    /// Panics if `selector` is wider than 5 bits. Selectors obtained from
    /// [`InstructionWord`] accessors never are.
    pub fn of(selector: u8) -> Self {
        match selector >> 3 {
            0 | 1 => Bank::Register,
            2 => Bank::Left,
            3 => Bank::Right,
            _ => unreachable!("operand selector {selector:#04x} is wider than 5 bits"),
        }
    }
}

/// A bank-qualified operand decoded from a 5-bit selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    selector: u8,
}

impl Operand {
    /// Wrap a 5-bit selector. See [`Bank::of`] for the width requirement.
    pub fn new(selector: u8) -> Self {
        debug_assert!(selector < 32, "operand selector {selector:#04x} is wider than 5 bits");
        Self { selector }
    }

    /// The raw 5-bit selector.
    pub fn selector(self) -> u8 {
        self.selector
    }

    pub fn bank(self) -> Bank {
        Bank::of(self.selector)
    }

    /// Index within the bank: 4 bits for the register file, 3 bits for IV.
    pub fn index(self) -> u8 {
        match self.bank() {
            Bank::Register => self.selector & 0xF,
            Bank::Left | Bank::Right => self.selector & 0x7,
        }
    }

    pub fn is_register(self) -> bool {
        self.bank() == Bank::Register
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bank() {
            Bank::Register => f.pad(REGISTER_NAMES[self.index() as usize]),
            Bank::Left => f.pad(&format!("IVl{}", self.index())),
            Bank::Right => f.pad(&format!("IVr{}", self.index())),
        }
    }
}

/// A raw 16-bit microinstruction with named field accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstructionWord(pub u16);

impl InstructionWord {
    pub fn raw(self) -> u16 {
        self.0
    }

    /// Bits 15-13.
    pub fn opcode(self) -> u8 {
        (self.0 >> 13) as u8
    }

    pub fn class(self) -> InstructionClass {
        InstructionClass::from_opcode(self.opcode())
    }

    /// Bits 12-8.
    pub fn s(self) -> u8 {
        ((self.0 >> 8) & 0x1F) as u8
    }

    /// Bits 12-11, the source bank bits.
    pub fn s1(self) -> u8 {
        ((self.0 >> 11) & 0x3) as u8
    }

    /// Bits 10-8.
    pub fn s0(self) -> u8 {
        ((self.0 >> 8) & 0x7) as u8
    }

    /// Bits 7-5.
    pub fn l(self) -> u8 {
        ((self.0 >> 5) & 0x7) as u8
    }

    /// Bits 4-0.
    pub fn d(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    /// Bits 4-3, the destination bank bits.
    pub fn d1(self) -> u8 {
        ((self.0 >> 3) & 0x3) as u8
    }

    /// Bits 2-0.
    pub fn d0(self) -> u8 {
        (self.0 & 0x7) as u8
    }

    /// Bits 7-0, the 8-bit literal.
    pub fn j(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Bits 12-0, the JMP target.
    pub fn a(self) -> u16 {
        self.0 & 0x1FFF
    }

    pub fn source(self) -> Operand {
        Operand::new(self.s())
    }

    pub fn destination(self) -> Operand {
        Operand::new(self.d())
    }
}

impl From<u16> for InstructionWord {
    fn from(word: u16) -> Self {
        InstructionWord(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_slices() {
        // opcode 5, S = 0b11010, L = 0b101, D = 0b00011
        let word = InstructionWord(0b101_11010_101_00011);

        assert_eq!(word.opcode(), 5);
        assert_eq!(word.class(), InstructionClass::Nzt);
        assert_eq!(word.s(), 0b11010);
        assert_eq!(word.s1(), 0b11);
        assert_eq!(word.s0(), 0b010);
        assert_eq!(word.l(), 0b101);
        assert_eq!(word.d(), 0b00011);
        assert_eq!(word.d1(), 0b00);
        assert_eq!(word.d0(), 0b011);
        assert_eq!(word.j(), 0b101_00011);
        assert_eq!(word.a(), 0b11010_101_00011);
    }

    #[test]
    fn test_bank_boundaries() {
        assert_eq!(Bank::of(0), Bank::Register);
        assert_eq!(Bank::of(15), Bank::Register);
        assert_eq!(Bank::of(16), Bank::Left);
        assert_eq!(Bank::of(23), Bank::Left);
        assert_eq!(Bank::of(24), Bank::Right);
        assert_eq!(Bank::of(31), Bank::Right);
    }

    #[test]
    #[should_panic(expected = "wider than 5 bits")]
    fn test_bank_rejects_wide_selector() {
        Bank::of(32);
    }

    #[test]
    fn test_operand_names() {
        assert_eq!(Operand::new(0).to_string(), "AUX");
        assert_eq!(Operand::new(9).to_string(), "R11");
        assert_eq!(Operand::new(15).to_string(), "IVR");
        assert_eq!(Operand::new(19).to_string(), "IVl3");
        assert_eq!(Operand::new(31).to_string(), "IVr7");
        assert_eq!(format!("{:>4}", Operand::new(1)), "  R1");
        assert_eq!(format!("{:>4}", Operand::new(17)), "IVl1");
    }

    #[test]
    fn test_class_round_trips_opcode() {
        for (opcode, class) in InstructionClass::ALL.iter().enumerate() {
            assert_eq!(class.opcode() as usize, opcode);
            assert_eq!(InstructionClass::from_opcode(opcode as u8), *class);
        }
        assert_eq!(InstructionClass::Xmit.to_string(), "XMIT");
    }
}
