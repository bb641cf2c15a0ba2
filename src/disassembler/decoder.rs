//! Instruction decoder for the N8X305 disassembler

use std::fmt;

use crate::fields::{InstructionClass, InstructionWord, Operand};
use crate::DecodeError;

/// Destination selector that MOVE/ADD/AND/XOR reserve.
pub const ILLEGAL_MOVE_DESTINATION: u8 = 8;

/// A decoded microinstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// ROM address the word was fetched from
    pub pc: u16,

    /// The raw instruction word
    pub word: InstructionWord,

    /// Instruction class from the opcode bits
    pub class: InstructionClass,

    /// Operands in the shape selected by class and selector values
    pub operands: Operands,
}

/// Operand shapes. Which one applies depends on the class and, for XEC,
/// NZT and XMIT, on the selector values in the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands {
    /// `S,L,D` form of MOVE, ADD, AND and XOR.
    SourceLengthDest {
        source: Operand,
        length: u8,
        destination: Operand,
    },

    /// XEC on an IV byte: `S,L,literal` with the 5-bit D field as literal.
    IvLiteral {
        source: Operand,
        length: u8,
        literal: u8,
    },

    /// XEC on a register: `S, ,literal` with the 8-bit J field as literal.
    RegisterLiteral { source: Operand, literal: u8 },

    /// NZT on an IV byte; the target replaces the low 5 bits of the PC.
    IvBranch {
        source: Operand,
        length: u8,
        target: u16,
    },

    /// NZT on a register; the target replaces the low 8 bits of the PC.
    RegisterBranch { source: Operand, target: u16 },

    /// XMIT of a variable-length literal into an IV byte.
    XmitField {
        destination: Operand,
        length: u8,
        literal: u8,
    },

    /// XMIT of an 8-bit literal into a register or IV bus latch.
    XmitByte { target: XmitTarget, literal: u8 },

    /// JMP to an absolute 13-bit address.
    Jump { target: u16 },
}

/// Where an 8-bit XMIT literal lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmitTarget {
    /// Selector 10: IV bus data, right bank.
    IvRightData,
    /// Selector 11: IV bus data, left bank.
    IvLeftData,
    /// Selector 7: R07, also driven out as the left-bank IV address.
    LeftAddress,
    /// Selector 15: R17, also driven out as the right-bank IV address.
    RightAddress,
    /// Any other register-file selector.
    Register(Operand),
}

impl XmitTarget {
    /// Classify the 5-bit XMIT destination selector. Selectors 16 and up
    /// are handled by [`Operands::XmitField`] and must not reach here.
    fn from_selector(selector: u8) -> Self {
        match selector {
            10 => XmitTarget::IvRightData,
            11 => XmitTarget::IvLeftData,
            7 => XmitTarget::LeftAddress,
            15 => XmitTarget::RightAddress,
            _ => XmitTarget::Register(Operand::new(selector)),
        }
    }
}

impl fmt::Display for XmitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmitTarget::IvRightData => f.pad("IVrD"),
            XmitTarget::IvLeftData => f.pad("IVlD"),
            XmitTarget::LeftAddress => f.pad("R07lA"),
            XmitTarget::RightAddress => f.pad("R17rA"),
            XmitTarget::Register(register) => fmt::Display::fmt(register, f),
        }
    }
}

/// Target of an NZT at `pc`.
///
/// NZT branches within the current page: the literal replaces the low bits
/// of the PC and the high bits are kept. A register source carries an
/// 8-bit literal (J); an IV source only has room for 5 bits (D).
pub fn nzt_target(pc: u16, word: InstructionWord) -> u16 {
    if word.source().is_register() {
        (pc & 0xFF00) | word.j() as u16
    } else {
        (pc & 0xFFE0) | word.d() as u16
    }
}

/// Decode the instruction word fetched from `pc`.
///
/// # Errors
///
/// Returns [`DecodeError::IllegalDestination`] for a MOVE, ADD, AND or XOR
/// whose destination selector is 8.
pub fn decode_instruction(word: InstructionWord, pc: u16) -> Result<Instruction, DecodeError> {
    let class = word.class();

    let operands = match class {
        InstructionClass::Move
        | InstructionClass::Add
        | InstructionClass::And
        | InstructionClass::Xor => {
            if word.d() == ILLEGAL_MOVE_DESTINATION {
                return Err(DecodeError::IllegalDestination {
                    pc,
                    word: word.raw(),
                    class,
                });
            }

            Operands::SourceLengthDest {
                source: word.source(),
                length: word.l(),
                destination: word.destination(),
            }
        }
        InstructionClass::Xec => {
            if word.source().is_register() {
                Operands::RegisterLiteral {
                    source: word.source(),
                    literal: word.j(),
                }
            } else {
                Operands::IvLiteral {
                    source: word.source(),
                    length: word.l(),
                    literal: word.d(),
                }
            }
        }
        InstructionClass::Nzt => {
            let target = nzt_target(pc, word);

            if word.source().is_register() {
                Operands::RegisterBranch {
                    source: word.source(),
                    target,
                }
            } else {
                Operands::IvBranch {
                    source: word.source(),
                    length: word.l(),
                    target,
                }
            }
        }
        InstructionClass::Xmit => {
            // XMIT carries its destination in the S position
            if word.s() >= 16 {
                Operands::XmitField {
                    destination: word.source(),
                    length: word.l(),
                    literal: word.d(),
                }
            } else {
                Operands::XmitByte {
                    target: XmitTarget::from_selector(word.s()),
                    literal: word.j(),
                }
            }
        }
        InstructionClass::Jmp => Operands::Jump { target: word.a() },
    };

    Ok(Instruction {
        pc,
        word,
        class,
        operands,
    })
}
