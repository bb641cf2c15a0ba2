//! Formatting functions for disassembled instructions

use crate::disassembler::decoder::{Instruction, Operands};
use crate::labels::LabelTable;

/// Format a single instruction as assembly text
///
/// # Arguments
///
/// * `instr` - The instruction to format
/// * `labels` - Optional label table; JMP targets with a label render by name
///
/// # Returns
///
/// The mnemonic right-aligned in four columns followed by the operands,
/// e.g. `"MOVE   R1,3,R2"` or `"XMIT #$2A, ,AUX"`
pub fn format_instruction(instr: &Instruction, labels: Option<&LabelTable>) -> String {
    let class = instr.class;

    match instr.operands {
        Operands::SourceLengthDest {
            source,
            length,
            destination,
        } => format!("{:>4} {:>4},{},{}", class, source, length, destination),
        Operands::IvLiteral {
            source,
            length,
            literal,
        } => format!("{:>4} {:>4},{},${:02X}", class, source, length, literal),
        Operands::RegisterLiteral { source, literal } => {
            format!("{:>4} {:>4}, ,${:02X}", class, source, literal)
        }
        Operands::IvBranch {
            source,
            length,
            target,
        } => format!("{:>4} {:>4},{},${:04X}", class, source, length, target),
        Operands::RegisterBranch { source, target } => {
            format!("{:>4} {:>4}, ,${:04X}", class, source, target)
        }
        Operands::XmitField {
            destination,
            length,
            literal,
        } => format!("{:>4} {:>4},{},${:02X}", class, destination, length, literal),
        Operands::XmitByte { target, literal } => {
            format!("{:>4} #${:02X}, ,{}", class, literal, target)
        }
        Operands::Jump { target } => match labels.and_then(|table| table.label_for(target)) {
            Some(label) => format!("{:>4} {}", class, label),
            None => format!("{:>4} ${:04X}", class, target),
        },
    }
}

/// Format the raw fields an instruction uses, in octal
///
/// This is the breakdown printed beside the mnemonic for checking the
/// decode against the binary: `[op|S..|L.|D..]` for the forms that use
/// the L and D fields, `[op|S..|J...]` for the 8-bit literal forms and
/// `[op|A.....]` for JMP.
pub fn format_fields(instr: &Instruction) -> String {
    let word = instr.word;
    let opcode = word.opcode();

    match instr.operands {
        Operands::SourceLengthDest { .. }
        | Operands::IvLiteral { .. }
        | Operands::IvBranch { .. }
        | Operands::XmitField { .. } => format!(
            "[{}|S{:>2o}|L{:o}|D{:>2o}]",
            opcode,
            word.s(),
            word.l(),
            word.d()
        ),
        Operands::RegisterLiteral { .. }
        | Operands::RegisterBranch { .. }
        | Operands::XmitByte { .. } => {
            format!("[{}|S{:>2o}|J{:>3o}]", opcode, word.s(), word.j())
        }
        Operands::Jump { .. } => format!("[{}|A{:>5o}]", opcode, word.a()),
    }
}
