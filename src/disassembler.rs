//! N8X305 Disassembler Module
//!
//! Walks a ROM image from address 0 to the end and turns each microinstruction
//! and its Fast-I/O byte into one annotated listing line.

pub mod decoder;
pub mod formatter;

use std::fmt;
use std::io::{self, Write};

use crate::autocomment::auto_comment;
use crate::fast_io::FastIo;
use crate::fields::InstructionWord;
use crate::labels::LabelTable;
use crate::rom::{RomImage, RomSize};
use crate::{DecodeError, Error};

/// One listing line, covering a single ROM address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassemblyLine {
    /// ROM address
    pub pc: u16,

    /// Label from the label table, if one names this address
    pub label: Option<String>,

    /// Instruction text (e.g., "XMIT #$2A, ,AUX")
    pub text: String,

    /// Octal field breakdown (e.g., "[6|S 0|J 52]")
    pub fields: String,

    /// Raw instruction word
    pub word: u16,

    /// Raw Fast-I/O byte
    pub fast_io: u8,

    /// Decoded Fast-I/O byte (e.g., "FAST_IO ---  NOP0, VSR1")
    pub fast_io_text: String,

    /// Label-table comment, else inferred comment, else empty
    pub comment: String,
}

impl fmt::Display for DisassemblyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04X}: {:>10}: {:<20} {:<20} [${:04X}] | [${:02X}] {} | // {}",
            self.pc,
            self.label.as_deref().unwrap_or(""),
            self.text,
            self.fields,
            self.word,
            self.fast_io,
            self.fast_io_text,
            self.comment
        )
    }
}

/// Options controlling disassembly output
#[derive(Debug, Clone, Copy)]
pub struct DisassemblyOptions {
    /// Whether to infer comments for lines the label table leaves blank
    pub auto_comment: bool,
}

impl Default for DisassemblyOptions {
    fn default() -> Self {
        Self { auto_comment: true }
    }
}

/// Disassembly driver over one ROM image
///
/// The label table is optional; without one, JMP targets render as
/// addresses and only inferred comments appear.
#[derive(Debug, Clone, Copy)]
pub struct Disassembler<'a> {
    rom: &'a RomImage,
    labels: Option<&'a LabelTable>,
    options: DisassemblyOptions,
}

impl<'a> Disassembler<'a> {
    pub fn new(
        rom: &'a RomImage,
        labels: Option<&'a LabelTable>,
        options: DisassemblyOptions,
    ) -> Self {
        Self {
            rom,
            labels,
            options,
        }
    }

    /// Decode the instruction and Fast-I/O byte at `pc` into a listing line
    ///
    /// # Errors
    ///
    /// Fails on an illegal encoding; see [`DecodeError`].
    ///
    /// # Panics
    ///
    /// Panics if `pc` is outside the ROM image.
    pub fn decode_line(&self, pc: u16) -> Result<DisassemblyLine, DecodeError> {
        let word = self.rom.word(pc);
        let io = FastIo(self.rom.fast_io(pc));

        let instr = decoder::decode_instruction(InstructionWord(word), pc)?;
        let text = formatter::format_instruction(&instr, self.labels);
        let fields = formatter::format_fields(&instr);

        let entry = self.labels.and_then(|table| table.lookup(pc));
        let label = entry.and_then(|entry| entry.label.clone());

        let comment = match entry.and_then(|entry| entry.comment.as_deref()) {
            Some(comment) if !comment.is_empty() => comment.to_string(),
            _ if self.options.auto_comment => auto_comment(&instr, io).unwrap_or_default(),
            _ => String::new(),
        };

        log::trace!("${:04X}: [${:04X}] [${:02X}] {}", pc, word, io.raw(), text);

        Ok(DisassemblyLine {
            pc,
            label,
            text,
            fields,
            word,
            fast_io: io.raw(),
            fast_io_text: io.to_string(),
            comment,
        })
    }

    /// Iterate over every address in ascending order
    pub fn lines(&self) -> Lines<'_, 'a> {
        Lines { dasm: self, pc: 0 }
    }

    /// Disassemble the whole ROM, stopping at the first illegal encoding
    pub fn disassemble(&self) -> Result<Vec<DisassemblyLine>, DecodeError> {
        let lines = self.lines().collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "disassembled {} addresses: {} labelled, {} commented",
            lines.len(),
            lines.iter().filter(|line| line.label.is_some()).count(),
            lines.iter().filter(|line| !line.comment.is_empty()).count()
        );

        Ok(lines)
    }
}

/// Iterator over the lines of a pass, one per ROM address
pub struct Lines<'d, 'a> {
    dasm: &'d Disassembler<'a>,
    pc: usize,
}

impl Iterator for Lines<'_, '_> {
    type Item = Result<DisassemblyLine, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pc >= self.dasm.rom.len() {
            return None;
        }

        let line = self.dasm.decode_line(self.pc as u16);
        self.pc += 1;

        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dasm.rom.len().saturating_sub(self.pc);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Lines<'_, '_> {}

/// Disassemble a ROM image into a vector of listing lines
///
/// # Arguments
///
/// * `rom` - The ROM image to disassemble
/// * `labels` - Optional label/comment table
/// * `options` - Disassembly options controlling output
///
/// # Returns
///
/// One `DisassemblyLine` per ROM address, in address order
pub fn disassemble(
    rom: &RomImage,
    labels: Option<&LabelTable>,
    options: DisassemblyOptions,
) -> Result<Vec<DisassemblyLine>, DecodeError> {
    Disassembler::new(rom, labels, options).disassemble()
}

/// Assemble a ROM from raw PROM dumps and disassemble it in one step
///
/// `labels_csv` is the text of a label table, if one is available.
pub fn disassemble_parts(
    even: &[u8],
    odd: &[u8],
    fast_io: &[u8],
    size: RomSize,
    labels_csv: Option<&str>,
    options: DisassemblyOptions,
) -> Result<Vec<DisassemblyLine>, Error> {
    let rom = RomImage::from_parts(even, odd, fast_io, size)?;
    let labels = labels_csv.map(LabelTable::parse).transpose()?;

    Ok(disassemble(&rom, labels.as_ref(), options)?)
}

/// Write rendered lines to `out`, one per line
pub fn write_listing<W: Write>(lines: &[DisassemblyLine], mut out: W) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }

    out.flush()
}
