//! # ROM Image
//!
//! The MVME320 microcode is split over three byte-wide PROMs:
//!
//! - **U1** holds the high byte of every instruction word
//! - **U9** holds the low byte
//! - **U3** holds the Fast-I/O byte
//!
//! The PROMs are wired with their data lines reversed, so every byte read
//! from a dump must have its bit order flipped before use. [`RomImage`]
//! holds the corrected words and Fast-I/O bytes, indexed by program
//! counter, and is read-only once built.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Supported ROM depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RomSize {
    /// 1024 words (the 3.0 firmware PROM set)
    #[default]
    Words1K,
    /// 4096 words
    Words4K,
}

impl RomSize {
    /// Number of addresses in a ROM of this size.
    pub fn words(self) -> usize {
        match self {
            RomSize::Words1K => 1024,
            RomSize::Words4K => 4096,
        }
    }

    /// Map a word count to a supported size.
    pub fn from_words(words: usize) -> Option<Self> {
        match words {
            1024 => Some(RomSize::Words1K),
            4096 => Some(RomSize::Words4K),
            _ => None,
        }
    }
}

/// One of the three PROMs that make up a ROM image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomPart {
    /// U1, instruction high byte
    Even,
    /// U9, instruction low byte
    Odd,
    /// U3, Fast-I/O byte
    FastIo,
}

impl RomPart {
    /// Board reference designator of the part.
    pub fn designator(self) -> &'static str {
        match self {
            RomPart::Even => "u1",
            RomPart::Odd => "u9",
            RomPart::FastIo => "u3",
        }
    }
}

impl fmt::Display for RomPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.designator())
    }
}

/// Errors from building a ROM image.
#[derive(Debug, Error)]
pub enum RomError {
    #[error("failed to read ROM part {part}: {source}")]
    Io {
        part: RomPart,
        #[source]
        source: io::Error,
    },

    #[error("ROM part {part} holds {actual} bytes, expected at least {expected}")]
    Truncated {
        part: RomPart,
        expected: usize,
        actual: usize,
    },

    #[error("program has {program} words but Fast-I/O has {fast_io} bytes")]
    LengthMismatch { program: usize, fast_io: usize },

    #[error("unsupported ROM size of {0} words (expected 1024 or 4096)")]
    UnsupportedSize(usize),
}

/// Bit-order-corrected program words and Fast-I/O bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
    program: Vec<u16>,
    fast_io: Vec<u8>,
}

impl RomImage {
    /// Create an image from already-corrected arrays.
    ///
    /// # Errors
    ///
    /// The two arrays must be the same length, and that length must be a
    /// supported [`RomSize`].
    pub fn new(program: Vec<u16>, fast_io: Vec<u8>) -> Result<Self, RomError> {
        if program.len() != fast_io.len() {
            return Err(RomError::LengthMismatch {
                program: program.len(),
                fast_io: fast_io.len(),
            });
        }

        if RomSize::from_words(program.len()).is_none() {
            return Err(RomError::UnsupportedSize(program.len()));
        }

        Ok(Self { program, fast_io })
    }

    /// Assemble an image from raw PROM dumps.
    ///
    /// Each part must hold at least `size` bytes; anything past that is
    /// ignored.
    pub fn from_parts(
        even: &[u8],
        odd: &[u8],
        fast_io: &[u8],
        size: RomSize,
    ) -> Result<Self, RomError> {
        let words = size.words();

        for (part, data) in [
            (RomPart::Even, even),
            (RomPart::Odd, odd),
            (RomPart::FastIo, fast_io),
        ] {
            if data.len() < words {
                return Err(RomError::Truncated {
                    part,
                    expected: words,
                    actual: data.len(),
                });
            }
            if data.len() > words {
                log::warn!(
                    "ROM part {}: {} bytes past ${:04X} ignored",
                    part,
                    data.len() - words,
                    words
                );
            }
        }

        let program = even[..words]
            .iter()
            .zip(&odd[..words])
            .map(|(&high, &low)| u16::from_be_bytes([high.reverse_bits(), low.reverse_bits()]))
            .collect();
        let fast_io = fast_io[..words].iter().map(|byte| byte.reverse_bits()).collect();

        log::info!("assembled {}-word ROM image from u1/u9/u3", words);

        Ok(Self { program, fast_io })
    }

    /// Read the three PROM dumps from disk and assemble them.
    pub fn load(
        even: impl AsRef<Path>,
        odd: impl AsRef<Path>,
        fast_io: impl AsRef<Path>,
        size: RomSize,
    ) -> Result<Self, RomError> {
        let read = |part: RomPart, path: &Path| {
            log::debug!("reading ROM part {} from {}", part, path.display());
            fs::read(path).map_err(|source| RomError::Io { part, source })
        };

        let even = read(RomPart::Even, even.as_ref())?;
        let odd = read(RomPart::Odd, odd.as_ref())?;
        let fast_io = read(RomPart::FastIo, fast_io.as_ref())?;

        Self::from_parts(&even, &odd, &fast_io, size)
    }

    pub fn size(&self) -> RomSize {
        // new() and from_parts() only build supported lengths
        RomSize::from_words(self.program.len()).unwrap_or_default()
    }

    /// Number of addresses in the image.
    pub fn len(&self) -> usize {
        self.program.len()
    }

    pub fn is_empty(&self) -> bool {
        self.program.is_empty()
    }

    /// Instruction word at `pc`.
    ///
    /// # Panics
    ///
    /// Panics if `pc` is outside the image.
    pub fn word(&self, pc: u16) -> u16 {
        self.program[pc as usize]
    }

    /// Fast-I/O byte at `pc`.
    ///
    /// # Panics
    ///
    /// Panics if `pc` is outside the image.
    pub fn fast_io(&self, pc: u16) -> u8 {
        self.fast_io[pc as usize]
    }

    pub fn program(&self) -> &[u16] {
        &self.program
    }

    pub fn fast_io_bytes(&self) -> &[u8] {
        &self.fast_io
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_reverses_bits() {
        let mut even = vec![0u8; 1024];
        let mut odd = vec![0u8; 1024];
        let mut io = vec![0u8; 1024];

        // 0b0000_0011 reversed is 0b1100_0000
        even[5] = 0x03;
        odd[5] = 0x80;
        io[5] = 0xE1;

        let rom = RomImage::from_parts(&even, &odd, &io, RomSize::Words1K).unwrap();

        assert_eq!(rom.word(5), 0xC001);
        assert_eq!(rom.fast_io(5), 0x87);
        assert_eq!(rom.word(4), 0x0000);
    }

    #[test]
    fn test_from_parts_truncated() {
        let full = vec![0u8; 1024];
        let short = vec![0u8; 1000];

        let err = RomImage::from_parts(&full, &full, &short, RomSize::Words1K).unwrap_err();

        assert!(matches!(
            err,
            RomError::Truncated {
                part: RomPart::FastIo,
                expected: 1024,
                actual: 1000,
            }
        ));
    }

    #[test]
    fn test_from_parts_ignores_extra_bytes() {
        let long = vec![0xFFu8; 2048];
        let rom = RomImage::from_parts(&long, &long, &long, RomSize::Words1K).unwrap();

        assert_eq!(rom.len(), 1024);
        assert_eq!(rom.size(), RomSize::Words1K);
        assert_eq!(rom.word(1023), 0xFFFF);
    }

    #[test]
    fn test_new_validates_lengths() {
        assert!(matches!(
            RomImage::new(vec![0; 1024], vec![0; 1023]),
            Err(RomError::LengthMismatch {
                program: 1024,
                fast_io: 1023
            })
        ));
        assert!(matches!(
            RomImage::new(vec![0; 100], vec![0; 100]),
            Err(RomError::UnsupportedSize(100))
        ));
        assert_eq!(
            RomImage::new(vec![0; 4096], vec![0; 4096]).unwrap().size(),
            RomSize::Words4K
        );
    }

    #[test]
    fn test_error_names_part() {
        let err = RomError::Truncated {
            part: RomPart::Odd,
            expected: 4096,
            actual: 0,
        };
        assert_eq!(
            err.to_string(),
            "ROM part u9 holds 0 bytes, expected at least 4096"
        );
    }
}
