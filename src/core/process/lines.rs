// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Line reconstruction across arbitrary read-chunk boundaries.
//!
//! ```text
//! carry "par" + chunk "tial\r\nnext\rrest"
//!   --> lines ["partial", "next"]   carry "rest"
//!
//! LineEndings::CarriageReturn  CR, CR LF      (bare LF is data)
//! LineEndings::Any             CR, CR LF, LF
//! ```
//!
//! The carry remembers whether the last chunk ended on a CR, so a CR LF pair
//! split across two reads is still a single terminator.

use serde::{Deserialize, Serialize};

/// Default upper bound for a single unterminated line.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Which bytes terminate a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEndings {
    /// CR or CR LF. A bare LF stays part of the line.
    #[default]
    #[serde(rename = "cr")]
    CarriageReturn,
    /// CR, CR LF, or a bare LF.
    Any,
}

/// Unterminated text carried between chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Carry {
    partial: Vec<u8>,
    after_cr: bool,
}

impl Carry {
    /// Creates a carry holding `partial` as the start of the next line.
    #[must_use]
    pub fn new(partial: impl Into<Vec<u8>>) -> Self {
        Self {
            partial: partial.into(),
            after_cr: false,
        }
    }

    /// Bytes of the current unterminated line.
    #[must_use]
    pub fn partial(&self) -> &[u8] {
        &self.partial
    }

    /// True when no unterminated bytes are held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.partial.is_empty()
    }

    /// Takes the unterminated bytes, leaving an empty carry.
    pub fn take_partial(&mut self) -> Vec<u8> {
        self.after_cr = false;
        std::mem::take(&mut self.partial)
    }
}

/// Result of feeding one chunk through a [`LineAssembler`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Assembled {
    /// Complete lines in order, terminators stripped.
    pub lines: Vec<Vec<u8>>,
    /// Remainder to prefix onto the next chunk.
    pub carry: Carry,
}

/// A line grew past the assembler's limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTooLong {
    pub limit: usize,
    /// Lines of the same chunk that were terminated before the overflow.
    pub completed: Vec<Vec<u8>>,
}

/// Splits byte chunks into lines.
#[derive(Debug, Clone, Copy)]
pub struct LineAssembler {
    endings: LineEndings,
    max_line_length: usize,
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new(LineEndings::default(), DEFAULT_MAX_LINE_LENGTH)
    }
}

impl LineAssembler {
    #[must_use]
    pub const fn new(endings: LineEndings, max_line_length: usize) -> Self {
        Self {
            endings,
            max_line_length,
        }
    }

    #[must_use]
    pub const fn endings(&self) -> LineEndings {
        self.endings
    }

    #[must_use]
    pub const fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Splits `carry + chunk` into complete lines and a new carry.
    ///
    /// An empty chunk returns no lines and the carry unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`LineTooLong`] if a line (emitted or still carried) would
    /// exceed the maximum line length. The error holds every line finished
    /// before that point, so none of them is lost.
    pub fn assemble(&self, chunk: &[u8], carry: Carry) -> Result<Assembled, LineTooLong> {
        let Carry {
            mut partial,
            mut after_cr,
        } = carry;
        let mut lines = Vec::new();

        for &byte in chunk {
            let swallow = after_cr && byte == LF;
            after_cr = false;
            if swallow {
                continue;
            }

            match byte {
                CR => {
                    lines.push(std::mem::take(&mut partial));
                    after_cr = true;
                }
                LF if self.endings == LineEndings::Any => {
                    lines.push(std::mem::take(&mut partial));
                }
                _ => {
                    if partial.len() >= self.max_line_length {
                        return Err(LineTooLong {
                            limit: self.max_line_length,
                            completed: lines,
                        });
                    }
                    partial.push(byte);
                }
            }
        }

        Ok(Assembled {
            lines,
            carry: Carry { partial, after_cr },
        })
    }
}
