// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of child output into UTF-8 lines.
//!
//! ```text
//! ASCII-compatible (utf8, acp, oem):
//!   child bytes --(LineAssembler)--> raw line --(Encoding::decode)--> &str sink
//!
//! utf16le:
//!   child bytes --(StreamDecoder)--> UTF-8 bytes --(LineAssembler)--> line
//! ```
//!
//! CR and LF are single bytes only in ASCII-compatible encodings; UTF-16
//! output is transcoded before lines are split. Uses `encoding_rs` for
//! everything but UTF-8. Invalid sequences become U+FFFD.

use encoding_rs::{CoderResult, Decoder, IBM866, UTF_16LE, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Encoding of a child's output stream.
///
/// Maps to Windows code pages:
/// - `Utf8`: UTF-8 (65001)
/// - `Utf16Le`: UTF-16 LE (1200)
/// - `Acp`: Active Code Page, typically Windows-1252
/// - `Oem`: OEM Code Page, typically IBM866 here
/// - `Unknown`: treated as UTF-8 passthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Unknown,
    Utf8,
    Utf16Le,
    Acp,
    Oem,
}

impl Encoding {
    /// True if CR and LF appear in the raw stream as the bytes 0x0D and 0x0A
    /// and never inside another character.
    #[must_use]
    pub const fn is_ascii_compatible(self) -> bool {
        !matches!(self, Self::Utf16Le)
    }

    /// A transcoder to put in front of line assembly, for encodings that are
    /// not ASCII-compatible.
    #[must_use]
    pub fn stream_decoder(self) -> Option<StreamDecoder> {
        match self {
            Self::Utf16Le => Some(StreamDecoder::new(UTF_16LE.new_decoder_without_bom_handling())),
            Self::Unknown | Self::Utf8 | Self::Acp | Self::Oem => None,
        }
    }

    /// Encoding of the bytes that reach line assembly.
    #[must_use]
    pub const fn line_encoding(self) -> Self {
        if self.is_ascii_compatible() { self } else { Self::Utf8 }
    }

    /// Decodes one raw line into UTF-8.
    ///
    /// # Example
    /// ```
    /// use presto_rs::utility::encoding::Encoding;
    ///
    /// assert_eq!(Encoding::Acp.decode(b"caf\xe9"), "café");
    /// ```
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        match self {
            Self::Utf8 | Self::Unknown => String::from_utf8_lossy(bytes),
            Self::Utf16Le => decode_utf16_le(bytes),
            Self::Acp => WINDOWS_1252.decode_without_bom_handling(bytes).0,
            Self::Oem => IBM866.decode_without_bom_handling(bytes).0,
        }
    }
}

/// Decodes UTF-16 LE; a dangling odd byte is dropped.
fn decode_utf16_le(bytes: &[u8]) -> Cow<'static, str> {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    if units.is_empty() {
        return Cow::Borrowed("");
    }
    Cow::Owned(String::from_utf16_lossy(&units))
}

/// Incremental transcoder from a stream encoding to UTF-8.
///
/// Keeps partial code units and surrogate pairs between chunks, so chunk
/// boundaries never corrupt a character.
pub struct StreamDecoder {
    decoder: Decoder,
    output: String,
}

impl std::fmt::Debug for StreamDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamDecoder")
            .field("encoding", &self.decoder.encoding().name())
            .finish_non_exhaustive()
    }
}

impl StreamDecoder {
    const fn new(decoder: Decoder) -> Self {
        Self {
            decoder,
            output: String::new(),
        }
    }

    /// Transcodes `chunk` and returns the UTF-8 produced so far.
    ///
    /// With `last` set, bytes still held back (such as a dangling odd byte)
    /// are flushed as U+FFFD.
    pub fn decode(&mut self, chunk: &[u8], last: bool) -> &[u8] {
        self.output.clear();
        let mut input = chunk;
        loop {
            self.output.reserve(
                self.decoder
                    .max_utf8_buffer_length(input.len())
                    .unwrap_or(input.len().saturating_mul(3) + 4),
            );
            let (result, read, _replaced) = self.decoder.decode_to_string(input, &mut self.output, last);
            input = &input[read..];
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => {}
            }
        }
        self.output.as_bytes()
    }
}
