/*
    sim86
    Copyright 2022-2025 Daniel Balsom
    https://github.com/dbalsom/sim86

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.
*/
use std::io;
use thiserror::Error;

/// Errors produced while walking a code image. Decoding stops at the first
/// failure; no partial instruction list is returned.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("no instruction pattern matches byte {byte:#04x} at offset {offset}")]
    UnknownOpcode { offset: usize, byte: u8 },

    #[error("unexpected end of image inside the instruction at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("error reading code image at offset {offset}")]
    Io {
        offset: usize,
        #[source]
        source: io::Error,
    },
}

impl DecodeError {
    /// Map an I/O failure at `offset`, folding EOF into the truncation error.
    pub(crate) fn from_io(offset: usize, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            DecodeError::UnexpectedEof { offset }
        }
        else {
            DecodeError::Io { offset, source }
        }
    }
}
