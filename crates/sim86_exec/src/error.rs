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
use sim86_dasm::Mnemonic;
use thiserror::Error;

/// Errors raised while executing a decoded instruction sequence. All are
/// fatal for the run; no partial trace is returned.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("no executor for mnemonic {0}")]
    UnsupportedMnemonic(Mnemonic),

    #[error("unsupported operand for {mnemonic} in `{text}`")]
    UnsupportedOperand { mnemonic: Mnemonic, text: String },

    #[error("jump target {target} is not an instruction boundary")]
    BadJumpTarget { target: i64 },

    #[error("instruction `{0}` carries no immediate field")]
    MissingImmediate(String),
}
