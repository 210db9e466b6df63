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

//! Decoder for the classic 8086 MOV/ADD/SUB/CMP/conditional-jump encoding
//! subset. The decoder walks a flat code image, matches each position against
//! an ordered catalog of opcode-prefix patterns, and produces [Instruction]
//! records together with their Intel-syntax text.

pub mod bits;
pub mod byte_reader;
pub mod catalog;
pub mod cpu_common;
pub mod decoder;
pub mod error;
pub mod formatter;
pub mod instruction;
pub mod mnemonic;
pub mod modrm;

pub use decoder::{decode, Decoder};
pub use error::DecodeError;
pub use formatter::{format_instruction, FormatOptions};
pub use instruction::Instruction;
pub use mnemonic::Mnemonic;

pub mod prelude {
    pub use crate::{
        catalog::{InstPattern, CATALOG},
        cpu_common::{
            AddressOffset16, Displacement, OperandSize, OperandType, Register16, Register8,
            REGISTER16_LUT, REGISTER8_LUT,
        },
        decoder::{decode, Decoder},
        error::DecodeError,
        formatter::{format_instruction, Format, FormatOptions, FormatterOutput, IntelFormatter},
        instruction::{Immediate, Instruction, OperandForm},
        mnemonic::Mnemonic,
    };
}
