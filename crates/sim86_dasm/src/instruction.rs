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

use crate::{bits, cpu_common::OperandType, mnemonic::Mnemonic};

/// Operand arrangement of an encoding pattern.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OperandForm {
    #[default]
    RegMemWithReg,
    ImmToReg,
    ImmToRegMem,
    ImmToAcc,
    Jump,
}

/// An immediate field: the raw little-endian bytes as stored in the image
/// plus the signed interpretation used for rendering and arithmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Immediate {
    pub raw: Vec<u8>,
    pub value: i16,
}

impl Immediate {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            raw: vec![byte],
            value: bits::to_signed8(byte),
        }
    }

    pub fn from_word(word: u16) -> Self {
        let raw = word.to_le_bytes();
        Self {
            raw: raw.to_vec(),
            value: bits::to_signed16(raw[0], raw[1]),
        }
    }

    /// The unsigned little-endian reading of the raw bytes, at the raw width.
    pub fn unsigned_value(&self) -> u16 {
        match self.raw.as_slice() {
            [low, high] => bits::to_unsigned16(*low, *high),
            [byte] => *byte as u16,
            _ => 0,
        }
    }
}

/// One decoded instruction. The destination/source operands are already
/// resolved through the direction bit, so rendering and execution never
/// reorder fields after decode.
#[derive(Clone, Debug)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub form: OperandForm,
    pub d_bit: bool,
    pub w_bit: bool,
    pub s_bit: bool,
    pub b_mod: u8,
    pub b_reg: u8,
    pub b_rm: u8,
    pub operand1_type: OperandType,
    pub operand2_type: OperandType,
    pub immediate: Option<Immediate>,
    pub instruction_bytes: Vec<u8>,
    pub displacement_bytes: Vec<u8>,
    pub immediate_bytes: Vec<u8>,
    pub byte_offset: usize,
    pub disambiguate: bool,
    pub text: String,
}

impl Default for Instruction {
    fn default() -> Self {
        Self {
            mnemonic: Mnemonic::Invalid,
            form: OperandForm::default(),
            d_bit: false,
            w_bit: false,
            s_bit: false,
            b_mod: 0,
            b_reg: 0,
            b_rm: 0,
            operand1_type: OperandType::NoOperand,
            operand2_type: OperandType::NoOperand,
            immediate: None,
            instruction_bytes: Vec::new(),
            displacement_bytes: Vec::new(),
            immediate_bytes: Vec::new(),
            byte_offset: 0,
            disambiguate: false,
            text: String::new(),
        }
    }
}

impl Instruction {
    /// Total bytes this instruction consumed from the image.
    #[inline(always)]
    pub fn byte_len(&self) -> usize {
        self.instruction_bytes.len()
    }

    /// The byte offset immediately after this instruction, which is also the
    /// program-counter value once it has executed.
    #[inline(always)]
    pub fn end_offset(&self) -> usize {
        self.byte_offset + self.byte_len()
    }

    pub fn has_operands(&self) -> bool {
        self.operand1_type != OperandType::NoOperand || self.operand2_type != OperandType::NoOperand
    }
}
