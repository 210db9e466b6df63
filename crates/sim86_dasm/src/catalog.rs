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
#![cfg_attr(rustfmt, rustfmt_skip)]

use crate::{instruction::OperandForm, mnemonic::Mnemonic};

/// One entry of the encoding catalog: an opcode-prefix constant, the number
/// of significant prefix bits, the mnemonic (or [Mnemonic::Group] when the
/// modrm REG field selects it), and the operand arrangement.
#[derive(Copy, Clone, Debug)]
pub struct InstPattern {
    pub prefix: u8,
    pub prefix_bits: u32,
    pub mnemonic: Mnemonic,
    pub form: OperandForm,
}

impl InstPattern {
    /// Compare the pattern's prefix against the significant high bits of an
    /// opcode byte.
    #[inline(always)]
    pub fn matches(&self, byte: u8) -> bool {
        (byte >> (8 - self.prefix_bits)) == self.prefix
    }
}

macro_rules! pat {
    ($prefix:literal, $bits:literal, $m:ident, $form:ident) => {
        InstPattern {
            prefix: $prefix,
            prefix_bits: $bits,
            mnemonic: Mnemonic::$m,
            form: OperandForm::$form,
        }
    };
}

/// The ordered encoding catalog. The decoder takes the first entry whose
/// prefix matches; the prefixes are mutually exclusive over all 256 byte
/// values (see the exhaustive test below), so order is a formality kept for
/// the specific-before-general reading.
pub static CATALOG: [InstPattern; 29] = [
    // MOV
    pat!(0b100010,   6, MOV,    RegMemWithReg),
    pat!(0b1011,     4, MOV,    ImmToReg),
    // ADD
    pat!(0b000000,   6, ADD,    RegMemWithReg),
    pat!(0b0000010,  7, ADD,    ImmToAcc),
    // SUB
    pat!(0b001010,   6, SUB,    RegMemWithReg),
    pat!(0b0010110,  7, SUB,    ImmToAcc),
    // ADD, SUB, CMP - immediate to register/memory; modrm REG field selects
    pat!(0b100000,   6, Group,  ImmToRegMem),
    // CMP
    pat!(0b001110,   6, CMP,    RegMemWithReg),
    pat!(0b0011110,  7, CMP,    ImmToAcc),
    // Conditional jumps. 0b01110101 decodes as JNZ; the JNE alias shares the
    // encoding and exists only in trace output.
    pat!(0b01110101, 8, JNZ,    Jump),
    pat!(0b01110100, 8, JE,     Jump),
    pat!(0b01111100, 8, JL,     Jump),
    pat!(0b01111110, 8, JLE,    Jump),
    pat!(0b01110010, 8, JB,     Jump),
    pat!(0b01110110, 8, JBE,    Jump),
    pat!(0b01111010, 8, JP,     Jump),
    pat!(0b01110000, 8, JO,     Jump),
    pat!(0b01111000, 8, JS,     Jump),
    pat!(0b01111101, 8, JNL,    Jump),
    pat!(0b01111111, 8, JG,     Jump),
    pat!(0b01110011, 8, JNB,    Jump),
    pat!(0b01110111, 8, JA,     Jump),
    pat!(0b01111011, 8, JNP,    Jump),
    pat!(0b01110001, 8, JNO,    Jump),
    pat!(0b01111001, 8, JNS,    Jump),
    // LOOP and JCXZ
    pat!(0b11100010, 8, LOOP,   Jump),
    pat!(0b11100001, 8, LOOPZ,  Jump),
    pat!(0b11100000, 8, LOOPNZ, Jump),
    pat!(0b11100011, 8, JCXZ,   Jump),
];

/// First catalog entry matching an opcode byte.
#[inline(always)]
pub fn lookup(byte: u8) -> Option<&'static InstPattern> {
    CATALOG.iter().find(|pattern| pattern.matches(byte))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every byte value must match at most one pattern; overlapping prefixes
    /// would make catalog order load-bearing.
    #[test]
    fn prefixes_are_unambiguous() {
        for byte in 0u8..=255 {
            let matching: Vec<&InstPattern> =
                CATALOG.iter().filter(|pattern| pattern.matches(byte)).collect();
            assert!(
                matching.len() <= 1,
                "byte {byte:#04x} matches {} patterns",
                matching.len()
            );
        }
    }

    #[test]
    fn known_opcodes_resolve() {
        assert_eq!(lookup(0x89).unwrap().mnemonic, Mnemonic::MOV);
        assert_eq!(lookup(0xB1).unwrap().form, OperandForm::ImmToReg);
        assert_eq!(lookup(0x04).unwrap().mnemonic, Mnemonic::ADD);
        assert_eq!(lookup(0x2C).unwrap().mnemonic, Mnemonic::SUB);
        assert_eq!(lookup(0x3C).unwrap().mnemonic, Mnemonic::CMP);
        assert_eq!(lookup(0x83).unwrap().mnemonic, Mnemonic::Group);
        assert_eq!(lookup(0x75).unwrap().mnemonic, Mnemonic::JNZ);
        assert_eq!(lookup(0xE2).unwrap().mnemonic, Mnemonic::LOOP);
    }

    #[test]
    fn unknown_opcodes_do_not_resolve() {
        // PUSH es, HLT, and the 0x0F extension escape are outside the subset.
        assert!(lookup(0x06).is_none());
        assert!(lookup(0xF4).is_none());
        assert!(lookup(0x0F).is_none());
    }
}
