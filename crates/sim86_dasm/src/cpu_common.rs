/*
    ArduinoX86 Copyright 2022-2025 Daniel Balsom
    https://github.com/dbalsom/arduinoX86

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
use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Register8 {
    AL,
    CL,
    DL,
    BL,
    AH,
    CH,
    DH,
    BH,
}

impl Display for Register8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Register8::AL => write!(f, "al"),
            Register8::CL => write!(f, "cl"),
            Register8::DL => write!(f, "dl"),
            Register8::BL => write!(f, "bl"),
            Register8::AH => write!(f, "ah"),
            Register8::CH => write!(f, "ch"),
            Register8::DH => write!(f, "dh"),
            Register8::BH => write!(f, "bh"),
        }
    }
}

pub const REGISTER8_LUT: [Register8; 8] = [
    Register8::AL,
    Register8::CL,
    Register8::DL,
    Register8::BL,
    Register8::AH,
    Register8::CH,
    Register8::DH,
    Register8::BH,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Register16 {
    AX,
    CX,
    DX,
    BX,
    SP,
    BP,
    SI,
    DI,
    PC,
}

impl Register16 {
    /// Dense index for register-file storage; the program counter sits after
    /// the eight general-purpose registers.
    #[inline(always)]
    pub fn index(&self) -> usize {
        match self {
            Register16::AX => 0,
            Register16::CX => 1,
            Register16::DX => 2,
            Register16::BX => 3,
            Register16::SP => 4,
            Register16::BP => 5,
            Register16::SI => 6,
            Register16::DI => 7,
            Register16::PC => 8,
        }
    }
}

pub const REGISTER16_LUT: [Register16; 8] = [
    Register16::AX,
    Register16::CX,
    Register16::DX,
    Register16::BX,
    Register16::SP,
    Register16::BP,
    Register16::SI,
    Register16::DI,
];

impl Display for Register16 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Register16::AX => write!(f, "ax"),
            Register16::CX => write!(f, "cx"),
            Register16::DX => write!(f, "dx"),
            Register16::BX => write!(f, "bx"),
            Register16::SP => write!(f, "sp"),
            Register16::BP => write!(f, "bp"),
            Register16::SI => write!(f, "si"),
            Register16::DI => write!(f, "di"),
            Register16::PC => write!(f, "ip"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Displacement {
    NoDisp,
    Disp8(i8),
    Disp16(i16),
}

impl Displacement {
    pub fn is_some(&self) -> bool {
        !matches!(self, Displacement::NoDisp)
    }

    /// Stored byte length of the displacement field.
    pub fn len(&self) -> usize {
        match self {
            Displacement::NoDisp => 0,
            Displacement::Disp8(_) => 1,
            Displacement::Disp16(_) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw little-endian bytes of the displacement value.
    pub fn raw_bytes(&self) -> Vec<u8> {
        match self {
            Displacement::NoDisp => Vec::new(),
            Displacement::Disp8(v) => vec![*v as u8],
            Displacement::Disp16(v) => v.to_le_bytes().to_vec(),
        }
    }
}

impl From<Displacement> for i8 {
    fn from(value: Displacement) -> Self {
        match value {
            Displacement::Disp8(v) => v,
            _ => 0,
        }
    }
}

impl From<Displacement> for i16 {
    fn from(value: Displacement) -> Self {
        match value {
            Displacement::Disp8(v) => v as i16,
            Displacement::Disp16(v) => v,
            Displacement::NoDisp => 0,
        }
    }
}

/// 16-bit addressing-mode base expressions. `Bp` doubles as the
/// `mod=00, rm=110` direct-address row of the effective-address table, which
/// this decoder renders through the `bp` base like the rest of the column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressOffset16 {
    BxSi,
    BxDi,
    BpSi,
    BpDi,
    Si,
    Di,
    Bp,
    Bx,
    BxSiDisp8(i8),
    BxDiDisp8(i8),
    BpSiDisp8(i8),
    BpDiDisp8(i8),
    SiDisp8(i8),
    DiDisp8(i8),
    BpDisp8(i8),
    BxDisp8(i8),
    BxSiDisp16(i16),
    BxDiDisp16(i16),
    BpSiDisp16(i16),
    BpDiDisp16(i16),
    SiDisp16(i16),
    DiDisp16(i16),
    BpDisp16(i16),
    BxDisp16(i16),
}

impl Display for AddressOffset16 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use AddressOffset16::*;
        match self {
            BxSi => write!(f, "bx + si"),
            BxDi => write!(f, "bx + di"),
            BpSi => write!(f, "bp + si"),
            BpDi => write!(f, "bp + di"),
            Si => write!(f, "si"),
            Di => write!(f, "di"),
            Bp => write!(f, "bp"),
            Bx => write!(f, "bx"),
            BxSiDisp8(d) => write!(f, "bx + si + {d}"),
            BxDiDisp8(d) => write!(f, "bx + di + {d}"),
            BpSiDisp8(d) => write!(f, "bp + si + {d}"),
            BpDiDisp8(d) => write!(f, "bp + di + {d}"),
            SiDisp8(d) => write!(f, "si + {d}"),
            DiDisp8(d) => write!(f, "di + {d}"),
            BpDisp8(d) => write!(f, "bp + {d}"),
            BxDisp8(d) => write!(f, "bx + {d}"),
            BxSiDisp16(d) => write!(f, "bx + si + {d}"),
            BxDiDisp16(d) => write!(f, "bx + di + {d}"),
            BpSiDisp16(d) => write!(f, "bp + si + {d}"),
            BpDiDisp16(d) => write!(f, "bp + di + {d}"),
            SiDisp16(d) => write!(f, "si + {d}"),
            DiDisp16(d) => write!(f, "di + {d}"),
            BpDisp16(d) => write!(f, "bp + {d}"),
            BxDisp16(d) => write!(f, "bx + {d}"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OperandSize {
    #[default]
    NoOperand,
    Operand8,
    Operand16,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperandType {
    Register8(Register8),
    Register16(Register16),
    AddressingMode(AddressOffset16, OperandSize),
    Immediate8(i8),
    Immediate16(i16),
    Relative8(i8),
    NoOperand,
}

impl OperandType {
    #[inline(always)]
    pub fn is_address(&self) -> bool {
        matches!(self, OperandType::AddressingMode(_, _))
    }

    #[inline(always)]
    pub fn is_register(&self) -> bool {
        matches!(self, OperandType::Register8(_) | OperandType::Register16(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_offsets_render_with_signed_decimal_displacement() {
        assert_eq!(AddressOffset16::BxSi.to_string(), "bx + si");
        assert_eq!(AddressOffset16::BxSiDisp8(4).to_string(), "bx + si + 4");
        assert_eq!(AddressOffset16::BxSiDisp16(4999).to_string(), "bx + si + 4999");
        assert_eq!(AddressOffset16::BpDisp8(0).to_string(), "bp + 0");
        assert_eq!(AddressOffset16::BxDisp8(-12).to_string(), "bx + -12");
    }

    #[test]
    fn register_index_is_dense() {
        for (i, reg) in REGISTER16_LUT.iter().enumerate() {
            assert_eq!(reg.index(), i);
        }
        assert_eq!(Register16::PC.index(), 8);
    }
}
