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
use std::fmt;

/// Mnemonics for the supported 8086 subset. `Group` marks the immediate
/// arithmetic encoding whose concrete mnemonic comes from the modrm REG
/// field.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default, Hash)]
pub enum Mnemonic {
    #[default]
    Invalid,
    Group,
    MOV,
    ADD,
    SUB,
    CMP,
    JE,
    JNZ,
    JL,
    JLE,
    JB,
    JBE,
    JP,
    JO,
    JS,
    JNL,
    JG,
    JNB,
    JA,
    JNP,
    JNO,
    JNS,
    LOOP,
    LOOPZ,
    LOOPNZ,
    JCXZ,
}

pub(crate) fn mnemonic_to_str(op: Mnemonic) -> &'static str {
    use Mnemonic::*;
    match op {
        Invalid => "INVALID",
        Group => "GROUP",
        MOV => "MOV",
        ADD => "ADD",
        SUB => "SUB",
        CMP => "CMP",
        JE => "JE",
        JNZ => "JNZ",
        JL => "JL",
        JLE => "JLE",
        JB => "JB",
        JBE => "JBE",
        JP => "JP",
        JO => "JO",
        JS => "JS",
        JNL => "JNL",
        JG => "JG",
        JNB => "JNB",
        JA => "JA",
        JNP => "JNP",
        JNO => "JNO",
        JNS => "JNS",
        LOOP => "LOOP",
        LOOPZ => "LOOPZ",
        LOOPNZ => "LOOPNZ",
        JCXZ => "JCXZ",
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", mnemonic_to_str(*self))
    }
}

impl Mnemonic {
    pub fn to_str(&self) -> &'static str {
        mnemonic_to_str(*self)
    }

    /// Resolve the immediate arithmetic group: the 3-bit REG field of the
    /// modrm byte selects the operation.
    pub fn from_arith_field(field: u8) -> Option<Mnemonic> {
        match field {
            0b000 => Some(Mnemonic::ADD),
            0b101 => Some(Mnemonic::SUB),
            0b111 => Some(Mnemonic::CMP),
            _ => None,
        }
    }

    pub fn is_jump(&self) -> bool {
        use Mnemonic::*;
        matches!(
            self,
            JE | JNZ | JL | JLE | JB | JBE | JP | JO | JS | JNL | JG | JNB | JA | JNP | JNO | JNS
                | LOOP | LOOPZ | LOOPNZ | JCXZ
        )
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Mnemonic::ADD | Mnemonic::SUB | Mnemonic::CMP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arith_field_resolution() {
        assert_eq!(Mnemonic::from_arith_field(0b000), Some(Mnemonic::ADD));
        assert_eq!(Mnemonic::from_arith_field(0b101), Some(Mnemonic::SUB));
        assert_eq!(Mnemonic::from_arith_field(0b111), Some(Mnemonic::CMP));
        assert_eq!(Mnemonic::from_arith_field(0b001), None);
    }
}
