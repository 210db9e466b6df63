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
use sim86_dasm::bits;
use sim86_dasm::prelude::{Register16, REGISTER16_LUT};

/// Eight general-purpose registers plus the program counter.
pub const REGISTER_COUNT: usize = 9;

/// Fixed-array register file indexed by [Register16] tag. Every entry is a
/// two-byte little-endian value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [[u8; 2]; REGISTER_COUNT],
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn read(&self, reg: Register16) -> [u8; 2] {
        self.regs[reg.index()]
    }

    #[inline(always)]
    pub fn write(&mut self, reg: Register16, value: [u8; 2]) {
        self.regs[reg.index()] = value;
    }

    #[inline(always)]
    pub fn read_u16(&self, reg: Register16) -> u16 {
        let [low, high] = self.regs[reg.index()];
        bits::to_unsigned16(low, high)
    }

    #[inline(always)]
    pub fn write_u16(&mut self, reg: Register16, value: u16) {
        self.regs[reg.index()] = bits::word_to_bytes(value);
    }

    /// Iterate the general-purpose registers in encoding order.
    pub fn general_registers(&self) -> impl Iterator<Item = (Register16, u16)> + '_ {
        REGISTER16_LUT.iter().map(|&reg| (reg, self.read_u16(reg)))
    }

    pub fn len(&self) -> usize {
        self.regs.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// The two arithmetic flags tracked by the simulator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub zero: bool,
    pub sign: bool,
}

impl Flags {
    /// Concatenation of set-flag letters in the fixed order Z, S; the empty
    /// set renders as an empty string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.zero {
            out.push('Z');
        }
        if self.sign {
            out.push('S');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_file_has_nine_zeroed_word_entries() {
        let regs = RegisterFile::new();
        assert_eq!(regs.len(), REGISTER_COUNT);
        for reg in REGISTER16_LUT {
            assert_eq!(regs.read(reg), [0, 0]);
        }
        assert_eq!(regs.read(Register16::PC), [0, 0]);
    }

    #[test]
    fn writes_are_little_endian() {
        let mut regs = RegisterFile::new();
        regs.write_u16(Register16::BX, 0xF003);
        assert_eq!(regs.read(Register16::BX), [0x03, 0xF0]);
        assert_eq!(regs.read_u16(Register16::BX), 61443);
    }

    #[test]
    fn flags_render_in_fixed_order() {
        assert_eq!(Flags::default().render(), "");
        assert_eq!(Flags { zero: true, sign: false }.render(), "Z");
        assert_eq!(Flags { zero: false, sign: true }.render(), "S");
        assert_eq!(Flags { zero: true, sign: true }.render(), "ZS");
    }
}
