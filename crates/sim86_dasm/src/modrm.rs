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
use crate::byte_reader::ByteReader;
use crate::cpu_common::{AddressOffset16, Displacement, Register16, Register8, REGISTER16_LUT, REGISTER8_LUT};
use std::io;

#[derive(Copy, Clone)]
pub struct ModRmByte {
    byte: u8,
    b_mod: u8,
    b_reg: u8,
    b_rm: u8,
    disp: Displacement,
    addressing_mode: AddressOffset16,
}

const MODRM_TABLE: [ModRmByte; 256] = {
    let mut table: [ModRmByte; 256] = [ModRmByte {
        byte: 0,
        b_mod: 0,
        b_reg: 0,
        b_rm: 0,
        disp: Displacement::NoDisp,
        addressing_mode: AddressOffset16::BxSi,
    }; 256];
    let mut byte = 0;

    loop {
        let b_mod = (byte >> 6) & 0x03;

        let displacement = match b_mod {
            // Addressing mode [bp] (direct address) is the single 0b00 mode
            // that carries a displacement.
            0b00 => {
                if byte & ModRmByte::MODRM_ADDR_MASK == ModRmByte::MODRM_ADDR_DIRECT {
                    Displacement::Disp16(0)
                }
                else {
                    Displacement::NoDisp
                }
            }
            // 0b01 signifies an 8 bit displacement
            0b01 => Displacement::Disp8(0),
            // 0b10 signifies a 16 bit displacement
            0b10 => Displacement::Disp16(0),
            _ => Displacement::NoDisp,
        };

        // Set the addressing mode based on the combination of Mod and R/M bitfields + Displacement.
        let addressing_mode = match byte & ModRmByte::MODRM_ADDR_MASK {
            ModRmByte::MODRM_ADDR_BX_SI => AddressOffset16::BxSi,
            ModRmByte::MODRM_ADDR_BX_DI => AddressOffset16::BxDi,
            ModRmByte::MODRM_ADDR_BP_SI => AddressOffset16::BpSi,
            ModRmByte::MODRM_ADDR_BP_DI => AddressOffset16::BpDi,
            ModRmByte::MODRM_ADDR_SI => AddressOffset16::Si,
            ModRmByte::MODRM_ADDR_DI => AddressOffset16::Di,
            ModRmByte::MODRM_ADDR_DIRECT => AddressOffset16::BpDisp16(0),
            ModRmByte::MODRM_ADDR_BX => AddressOffset16::Bx,
            ModRmByte::MODRM_ADDR_BX_SI_DISP8 => AddressOffset16::BxSiDisp8(0),
            ModRmByte::MODRM_ADDR_BX_DI_DISP8 => AddressOffset16::BxDiDisp8(0),
            ModRmByte::MODRM_ADDR_BP_SI_DISP8 => AddressOffset16::BpSiDisp8(0),
            ModRmByte::MODRM_ADDR_BP_DI_DISP8 => AddressOffset16::BpDiDisp8(0),
            ModRmByte::MODRM_ADDR_SI_DISP8 => AddressOffset16::SiDisp8(0),
            ModRmByte::MODRM_ADDR_DI_DISP8 => AddressOffset16::DiDisp8(0),
            ModRmByte::MODRM_ADDR_BP_DISP8 => AddressOffset16::BpDisp8(0),
            ModRmByte::MODRM_ADDR_BX_DISP8 => AddressOffset16::BxDisp8(0),
            ModRmByte::MODRM_ADDR_BX_SI_DISP16 => AddressOffset16::BxSiDisp16(0),
            ModRmByte::MODRM_ADDR_BX_DI_DISP16 => AddressOffset16::BxDiDisp16(0),
            ModRmByte::MODRM_ADDR_BP_SI_DISP16 => AddressOffset16::BpSiDisp16(0),
            ModRmByte::MODRM_ADDR_BP_DI_DISP16 => AddressOffset16::BpDiDisp16(0),
            ModRmByte::MODRM_ADDR_SI_DISP16 => AddressOffset16::SiDisp16(0),
            ModRmByte::MODRM_ADDR_DI_DISP16 => AddressOffset16::DiDisp16(0),
            ModRmByte::MODRM_ADDR_BP_DISP16 => AddressOffset16::BpDisp16(0),
            ModRmByte::MODRM_ADDR_BX_DISP16 => AddressOffset16::BxDisp16(0),
            _ => AddressOffset16::BxSi,
        };

        // 'REG' field specifies either a register operand or, for the
        // immediate arithmetic group, the opcode selector.
        let b_reg: u8 = (byte >> 3) & 0x07;

        // 'R/M' field is last three bits
        let b_rm: u8 = byte & 0x07;

        table[byte as usize] = ModRmByte {
            byte,
            b_mod,
            b_reg,
            b_rm,
            disp: displacement,
            addressing_mode,
        };

        if byte < 255 {
            byte += 1;
        }
        else {
            break;
        }
    }

    table
};

impl ModRmByte {
    const MODRM_ADDR_MASK: u8 = 0b11_000_111;

    const MODRM_ADDR_BX_SI: u8 = 0b00_000_000;
    const MODRM_ADDR_BX_DI: u8 = 0b00_000_001;
    const MODRM_ADDR_BP_SI: u8 = 0b00_000_010;
    const MODRM_ADDR_BP_DI: u8 = 0b00_000_011;
    const MODRM_ADDR_SI: u8 = 0b00_000_100;
    const MODRM_ADDR_DI: u8 = 0b00_000_101;
    const MODRM_ADDR_DIRECT: u8 = 0b00_000_110;
    const MODRM_ADDR_BX: u8 = 0b00_000_111;

    const MODRM_ADDR_BX_SI_DISP8: u8 = 0b01_000_000;
    const MODRM_ADDR_BX_DI_DISP8: u8 = 0b01_000_001;
    const MODRM_ADDR_BP_SI_DISP8: u8 = 0b01_000_010;
    const MODRM_ADDR_BP_DI_DISP8: u8 = 0b01_000_011;
    const MODRM_ADDR_SI_DISP8: u8 = 0b01_000_100;
    const MODRM_ADDR_DI_DISP8: u8 = 0b01_000_101;
    const MODRM_ADDR_BP_DISP8: u8 = 0b01_000_110;
    const MODRM_ADDR_BX_DISP8: u8 = 0b01_000_111;

    const MODRM_ADDR_BX_SI_DISP16: u8 = 0b10_000_000;
    const MODRM_ADDR_BX_DI_DISP16: u8 = 0b10_000_001;
    const MODRM_ADDR_BP_SI_DISP16: u8 = 0b10_000_010;
    const MODRM_ADDR_BP_DI_DISP16: u8 = 0b10_000_011;
    const MODRM_ADDR_SI_DISP16: u8 = 0b10_000_100;
    const MODRM_ADDR_DI_DISP16: u8 = 0b10_000_101;
    const MODRM_ADDR_BP_DISP16: u8 = 0b10_000_110;
    const MODRM_ADDR_BX_DISP16: u8 = 0b10_000_111;

    #[inline(always)]
    pub fn from_byte(byte: u8) -> ModRmByte {
        MODRM_TABLE[byte as usize]
    }

    /// Read the modrm byte, look up its table entry, and load any trailing
    /// displacement bytes.
    ///
    /// `short_direct_disp` selects the historical direct-address branch: the
    /// displacement value still comes from both following bytes, but only the
    /// first of them is stored against this instruction.
    pub fn read(
        bytes: &mut impl ByteReader,
        instruction_bytes: &mut Vec<u8>,
        short_direct_disp: bool,
    ) -> io::Result<ModRmByte> {
        let raw_modrm_byte = bytes.read_u8()?;
        let mut modrm = ModRmByte::from_byte(raw_modrm_byte);
        instruction_bytes.push(raw_modrm_byte);

        // If modrm is an addressing mode, load any displacement bytes.
        if modrm.b_mod != 0b11 {
            match modrm.disp {
                Displacement::Disp8(_) => {
                    let disp = bytes.read_u8()?;
                    instruction_bytes.push(disp);
                    modrm.disp = Displacement::Disp8(disp as i8);
                }
                Displacement::Disp16(_) => {
                    if modrm.is_direct_address() && short_direct_disp {
                        let disp = bytes.peek_u16()?;
                        let stored = bytes.read_u8()?;
                        instruction_bytes.push(stored);
                        modrm.disp = Displacement::Disp16(disp as i16);
                    }
                    else {
                        let disp = bytes.read_u16()?;
                        instruction_bytes.extend_from_slice(&disp.to_le_bytes());
                        modrm.disp = Displacement::Disp16(disp as i16);
                    }
                }
                _ => { /* No displacement to read */ }
            }
        }
        Ok(modrm)
    }

    /// Return the 'mod' field (top two bits) of the modrm byte.
    #[inline(always)]
    pub fn mod_value(&self) -> u8 {
        self.b_mod
    }

    #[inline(always)]
    pub fn reg_value(&self) -> u8 {
        self.b_reg
    }

    #[inline(always)]
    pub fn rm_value(&self) -> u8 {
        self.b_rm
    }

    // Interpret the 'R/M' field as an 8 bit register selector
    #[inline(always)]
    pub fn op1_reg8(&self) -> Register8 {
        REGISTER8_LUT[self.b_rm as usize]
    }

    // Interpret the 'R/M' field as a 16 bit register selector
    #[inline(always)]
    pub fn op1_reg16(&self) -> Register16 {
        REGISTER16_LUT[self.b_rm as usize]
    }

    // Interpret the 'REG' field as an 8 bit register selector
    #[inline(always)]
    pub fn op2_reg8(&self) -> Register8 {
        REGISTER8_LUT[self.b_reg as usize]
    }

    // Interpret the 'REG' field as a 16 bit register selector
    #[inline(always)]
    pub fn op2_reg16(&self) -> Register16 {
        REGISTER16_LUT[self.b_reg as usize]
    }

    // Return whether the modrm byte specifies a memory addressing mode
    #[inline(always)]
    pub fn is_addressing_mode(&self) -> bool {
        self.b_mod != 0b11
    }

    // Return whether the modrm byte is the mod=00 rm=110 direct-address row
    #[inline(always)]
    pub fn is_direct_address(&self) -> bool {
        self.b_mod == 0b00 && self.b_rm == 0b110
    }

    /// Produce an [AddressOffset16] enum with the provided [Displacement] inserted.
    #[inline(always)]
    pub fn address_offset(&self, displacement: Displacement) -> AddressOffset16 {
        match self.addressing_mode {
            AddressOffset16::BxSiDisp8(_) => AddressOffset16::BxSiDisp8(displacement.into()),
            AddressOffset16::BxDiDisp8(_) => AddressOffset16::BxDiDisp8(displacement.into()),
            AddressOffset16::BpSiDisp8(_) => AddressOffset16::BpSiDisp8(displacement.into()),
            AddressOffset16::BpDiDisp8(_) => AddressOffset16::BpDiDisp8(displacement.into()),
            AddressOffset16::SiDisp8(_) => AddressOffset16::SiDisp8(displacement.into()),
            AddressOffset16::DiDisp8(_) => AddressOffset16::DiDisp8(displacement.into()),
            AddressOffset16::BpDisp8(_) => AddressOffset16::BpDisp8(displacement.into()),
            AddressOffset16::BxDisp8(_) => AddressOffset16::BxDisp8(displacement.into()),
            AddressOffset16::BxSiDisp16(_) => AddressOffset16::BxSiDisp16(displacement.into()),
            AddressOffset16::BxDiDisp16(_) => AddressOffset16::BxDiDisp16(displacement.into()),
            AddressOffset16::BpSiDisp16(_) => AddressOffset16::BpSiDisp16(displacement.into()),
            AddressOffset16::BpDiDisp16(_) => AddressOffset16::BpDiDisp16(displacement.into()),
            AddressOffset16::SiDisp16(_) => AddressOffset16::SiDisp16(displacement.into()),
            AddressOffset16::DiDisp16(_) => AddressOffset16::DiDisp16(displacement.into()),
            AddressOffset16::BpDisp16(_) => AddressOffset16::BpDisp16(displacement.into()),
            AddressOffset16::BxDisp16(_) => AddressOffset16::BxDisp16(displacement.into()),
            _ => self.addressing_mode,
        }
    }

    #[inline(always)]
    pub fn displacement(&self) -> Displacement {
        self.disp
    }

    #[inline(always)]
    pub fn raw_byte(&self) -> u8 {
        self.byte
    }
}
