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

use std::io::{BufReader, Cursor, Read};

use crate::{
    bits,
    byte_reader::ByteReader,
    catalog,
    cpu_common::{OperandSize, OperandType, Register16, Register8, REGISTER16_LUT, REGISTER8_LUT},
    error::DecodeError,
    formatter::{self, FormatOptions},
    instruction::{Immediate, Instruction, OperandForm},
    mnemonic::Mnemonic,
    modrm::ModRmByte,
};

/// A decoder that consumes bytes from any [Read] source and produces
/// [Instruction] records with running byte-offset accounting.
pub struct Decoder<R: Read> {
    reader: BufReader<R>,
    offset: usize,
}

impl<R: Read> Decoder<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            offset: 0,
        }
    }

    /// Byte offset of the next undecoded position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Decode the next instruction, or `None` at a clean end of image.
    pub fn decode_next(&mut self) -> Result<Option<Instruction>, DecodeError> {
        if self
            .reader
            .at_eof()
            .map_err(|e| DecodeError::from_io(self.offset, e))?
        {
            return Ok(None);
        }

        let opcode = self
            .reader
            .peek_u8()
            .map_err(|e| DecodeError::from_io(self.offset, e))?;

        let Some(pattern) = catalog::lookup(opcode) else {
            return Err(DecodeError::UnknownOpcode {
                offset: self.offset,
                byte: opcode,
            });
        };

        let mut inst = Instruction {
            mnemonic: pattern.mnemonic,
            form: pattern.form,
            byte_offset: self.offset,
            ..Default::default()
        };

        let b0 = self
            .reader
            .read_u8()
            .map_err(|e| DecodeError::from_io(self.offset, e))?;
        inst.instruction_bytes.push(b0);

        match pattern.form {
            OperandForm::RegMemWithReg => self.decode_reg_mem(&mut inst, b0)?,
            OperandForm::ImmToReg => self.decode_imm_to_reg(&mut inst, b0)?,
            OperandForm::ImmToRegMem => self.decode_imm_to_reg_mem(&mut inst, b0)?,
            OperandForm::ImmToAcc => self.decode_imm_to_acc(&mut inst, b0)?,
            OperandForm::Jump => self.decode_jump(&mut inst)?,
        }

        inst.text = formatter::format_instruction(&inst, &FormatOptions::default());
        self.offset += inst.byte_len();
        Ok(Some(inst))
    }

    /// Decode the remainder of the image.
    pub fn decode_all(&mut self) -> Result<Vec<Instruction>, DecodeError> {
        let mut instructions = Vec::new();
        while let Some(inst) = self.decode_next()? {
            instructions.push(inst);
        }
        Ok(instructions)
    }

    /// Register/memory to/from register: d and w in byte 0, mod/reg/rm in
    /// byte 1. The direction bit decides which side is the destination.
    fn decode_reg_mem(&mut self, inst: &mut Instruction, b0: u8) -> Result<(), DecodeError> {
        inst.d_bit = bits::get_bit(b0, 1);
        inst.w_bit = bits::get_bit(b0, 0);

        // A direct address on the source side stores a single displacement byte.
        let modrm = ModRmByte::read(&mut self.reader, &mut inst.instruction_bytes, inst.d_bit)
            .map_err(|e| DecodeError::from_io(self.offset, e))?;
        inst.b_mod = modrm.mod_value();
        inst.b_reg = modrm.reg_value();
        inst.b_rm = modrm.rm_value();
        inst.displacement_bytes = modrm.displacement().raw_bytes();

        let reg_op = self.reg_operand(modrm.reg_value(), inst.w_bit);
        let rm_op = self.rm_operand(&modrm, inst.w_bit);

        if inst.d_bit {
            inst.operand1_type = reg_op;
            inst.operand2_type = rm_op;
        }
        else {
            inst.operand1_type = rm_op;
            inst.operand2_type = reg_op;
        }
        Ok(())
    }

    /// MOV immediate to register: w in bit 3, reg in bits 2..0 of byte 0.
    fn decode_imm_to_reg(&mut self, inst: &mut Instruction, b0: u8) -> Result<(), DecodeError> {
        inst.w_bit = bits::get_bit(b0, 3);
        inst.b_reg = bits::get_bits(b0, 0, 3);

        inst.operand1_type = self.reg_operand(inst.b_reg, inst.w_bit);
        let imm = self.read_immediate(inst, inst.w_bit)?;
        inst.operand2_type = immediate_operand(&imm, inst.w_bit);
        inst.immediate = Some(imm);
        Ok(())
    }

    /// Arithmetic immediate to register/memory: the modrm REG field selects
    /// ADD/SUB/CMP; the immediate is two bytes only when w=1 and s=0.
    fn decode_imm_to_reg_mem(&mut self, inst: &mut Instruction, b0: u8) -> Result<(), DecodeError> {
        inst.s_bit = bits::get_bit(b0, 1);
        inst.w_bit = bits::get_bit(b0, 0);

        let modrm = ModRmByte::read(&mut self.reader, &mut inst.instruction_bytes, false)
            .map_err(|e| DecodeError::from_io(self.offset, e))?;
        inst.b_mod = modrm.mod_value();
        inst.b_reg = modrm.reg_value();
        inst.b_rm = modrm.rm_value();
        inst.displacement_bytes = modrm.displacement().raw_bytes();

        inst.mnemonic = Mnemonic::from_arith_field(modrm.reg_value()).ok_or(DecodeError::UnknownOpcode {
            offset: self.offset + 1,
            byte: modrm.raw_byte(),
        })?;

        inst.operand1_type = self.rm_operand(&modrm, inst.w_bit);
        inst.disambiguate = modrm.is_addressing_mode();

        let wide_imm = inst.w_bit && !inst.s_bit;
        let imm = self.read_immediate(inst, wide_imm)?;
        inst.operand2_type = immediate_operand(&imm, inst.w_bit);
        inst.immediate = Some(imm);
        Ok(())
    }

    /// Arithmetic immediate to accumulator: al or ax by the w bit.
    fn decode_imm_to_acc(&mut self, inst: &mut Instruction, b0: u8) -> Result<(), DecodeError> {
        inst.w_bit = bits::get_bit(b0, 0);

        inst.operand1_type = if inst.w_bit {
            OperandType::Register16(Register16::AX)
        }
        else {
            OperandType::Register8(Register8::AL)
        };
        let imm = self.read_immediate(inst, inst.w_bit)?;
        inst.operand2_type = immediate_operand(&imm, inst.w_bit);
        inst.immediate = Some(imm);
        Ok(())
    }

    /// Conditional/loop jump: a single signed displacement byte.
    fn decode_jump(&mut self, inst: &mut Instruction) -> Result<(), DecodeError> {
        let rel = self
            .reader
            .read_i8()
            .map_err(|e| DecodeError::from_io(self.offset, e))?;
        inst.instruction_bytes.push(rel as u8);
        inst.immediate_bytes.push(rel as u8);
        inst.operand1_type = OperandType::Relative8(rel);
        inst.immediate = Some(Immediate::from_byte(rel as u8));
        Ok(())
    }

    fn reg_operand(&self, reg: u8, wide: bool) -> OperandType {
        if wide {
            OperandType::Register16(REGISTER16_LUT[reg as usize])
        }
        else {
            OperandType::Register8(REGISTER8_LUT[reg as usize])
        }
    }

    fn rm_operand(&self, modrm: &ModRmByte, wide: bool) -> OperandType {
        if modrm.is_addressing_mode() {
            let size = if wide { OperandSize::Operand16 } else { OperandSize::Operand8 };
            OperandType::AddressingMode(modrm.address_offset(modrm.displacement()), size)
        }
        else {
            self.reg_operand(modrm.rm_value(), wide)
        }
    }

    fn read_immediate(&mut self, inst: &mut Instruction, wide: bool) -> Result<Immediate, DecodeError> {
        let imm = if wide {
            let word = self
                .reader
                .read_u16()
                .map_err(|e| DecodeError::from_io(self.offset, e))?;
            Immediate::from_word(word)
        }
        else {
            let byte = self
                .reader
                .read_u8()
                .map_err(|e| DecodeError::from_io(self.offset, e))?;
            Immediate::from_byte(byte)
        };
        inst.instruction_bytes.extend_from_slice(&imm.raw);
        inst.immediate_bytes.extend_from_slice(&imm.raw);
        Ok(imm)
    }
}

fn immediate_operand(imm: &Immediate, wide: bool) -> OperandType {
    if wide {
        OperandType::Immediate16(imm.value)
    }
    else {
        OperandType::Immediate8(imm.value as i8)
    }
}

/// Decode a complete code image.
pub fn decode(image: &[u8]) -> Result<Vec<Instruction>, DecodeError> {
    Decoder::new(Cursor::new(image)).decode_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_one(image: &[u8]) -> Instruction {
        let mut instructions = decode(image).expect("decode ok");
        assert_eq!(instructions.len(), 1);
        instructions.pop().unwrap()
    }

    #[test]
    fn mov_register_to_register() {
        let ins = decode_one(&[0x89, 0xD9]);
        assert_eq!(ins.mnemonic, Mnemonic::MOV);
        assert_eq!(ins.text, "mov cx, bx");
        assert_eq!(ins.byte_len(), 2);
    }

    #[test]
    fn mov_half_registers() {
        let instructions = decode(&[0x89, 0xD9, 0x88, 0xE5]).unwrap();
        let texts: Vec<&str> = instructions.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["mov cx, bx", "mov ch, ah"]);
    }

    #[test]
    fn mov_immediate_to_register() {
        assert_eq!(decode_one(&[0xB1, 0x0C]).text, "mov cl, 12");
        assert_eq!(decode_one(&[0xB9, 0x0C, 0x00]).text, "mov cx, 12");
        assert_eq!(decode_one(&[0xB9, 0xF4, 0xFF]).text, "mov cx, -12");
    }

    #[test]
    fn mov_memory_operands() {
        assert_eq!(decode_one(&[0x8A, 0x00]).text, "mov al, [bx + si]");
        assert_eq!(decode_one(&[0x8B, 0x56, 0x00]).text, "mov dx, [bp + 0]");
        assert_eq!(decode_one(&[0x8A, 0x60, 0x04]).text, "mov ah, [bx + si + 4]");
        assert_eq!(decode_one(&[0x8A, 0x80, 0x87, 0x13]).text, "mov al, [bx + si + 4999]");
    }

    #[test]
    fn arithmetic_forms() {
        assert_eq!(decode_one(&[0x29, 0xCB]).text, "sub bx, cx");
        assert_eq!(decode_one(&[0x39, 0xE5]).text, "cmp bp, sp");
        assert_eq!(decode_one(&[0x83, 0xC3, 0x0A]).text, "add bx, 10");
        assert_eq!(decode_one(&[0x81, 0xED, 0xEA, 0x07]).text, "sub bp, 2026");
        assert_eq!(decode_one(&[0x04, 0x09]).text, "add al, 9");
        assert_eq!(decode_one(&[0x2D, 0xE8, 0x03]).text, "sub ax, 1000");
    }

    #[test]
    fn arithmetic_immediate_to_memory_gets_size_hint() {
        assert_eq!(decode_one(&[0x83, 0x46, 0x00, 0x0A]).text, "add word [bp + 0], 10");
        assert_eq!(decode_one(&[0x80, 0x07, 0x22]).text, "add byte [bx], 34");
    }

    #[test]
    fn jumps_render_signed_decimal() {
        assert_eq!(decode_one(&[0x75, 0xFC]).text, "jnz -4");
        assert_eq!(decode_one(&[0x74, 0x02]).text, "je 2");
        assert_eq!(decode_one(&[0xE2, 0xF8]).text, "loop -8");
    }

    #[test]
    fn offsets_are_contiguous() {
        let image = [
            0xB9u8, 0x03, 0x00, // mov cx, 3
            0x89, 0xD9,         // mov cx, bx
            0x83, 0xC3, 0x0A,   // add bx, 10
            0x75, 0xF6,         // jnz -10
        ];
        let instructions = decode(&image).unwrap();
        assert_eq!(instructions.len(), 4);
        let mut expected_offset = 0;
        for ins in &instructions {
            assert_eq!(ins.byte_offset, expected_offset);
            expected_offset += ins.byte_len();
        }
        assert_eq!(expected_offset, image.len());
    }

    #[test]
    fn unknown_opcode_reports_position() {
        let err = decode(&[0x89, 0xD9, 0xF4]).unwrap_err();
        match err {
            DecodeError::UnknownOpcode { offset, byte } => {
                assert_eq!(offset, 2);
                assert_eq!(byte, 0xF4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn truncated_instruction_reports_position() {
        let err = decode(&[0xB9, 0x0C]).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEof { offset: 0 }));
    }

    #[test]
    fn unsupported_group_field_is_rejected() {
        // 0x80 with REG=001 selects OR, which is outside the subset.
        let err = decode(&[0x80, 0xC9, 0x01]).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownOpcode { .. }));
    }
}
