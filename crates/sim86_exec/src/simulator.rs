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
use std::collections::HashMap;

use sim86_dasm::{
    bits,
    prelude::{Instruction, Mnemonic, OperandForm, OperandType, Register16},
};

use crate::{
    error::ExecError,
    registers::{Flags, RegisterFile},
    trace,
};

/// Sequential interpreter over a decoded instruction list. The register file
/// and flags start zeroed; the program counter always holds the address
/// after the last executed instruction.
pub struct Simulator {
    regs: RegisterFile,
    flags: Flags,
    trace_ip: bool,
}

impl Simulator {
    /// `trace_ip` enables the ` ip:0xPREV->0xNEW` suffix on trace lines; the
    /// program counter is maintained either way.
    pub fn new(trace_ip: bool) -> Self {
        Self {
            regs: RegisterFile::new(),
            flags: Flags::default(),
            trace_ip,
        }
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    /// Execute the instruction list and return one trace line per observable
    /// step. Jump targets resolve through the byte offsets the decoder
    /// recorded; a taken jump to anything but an instruction boundary fails.
    pub fn run(&mut self, instructions: &[Instruction]) -> Result<Vec<String>, ExecError> {
        let index_of_offset: HashMap<usize, usize> = instructions
            .iter()
            .enumerate()
            .map(|(index, ins)| (ins.byte_offset, index))
            .collect();

        let mut lines = Vec::new();
        let mut i = 0;
        while i < instructions.len() {
            let ins = &instructions[i];
            match (ins.mnemonic, ins.form) {
                (Mnemonic::MOV, OperandForm::ImmToReg) => {
                    lines.push(self.exec_mov_immediate(ins)?);
                }
                (Mnemonic::MOV, OperandForm::RegMemWithReg) => {
                    lines.push(self.exec_mov_register(ins)?);
                }
                (Mnemonic::ADD | Mnemonic::SUB | Mnemonic::CMP, _) => {
                    lines.push(self.exec_arithmetic(ins)?);
                }
                (mnemonic, OperandForm::Jump) => {
                    if let Some(target) = self.jump_taken(ins)? {
                        let Some(&index) = index_of_offset.get(&target) else {
                            return Err(ExecError::BadJumpTarget { target: target as i64 });
                        };
                        let ip_log = self.update_ip(target);
                        lines.push(format!("{} $-{} ;{}", jump_alias(mnemonic), target, ip_log));
                        i = index;
                        continue;
                    }
                    // Not taken: no trace line, the program counter still moves.
                    self.update_ip(ins.end_offset());
                }
                (mnemonic, _) => return Err(ExecError::UnsupportedMnemonic(mnemonic)),
            }
            i += 1;
        }

        Ok(lines)
    }

    /// MOV immediate to register. The trace prints the immediate as the
    /// unsigned reading of its raw bytes.
    fn exec_mov_immediate(&mut self, ins: &Instruction) -> Result<String, ExecError> {
        let dest = self.dest_reg16(ins)?;
        let imm = ins
            .immediate
            .as_ref()
            .ok_or_else(|| ExecError::MissingImmediate(ins.text.clone()))?;

        let prev = self.regs.read_u16(dest);
        let value = imm.value as u16;
        self.regs.write_u16(dest, value);
        let ip_log = self.update_ip(ins.end_offset());

        Ok(format!(
            "{} {}, {} ; {}{}",
            ins.mnemonic.to_str().to_ascii_lowercase(),
            dest,
            imm.unsigned_value(),
            trace::register_delta(dest, prev, value),
            ip_log,
        ))
    }

    fn exec_mov_register(&mut self, ins: &Instruction) -> Result<String, ExecError> {
        let dest = self.dest_reg16(ins)?;
        let src = self.source_bytes(ins)?;

        let prev = self.regs.read_u16(dest);
        let value = u16::from_le_bytes(src);
        self.regs.write(dest, src);
        let ip_log = self.update_ip(ins.end_offset());

        Ok(format!(
            "{} ; {}{}",
            ins.text,
            trace::register_delta(dest, prev, value),
            ip_log,
        ))
    }

    fn exec_arithmetic(&mut self, ins: &Instruction) -> Result<String, ExecError> {
        let dest = self.dest_reg16(ins)?;
        let src = self.source_bytes(ins)?;

        let prev = self.regs.read(dest);
        let prev_flags = self.flags.render();
        let result = match ins.mnemonic {
            Mnemonic::ADD => bits::add16(prev, src),
            _ => bits::sub16(prev, src),
        };
        self.flags.zero = bits::is_zero(&result);
        self.flags.sign = bits::is_negative(&result);

        // CMP never writes back; only the flags delta is observable.
        let is_cmp = ins.mnemonic == Mnemonic::CMP;
        if !is_cmp {
            self.regs.write(dest, result);
        }
        let ip_log = self.update_ip(ins.end_offset());
        let new_flags = self.flags.render();

        if is_cmp {
            Ok(format!("{} ; flags:{}->{}{}", ins.text, prev_flags, new_flags, ip_log))
        }
        else if !new_flags.is_empty() {
            Ok(format!(
                "{} ; {}{} flags:->{}",
                ins.text,
                trace::register_delta(dest, u16::from_le_bytes(prev), u16::from_le_bytes(result)),
                ip_log,
                new_flags,
            ))
        }
        else {
            Ok(format!(
                "{} ; {}{}",
                ins.text,
                trace::register_delta(dest, u16::from_le_bytes(prev), u16::from_le_bytes(result)),
                ip_log,
            ))
        }
    }

    /// Evaluate a jump's predicate; returns the target byte offset when the
    /// jump is taken. The loop family decrements cx before testing.
    fn jump_taken(&mut self, ins: &Instruction) -> Result<Option<usize>, ExecError> {
        let rel = ins
            .immediate
            .as_ref()
            .ok_or_else(|| ExecError::MissingImmediate(ins.text.clone()))?
            .value;

        let taken = match ins.mnemonic {
            Mnemonic::JNZ => !self.flags.zero,
            Mnemonic::JE => self.flags.zero,
            Mnemonic::JS => self.flags.sign,
            Mnemonic::JNS => !self.flags.sign,
            Mnemonic::JCXZ => self.regs.read_u16(Register16::CX) == 0,
            Mnemonic::LOOP | Mnemonic::LOOPZ | Mnemonic::LOOPNZ => {
                let cx = self.regs.read_u16(Register16::CX).wrapping_sub(1);
                self.regs.write_u16(Register16::CX, cx);
                match ins.mnemonic {
                    Mnemonic::LOOP => cx != 0,
                    Mnemonic::LOOPZ => cx != 0 && self.flags.zero,
                    _ => cx != 0 && !self.flags.zero,
                }
            }
            // The remaining predicates need flags outside Z/S.
            mnemonic => return Err(ExecError::UnsupportedMnemonic(mnemonic)),
        };

        if !taken {
            return Ok(None);
        }
        let target = ins.end_offset() as i64 + i64::from(rel);
        if target < 0 {
            return Err(ExecError::BadJumpTarget { target });
        }
        Ok(Some(target as usize))
    }

    fn dest_reg16(&self, ins: &Instruction) -> Result<Register16, ExecError> {
        match ins.operand1_type {
            OperandType::Register16(reg) => Ok(reg),
            _ => Err(ExecError::UnsupportedOperand {
                mnemonic: ins.mnemonic,
                text: ins.text.clone(),
            }),
        }
    }

    fn source_bytes(&self, ins: &Instruction) -> Result<[u8; 2], ExecError> {
        match ins.operand2_type {
            OperandType::Register16(reg) => Ok(self.regs.read(reg)),
            OperandType::Immediate16(value) => Ok(value.to_le_bytes()),
            _ => Err(ExecError::UnsupportedOperand {
                mnemonic: ins.mnemonic,
                text: ins.text.clone(),
            }),
        }
    }

    fn update_ip(&mut self, target: usize) -> String {
        let prev = self.regs.read_u16(Register16::PC);
        let new = target as u16;
        self.regs.write_u16(Register16::PC, new);
        if self.trace_ip {
            trace::ip_delta(prev, new)
        }
        else {
            String::new()
        }
    }
}

/// The 0x75 encoding decodes as JNZ but the historical trace reports it as
/// jne; every other jump uses its own mnemonic.
fn jump_alias(mnemonic: Mnemonic) -> String {
    match mnemonic {
        Mnemonic::JNZ => "jne".to_string(),
        _ => mnemonic.to_str().to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim86_dasm::decode;

    #[test]
    fn mov_immediate_stores_raw_little_endian_bytes() {
        let instructions = decode(&[0xBB, 0x03, 0xF0]).unwrap(); // mov bx, 61443
        let mut sim = Simulator::new(false);
        let lines = sim.run(&instructions).unwrap();
        assert_eq!(lines, vec!["mov bx, 61443 ; bx:0x0->0xf003"]);
        assert_eq!(sim.registers().read(Register16::BX), [0x03, 0xF0]);
    }

    #[test]
    fn cmp_leaves_destination_untouched() {
        let instructions = decode(&[
            0xBD, 0xE7, 0x03, // mov bp, 999
            0xBC, 0xE6, 0x03, // mov sp, 998
            0x39, 0xE5,       // cmp bp, sp
        ])
        .unwrap();
        let mut sim = Simulator::new(false);
        sim.run(&instructions).unwrap();
        assert_eq!(sim.registers().read_u16(Register16::BP), 999);
        assert_eq!(sim.registers().read_u16(Register16::SP), 998);
        assert!(!sim.flags().zero);
        assert!(!sim.flags().sign);
    }

    #[test]
    fn memory_operands_do_not_execute() {
        let instructions = decode(&[0x8A, 0x00]).unwrap(); // mov al, [bx + si]
        let mut sim = Simulator::new(false);
        let err = sim.run(&instructions).unwrap_err();
        assert!(matches!(err, ExecError::UnsupportedOperand { .. }));
    }

    #[test]
    fn half_registers_do_not_execute() {
        let instructions = decode(&[0xB1, 0x0C]).unwrap(); // mov cl, 12
        let mut sim = Simulator::new(false);
        let err = sim.run(&instructions).unwrap_err();
        assert!(matches!(err, ExecError::UnsupportedOperand { .. }));
    }

    #[test]
    fn taken_jump_must_land_on_an_instruction_boundary() {
        // jnz -4 from the end of the image targets byte 1, the middle of
        // the mov.
        let instructions = decode(&[0xB9, 0x01, 0x00, 0x75, 0xFC]).unwrap();
        let mut sim = Simulator::new(false);
        let err = sim.run(&instructions).unwrap_err();
        assert!(matches!(err, ExecError::BadJumpTarget { target: 1 }));
    }

    #[test]
    fn program_counter_tracks_end_of_last_instruction() {
        let instructions = decode(&[0xB9, 0xC8, 0x00]).unwrap(); // mov cx, 200
        let mut sim = Simulator::new(false);
        sim.run(&instructions).unwrap();
        assert_eq!(sim.registers().read_u16(Register16::PC), 3);
    }
}
