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
use std::fmt::Display;

use num_traits::PrimInt;

use crate::cpu_common::OperandType;
use crate::formatter::{Format, FormatOptions, FormatterOutput};
use crate::instruction::Instruction;

/// Intel-style formatter: lowercase mnemonics, `dest, src` operand order,
/// signed decimal immediates and displacements, bracketed memory operands.
#[derive(Copy, Clone, Debug, Default)]
pub struct IntelFormatter;

pub fn format_decimal<T: PrimInt + Display>(value: T) -> String {
    format!("{value}")
}

impl Format for IntelFormatter {
    fn format_mnemonic(&self, inst: &Instruction, opts: &FormatOptions, out: &mut dyn FormatterOutput) {
        let m = inst.mnemonic.to_str();
        if opts.uppercase_mnemonic {
            out.write_mnemonic(m);
        }
        else {
            out.write_mnemonic(&m.to_ascii_lowercase());
        }
    }

    fn format_operands(&self, inst: &Instruction, _opts: &FormatOptions, out: &mut dyn FormatterOutput) {
        self.format_size_hint(inst, out);

        self.format_operand(inst.operand1_type, out);
        if !matches!(inst.operand2_type, OperandType::NoOperand) {
            out.write_separator(", ");
        }
        self.format_operand(inst.operand2_type, out);
    }
}

impl IntelFormatter {
    /// Emit `byte`/`word` ahead of a memory destination whose width the
    /// operands alone cannot disambiguate.
    fn format_size_hint(&self, inst: &Instruction, out: &mut dyn FormatterOutput) {
        if inst.disambiguate && inst.operand1_type.is_address() {
            if inst.w_bit {
                out.write_text("word");
            }
            else {
                out.write_text("byte");
            }
            out.write_separator(" ");
        }
    }

    fn format_operand(&self, operand: OperandType, out: &mut dyn FormatterOutput) {
        match operand {
            OperandType::Register8(reg) => out.write_register(&reg.to_string()),
            OperandType::Register16(reg) => out.write_register(&reg.to_string()),
            OperandType::AddressingMode(mode, _) => {
                out.write_symbol("[");
                out.write_text(&mode.to_string());
                out.write_symbol("]");
            }
            OperandType::Immediate8(value) => out.write_immediate(&format_decimal(value)),
            OperandType::Immediate16(value) => out.write_immediate(&format_decimal(value)),
            OperandType::Relative8(value) => out.write_relative(&format_decimal(value)),
            OperandType::NoOperand => {}
        }
    }
}
