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

pub mod intel;

pub use intel::IntelFormatter;

use crate::{instruction::Instruction, mnemonic::Mnemonic};

/// Options controlling disassembly formatting
#[derive(Copy, Clone, Debug, Default)]
pub struct FormatOptions {
    /// If true, render mnemonic in uppercase; otherwise lowercase.
    pub uppercase_mnemonic: bool,
    /// If true, only output the mnemonic, no operands
    pub mnemonic_only: bool,
}

/// Output sink for formatting tokens. Implement this to capture rich tokens
/// (e.g., for colorizing) or to accumulate plain text.
pub trait FormatterOutput {
    /// Fallback text writer for any token type
    fn write_text(&mut self, s: &str);

    /// Specific token helpers (default to write_text)
    fn write_mnemonic(&mut self, s: &str) {
        self.write_text(s)
    }

    fn write_register(&mut self, s: &str) {
        self.write_text(s)
    }

    fn write_immediate(&mut self, s: &str) {
        self.write_text(s)
    }

    fn write_relative(&mut self, s: &str) {
        self.write_text(s)
    }

    fn write_separator(&mut self, s: &str) {
        self.write_text(s)
    }

    fn write_symbol(&mut self, s: &str) {
        self.write_text(s)
    }
}

/// Provide a basic String sink implementation
impl FormatterOutput for String {
    fn write_text(&mut self, s: &str) {
        self.push_str(s);
    }
}

/// Trait for disassembly formatting styles
pub trait Format {
    /// Emit the mnemonic token without leading/trailing spaces.
    fn format_mnemonic(&self, inst: &Instruction, opts: &FormatOptions, out: &mut dyn FormatterOutput);
    /// Emit operands; include any leading separators.
    fn format_operands(&self, inst: &Instruction, opts: &FormatOptions, out: &mut dyn FormatterOutput);

    /// Compose the full instruction from parts (default behavior)
    fn format_instruction(&self, inst: &Instruction, opts: &FormatOptions, out: &mut dyn FormatterOutput) {
        if opts.mnemonic_only {
            // if only the mnemonic is requested, suppress operands
            self.format_mnemonic(inst, opts, out);
            return;
        }

        if matches!(inst.mnemonic, Mnemonic::Invalid | Mnemonic::Group) {
            out.write_text("(bad)");
            return;
        }

        self.format_mnemonic(inst, opts, out);

        if inst.has_operands() {
            out.write_separator(" ");
            self.format_operands(inst, opts, out);
        }
    }
}

/// Convenience helper using Intel style; returns a flat String
pub fn format_instruction(inst: &Instruction, opts: &FormatOptions) -> String {
    let mut s = String::new();
    IntelFormatter.format_instruction(inst, opts, &mut s);
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;

    #[test]
    fn format_lowercase() {
        let instructions = decode(&[0x89, 0xD9]).unwrap();
        let mut s = String::new();
        IntelFormatter.format_instruction(&instructions[0], &FormatOptions::default(), &mut s);
        assert_eq!(s, "mov cx, bx");
    }

    #[test]
    fn format_mnemonic_only_uppercase() {
        let instructions = decode(&[0x29, 0xCB]).unwrap();
        let options = FormatOptions {
            uppercase_mnemonic: true,
            mnemonic_only: true,
        };
        let mut s = String::new();
        IntelFormatter.format_instruction(&instructions[0], &options, &mut s);
        assert_eq!(s, "SUB");
    }

    /// The same record always renders the same text; the decoder stores one
    /// rendering and re-rendering must agree with it.
    #[test]
    fn rendering_is_deterministic() {
        let image = [
            0x89u8, 0xD9,
            0xB9, 0xF4, 0xFF,
            0x8B, 0x56, 0x00,
            0x83, 0x46, 0x00, 0x0A,
            0x75, 0xF2,
        ];
        for ins in decode(&image).unwrap() {
            assert_eq!(format_instruction(&ins, &FormatOptions::default()), ins.text);
            assert_eq!(format_instruction(&ins, &FormatOptions::default()), ins.text);
        }
    }
}
