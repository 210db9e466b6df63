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

//! Trace-line fragments. Register values always print as the unsigned
//! little-endian 16-bit value in lower-case hex with no width padding.

use std::fmt::LowerHex;

use num_traits::PrimInt;
use sim86_dasm::prelude::Register16;

pub fn format_hex<T: PrimInt + LowerHex>(value: T) -> String {
    format!("0x{value:x}")
}

/// `reg:0xPREV->0xNEW`
pub fn register_delta(reg: Register16, prev: u16, new: u16) -> String {
    format!("{}:{}->{}", reg, format_hex(prev), format_hex(new))
}

/// ` ip:0xPREV->0xNEW` (leading space; appended directly to a line)
pub fn ip_delta(prev: u16, new: u16) -> String {
    format!(" ip:{}->{}", format_hex(prev), format_hex(new))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_has_no_width_padding() {
        assert_eq!(format_hex(0u16), "0x0");
        assert_eq!(format_hex(0xF003u16), "0xf003");
        assert_eq!(format_hex(0x3u16), "0x3");
    }

    #[test]
    fn register_delta_format() {
        assert_eq!(register_delta(Register16::BX, 0xF003, 0xE102), "bx:0xf003->0xe102");
    }
}
