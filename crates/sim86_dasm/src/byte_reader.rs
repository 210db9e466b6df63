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
use std::io::{self, BufRead};

/// The [ByteReader] trait extends [BufRead] with methods for reading and peeking
/// fixed-length little-endian values.
pub trait ByteReader: BufRead {
    // --- reading (advances the cursor) ---

    /// Reads a single u8 from the stream.
    fn read_u8(&mut self) -> io::Result<u8> {
        let buf = self.fill_buf()?;
        if buf.is_empty() {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "read_u8(): EOF"));
        }
        let b = buf[0];
        self.consume(1);
        Ok(b)
    }

    /// Reads a single i8 from the stream.
    fn read_i8(&mut self) -> io::Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads a little-endian u16 from the stream.
    fn read_u16(&mut self) -> io::Result<u16> {
        let lo = self.read_u8()?;
        let hi = self.read_u8()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Reads a little-endian i16 from the stream.
    fn read_i16(&mut self) -> io::Result<i16> {
        Ok(i16::from_le_bytes(self.read_u16()?.to_le_bytes()))
    }

    // --- peeking (does NOT advance the cursor) ---

    /// Peeks a single u8 from the stream.
    fn peek_u8(&mut self) -> io::Result<u8> {
        let buf = self.fill_buf()?;
        if buf.is_empty() {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "peek_u8(): EOF"));
        }
        Ok(buf[0])
    }

    /// Peeks a little-endian u16 from the stream.
    fn peek_u16(&mut self) -> io::Result<u16> {
        let buf = self.fill_buf()?;
        match buf.len() {
            n if n >= 2 => Ok(u16::from_le_bytes([buf[0], buf[1]])),
            0 => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "peek_u16(): EOF")),
            n => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("peek_u16(): insufficient bytes: {n} byte(s) buffered"),
            )),
        }
    }

    /// True when the stream is exhausted.
    fn at_eof(&mut self) -> io::Result<bool> {
        Ok(self.fill_buf()?.is_empty())
    }
}

// Allow any BufRead to be used as a ByteReader
impl<T: BufRead + ?Sized> ByteReader for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn peek_does_not_advance() {
        let bytes = [0xB9u8, 0x0C, 0x00];
        let mut cursor = Cursor::new(&bytes[..]);
        assert_eq!(cursor.peek_u8().unwrap(), 0xB9);
        assert_eq!(cursor.read_u8().unwrap(), 0xB9);
        assert_eq!(cursor.peek_u16().unwrap(), 0x000C);
        assert_eq!(cursor.read_u16().unwrap(), 0x000C);
        assert!(cursor.at_eof().unwrap());
    }

    #[test]
    fn eof_is_reported() {
        let mut cursor = Cursor::new(&[][..]);
        let err = cursor.read_u8().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
