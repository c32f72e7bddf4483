use super::{zigzag_decode_32, zigzag_decode_64, MAX_VAR_U32_LEN, MAX_VAR_U64_LEN};
use crate::{Error, Result};

/// Sequential cursor over a byte slice.
///
/// Every read is bounds-checked and fails with [`Error::UnexpectedEof`]
/// rather than panicking, as input may be truncated or corrupt.
pub struct Reader<'b> {
	buf: &'b [u8],
	pos: usize,
}

impl<'b> Reader<'b> {
	#[inline]
	pub fn new(buf: &'b [u8]) -> Self {
		Self { buf, pos: 0 }
	}

	/// Current position in input.
	#[inline]
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Number of bytes not yet consumed.
	#[inline]
	pub fn remaining(&self) -> usize {
		self.buf.len() - self.pos
	}

	/// Read `len` bytes.
	#[inline]
	pub fn read_bytes(&mut self, len: usize) -> Result<&'b [u8]> {
		if len > self.remaining() {
			return Err(self.eof(len));
		}
		let bytes = &self.buf[self.pos..self.pos + len];
		self.pos += len;
		Ok(bytes)
	}

	#[inline]
	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let bytes = self.read_bytes(N)?;
		let mut array = [0; N];
		array.copy_from_slice(bytes);
		Ok(array)
	}

	#[cold]
	fn eof(&self, needed: usize) -> Error {
		Error::UnexpectedEof {
			pos: self.pos,
			needed,
			remaining: self.remaining(),
		}
	}

	#[inline]
	pub fn read_u8(&mut self) -> Result<u8> {
		match self.buf.get(self.pos) {
			Some(&byte) => {
				self.pos += 1;
				Ok(byte)
			}
			None => Err(self.eof(1)),
		}
	}

	#[inline]
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(self.read_u8()? as i8)
	}

	/// Read a bool. Any non-zero byte is `true`.
	#[inline]
	pub fn read_bool(&mut self) -> Result<bool> {
		Ok(self.read_u8()? != 0)
	}

	#[inline]
	pub fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	#[inline]
	pub fn read_i16(&mut self) -> Result<i16> {
		Ok(i16::from_le_bytes(self.read_array()?))
	}

	#[inline]
	pub fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	#[inline]
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	#[inline]
	pub fn read_u64(&mut self) -> Result<u64> {
		Ok(u64::from_le_bytes(self.read_array()?))
	}

	#[inline]
	pub fn read_i64(&mut self) -> Result<i64> {
		Ok(i64::from_le_bytes(self.read_array()?))
	}

	#[inline]
	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	#[inline]
	pub fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_le_bytes(self.read_array()?))
	}

	/// Read unsigned LEB128 integer of at most 5 bytes.
	pub fn read_var_u32(&mut self) -> Result<u32> {
		let start = self.pos;
		let value = self.read_var(MAX_VAR_U32_LEN)?;
		u32::try_from(value).map_err(|_| Error::InvalidVarInt { pos: start })
	}

	/// Read unsigned LEB128 integer of at most 10 bytes.
	#[inline]
	pub fn read_var_u64(&mut self) -> Result<u64> {
		self.read_var(MAX_VAR_U64_LEN)
	}

	#[inline]
	pub fn read_var_i32(&mut self) -> Result<i32> {
		Ok(zigzag_decode_32(self.read_var_u32()?))
	}

	#[inline]
	pub fn read_var_i64(&mut self) -> Result<i64> {
		Ok(zigzag_decode_64(self.read_var_u64()?))
	}

	fn read_var(&mut self, max_len: usize) -> Result<u64> {
		let start = self.pos;
		let mut value: u64 = 0;
		for index in 0..max_len {
			let byte = self.read_u8()?;
			let shift = index * 7;
			// 10th byte of a `u64` can only contribute 1 bit
			if shift == 63 && byte > 1 {
				return Err(Error::InvalidVarInt { pos: start });
			}
			value |= ((byte & 0x7f) as u64) << shift;
			if byte & 0x80 == 0 {
				return Ok(value);
			}
		}
		Err(Error::InvalidVarInt { pos: start })
	}

	/// Read length-prefixed UTF-8 string.
	pub fn read_str(&mut self) -> Result<&'b str> {
		let len = self.read_var_u32()? as usize;
		let bytes = self.read_bytes(len)?;
		Ok(std::str::from_utf8(bytes)?)
	}
}
