use super::{zigzag_encode_32, zigzag_encode_64};

/// Growable output buffer.
///
/// Just a wrapper around `Vec<u8>`, with methods for writing integers in the
/// wire encodings.
#[derive(Default)]
pub struct Writer {
	inner: Vec<u8>,
}

impl Writer {
	/// Create new `Writer` with no pre-allocated capacity.
	#[inline]
	pub fn new() -> Self {
		Self { inner: Vec::new() }
	}

	/// Create new `Writer` with pre-allocated capacity.
	#[inline]
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			inner: Vec::with_capacity(capacity),
		}
	}

	/// Current position in output, which is also the number of bytes written.
	#[inline]
	pub fn pos(&self) -> usize {
		self.inner.len()
	}

	#[inline]
	pub fn capacity(&self) -> usize {
		self.inner.capacity()
	}

	/// Reserve capacity for at least `additional` more bytes.
	///
	/// A performance hint only. Writes grow the buffer as required regardless.
	#[inline]
	pub fn reserve(&mut self, additional: usize) {
		self.inner.reserve(additional);
	}

	#[inline]
	pub fn as_slice(&self) -> &[u8] {
		self.inner.as_slice()
	}

	/// Clear output, retaining allocated capacity.
	#[inline]
	pub fn clear(&mut self) {
		self.inner.clear();
	}

	/// Take output, leaving this `Writer` empty.
	#[inline]
	pub fn take(&mut self) -> Vec<u8> {
		std::mem::take(&mut self.inner)
	}

	#[inline]
	pub fn into_vec(self) -> Vec<u8> {
		self.inner
	}

	#[inline]
	pub fn write_bytes(&mut self, bytes: &[u8]) {
		self.inner.extend_from_slice(bytes);
	}

	#[inline]
	pub fn write_u8(&mut self, value: u8) {
		self.inner.push(value);
	}

	#[inline]
	pub fn write_i8(&mut self, value: i8) {
		self.inner.push(value as u8);
	}

	#[inline]
	pub fn write_bool(&mut self, value: bool) {
		self.inner.push(value as u8);
	}

	#[inline]
	pub fn write_u16(&mut self, value: u16) {
		self.write_bytes(&value.to_le_bytes());
	}

	#[inline]
	pub fn write_i16(&mut self, value: i16) {
		self.write_bytes(&value.to_le_bytes());
	}

	#[inline]
	pub fn write_u32(&mut self, value: u32) {
		self.write_bytes(&value.to_le_bytes());
	}

	#[inline]
	pub fn write_i32(&mut self, value: i32) {
		self.write_bytes(&value.to_le_bytes());
	}

	#[inline]
	pub fn write_u64(&mut self, value: u64) {
		self.write_bytes(&value.to_le_bytes());
	}

	#[inline]
	pub fn write_i64(&mut self, value: i64) {
		self.write_bytes(&value.to_le_bytes());
	}

	#[inline]
	pub fn write_f32(&mut self, value: f32) {
		self.write_bytes(&value.to_le_bytes());
	}

	#[inline]
	pub fn write_f64(&mut self, value: f64) {
		self.write_bytes(&value.to_le_bytes());
	}

	/// Write unsigned LEB128 integer. 1 to 5 bytes.
	#[inline]
	pub fn write_var_u32(&mut self, value: u32) {
		self.write_var_u64(value as u64);
	}

	/// Write unsigned LEB128 integer. 1 to 10 bytes.
	pub fn write_var_u64(&mut self, mut value: u64) {
		// Fast path for small values, which are the majority of lengths and ids
		if value < 0x80 {
			self.inner.push(value as u8);
			return;
		}

		while value >= 0x80 {
			self.inner.push((value as u8 & 0x7f) | 0x80);
			value >>= 7;
		}
		self.inner.push(value as u8);
	}

	/// Write zig-zag encoded signed LEB128 integer. 1 to 5 bytes.
	#[inline]
	pub fn write_var_i32(&mut self, value: i32) {
		self.write_var_u32(zigzag_encode_32(value));
	}

	/// Write zig-zag encoded signed LEB128 integer. 1 to 10 bytes.
	#[inline]
	pub fn write_var_i64(&mut self, value: i64) {
		self.write_var_u64(zigzag_encode_64(value));
	}

	/// Write a length prefix.
	#[inline]
	pub fn write_len(&mut self, len: usize) {
		debug_assert!(len <= u32::MAX as usize);
		self.write_var_u32(len as u32);
	}

	/// Write length-prefixed UTF-8 string.
	#[inline]
	pub fn write_str(&mut self, s: &str) {
		self.write_len(s.len());
		self.write_bytes(s.as_bytes());
	}
}
