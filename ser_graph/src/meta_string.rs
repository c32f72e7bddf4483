//! Dictionary for namespace and type name strings.
//!
//! The first occurrence of a string in a stream is written in full and
//! interned. Later occurrences are written as a back-reference to the
//! dictionary index, so repeated named types cost O(1) bytes.
//!
//! Each string is prefixed with a `var_u32` header:
//!
//! * Low bit `0`: literal. `header >> 1` is the UTF-8 byte length. Bytes follow.
//! * Low bit `1`: back-reference. `header >> 1` is the dictionary index.

use std::{collections::HashMap, sync::Arc};

use crate::{
	storage::{Reader, Writer},
	Error, Result,
};

const BACK_REFERENCE: u32 = 1;

/// Write half of the meta string dictionary. Scoped to one serialize call.
#[derive(Default)]
pub struct MetaStringWriter {
	indices: HashMap<Arc<str>, u32>,
}

impl MetaStringWriter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Empty the dictionary, ready for a new stream.
	pub fn reset(&mut self) {
		self.indices.clear();
	}

	#[inline]
	pub fn write_namespace(&mut self, writer: &mut Writer, namespace: &Arc<str>) {
		self.write_meta_string(writer, namespace);
	}

	#[inline]
	pub fn write_type_name(&mut self, writer: &mut Writer, type_name: &Arc<str>) {
		self.write_meta_string(writer, type_name);
	}

	fn write_meta_string(&mut self, writer: &mut Writer, s: &Arc<str>) {
		if let Some(&index) = self.indices.get(s) {
			writer.write_var_u32((index << 1) | BACK_REFERENCE);
			return;
		}

		let index = self.indices.len() as u32;
		self.indices.insert(s.clone(), index);
		writer.write_var_u32((s.len() as u32) << 1);
		writer.write_bytes(s.as_bytes());
	}
}

/// Read half of the meta string dictionary. Scoped to one deserialize call.
#[derive(Default)]
pub struct MetaStringReader {
	strings: Vec<Arc<str>>,
}

impl MetaStringReader {
	pub fn new() -> Self {
		Self::default()
	}

	#[inline]
	pub fn read_namespace(&mut self, reader: &mut Reader<'_>) -> Result<Arc<str>> {
		self.read_meta_string(reader)
	}

	#[inline]
	pub fn read_type_name(&mut self, reader: &mut Reader<'_>) -> Result<Arc<str>> {
		self.read_meta_string(reader)
	}

	fn read_meta_string(&mut self, reader: &mut Reader<'_>) -> Result<Arc<str>> {
		let header = reader.read_var_u32()?;
		if header & BACK_REFERENCE != 0 {
			let index = header >> 1;
			return self
				.strings
				.get(index as usize)
				.cloned()
				.ok_or(Error::InvalidMetaString {
					index,
					len: self.strings.len(),
				});
		}

		let bytes = reader.read_bytes((header >> 1) as usize)?;
		let s: Arc<str> = Arc::from(std::str::from_utf8(bytes)?);
		self.strings.push(s.clone());
		Ok(s)
	}
}
