use crate::{
	meta_string::MetaStringWriter, refs::RefWriter, storage::Writer, types::TypeId, AnyCodec,
	AnyRef, Config, Error, RefFlag, Registry, Result, Serialize, TypeIdentifier,
};

/// Write context for one top-level serialization call.
///
/// Owns the output buffer, the reference table and the meta string
/// dictionary. All 3 are reset at start of every top-level call, so a
/// `Serializer` can be reused for many calls, but not shared between
/// concurrent ones.
pub struct Serializer<'g> {
	writer: Writer,
	refs: RefWriter,
	meta_strings: MetaStringWriter,
	registry: &'g Registry,
	config: &'g Config,
	depth: usize,
}

impl<'g> Serializer<'g> {
	pub fn new(registry: &'g Registry, config: &'g Config) -> Self {
		Self {
			writer: Writer::with_capacity(config.get_initial_capacity()),
			refs: RefWriter::new(),
			meta_strings: MetaStringWriter::new(),
			registry,
			config,
			depth: 0,
		}
	}

	#[inline]
	pub fn registry(&self) -> &'g Registry {
		self.registry
	}

	#[inline]
	pub fn config(&self) -> &'g Config {
		self.config
	}

	/// Get output buffer, for writing bodies.
	#[inline]
	pub fn writer(&mut self) -> &mut Writer {
		&mut self.writer
	}

	/// Serialize a polymorphic value.
	pub fn serialize_any(&mut self, value: Option<&AnyRef>) -> Result<Vec<u8>> {
		self.reset();
		let result = AnyCodec::write(self, value);
		self.finish(result)
	}

	/// Serialize a value of statically known type.
	pub fn serialize_value<T: Serialize>(&mut self, value: &T) -> Result<Vec<u8>> {
		self.reset();
		self.writer.reserve(T::RESERVED_SPACE);
		let result = value.serialize(self);
		self.finish(result)
	}

	// Release values held by reference table, so they don't outlive the call
	fn finish(&mut self, result: Result<()>) -> Result<Vec<u8>> {
		self.refs.reset();
		result?;
		Ok(self.writer.take())
	}

	/// Write reference flag for `value`, and its id if it's a back-reference.
	///
	/// `trackable` is ignored (treated as `false`) if reference tracking is
	/// disabled in config.
	#[inline]
	pub fn write_ref_or_null(&mut self, value: Option<&AnyRef>, trackable: bool) -> RefFlag {
		let trackable = trackable && self.config.is_ref_tracking();
		self.refs.write_ref_or_null(&mut self.writer, value, trackable)
	}

	/// Write a type identifier.
	///
	/// Numeric ids are written as `i16`. Named types write the `NAMED` marker,
	/// then namespace and type name as meta strings.
	pub fn write_type_identifier(&mut self, type_identifier: &TypeIdentifier) {
		match type_identifier {
			TypeIdentifier::Id(id) => self.writer.write_i16(*id),
			TypeIdentifier::Named {
				namespace,
				type_name,
			} => {
				self.writer.write_i16(TypeId::NAMED);
				self.meta_strings.write_namespace(&mut self.writer, namespace);
				self.meta_strings.write_type_name(&mut self.writer, type_name);
			}
		}
	}

	/// Run `f` one nesting level deeper, failing if depth limit is exceeded.
	///
	/// See [`Deserializer::nested`](crate::Deserializer::nested).
	pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
		let max_depth = self.config.get_max_depth();
		if self.depth >= max_depth {
			return Err(Error::DepthLimitExceeded { max_depth });
		}
		self.depth += 1;
		let out = f(self);
		self.depth -= 1;
		out
	}

	fn reset(&mut self) {
		self.writer.clear();
		self.writer.reserve(self.config.get_initial_capacity());
		self.refs.reset();
		self.meta_strings.reset();
		self.depth = 0;
	}
}

