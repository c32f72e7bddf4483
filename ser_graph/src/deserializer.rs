use crate::{
	meta_string::MetaStringReader,
	refs::{RefReader, RefSlot},
	storage::Reader,
	types::TypeId,
	AnyCodec, AnyRef, Codec, Config, Error, RefFlag, Registry, Result, Serialize, TypeIdentifier,
};

/// Read context for one top-level deserialization call.
///
/// Holds the input cursor, the reference table of values materialized so far,
/// and the meta string dictionary.
pub struct Deserializer<'g, 'b> {
	reader: Reader<'b>,
	refs: RefReader,
	meta_strings: MetaStringReader,
	registry: &'g Registry,
	config: &'g Config,
	depth: usize,
}

impl<'g, 'b> Deserializer<'g, 'b> {
	pub fn new(registry: &'g Registry, config: &'g Config, bytes: &'b [u8]) -> Self {
		Self {
			reader: Reader::new(bytes),
			refs: RefReader::new(),
			meta_strings: MetaStringReader::new(),
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

	/// Get input cursor, for reading bodies.
	#[inline]
	pub fn reader(&mut self) -> &mut Reader<'b> {
		&mut self.reader
	}

	/// Deserialize a polymorphic value.
	///
	/// Bytes after the value are not consumed, and are not an error.
	pub fn deserialize_any(&mut self) -> Result<Option<AnyRef>> {
		AnyCodec::read(self)
	}

	/// Deserialize a value of statically known type.
	pub fn deserialize_value<T: Serialize>(&mut self) -> Result<T> {
		T::deserialize(self)
	}

	/// Read a reference flag.
	#[inline]
	pub fn read_ref_flag(&mut self) -> Result<RefFlag> {
		self.refs.read_ref_flag(&mut self.reader)
	}

	/// Read id following a `Ref` flag, and get the value bound to it.
	pub fn read_back_reference(&mut self) -> Result<AnyRef> {
		let id = self.reader.read_var_u32()?;
		self.refs.get_read_object(id)
	}

	/// Read a type identifier written by [`Serializer::write_type_identifier`].
	///
	/// [`Serializer::write_type_identifier`]: crate::Serializer::write_type_identifier
	pub fn read_type_identifier(&mut self) -> Result<TypeIdentifier> {
		let id = self.reader.read_i16()?;
		if TypeId::is_named(id) {
			let namespace = self.meta_strings.read_namespace(&mut self.reader)?;
			let type_name = self.meta_strings.read_type_name(&mut self.reader)?;
			Ok(TypeIdentifier::Named {
				namespace,
				type_name,
			})
		} else {
			Ok(TypeIdentifier::Id(id))
		}
	}

	/// Bind `value` to the reference id reserved for it, if any.
	///
	/// Called by codecs for values which may contain references back to
	/// themselves, before reading their contents. Binding an already-bound
	/// slot to the same value is a no-op. Binding an id which was never
	/// reserved, or is bound to another value, is `InvalidBackReference`.
	#[inline]
	pub fn bind_ref(&mut self, slot: RefSlot, value: &AnyRef) -> Result<()> {
		match slot {
			RefSlot::Pending(id) => self.refs.register_read_object(id, value.clone()),
			RefSlot::Untracked => Ok(()),
		}
	}

	/// Read body of a value whose flag and type identifier have been read.
	///
	/// For `RefValue`, reserves the next reference id before reading, and binds
	/// the result to it after, unless the codec bound it earlier.
	pub(crate) fn read_body<C: Codec + ?Sized>(
		&mut self,
		codec: &C,
		flag: RefFlag,
	) -> Result<AnyRef> {
		self.nested(|de| {
			if flag != RefFlag::RefValue {
				return codec.read_inner(de, RefSlot::Untracked);
			}

			let id = de.refs.reserve_read_id();
			let value = codec.read_inner(de, RefSlot::Pending(id))?;
			if !de.refs.is_bound(id) {
				de.refs.register_read_object(id, value.clone())?;
			}
			Ok(value)
		})
	}

	/// Run `f` one nesting level deeper, failing if depth limit is exceeded.
	///
	/// Codec envelopes are nested automatically. `Serialize` impls for
	/// recursive containers (`Box`, `Vec`) also nest, so a type recursing
	/// without a codec is bounded by the same limit.
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
}
