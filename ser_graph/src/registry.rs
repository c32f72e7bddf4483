//! Type registry.

use std::{any, collections::HashMap};

use indexmap::IndexMap;
use tracing::debug;

use crate::{
	codec::{SharedCodec, ValueCodec},
	types::TypeId,
	Codec, Error, List, NamedType, Object, Result, Serialize, TypeIdentifier,
};

type Recognizer = Box<dyn Fn(&dyn Object) -> bool + Send + Sync>;

struct Entry {
	codec: Box<dyn Codec>,
	recognizer: Option<Recognizer>,
}

impl Entry {
	#[inline]
	fn recognizes(&self, value: &dyn Object) -> bool {
		match &self.recognizer {
			Some(recognizer) => recognizer(value),
			None => self.codec.recognizes(value),
		}
	}
}

/// Mapping between type identifiers, runtime types and codecs.
///
/// Built with a [`RegistryBuilder`] and immutable after, so can be shared
/// between threads for concurrent serialization calls.
///
/// ```
/// use ser_graph::{any_ref, Registry, TypeId, TypeIdentifier};
///
/// let registry = Registry::builder().build();
/// let codec = registry.resolve_by_runtime_value(&*any_ref(123i32)).unwrap();
/// assert_eq!(codec.type_identifier(), &TypeIdentifier::Id(TypeId::INT32));
/// ```
pub struct Registry {
	entries: IndexMap<TypeIdentifier, Entry>,
	by_rust_type: HashMap<any::TypeId, usize>,
}

impl Registry {
	/// Get a builder with built-in types registered.
	pub fn builder() -> RegistryBuilder {
		RegistryBuilder::new()
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn contains(&self, type_identifier: &TypeIdentifier) -> bool {
		self.entries.contains_key(type_identifier)
	}

	/// Iterate over registered type identifiers, in registration order.
	pub fn type_identifiers(&self) -> impl Iterator<Item = &TypeIdentifier> {
		self.entries.keys()
	}

	/// Get codec for a type identifier read from the wire.
	pub fn resolve(&self, type_identifier: &TypeIdentifier) -> Result<&dyn Codec> {
		match self.entries.get(type_identifier) {
			Some(entry) => Ok(&*entry.codec),
			None => {
				debug!(%type_identifier, "unrecognized type identifier");
				Err(Error::UnrecognizedWireType(type_identifier.clone()))
			}
		}
	}

	/// Get codec for a numeric type id.
	pub fn resolve_by_wire_id(&self, id: i16) -> Result<&dyn Codec> {
		self.resolve(&TypeIdentifier::Id(id))
	}

	/// Get codec for a named type.
	pub fn resolve_by_name(&self, namespace: &str, type_name: &str) -> Result<&dyn Codec> {
		self.resolve(&TypeIdentifier::named(namespace, type_name))
	}

	/// Get codec for a runtime value.
	///
	/// Registered codecs are asked in registration order. First which
	/// recognizes the value wins.
	pub fn resolve_by_runtime_value(&self, value: &dyn Object) -> Result<&dyn Codec> {
		match self.entries.values().find(|entry| entry.recognizes(value)) {
			Some(entry) => Ok(&*entry.codec),
			None => {
				debug!(type_name = value.type_name(), "no codec recognizes value");
				Err(Error::UnresolvableRuntimeType {
					type_name: value.type_name(),
				})
			}
		}
	}

	/// Get codec for values of Rust type `T`.
	///
	/// If more than one codec was registered for `T`, the first wins.
	pub fn resolve_by_rust_type<T: any::Any>(&self) -> Result<&dyn Codec> {
		self
			.by_rust_type
			.get(&any::TypeId::of::<T>())
			.and_then(|&index| self.entries.get_index(index))
			.map(|(_, entry)| &*entry.codec)
			.ok_or(Error::UnregisteredType {
				type_name: any::type_name::<T>(),
			})
	}
}

/// Builder for a [`Registry`].
///
/// ```
/// use ser_graph::{Registry, Serialize};
///
/// #[derive(Serialize, Default)]
/// #[ser_namespace("geometry")]
/// struct Point {
/// 	x: i32,
/// 	y: i32,
/// }
///
/// # fn main() -> ser_graph::Result<()> {
/// let mut builder = Registry::builder();
/// builder.register_struct::<Point>()?;
/// let registry = builder.build();
/// assert!(registry.resolve_by_name("geometry", "Point").is_ok());
/// # Ok(())
/// # }
/// ```
pub struct RegistryBuilder {
	registry: Registry,
}

impl Default for RegistryBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl RegistryBuilder {
	/// Create builder with built-in types registered.
	pub fn new() -> Self {
		let mut builder = Self::bare();
		builder.register_builtins();
		builder
	}

	/// Create builder with nothing registered.
	pub fn bare() -> Self {
		Self {
			registry: Registry {
				entries: IndexMap::new(),
				by_rust_type: HashMap::new(),
			},
		}
	}

	/// Register a struct type, tracked for shared identity, under its name.
	/// Values are [`Shared<T>`](crate::Shared).
	pub fn register_struct<T>(&mut self) -> Result<&mut Self>
	where T: Serialize + Default + NamedType + 'static {
		self.register(SharedCodec::<T>::new(T::type_identifier()))
	}

	/// Register a struct type, tracked for shared identity, under numeric `id`.
	pub fn register_struct_with_id<T>(&mut self, id: i16) -> Result<&mut Self>
	where T: Serialize + Default + 'static {
		check_user_id(id)?;
		self.register(SharedCodec::<T>::new(TypeIdentifier::Id(id)))
	}

	/// Register a value type, never tracked, under its name.
	/// Values are `T`.
	pub fn register_value<T>(&mut self) -> Result<&mut Self>
	where T: Serialize + NamedType + 'static {
		self.register(ValueCodec::<T>::new(T::type_identifier()))
	}

	/// Register a value type, never tracked, under numeric `id`.
	pub fn register_value_with_id<T>(&mut self, id: i16) -> Result<&mut Self>
	where T: Serialize + 'static {
		check_user_id(id)?;
		self.register(ValueCodec::<T>::new(TypeIdentifier::Id(id)))
	}

	/// Register a codec.
	///
	/// Codec's type identifier must not already be registered.
	/// Numeric ids below [`TypeId::USER_ID_START`] are accepted, so a bare
	/// registry can be given its own codecs for built-in types.
	pub fn register<C: Codec>(&mut self, codec: C) -> Result<&mut Self> {
		self.insert(Box::new(codec), None)?;
		Ok(self)
	}

	/// Register a codec with a custom predicate for recognizing runtime values,
	/// used instead of the codec's own [`Codec::recognizes`].
	pub fn register_with_recognizer<C, F>(&mut self, codec: C, recognizer: F) -> Result<&mut Self>
	where
		C: Codec,
		F: Fn(&dyn Object) -> bool + Send + Sync + 'static,
	{
		self.insert(Box::new(codec), Some(Box::new(recognizer)))?;
		Ok(self)
	}

	pub fn build(self) -> Registry {
		debug!(codecs = self.registry.len(), "registry built");
		self.registry
	}

	fn insert(&mut self, codec: Box<dyn Codec>, recognizer: Option<Recognizer>) -> Result<()> {
		let type_identifier = codec.type_identifier().clone();
		match type_identifier {
			TypeIdentifier::Id(TypeId::UNKNOWN) => {
				return Err(Error::IllegalDirectInvocation {
					operation: "registering a codec under TypeId::UNKNOWN",
				})
			}
			TypeIdentifier::Id(id) if id < 0 => return Err(Error::ReservedTypeId { id }),
			_ => {}
		}

		let entries = &mut self.registry.entries;
		if entries.contains_key(&type_identifier) {
			debug!(%type_identifier, "duplicate registration rejected");
			return Err(Error::DuplicateRegistration(type_identifier));
		}

		let index = entries.len();
		if let Some(rust_type) = codec.rust_type() {
			self.registry.by_rust_type.entry(rust_type).or_insert(index);
		}
		debug!(%type_identifier, index, "registered codec");
		entries.insert(type_identifier, Entry { codec, recognizer });
		Ok(())
	}

	fn register_builtins(&mut self) {
		self.insert_builtin(ValueCodec::<bool>::new(TypeId::BOOL.into()));
		self.insert_builtin(ValueCodec::<i8>::new(TypeId::INT8.into()));
		self.insert_builtin(ValueCodec::<i16>::new(TypeId::INT16.into()));
		self.insert_builtin(ValueCodec::<i32>::new(TypeId::INT32.into()));
		self.insert_builtin(ValueCodec::<i64>::new(TypeId::INT64.into()));
		self.insert_builtin(ValueCodec::<f32>::new(TypeId::FLOAT32.into()));
		self.insert_builtin(ValueCodec::<f64>::new(TypeId::FLOAT64.into()));
		self.insert_builtin(ValueCodec::<String>::new(TypeId::STRING.into()));
		self.insert_builtin(ValueCodec::<Vec<u8>>::new(TypeId::BINARY.into()));
		self.insert_builtin(SharedCodec::<List>::new(TypeId::LIST.into()));
		#[cfg(feature = "num_bigint")]
		self.insert_builtin(ValueCodec::<num_bigint::BigInt>::new(TypeId::BIGINT.into()));
	}

	fn insert_builtin<C: Codec>(&mut self, codec: C) {
		// Built-in ids are distinct and valid, and registry is empty at this point
		let inserted = self.insert(Box::new(codec), None);
		debug_assert!(inserted.is_ok());
	}
}

fn check_user_id(id: i16) -> Result<()> {
	if TypeId::is_user_id(id) {
		Ok(())
	} else {
		Err(Error::ReservedTypeId { id })
	}
}
