use std::sync::Arc;

use tracing::instrument;

use crate::{AnyRef, Config, Deserializer, Registry, Result, Serialize, Serializer};

/// Entry point for serializing and deserializing object graphs.
///
/// Holds a shared [`Registry`] and [`Config`]. Cheap to clone, and can be
/// used from many threads at once. Each call gets its own reference table and
/// meta string dictionary.
///
/// ```
/// use ser_graph::{any_ref, downcast, Graph};
///
/// let graph = Graph::default();
/// let bytes = graph.serialize(Some(&any_ref(String::from("hello")))).unwrap();
/// let value = graph.deserialize(&bytes).unwrap().unwrap();
/// assert_eq!(*downcast::<String>(value).unwrap(), "hello");
/// ```
#[derive(Clone)]
pub struct Graph {
	registry: Arc<Registry>,
	config: Config,
}

impl Default for Graph {
	/// Graph with built-in types registered, and default config.
	fn default() -> Self {
		Self::new(Registry::builder().build())
	}
}

impl Graph {
	pub fn new(registry: Registry) -> Self {
		Self::with_config(registry, Config::default())
	}

	pub fn with_config(registry: Registry, config: Config) -> Self {
		Self::from_shared(Arc::new(registry), config)
	}

	/// Create from a registry shared with other `Graph`s.
	pub fn from_shared(registry: Arc<Registry>, config: Config) -> Self {
		Self { registry, config }
	}

	#[inline]
	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	#[inline]
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Serialize a polymorphic value. `None` is written as a single null flag.
	#[instrument(level = "trace", skip_all)]
	pub fn serialize(&self, value: Option<&AnyRef>) -> Result<Vec<u8>> {
		self.serializer().serialize_any(value)
	}

	/// Deserialize a polymorphic value written by [`serialize`].
	///
	/// Reading stops at end of value. Any bytes after it are ignored.
	///
	/// [`serialize`]: Graph::serialize
	#[instrument(level = "trace", skip_all, fields(len = bytes.len()))]
	pub fn deserialize(&self, bytes: &[u8]) -> Result<Option<AnyRef>> {
		self.deserializer(bytes).deserialize_any()
	}

	/// Serialize a value of statically known type.
	pub fn serialize_value<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
		self.serializer().serialize_value(value)
	}

	/// Deserialize a value of statically known type.
	pub fn deserialize_value<T: Serialize>(&self, bytes: &[u8]) -> Result<T> {
		self.deserializer(bytes).deserialize_value()
	}

	/// Get a [`Serializer`]. Can be reused for many calls to avoid
	/// reallocating buffers.
	pub fn serializer(&self) -> Serializer<'_> {
		Serializer::new(&self.registry, &self.config)
	}

	pub fn deserializer<'b>(&self, bytes: &'b [u8]) -> Deserializer<'_, 'b> {
		Deserializer::new(&self.registry, &self.config, bytes)
	}
}
