/// Default limit on nesting depth of values.
///
/// Low enough that a graph nested right up to the limit can be read and
/// written on a 2 MiB thread stack in an unoptimized build.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default initial capacity of output buffer in bytes.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Options for serialization and deserialization.
///
/// ```
/// use ser_graph::Config;
///
/// let config = Config::default().ref_tracking(false).max_depth(64);
/// assert!(!config.is_ref_tracking());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
	ref_tracking: bool,
	max_depth: usize,
	initial_capacity: usize,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			ref_tracking: true,
			max_depth: DEFAULT_MAX_DEPTH,
			initial_capacity: DEFAULT_INITIAL_CAPACITY,
		}
	}
}

impl Config {
	/// Enable or disable reference tracking.
	///
	/// With tracking disabled, every non-null value is written with
	/// `NotNullValue`, so values reachable by 2 paths are written twice and
	/// are 2 separate values after reading. A cyclic graph recurses until
	/// the depth limit is hit.
	pub fn ref_tracking(mut self, enabled: bool) -> Self {
		self.ref_tracking = enabled;
		self
	}

	/// Set limit on nesting depth of values.
	///
	/// Every codec envelope counts as one level, as does every `Box` and `Vec`.
	/// Raising the limit far above [`DEFAULT_MAX_DEPTH`] may need a larger
	/// thread stack.
	pub fn max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	/// Set initial capacity of output buffer.
	pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
		self.initial_capacity = initial_capacity;
		self
	}

	#[inline]
	pub fn is_ref_tracking(&self) -> bool {
		self.ref_tracking
	}

	#[inline]
	pub fn get_max_depth(&self) -> usize {
		self.max_depth
	}

	#[inline]
	pub fn get_initial_capacity(&self) -> usize {
		self.initial_capacity
	}
}
