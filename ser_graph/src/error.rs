use thiserror::Error;

use crate::TypeIdentifier;

/// Result type used throughout `ser_graph`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while registering codecs, serializing or deserializing.
///
/// Every error is terminal for the call which produced it. A partially written
/// or partially consumed buffer cannot be resumed, so the only recovery is to
/// redo the whole top-level call.
#[derive(Error, Debug)]
pub enum Error {
	/// A type identifier read from the wire has no registered codec.
	#[error("no codec registered for {0}")]
	UnrecognizedWireType(TypeIdentifier),

	/// A value being written into a polymorphic slot is not recognized by any
	/// registered codec.
	#[error("cannot determine concrete type of value of Rust type `{type_name}`: no registered codec recognizes it")]
	UnresolvableRuntimeType { type_name: &'static str },

	/// A `Ref` flag named an id which was never assigned, or which has been
	/// assigned but not yet bound to a materialized value.
	#[error("back-reference {id} does not name a materialized value ({assigned} reference ids assigned)")]
	InvalidBackReference { id: u32, assigned: usize },

	/// An operation only reachable through the polymorphic dispatch entry points
	/// was attempted directly.
	#[error("{operation}: the polymorphic codec is only reachable through its dispatch entry points")]
	IllegalDirectInvocation { operation: &'static str },

	/// Flag byte is not one of the 4 reference flags.
	#[error("invalid reference flag byte {0}")]
	InvalidRefFlag(i8),

	#[error("unexpected end of input: needed {needed} bytes at position {pos}, {remaining} remaining")]
	UnexpectedEof {
		pos: usize,
		needed: usize,
		remaining: usize,
	},

	#[error("malformed variable-length integer at position {pos}")]
	InvalidVarInt { pos: usize },

	#[error("invalid UTF-8 in string: {0}")]
	InvalidUtf8(#[from] std::str::Utf8Error),

	#[error("invalid char code point {0:#x}")]
	InvalidChar(u32),

	#[error("meta string back-reference {index} out of range ({len} strings interned)")]
	InvalidMetaString { index: u32, len: usize },

	/// A statically typed slot found a value of another type.
	#[error("type mismatch: expected {expected}, found {found}")]
	TypeMismatch { expected: String, found: String },

	#[error("unexpected null for non-optional `{type_name}`")]
	UnexpectedNull { type_name: &'static str },

	/// A statically typed slot needs a codec for a Rust type which was never
	/// registered.
	#[error("Rust type `{type_name}` has no registered codec")]
	UnregisteredType { type_name: &'static str },

	#[error("{0} is already registered")]
	DuplicateRegistration(TypeIdentifier),

	#[error("type id {id} is reserved")]
	ReservedTypeId { id: i16 },

	#[error("invalid variant index {index} for enum `{type_name}`")]
	InvalidEnumVariant { type_name: &'static str, index: u32 },

	#[error("nesting depth exceeded limit of {max_depth}")]
	DepthLimitExceeded { max_depth: usize },

	/// A shared value was mutably borrowed elsewhere while being written.
	#[error("value of type `{type_name}` is mutably borrowed")]
	ValueBorrowed { type_name: &'static str },
}

impl Error {
	pub(crate) fn type_mismatch(expected: impl ToString, found: impl ToString) -> Self {
		Error::TypeMismatch {
			expected: expected.to_string(),
			found: found.to_string(),
		}
	}
}
