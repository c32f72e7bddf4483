//! Wire-level type identifiers.

use std::{fmt, sync::Arc};

/// Numeric type ids.
///
/// Non-negative ids name a type directly. Ids `1..USER_ID_START` are reserved
/// for built-in types. An id with the sign bit set is a marker meaning a
/// namespace and type name follow on the wire.
pub struct TypeId;

impl TypeId {
	/// The open / polymorphic type. Never written for a concrete value, and can
	/// never have a codec registered for it.
	pub const UNKNOWN: i16 = 0;

	pub const BOOL: i16 = 1;
	pub const INT8: i16 = 2;
	pub const INT16: i16 = 3;
	pub const INT32: i16 = 4;
	pub const INT64: i16 = 5;
	pub const FLOAT32: i16 = 6;
	pub const FLOAT64: i16 = 7;
	pub const STRING: i16 = 8;
	pub const BINARY: i16 = 9;
	pub const LIST: i16 = 10;
	pub const BIGINT: i16 = 11;

	/// First id available for user types registered by number.
	pub const USER_ID_START: i16 = 64;

	/// Marker written in place of a numeric id when the type is named.
	pub const NAMED: i16 = i16::MIN;

	/// Returns `true` if on-wire `id` is the named type marker, meaning
	/// namespace and type name strings follow.
	///
	/// This must be checked before deciding whether to read those strings.
	#[inline]
	pub const fn is_named(id: i16) -> bool {
		id & Self::NAMED != 0
	}

	/// Returns `true` if `id` may be used to register a user type.
	#[inline]
	pub const fn is_user_id(id: i16) -> bool {
		id >= Self::USER_ID_START
	}
}

/// Identifies a value's concrete type on the wire.
///
/// Either a small numeric id, or a `(namespace, type_name)` pair for named
/// types. Strings are reference-counted so identifiers read from the wire can
/// be looked up without copying.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeIdentifier {
	Id(i16),
	Named {
		namespace: Arc<str>,
		type_name: Arc<str>,
	},
}

impl TypeIdentifier {
	/// Create a named type identifier.
	pub fn named(namespace: impl Into<Arc<str>>, type_name: impl Into<Arc<str>>) -> Self {
		TypeIdentifier::Named {
			namespace: namespace.into(),
			type_name: type_name.into(),
		}
	}

	#[inline]
	pub fn is_named(&self) -> bool {
		matches!(self, TypeIdentifier::Named { .. })
	}
}

impl From<i16> for TypeIdentifier {
	#[inline]
	fn from(id: i16) -> Self {
		TypeIdentifier::Id(id)
	}
}

impl fmt::Display for TypeIdentifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TypeIdentifier::Id(id) => write!(f, "type id {id}"),
			TypeIdentifier::Named {
				namespace,
				type_name,
			} => {
				if namespace.is_empty() {
					write!(f, "named type `{type_name}`")
				} else {
					write!(f, "named type `{namespace}.{type_name}`")
				}
			}
		}
	}
}
