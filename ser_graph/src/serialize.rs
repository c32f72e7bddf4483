use crate::{Deserializer, RefFlag, Result, Serializer, TypeIdentifier};

/// Trait for types which can be serialized with a statically known type.
///
/// This is the fast path. Value types write only their body, with no flag or
/// type identifier. Types which need an envelope (shared values and
/// polymorphic slots) override [`serialize_option`] and [`deserialize_option`]
/// to write it themselves.
///
/// Can be derived for structs and enums with `#[derive(Serialize)]`.
///
/// [`serialize_option`]: Serialize::serialize_option
/// [`deserialize_option`]: Serialize::deserialize_option
pub trait Serialize: Sized {
	/// Estimate of bytes needed to write a value. Used to reserve buffer
	/// capacity ahead of writing.
	const RESERVED_SPACE: usize = 0;

	fn serialize(&self, ser: &mut Serializer<'_>) -> Result<()>;

	fn deserialize(de: &mut Deserializer<'_, '_>) -> Result<Self>;

	/// Serialize an `Option<Self>`.
	///
	/// Default writes a `Null` flag for `None`, or a `NotNullValue` flag
	/// followed by the value for `Some`.
	fn serialize_option(value: Option<&Self>, ser: &mut Serializer<'_>) -> Result<()> {
		match value {
			Some(value) => {
				ser.writer().write_i8(RefFlag::NotNullValue as i8);
				value.serialize(ser)
			}
			None => {
				ser.writer().write_i8(RefFlag::Null as i8);
				Ok(())
			}
		}
	}

	/// Deserialize an `Option<Self>` written by [`serialize_option`].
	///
	/// [`serialize_option`]: Serialize::serialize_option
	fn deserialize_option(de: &mut Deserializer<'_, '_>) -> Result<Option<Self>> {
		match de.read_ref_flag()? {
			RefFlag::Null => Ok(None),
			RefFlag::NotNullValue => Self::deserialize(de).map(Some),
			flag => Err(crate::Error::InvalidRefFlag(flag as i8)),
		}
	}
}

/// Trait for use with `#[ser_with]`.
///
/// Allows serializing a field of a foreign type which doesn't implement
/// [`Serialize`] via a proxy type.
///
/// ```ignore
/// struct DurationProxy;
///
/// impl SerializeWith<Duration> for DurationProxy {
/// 	fn serialize_with(value: &Duration, ser: &mut Serializer<'_>) -> Result<()> {
/// 		value.as_millis().serialize(ser)
/// 	}
///
/// 	fn deserialize_with(de: &mut Deserializer<'_, '_>) -> Result<Duration> {
/// 		Ok(Duration::from_millis(u64::deserialize(de)?))
/// 	}
/// }
///
/// #[derive(Serialize)]
/// struct Timeout {
/// 	#[ser_with(DurationProxy)]
/// 	after: Duration,
/// }
/// ```
pub trait SerializeWith<T> {
	fn serialize_with(value: &T, ser: &mut Serializer<'_>) -> Result<()>;

	fn deserialize_with(de: &mut Deserializer<'_, '_>) -> Result<T>;
}

/// Trait for types with a namespaced name on the wire.
///
/// Implemented by `#[derive(Serialize)]`. Set with `#[ser_namespace("...")]`
/// and `#[ser_name("...")]` attributes. Name defaults to the type's identifier,
/// namespace to empty.
pub trait NamedType {
	const NAMESPACE: &'static str;
	const TYPE_NAME: &'static str;

	fn type_identifier() -> TypeIdentifier {
		TypeIdentifier::named(Self::NAMESPACE, Self::TYPE_NAME)
	}
}
