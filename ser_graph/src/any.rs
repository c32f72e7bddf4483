//! Polymorphic slots.

use tracing::trace;

use crate::{AnyRef, Codec, Deserializer, RefFlag, Result, Serializer};

/// Codec for slots whose concrete type is only known at run time.
///
/// On write, finds the codec for the value's runtime type and delegates the
/// whole envelope to it. On read, reads the flag and type identifier, finds
/// the codec for that identifier, and delegates reading the body to it.
///
/// A back-reference is resolved from the reference table alone, with no
/// registry lookup.
///
/// `AnyCodec` has no type identifier of its own, so it is not a [`Codec`],
/// cannot be registered, and has no body-only read or write. Only the full
/// envelope [`write`] and [`read`] exist.
///
/// [`write`]: AnyCodec::write
/// [`read`]: AnyCodec::read
pub struct AnyCodec;

impl AnyCodec {
	/// Bytes reserved in output buffer before writing a non-null value,
	/// in addition to the concrete codec's own estimate.
	pub const FIXED_SIZE: usize = 11;

	/// Write `value` with envelope.
	///
	/// `None` writes a single `Null` flag byte. Errors with
	/// [`UnresolvableRuntimeType`] if no registered codec recognizes the value.
	///
	/// [`UnresolvableRuntimeType`]: crate::Error::UnresolvableRuntimeType
	pub fn write(ser: &mut Serializer<'_>, value: Option<&AnyRef>) -> Result<()> {
		let value = match value {
			Some(value) => value,
			None => {
				ser.write_ref_or_null(None, false);
				return Ok(());
			}
		};

		let codec = ser.registry().resolve_by_runtime_value(&**value)?;
		trace!(type_identifier = %codec.type_identifier(), "dispatch write");
		ser.writer().reserve(Self::FIXED_SIZE.max(codec.fixed_size()));
		codec.write(value, ser)
	}

	/// Read a value with envelope.
	///
	/// Errors with [`UnrecognizedWireType`] if type identifier read has no
	/// registered codec.
	///
	/// [`UnrecognizedWireType`]: crate::Error::UnrecognizedWireType
	pub fn read(de: &mut Deserializer<'_, '_>) -> Result<Option<AnyRef>> {
		let flag = de.read_ref_flag()?;
		match flag {
			RefFlag::Null => Ok(None),
			RefFlag::Ref => de.read_back_reference().map(Some),
			RefFlag::RefValue | RefFlag::NotNullValue => {
				let codec = Self::detect_codec(de)?;
				trace!(type_identifier = %codec.type_identifier(), ?flag, "dispatch read");
				de.read_body(codec, flag).map(Some)
			}
		}
	}

	fn detect_codec<'g>(de: &mut Deserializer<'g, '_>) -> Result<&'g dyn Codec> {
		let type_identifier = de.read_type_identifier()?;
		de.registry().resolve(&type_identifier)
	}
}
