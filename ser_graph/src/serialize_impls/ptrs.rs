use std::{any, cell::RefCell};

use crate::{
	object::{downcast, erase},
	AnyCodec, AnyRef, Deserializer, Error, Result, Serialize, Serializer, Shared,
};

// NB: Doesn't use `T::RESERVED_SPACE`, as that would make size of a recursive
// type (`struct Node { next: Option<Box<Node>> }`) a const evaluation cycle.
// Counts as a nesting level, as recursion through `Box` has no codec envelope.
impl<T: Serialize> Serialize for Box<T> {
	#[inline]
	fn serialize(&self, ser: &mut Serializer<'_>) -> Result<()> {
		ser.nested(|ser| (**self).serialize(ser))
	}

	#[inline]
	fn deserialize(de: &mut Deserializer<'_, '_>) -> Result<Self> {
		de.nested(|de| T::deserialize(de).map(Box::new))
	}
}

/// Shared values are written with full envelope via codec registered for
/// `RefCell<T>`, so identity is preserved whether the value is reached from a
/// typed field or a polymorphic slot.
impl<T: 'static> Serialize for Shared<T> {
	const RESERVED_SPACE: usize = crate::codec::ENVELOPE_SIZE;

	#[inline]
	fn serialize(&self, ser: &mut Serializer<'_>) -> Result<()> {
		Self::serialize_option(Some(self), ser)
	}

	fn deserialize(de: &mut Deserializer<'_, '_>) -> Result<Self> {
		Self::deserialize_option(de)?.ok_or(Error::UnexpectedNull {
			type_name: any::type_name::<T>(),
		})
	}

	fn serialize_option(value: Option<&Self>, ser: &mut Serializer<'_>) -> Result<()> {
		let value = match value {
			Some(value) => value,
			None => {
				ser.write_ref_or_null(None, true);
				return Ok(());
			}
		};
		let codec = ser.registry().resolve_by_rust_type::<RefCell<T>>()?;
		codec.write(&erase(value), ser)
	}

	fn deserialize_option(de: &mut Deserializer<'_, '_>) -> Result<Option<Self>> {
		let codec = de.registry().resolve_by_rust_type::<RefCell<T>>()?;
		match codec.read(de)? {
			Some(value) => downcast::<RefCell<T>>(value).map(Some),
			None => Ok(None),
		}
	}
}

/// Polymorphic slot. Concrete type is written on the wire.
impl Serialize for AnyRef {
	const RESERVED_SPACE: usize = AnyCodec::FIXED_SIZE;

	#[inline]
	fn serialize(&self, ser: &mut Serializer<'_>) -> Result<()> {
		AnyCodec::write(ser, Some(self))
	}

	fn deserialize(de: &mut Deserializer<'_, '_>) -> Result<Self> {
		AnyCodec::read(de)?.ok_or(Error::UnexpectedNull {
			type_name: "AnyRef",
		})
	}

	#[inline]
	fn serialize_option(value: Option<&Self>, ser: &mut Serializer<'_>) -> Result<()> {
		AnyCodec::write(ser, value)
	}

	#[inline]
	fn deserialize_option(de: &mut Deserializer<'_, '_>) -> Result<Option<Self>> {
		AnyCodec::read(de)
	}
}
