//! Per-type codecs.

use std::{
	any,
	cell::RefCell,
	marker::PhantomData,
	rc::Rc,
};

use crate::{
	object::{erase, shared},
	AnyRef, Deserializer, Error, Object, RefFlag, RefSlot, Result, Serialize, Serializer,
	TypeIdentifier,
};

/// Bytes in the smallest envelope: flag byte + numeric type id.
pub const ENVELOPE_SIZE: usize = 3;

/// Read/write unit for one concrete type's wire representation.
///
/// Codecs are registered in a [`Registry`] under a [`TypeIdentifier`], and are
/// found either from a type identifier read from the wire, or by asking each
/// registered codec whether it [`recognizes`] a runtime value.
///
/// Implementors provide the body encoding with [`write_inner`] and
/// [`read_inner`]. The provided [`write`] and [`read`] wrap the body in the
/// envelope: reference flag, then type identifier, then body. The envelope is
/// the same whether the codec is reached from a statically typed slot or from
/// a polymorphic one.
///
/// [`Registry`]: crate::Registry
/// [`recognizes`]: Codec::recognizes
/// [`write_inner`]: Codec::write_inner
/// [`read_inner`]: Codec::read_inner
/// [`write`]: Codec::write
/// [`read`]: Codec::read
pub trait Codec: Send + Sync + 'static {
	/// Identifier written on the wire for values of this codec's type.
	fn type_identifier(&self) -> &TypeIdentifier;

	/// Returns `true` if `value` is of the type this codec handles.
	fn recognizes(&self, value: &dyn Object) -> bool;

	/// Rust type of values this codec produces, if it handles exactly one.
	/// Used by statically typed slots to find their codec.
	fn rust_type(&self) -> Option<any::TypeId> {
		None
	}

	/// Whether values of this type are tracked for shared identity.
	/// Untracked values are always written with `NotNullValue`.
	fn needs_ref_tracking(&self) -> bool {
		false
	}

	/// Estimate of bytes needed for one value, including envelope.
	/// Only a hint for reserving buffer capacity.
	fn fixed_size(&self) -> usize {
		ENVELOPE_SIZE
	}

	/// Write value's body.
	fn write_inner(&self, value: &dyn Object, ser: &mut Serializer<'_>) -> Result<()>;

	/// Read value's body.
	///
	/// If `slot` is [`RefSlot::Pending`], and the value can contain references
	/// back to itself, implementation must call [`Deserializer::bind_ref`]
	/// before reading any nested value. Otherwise binding happens after this
	/// method returns.
	fn read_inner(&self, de: &mut Deserializer<'_, '_>, slot: RefSlot) -> Result<AnyRef>;

	/// Write value with envelope.
	fn write(&self, value: &AnyRef, ser: &mut Serializer<'_>) -> Result<()> {
		let flag = ser.write_ref_or_null(Some(value), self.needs_ref_tracking());
		if !flag.has_body() {
			return Ok(());
		}
		ser.write_type_identifier(self.type_identifier());
		ser.nested(|ser| self.write_inner(&**value, ser))
	}

	/// Read value with envelope, checking the type identifier on the wire is
	/// this codec's.
	fn read(&self, de: &mut Deserializer<'_, '_>) -> Result<Option<AnyRef>> {
		let flag = de.read_ref_flag()?;
		match flag {
			RefFlag::Null => Ok(None),
			RefFlag::Ref => de.read_back_reference().map(Some),
			RefFlag::RefValue | RefFlag::NotNullValue => {
				let found = de.read_type_identifier()?;
				if &found != self.type_identifier() {
					return Err(Error::type_mismatch(self.type_identifier(), found));
				}
				de.read_body(self, flag).map(Some)
			}
		}
	}
}

/// Codec for a value type `T`, which is never tracked for sharing.
///
/// Values are `T` itself behind an [`AnyRef`]. Used for built-in primitives,
/// strings and binary, and for user value types such as enums.
pub struct ValueCodec<T> {
	type_identifier: TypeIdentifier,
	_marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + 'static> ValueCodec<T> {
	pub fn new(type_identifier: TypeIdentifier) -> Self {
		Self {
			type_identifier,
			_marker: PhantomData,
		}
	}
}

impl<T: Serialize + 'static> Codec for ValueCodec<T> {
	#[inline]
	fn type_identifier(&self) -> &TypeIdentifier {
		&self.type_identifier
	}

	#[inline]
	fn recognizes(&self, value: &dyn Object) -> bool {
		value.as_any().is::<T>()
	}

	fn rust_type(&self) -> Option<any::TypeId> {
		Some(any::TypeId::of::<T>())
	}

	fn fixed_size(&self) -> usize {
		ENVELOPE_SIZE + T::RESERVED_SPACE
	}

	fn write_inner(&self, value: &dyn Object, ser: &mut Serializer<'_>) -> Result<()> {
		match value.as_any().downcast_ref::<T>() {
			Some(value) => value.serialize(ser),
			None => Err(Error::type_mismatch(any::type_name::<T>(), value.type_name())),
		}
	}

	fn read_inner(&self, de: &mut Deserializer<'_, '_>, _slot: RefSlot) -> Result<AnyRef> {
		Ok(Rc::new(T::deserialize(de)?))
	}
}

/// Codec for a reference-tracked [`Shared<T>`].
///
/// On read, an empty `T::default()` is bound to the value's reference id
/// before the fields are read, so fields can refer back to the value itself.
/// The fields then replace the empty value in place, keeping identity.
///
/// [`Shared<T>`]: crate::Shared
pub struct SharedCodec<T> {
	type_identifier: TypeIdentifier,
	_marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + Default + 'static> SharedCodec<T> {
	pub fn new(type_identifier: TypeIdentifier) -> Self {
		Self {
			type_identifier,
			_marker: PhantomData,
		}
	}
}

impl<T: Serialize + Default + 'static> Codec for SharedCodec<T> {
	#[inline]
	fn type_identifier(&self) -> &TypeIdentifier {
		&self.type_identifier
	}

	#[inline]
	fn recognizes(&self, value: &dyn Object) -> bool {
		value.as_any().is::<RefCell<T>>()
	}

	fn rust_type(&self) -> Option<any::TypeId> {
		Some(any::TypeId::of::<RefCell<T>>())
	}

	fn needs_ref_tracking(&self) -> bool {
		true
	}

	fn fixed_size(&self) -> usize {
		ENVELOPE_SIZE + T::RESERVED_SPACE
	}

	fn write_inner(&self, value: &dyn Object, ser: &mut Serializer<'_>) -> Result<()> {
		let cell = match value.as_any().downcast_ref::<RefCell<T>>() {
			Some(cell) => cell,
			None => {
				return Err(Error::type_mismatch(
					any::type_name::<RefCell<T>>(),
					value.type_name(),
				))
			}
		};
		let value = cell.try_borrow().map_err(|_| Error::ValueBorrowed {
			type_name: any::type_name::<T>(),
		})?;
		value.serialize(ser)
	}

	fn read_inner(&self, de: &mut Deserializer<'_, '_>, slot: RefSlot) -> Result<AnyRef> {
		let shell = shared(T::default());
		de.bind_ref(slot, &erase(&shell))?;

		// No borrow of `shell` is held while fields are read, so nested values
		// referring back to it only clone the `Rc`
		let value = T::deserialize(de)?;
		*shell.borrow_mut() = value;
		Ok(shell)
	}
}

