//! Runtime values of types not known until run time.

use std::{
	any::{self, Any},
	cell::RefCell,
	rc::Rc,
};

use crate::{Error, Result};

/// A value which can occupy a polymorphic slot.
///
/// Implemented for every `'static` type. Provides what the registry needs to
/// find a codec for a value whose static type has been erased.
///
/// NB: Call these methods on a `&dyn Object`, not on an `Rc<dyn Object>`.
/// `Rc<dyn Object>` is itself `'static`, so is also an `Object`, and
/// `rc.type_name()` reports `Rc<dyn Object>` rather than the concrete type.
pub trait Object: Any {
	fn as_any(&self) -> &dyn Any;

	fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any>;

	/// Name of the concrete Rust type, for diagnostics.
	fn type_name(&self) -> &'static str;
}

impl<T: Any> Object for T {
	#[inline]
	fn as_any(&self) -> &dyn Any {
		self
	}

	#[inline]
	fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
		self
	}

	#[inline]
	fn type_name(&self) -> &'static str {
		any::type_name::<T>()
	}
}

/// Non-null value of any registered type.
///
/// Identity (for reference tracking) is the address of the `Rc`'s allocation.
pub type AnyRef = Rc<dyn Object>;

/// Reference-tracked value of a known type.
///
/// `RefCell` allows a deserializer to bind an empty value to its reference id
/// before reading its fields, so values can contain references to themselves.
pub type Shared<T> = Rc<RefCell<T>>;

/// Heterogeneous list. Registered as built-in type `LIST` in its shared form
/// `Shared<List>`.
pub type List = Vec<Option<AnyRef>>;

/// Wrap `value` in a [`Shared`].
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
	Rc::new(RefCell::new(value))
}

/// Wrap `value` as an [`AnyRef`].
#[inline]
pub fn any_ref<T: Any>(value: T) -> AnyRef {
	Rc::new(value)
}

/// Erase a [`Shared`]'s type. The result has the same identity.
#[inline]
pub fn erase<T: Any>(value: &Shared<T>) -> AnyRef {
	value.clone()
}

/// Get address identifying `value`'s allocation.
#[inline]
pub(crate) fn identity(value: &AnyRef) -> usize {
	Rc::as_ptr(value) as *const () as usize
}

/// Downcast an [`AnyRef`] to a concrete `Rc<T>`.
///
/// Errors with [`Error::TypeMismatch`] if value is not a `T`.
pub fn downcast<T: Any>(value: AnyRef) -> Result<Rc<T>> {
	let found = (*value).type_name();
	Object::into_any_rc(value)
		.downcast::<T>()
		.map_err(|_| Error::type_mismatch(any::type_name::<T>(), found))
}
