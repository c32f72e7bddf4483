//! Reference resolution.
//!
//! Every reference-tracked slot on the wire is preceded by a [`RefFlag`].
//! During a write, [`RefWriter`] records the identity of each value written
//! under `RefValue` and assigns it the next id. A later occurrence of the same
//! value is written as `Ref` + id. During a read, [`RefReader`] reserves ids in
//! the same order the `RefValue` flags appear, so the n-th `RefValue` written is
//! always the n-th id a `Ref` can name.
//!
//! Both tables live for exactly one top-level call.

use std::collections::HashMap;

use tracing::trace;

use crate::{
	object::identity,
	storage::{Reader, Writer},
	AnyRef, Error, Result,
};

/// Flag written before every reference-tracked or polymorphic value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i8)]
pub enum RefFlag {
	/// Value is absent. Nothing follows.
	Null = -3,
	/// Value was already written. Its id follows as a `var_u32`.
	Ref = -2,
	/// Value follows, and is not tracked for sharing.
	NotNullValue = -1,
	/// Value follows, and is assigned the next reference id.
	RefValue = 0,
}

impl RefFlag {
	/// Returns `true` if a value body follows this flag.
	#[inline]
	pub const fn has_body(self) -> bool {
		matches!(self, RefFlag::RefValue | RefFlag::NotNullValue)
	}
}

impl TryFrom<i8> for RefFlag {
	type Error = Error;

	#[inline]
	fn try_from(byte: i8) -> Result<Self> {
		match byte {
			-3 => Ok(RefFlag::Null),
			-2 => Ok(RefFlag::Ref),
			-1 => Ok(RefFlag::NotNullValue),
			0 => Ok(RefFlag::RefValue),
			_ => Err(Error::InvalidRefFlag(byte)),
		}
	}
}

/// Write-pass reference table.
///
/// Records values by identity, not equality. Table holds a clone of every
/// value recorded, so an address cannot be freed and reused by another value
/// before `reset`. Values built temporarily during a call (e.g. by a
/// `SerializeWith` impl) are never mistaken for each other.
#[derive(Default)]
pub struct RefWriter {
	ids: HashMap<usize, (u32, AnyRef)>,
}

impl RefWriter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Empty the table, ready for a new stream.
	pub fn reset(&mut self) {
		self.ids.clear();
	}

	/// Number of ids assigned so far.
	#[inline]
	pub fn len(&self) -> usize {
		self.ids.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	/// Decide and write the flag for `value`.
	///
	/// * `None` writes `Null`.
	/// * A value already in the table writes `Ref` + its id.
	/// * Otherwise writes `RefValue` and assigns a fresh id if `trackable`,
	///   or `NotNullValue` if not.
	///
	/// Returns the flag written. If [`RefFlag::has_body`] is `true`, caller must
	/// now write the value's type identifier (if required) and body.
	pub fn write_ref_or_null(
		&mut self,
		writer: &mut Writer,
		value: Option<&AnyRef>,
		trackable: bool,
	) -> RefFlag {
		let value = match value {
			Some(value) => value,
			None => {
				writer.write_i8(RefFlag::Null as i8);
				return RefFlag::Null;
			}
		};

		if !trackable {
			writer.write_i8(RefFlag::NotNullValue as i8);
			return RefFlag::NotNullValue;
		}

		let next_id = self.ids.len() as u32;
		match self.ids.get(&identity(value)) {
			Some(&(id, _)) => {
				trace!(id, "write back-reference");
				writer.write_i8(RefFlag::Ref as i8);
				writer.write_var_u32(id);
				RefFlag::Ref
			}
			None => {
				trace!(id = next_id, "assign reference id");
				self.ids.insert(identity(value), (next_id, value.clone()));
				writer.write_i8(RefFlag::RefValue as i8);
				RefFlag::RefValue
			}
		}
	}
}

/// Read-pass reference table.
///
/// Slot `n` holds the value materialized for the n-th `RefValue` flag read.
/// A slot is `None` between its id being reserved and the value being bound.
#[derive(Default)]
pub struct RefReader {
	objects: Vec<Option<AnyRef>>,
}

impl RefReader {
	pub fn new() -> Self {
		Self::default()
	}

	/// Empty the table, ready for a new stream.
	pub fn reset(&mut self) {
		self.objects.clear();
	}

	/// Number of ids assigned so far.
	#[inline]
	pub fn len(&self) -> usize {
		self.objects.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}

	/// Read the next flag.
	#[inline]
	pub fn read_ref_flag(&self, reader: &mut Reader<'_>) -> Result<RefFlag> {
		RefFlag::try_from(reader.read_i8()?)
	}

	/// Reserve the next id. Called on reading a `RefValue` flag, before the
	/// value's body is read.
	#[inline]
	pub fn reserve_read_id(&mut self) -> u32 {
		let id = self.objects.len() as u32;
		self.objects.push(None);
		id
	}

	/// Bind a materialized value to a reserved id.
	///
	/// Must happen before any nested value which may refer back to it is read.
	/// Fails if `id` was never reserved, or is already bound to another value.
	pub fn register_read_object(&mut self, id: u32, value: AnyRef) -> Result<()> {
		let assigned = self.objects.len();
		match self.objects.get_mut(id as usize) {
			Some(Some(bound)) if identity(bound) != identity(&value) => {
				Err(Error::InvalidBackReference { id, assigned })
			}
			Some(slot) => {
				*slot = Some(value);
				Ok(())
			}
			None => Err(Error::InvalidBackReference { id, assigned }),
		}
	}

	/// Returns `true` if `id` has been bound to a value.
	#[inline]
	pub fn is_bound(&self, id: u32) -> bool {
		matches!(self.objects.get(id as usize), Some(Some(_)))
	}

	/// Get the value previously bound to `id`.
	pub fn get_read_object(&self, id: u32) -> Result<AnyRef> {
		match self.objects.get(id as usize) {
			Some(Some(value)) => Ok(value.clone()),
			_ => Err(Error::InvalidBackReference {
				id,
				assigned: self.objects.len(),
			}),
		}
	}
}

/// Whether a value being read was announced with `RefValue`, and so must be
/// bound to its reserved id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefSlot {
	/// Value was announced with `NotNullValue`.
	Untracked,
	/// Value was announced with `RefValue` and reserved this id.
	Pending(u32),
}
