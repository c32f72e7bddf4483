use crate::{Deserializer, Result, Serialize, Serializer};

/// Delegates to `T`'s option hooks, so `Option<Shared<T>>` and
/// `Option<AnyRef>` get full envelopes while value types get a flag byte.
impl<T: Serialize> Serialize for Option<T> {
	const RESERVED_SPACE: usize = 1 + T::RESERVED_SPACE;

	#[inline]
	fn serialize(&self, ser: &mut Serializer<'_>) -> Result<()> {
		T::serialize_option(self.as_ref(), ser)
	}

	#[inline]
	fn deserialize(de: &mut Deserializer<'_, '_>) -> Result<Self> {
		T::deserialize_option(de)
	}
}

impl<T: Serialize> Serialize for Vec<T> {
	const RESERVED_SPACE: usize = 5;

	// Nests, as `enum Tree { Node(Vec<Tree>) }` recurses without a `Box`
	fn serialize(&self, ser: &mut Serializer<'_>) -> Result<()> {
		ser.writer().write_len(self.len());
		ser.nested(|ser| {
			for value in self {
				value.serialize(ser)?;
			}
			Ok(())
		})
	}

	fn deserialize(de: &mut Deserializer<'_, '_>) -> Result<Self> {
		let len = de.reader().read_var_u32()? as usize;
		// Don't trust length for allocation. Corrupt input could claim any length.
		let mut vec = Vec::with_capacity(len.min(de.reader().remaining()));
		de.nested(|de| {
			for _ in 0..len {
				vec.push(T::deserialize(de)?);
			}
			Ok(vec)
		})
	}
}

macro_rules! impl_tuple {
	($($ty:ident $index:tt),+) => {
		impl<$($ty: Serialize),+> Serialize for ($($ty,)+) {
			const RESERVED_SPACE: usize = 0 $(+ $ty::RESERVED_SPACE)+;

			fn serialize(&self, ser: &mut Serializer<'_>) -> Result<()> {
				$(self.$index.serialize(ser)?;)+
				Ok(())
			}

			fn deserialize(de: &mut Deserializer<'_, '_>) -> Result<Self> {
				Ok(($($ty::deserialize(de)?,)+))
			}
		}
	};
}

impl_tuple!(T0 0);
impl_tuple!(T0 0, T1 1);
impl_tuple!(T0 0, T1 1, T2 2);
impl_tuple!(T0 0, T1 1, T2 2, T3 3);
impl_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4);
impl_tuple!(T0 0, T1 1, T2 2, T3 3, T4 4, T5 5);
