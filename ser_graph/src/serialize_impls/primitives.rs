use crate::{Deserializer, Error, Result, Serialize, Serializer};

macro_rules! impl_primitive {
	($ty:ty, $write:ident, $read:ident, $size:expr) => {
		impl Serialize for $ty {
			const RESERVED_SPACE: usize = $size;

			#[inline]
			fn serialize(&self, ser: &mut Serializer<'_>) -> Result<()> {
				ser.writer().$write(*self);
				Ok(())
			}

			#[inline]
			fn deserialize(de: &mut Deserializer<'_, '_>) -> Result<Self> {
				de.reader().$read()
			}
		}
	};
}

impl_primitive!(bool, write_bool, read_bool, 1);

impl_primitive!(u8, write_u8, read_u8, 1);
impl_primitive!(u16, write_u16, read_u16, 2);
impl_primitive!(u32, write_var_u32, read_var_u32, 5);
impl_primitive!(u64, write_var_u64, read_var_u64, 10);

impl_primitive!(i8, write_i8, read_i8, 1);
impl_primitive!(i16, write_i16, read_i16, 2);
impl_primitive!(i32, write_var_i32, read_var_i32, 5);
impl_primitive!(i64, write_var_i64, read_var_i64, 10);

impl_primitive!(f32, write_f32, read_f32, 4);
impl_primitive!(f64, write_f64, read_f64, 8);

impl Serialize for char {
	const RESERVED_SPACE: usize = 3;

	#[inline]
	fn serialize(&self, ser: &mut Serializer<'_>) -> Result<()> {
		ser.writer().write_var_u32(*self as u32);
		Ok(())
	}

	fn deserialize(de: &mut Deserializer<'_, '_>) -> Result<Self> {
		let code = de.reader().read_var_u32()?;
		char::from_u32(code).ok_or(Error::InvalidChar(code))
	}
}

impl Serialize for () {
	#[inline(always)]
	fn serialize(&self, _ser: &mut Serializer<'_>) -> Result<()> {
		Ok(())
	}

	#[inline(always)]
	fn deserialize(_de: &mut Deserializer<'_, '_>) -> Result<Self> {
		Ok(())
	}
}

impl Serialize for String {
	const RESERVED_SPACE: usize = 16;

	#[inline]
	fn serialize(&self, ser: &mut Serializer<'_>) -> Result<()> {
		ser.writer().write_str(self);
		Ok(())
	}

	fn deserialize(de: &mut Deserializer<'_, '_>) -> Result<Self> {
		de.reader().read_str().map(str::to_owned)
	}
}
