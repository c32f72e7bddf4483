use num_bigint::{BigInt, BigUint};

use crate::{Deserializer, Result, Serialize, Serializer};

// Both written as length-prefixed little-endian bytes.
// `BigInt` uses two's complement.

impl Serialize for BigUint {
	const RESERVED_SPACE: usize = 9;

	fn serialize(&self, ser: &mut Serializer<'_>) -> Result<()> {
		let writer = ser.writer();
		let bytes = self.to_bytes_le();
		writer.write_len(bytes.len());
		writer.write_bytes(&bytes);
		Ok(())
	}

	fn deserialize(de: &mut Deserializer<'_, '_>) -> Result<Self> {
		let reader = de.reader();
		let len = reader.read_var_u32()? as usize;
		Ok(BigUint::from_bytes_le(reader.read_bytes(len)?))
	}
}

impl Serialize for BigInt {
	const RESERVED_SPACE: usize = 9;

	fn serialize(&self, ser: &mut Serializer<'_>) -> Result<()> {
		let writer = ser.writer();
		let bytes = self.to_signed_bytes_le();
		writer.write_len(bytes.len());
		writer.write_bytes(&bytes);
		Ok(())
	}

	fn deserialize(de: &mut Deserializer<'_, '_>) -> Result<Self> {
		let reader = de.reader();
		let len = reader.read_var_u32()? as usize;
		Ok(BigInt::from_signed_bytes_le(reader.read_bytes(len)?))
	}
}
