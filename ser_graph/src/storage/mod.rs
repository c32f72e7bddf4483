//! Byte cursor used by serializers and deserializers.
//!
//! [`Writer`] is an append-only growable buffer. [`Reader`] is a sequential
//! cursor over a borrowed byte slice. All multi-byte fixed-width integers are
//! little-endian. Variable-length integers are LEB128, with signed variants
//! zig-zag encoded first.

mod reader;
pub use reader::Reader;
mod writer;
pub use writer::Writer;

/// Maximum encoded length of a `var_u32`.
pub const MAX_VAR_U32_LEN: usize = 5;

/// Maximum encoded length of a `var_u64`.
pub const MAX_VAR_U64_LEN: usize = 10;

#[inline]
const fn zigzag_encode_32(n: i32) -> u32 {
	((n << 1) ^ (n >> 31)) as u32
}

#[inline]
const fn zigzag_decode_32(n: u32) -> i32 {
	((n >> 1) as i32) ^ -((n & 1) as i32)
}

#[inline]
const fn zigzag_encode_64(n: i64) -> u64 {
	((n << 1) ^ (n >> 63)) as u64
}

#[inline]
const fn zigzag_decode_64(n: u64) -> i64 {
	((n >> 1) as i64) ^ -((n & 1) as i64)
}
