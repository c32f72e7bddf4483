#[cfg(feature = "num_bigint")]
mod bigint;
mod other;
mod primitives;
mod ptrs;
