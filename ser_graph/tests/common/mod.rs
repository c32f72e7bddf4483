#![allow(dead_code)]

mod network_data;
pub use network_data::{
	assert_same_network, drop_network, generate_network, index_people, Network, Person, Role,
};
use ser_graph::{Registry, RegistryBuilder};

/// Registry with built-ins and the network types.
pub fn network_registry() -> Registry {
	let mut builder = RegistryBuilder::new();
	register_network_types(&mut builder);
	builder.build()
}

pub fn register_network_types(builder: &mut RegistryBuilder) {
	builder
		.register_struct::<Network>()
		.and_then(|builder| builder.register_struct::<Person>())
		.and_then(|builder| builder.register_value::<Role>())
		.unwrap();
}

macro_rules! tests {
	($test_round_trip:ident) => {
		#[test]
		fn primitives() {
			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				u8: u8,
				u16: u16,
				u32: u32,
				u64: u64,
				i8: i8,
				i16: i16,
				i32: i32,
				i64: i64,
				f32: f32,
				f64: f64,
				bool: bool,
				char: char,
			}

			let input = Foo {
				u8: 0x01,
				u16: 0x0203,
				u32: 0x04050607,
				u64: 0x08090a0b0c0d0e0f,
				i8: 0x01,
				i16: 0x0203,
				i32: 0x04050607,
				i64: 0x08090a0b0c0d0e0f,
				f32: f32::MAX,
				f64: f64::MAX / 2f64,
				bool: true,
				char: 'c',
			};
			$test_round_trip(&input);

			let input = Foo {
				u8: u8::MAX,
				u16: u16::MAX,
				u32: u32::MAX,
				u64: u64::MAX,
				i8: i8::MIN,
				i16: i16::MIN,
				i32: i32::MIN,
				i64: i64::MIN,
				f32: f32::MIN_POSITIVE,
				f64: -0.5,
				bool: false,
				char: '\u{10ffff}',
			};
			$test_round_trip(&input);
		}

		#[test]
		fn tuples() {
			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				one: (u8,),
				two: (u8, u16),
				three: (u8, u16, u32),
				four: (u8, u16, u32, u64),
				six: (i8, i16, i32, i64, String, bool),
				nested: ((u8, u16), (String, (i32,))),
			}

			let input = Foo {
				one: (1,),
				two: (2, 3),
				three: (4, 5, 6),
				four: (7, 8, 9, 10),
				six: (-1, -2, -3, -4, "five".to_string(), true),
				nested: ((11, 12), ("thirteen".to_string(), (-14,))),
			};
			$test_round_trip(&input);
		}

		#[test]
		fn tuple_and_unit_structs() {
			#[derive(Serialize, Debug, PartialEq)]
			struct Pair(u32, String);

			#[derive(Serialize, Debug, PartialEq)]
			struct Marker;

			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				pair: Pair,
				marker: Marker,
				after: u8,
			}

			$test_round_trip(&Foo {
				pair: Pair(77, "pair".to_string()),
				marker: Marker,
				after: 0xff,
			});
		}

		#[test]
		fn enum_fieldless() {
			#[derive(Serialize, Debug, PartialEq)]
			enum Foo {
				A,
				B,
				C,
			}

			$test_round_trip(&Foo::A);
			$test_round_trip(&Foo::B);
			$test_round_trip(&Foo::C);
			$test_round_trip(&vec![Foo::C, Foo::A, Foo::B]);
		}

		#[test]
		fn enum_with_fields() {
			#[derive(Serialize, Debug, PartialEq)]
			enum Foo {
				Unit,
				Small(u8),
				Tuple(u32, String),
				Named { ser: u16, de: Box<Foo> },
			}

			$test_round_trip(&Foo::Unit);
			$test_round_trip(&Foo::Small(9));
			$test_round_trip(&Foo::Tuple(123456, "tuple".to_string()));
			$test_round_trip(&Foo::Named {
				ser: 1,
				de: Box::new(Foo::Named {
					ser: 2,
					de: Box::new(Foo::Tuple(3, "three".to_string())),
				}),
			});
		}

		#[test]
		fn boxes() {
			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				num: Box<u32>,
				string: Box<String>,
				boxed_box: Box<Box<i64>>,
				unit: Box<()>,
			}

			$test_round_trip(&Foo {
				num: Box::new(100),
				string: Box::new("boxed".to_string()),
				boxed_box: Box::new(Box::new(-100)),
				unit: Box::new(()),
			});
		}

		#[test]
		fn vecs() {
			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				empty: Vec<u32>,
				bytes: Vec<u8>,
				nums: Vec<i64>,
				nested: Vec<Vec<u16>>,
				strings: Vec<String>,
			}

			$test_round_trip(&Foo {
				empty: vec![],
				bytes: (0..=255).collect(),
				nums: vec![0, -1, 1, i64::MIN, i64::MAX],
				nested: vec![vec![], vec![1], vec![2, 3, 4]],
				strings: vec!["".to_string(), "x".to_string(), "long ".repeat(100)],
			});
		}

		#[test]
		fn strings() {
			$test_round_trip(&String::new());
			$test_round_trip(&"abc".to_string());
			$test_round_trip(&"\u{1f980} crab".to_string());
			$test_round_trip(&"x".repeat(1000));
		}

		#[test]
		fn options() {
			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				none: Option<u32>,
				some: Option<u32>,
				some_string: Option<String>,
				nested_none: Option<Option<u8>>,
				nested_some_none: Option<Option<u8>>,
				nested_some: Option<Option<u8>>,
				vec: Vec<Option<i16>>,
			}

			$test_round_trip(&Foo {
				none: None,
				some: Some(5),
				some_string: Some("opt".to_string()),
				nested_none: None,
				nested_some_none: Some(None),
				nested_some: Some(Some(7)),
				vec: vec![Some(1), None, Some(-1)],
			});
		}

		#[test]
		fn generics() {
			#[derive(Serialize, Debug, PartialEq)]
			struct Wrapper<T> {
				inner: T,
				more: Vec<T>,
			}

			$test_round_trip(&Wrapper {
				inner: 1u8,
				more: vec![2, 3],
			});
			$test_round_trip(&Wrapper {
				inner: "a".to_string(),
				more: vec!["b".to_string()],
			});
		}

		#[test]
		fn ser_with() {
			use std::time::Duration;

			use ser_graph::{Deserializer, Result, SerializeWith, Serializer};

			struct DurationProxy;

			impl SerializeWith<Duration> for DurationProxy {
				fn serialize_with(value: &Duration, ser: &mut Serializer<'_>) -> Result<()> {
					value.as_secs().serialize(ser)?;
					value.subsec_nanos().serialize(ser)
				}

				fn deserialize_with(de: &mut Deserializer<'_, '_>) -> Result<Duration> {
					let secs = u64::deserialize(de)?;
					let nanos = u32::deserialize(de)?;
					Ok(Duration::new(secs, nanos))
				}
			}

			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				#[ser_with(DurationProxy)]
				timeout: Duration,
				retries: u8,
			}

			#[derive(Serialize, Debug, PartialEq)]
			enum Bar {
				Never,
				After(#[ser_with(DurationProxy)] Duration),
			}

			$test_round_trip(&Foo {
				timeout: Duration::new(30, 500),
				retries: 3,
			});
			$test_round_trip(&Bar::Never);
			$test_round_trip(&Bar::After(Duration::from_millis(1500)));
		}

		#[test]
		fn bigints() {
			use num_bigint::{BigInt, BigUint};

			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				zero: BigUint,
				small: BigUint,
				big: BigUint,
				negative: BigInt,
				positive: BigInt,
			}

			$test_round_trip(&Foo {
				zero: BigUint::from(0u8),
				small: BigUint::from(200u8),
				big: BigUint::from(u64::MAX) * BigUint::from(u64::MAX),
				negative: BigInt::from(i64::MIN) * BigInt::from(3),
				positive: BigInt::from(u128::MAX),
			});
		}
	};
}

pub(crate) use tests;
