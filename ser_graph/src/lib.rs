//! Serialization of object graphs containing shared and cyclic references,
//! and values whose concrete type is only known at run time.
//!
//! Every value is written in an envelope:
//!
//! ```text
//! flag (i8) | type identifier | body
//! ```
//!
//! The flag is one of `Null`, `Ref` (followed by id of a value already
//! written), `NotNullValue` or `RefValue`. A value reached by 2 paths is
//! written once, then referred back to, so after reading both paths lead to
//! the same `Rc`.
//!
//! Types are registered in a [`Registry`] under a numeric id or a namespaced
//! name. A polymorphic slot ([`AnyRef`]) writes the type identifier of its
//! value, and reading it finds the codec from that identifier.
//!
//! ```
//! use std::rc::Rc;
//! use ser_graph::{downcast, erase, shared, Graph, Registry, Serialize, Shared};
//!
//! #[derive(Serialize, Default)]
//! #[ser_namespace("demo")]
//! struct Node {
//! 	name: String,
//! 	next: Option<Shared<Node>>,
//! }
//!
//! # fn main() -> ser_graph::Result<()> {
//! let mut builder = Registry::builder();
//! builder.register_struct::<Node>()?;
//! let graph = Graph::new(builder.build());
//!
//! // Node which points to itself
//! let node = shared(Node { name: "loop".into(), next: None });
//! node.borrow_mut().next = Some(node.clone());
//!
//! let bytes = graph.serialize(Some(&erase(&node)))?;
//! let out = downcast::<std::cell::RefCell<Node>>(graph.deserialize(&bytes)?.unwrap()).unwrap();
//! assert!(Rc::ptr_eq(&out, out.borrow().next.as_ref().unwrap()));
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "derive")]
pub use ser_graph_derive::Serialize;

mod any;
pub use any::AnyCodec;
pub mod codec;
pub use codec::{Codec, SharedCodec, ValueCodec};
mod config;
pub use config::{Config, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_DEPTH};
mod deserializer;
pub use deserializer::Deserializer;
mod error;
pub use error::{Error, Result};
mod graph;
pub use graph::Graph;
mod meta_string;
pub use meta_string::{MetaStringReader, MetaStringWriter};
mod object;
pub use object::{any_ref, downcast, erase, shared, AnyRef, List, Object, Shared};
mod refs;
pub use refs::{RefFlag, RefReader, RefSlot, RefWriter};
mod registry;
pub use registry::{Registry, RegistryBuilder};
mod serialize;
pub use serialize::{NamedType, Serialize, SerializeWith};
mod serialize_impls;
mod serializer;
pub use serializer::Serializer;
pub mod storage;
mod types;
pub use types::{TypeId, TypeIdentifier};
