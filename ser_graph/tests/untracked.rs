use std::fmt::Debug;

mod common;
use common::{network_registry, tests, Person};
use pretty_assertions::assert_eq;
use ser_graph::{
	any_ref, downcast, erase, shared, Config, Error, Graph, List, Registry, Serialize, Shared,
};

fn untracked_graph() -> Graph {
	Graph::with_config(
		Registry::builder().build(),
		Config::default().ref_tracking(false),
	)
}

fn test_round_trip<T>(input: &T)
where T: Serialize + Debug + PartialEq {
	let graph = untracked_graph();
	let bytes = graph.serialize_value(input).unwrap();
	let output: T = graph.deserialize_value(&bytes).unwrap();
	assert_eq!(&output, input);

	// Value types are never tracked, so bytes are same as with tracking on
	assert_eq!(Graph::default().serialize_value(input).unwrap(), bytes);
}

tests!(test_round_trip);

#[test]
fn shared_value_written_twice() {
	let graph = untracked_graph();

	let inner = shared(vec![Some(any_ref(1i32))]);
	let outer = shared(vec![Some(erase(&inner)), Some(erase(&inner))]);
	let bytes = graph.serialize(Some(&erase(&outer))).unwrap();

	#[rustfmt::skip]
	assert_eq!(
		bytes,
		vec![
			0xFF, 10, 0, 2,
			0xFF, 10, 0, 1, 0xFF, 4, 0, 2,
			0xFF, 10, 0, 1, 0xFF, 4, 0, 2,
		]
	);

	// Output has 2 separate lists
	let output = downcast::<std::cell::RefCell<List>>(graph.deserialize(&bytes).unwrap().unwrap())
		.unwrap();
	let output = output.borrow();
	let first = output[0].clone().unwrap();
	let second = output[1].clone().unwrap();
	assert!(!std::ptr::eq(
		std::rc::Rc::as_ptr(&first) as *const (),
		std::rc::Rc::as_ptr(&second) as *const ()
	));
}

#[test]
fn cycle_hits_depth_limit() {
	let graph = Graph::with_config(
		network_registry(),
		Config::default().ref_tracking(false).max_depth(100),
	);

	let person: Shared<Person> = shared(Person::default());
	person.borrow_mut().best_friend = Some(person.clone());

	let result = graph.serialize_value(&person);
	assert!(matches!(
		result,
		Err(Error::DepthLimitExceeded { max_depth: 100 })
	));

	person.borrow_mut().best_friend = None;
}

#[test]
fn tracked_bytes_read_by_untracked_graph() {
	let inner = shared(List::new());
	let outer = shared(vec![Some(erase(&inner)), Some(erase(&inner))]);
	let bytes = Graph::default().serialize(Some(&erase(&outer))).unwrap();

	// Readers accept both forms regardless of own config
	let output = untracked_graph().deserialize(&bytes).unwrap().unwrap();
	let output = downcast::<std::cell::RefCell<List>>(output).unwrap();
	let output = output.borrow();
	assert_eq!(
		std::rc::Rc::as_ptr(output[0].as_ref().unwrap()) as *const (),
		std::rc::Rc::as_ptr(output[1].as_ref().unwrap()) as *const ()
	);
}
