use std::{fmt::Debug, rc::Rc};

mod common;
use common::{
	assert_same_network, drop_network, generate_network, network_registry, tests, Network, Person,
};
use pretty_assertions::assert_eq;
use ser_graph::{downcast, erase, shared, Graph, Serialize};

fn test_round_trip<T>(input: &T)
where T: Serialize + Debug + PartialEq {
	let graph = Graph::default();
	let bytes = graph.serialize_value(input).unwrap();
	let output: T = graph.deserialize_value(&bytes).unwrap();
	assert_eq!(&output, input);

	// Same input, same bytes
	assert_eq!(graph.serialize_value(input).unwrap(), bytes);
}

tests!(test_round_trip);

#[test]
fn network_typed() {
	let graph = Graph::new(network_registry());
	let input = generate_network(100);

	let bytes = graph.serialize_value(&input).unwrap();
	let output: Network = graph.deserialize_value(&bytes).unwrap();
	assert_same_network(&input, &output);

	// Each person written once. Every other occurrence is a back-reference,
	// so output size is far smaller than if links were written in full.
	assert!(bytes.len() < 100 * 64);

	drop_network(input);
	drop_network(output);
}

#[test]
fn network_polymorphic() {
	let graph = Graph::new(network_registry());
	let input = shared(generate_network(100));

	let bytes = graph.serialize(Some(&erase(&input))).unwrap();
	let output = graph.deserialize(&bytes).unwrap().unwrap();
	let output = downcast::<std::cell::RefCell<Network>>(output).unwrap();
	assert_same_network(&input.borrow(), &output.borrow());

	// Polymorphic top level writes same bytes as typed top level,
	// as `Shared<Network>` always carries its envelope
	assert_eq!(graph.serialize_value(&input).unwrap(), bytes);

	drop_network(input.take());
	drop_network(output.take());
}

#[test]
fn network_serializer_reuse() {
	let graph = Graph::new(network_registry());
	let first = generate_network(30);
	let second = generate_network(10);

	// Reference ids and meta strings reset between calls
	let mut ser = graph.serializer();
	let first_bytes = ser.serialize_value(&first).unwrap();
	let second_bytes = ser.serialize_value(&second).unwrap();
	let first_again = ser.serialize_value(&first).unwrap();
	assert_eq!(first_bytes, first_again);
	assert_eq!(second_bytes, graph.serialize_value(&second).unwrap());

	let output: Network = graph.deserialize_value(&second_bytes).unwrap();
	assert_same_network(&second, &output);

	drop_network(first);
	drop_network(second);
	drop_network(output);
}

#[test]
fn person_reached_by_typed_field_and_polymorphic_slot() {
	let graph = Graph::new(network_registry());

	let bob = shared(Person {
		name: "bob".to_string(),
		..Person::default()
	});
	let alice = shared(Person {
		name: "alice".to_string(),
		friends: vec![bob.clone()],
		status: Some(erase(&bob)),
		..Person::default()
	});

	let bytes = graph.serialize_value(&alice).unwrap();
	let output = graph.deserialize_value::<ser_graph::Shared<Person>>(&bytes).unwrap();
	let output = output.borrow();
	let friend = &output.friends[0];
	let status = output.status.clone().unwrap();
	assert_eq!(friend.borrow().name, "bob");
	assert_eq!(
		Rc::as_ptr(friend) as *const (),
		Rc::as_ptr(&status) as *const ()
	);
}
