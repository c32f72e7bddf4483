// Pseudo-random social network, with shared and cyclic references between people.

use std::{collections::HashMap, ops};

use rand::Rng;
use rand_pcg::Lcg64Xsh32;
use ser_graph::{any_ref, shared, AnyRef, Object, Serialize, Shared};

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Default)]
#[ser_namespace("network")]
pub enum Role {
	#[default]
	Member,
	Moderator,
	Admin,
}

#[derive(Serialize, Default)]
#[ser_namespace("network")]
pub struct Person {
	pub name: String,
	pub age: i32,
	pub role: Role,
	pub friends: Vec<Shared<Person>>,
	pub best_friend: Option<Shared<Person>>,
	pub status: Option<AnyRef>,
}

#[derive(Serialize, Default)]
#[ser_namespace("network")]
pub struct Network {
	pub people: Vec<Shared<Person>>,
}

const NAMES: [&str; 8] = [
	"ada", "grace", "edsger", "barbara", "donald", "frances", "alan", "margaret",
];

fn generate_person<R: Rng>(rng: &mut R, index: usize) -> Person {
	let role = match rng.gen_range(0..3) {
		0 => Role::Member,
		1 => Role::Moderator,
		2 => Role::Admin,
		_ => unreachable!(),
	};
	let status = match rng.gen_range(0..4) {
		0 => None,
		1 => Some(any_ref(rng.gen::<i64>())),
		2 => Some(any_ref(format!("status {}", rng.gen::<u16>()))),
		3 => Some(any_ref(rng.gen_bool(0.5))),
		_ => unreachable!(),
	};
	Person {
		name: format!("{}_{}", NAMES[rng.gen_range(0..NAMES.len())], index),
		age: rng.gen_range(0..100),
		role,
		friends: vec![],
		best_friend: None,
		status,
	}
}

fn generate_links<R: Rng>(rng: &mut R, people: &[Shared<Person>], range: ops::Range<usize>) {
	for person in people {
		let count = rng.gen_range(range.clone());
		let mut person = person.borrow_mut();
		for _ in 0..count {
			// May link to self
			let friend = &people[rng.gen_range(0..people.len())];
			person.friends.push(friend.clone());
		}
		if rng.gen_bool(0.5) {
			person.best_friend = Some(people[rng.gen_range(0..people.len())].clone());
		}
	}
}

pub fn generate_network(num_people: usize) -> Network {
	const STATE: u64 = 3141592653;
	const STREAM: u64 = 5897932384;

	let mut rng = Lcg64Xsh32::new(STATE, STREAM);

	let people = (0..num_people)
		.map(|index| shared(generate_person(&mut rng, index)))
		.collect::<Vec<_>>();
	generate_links(&mut rng, &people, 0..6);
	Network { people }
}

/// Break reference cycles so test graphs don't leak.
pub fn drop_network(network: Network) {
	for person in &network.people {
		let mut person = person.borrow_mut();
		person.friends.clear();
		person.best_friend = None;
	}
}

/// Map each person's address to their position in `network.people`.
pub fn index_people(network: &Network) -> HashMap<*const (), usize> {
	network
		.people
		.iter()
		.enumerate()
		.map(|(index, person)| (std::rc::Rc::as_ptr(person) as *const (), index))
		.collect()
}

/// Assert 2 networks have the same shape: same data, and the same links
/// between people by position. Both must have one allocation per person.
pub fn assert_same_network(input: &Network, output: &Network) {
	use pretty_assertions::assert_eq;

	assert_eq!(input.people.len(), output.people.len());
	let input_indexes = index_people(input);
	let output_indexes = index_people(output);
	assert_eq!(output_indexes.len(), output.people.len(), "people not distinct");

	let position = |indexes: &HashMap<*const (), usize>, person: &Shared<Person>| {
		*indexes
			.get(&(std::rc::Rc::as_ptr(person) as *const ()))
			.expect("link to person outside network")
	};

	for (input, output) in input.people.iter().zip(&output.people) {
		let (input, output) = (input.borrow(), output.borrow());
		assert_eq!(input.name, output.name);
		assert_eq!(input.age, output.age);
		assert_eq!(input.role, output.role);

		let input_friends = input
			.friends
			.iter()
			.map(|friend| position(&input_indexes, friend))
			.collect::<Vec<_>>();
		let output_friends = output
			.friends
			.iter()
			.map(|friend| position(&output_indexes, friend))
			.collect::<Vec<_>>();
		assert_eq!(input_friends, output_friends);

		assert_eq!(
			input.best_friend.as_ref().map(|friend| position(&input_indexes, friend)),
			output.best_friend.as_ref().map(|friend| position(&output_indexes, friend)),
		);

		assert_eq!(describe_status(&input.status), describe_status(&output.status));
	}
}

fn describe_status(status: &Option<AnyRef>) -> String {
	let status = match status {
		Some(status) => &**status,
		None => return "none".to_string(),
	};
	let any = status.as_any();
	if let Some(value) = any.downcast_ref::<i64>() {
		format!("i64 {value}")
	} else if let Some(value) = any.downcast_ref::<String>() {
		format!("string {value}")
	} else if let Some(value) = any.downcast_ref::<bool>() {
		format!("bool {value}")
	} else {
		format!("other {}", status.type_name())
	}
}
