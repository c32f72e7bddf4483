use proc_macro2::TokenStream;
use quote::quote;
use syn::{
	parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Field, GenericParam, Generics,
	Ident, LitStr, Path,
};

mod structs;
use structs::derive_struct;
mod enums;
use enums::derive_enum;

/// Derive `Serialize` and `NamedType`.
///
/// * `#[ser_namespace("...")]` on type sets namespace (default empty).
/// * `#[ser_name("...")]` on type sets type name (default the type's ident).
/// * `#[ser_with(Proxy)]` on field serializes it via `Proxy: SerializeWith<FieldType>`.
#[proc_macro_derive(Serialize, attributes(ser_with, ser_namespace, ser_name))]
pub fn serialize(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	serialize_impl(input).into()
}

fn serialize_impl(input: DeriveInput) -> TokenStream {
	let (namespace, type_name) = get_options(&input.attrs, &input.ident);
	let generics = input.generics;
	let generics_for_impl = get_generics(&generics);

	let serialize_impl = match input.data {
		Data::Struct(data) => derive_struct(data, &input.ident, &generics, &generics_for_impl),
		Data::Enum(data) => derive_enum(data, &input.ident, &generics, &generics_for_impl),
		Data::Union(_) => panic!("Deriving `Serialize` on unions not supported"),
	};

	let ident = &input.ident;
	let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

	quote! {
		#serialize_impl

		#[automatically_derived]
		impl #impl_generics ::ser_graph::NamedType for #ident #type_generics #where_clause {
			const NAMESPACE: &'static str = #namespace;
			const TYPE_NAME: &'static str = #type_name;
		}
	}
}

/// Amend generics to add `Serialize` bound to all type params
fn get_generics(generics: &Generics) -> Generics {
	let mut generics_for_impl = generics.clone();
	for param in &mut generics_for_impl.params {
		if let GenericParam::Type(type_param) = param {
			type_param.bounds.push(parse_quote!(::ser_graph::Serialize));
		}
	}
	generics_for_impl
}

/// Parse `#[ser_namespace]` and `#[ser_name]` attributes
fn get_options(attrs: &[Attribute], ident: &Ident) -> (LitStr, LitStr) {
	let mut namespace: Option<LitStr> = None;
	let mut type_name: Option<LitStr> = None;

	for attr in attrs {
		if attr.path.is_ident("ser_namespace") {
			let lit = attr
				.parse_args::<LitStr>()
				.expect("Malformed `ser_namespace` attr. Expected e.g. `#[ser_namespace(\"geometry\")]`");
			if namespace.is_some() {
				panic!("Can only have one `#[ser_namespace]` attribute");
			}
			namespace = Some(lit);
		} else if attr.path.is_ident("ser_name") {
			let lit = attr
				.parse_args::<LitStr>()
				.expect("Malformed `ser_name` attr. Expected e.g. `#[ser_name(\"Point\")]`");
			if type_name.is_some() {
				panic!("Can only have one `#[ser_name]` attribute");
			}
			type_name = Some(lit);
		}
	}

	let namespace = namespace.unwrap_or_else(|| LitStr::new("", ident.span()));
	let type_name = type_name.unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
	(namespace, type_name)
}

/// Get proxy type from `#[ser_with]` attribute on field
fn get_with(field: &Field) -> Option<Path> {
	let attrs = field
		.attrs
		.iter()
		.filter(|attr| attr.path.is_ident("ser_with"))
		.collect::<Vec<_>>();

	match attrs.len() {
		0 => None,
		1 => Some(
			attrs[0]
				.parse_args::<Path>()
				.expect("`#[ser_with]` needs a path e.g. `#[ser_with(ForeignTypeProxy)]`"),
		),
		_ => panic!("Cannot have more than 1 `#[ser_with]` attribute on a field"),
	}
}

/// Get expression which serializes a field from a reference to it
fn serialize_field(value: TokenStream, field: &Field) -> TokenStream {
	match get_with(field) {
		Some(with) => {
			let ty = &field.ty;
			quote! {
				<#with as ::ser_graph::SerializeWith<#ty>>::serialize_with(#value, ser)?;
			}
		}
		None => quote! {
			::ser_graph::Serialize::serialize(#value, ser)?;
		},
	}
}

/// Get expression which deserializes a field
fn deserialize_field(field: &Field) -> TokenStream {
	let ty = &field.ty;
	match get_with(field) {
		Some(with) => quote! {
			<#with as ::ser_graph::SerializeWith<#ty>>::deserialize_with(de)?
		},
		None => quote! {
			<#ty as ::ser_graph::Serialize>::deserialize(de)?
		},
	}
}
