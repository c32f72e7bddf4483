use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, DataStruct, Fields, Generics, Ident, Index};

use crate::{deserialize_field, get_with, serialize_field};

pub fn derive_struct(
	data: DataStruct,
	ident: &Ident,
	generics: &Generics,
	generics_for_impl: &Generics,
) -> TokenStream {
	let (field_stmts, construct) = match &data.fields {
		Fields::Named(fields) => {
			let stmts = fields
				.named
				.iter()
				.map(|field| {
					let field_name = field.ident.as_ref().expect("Missing field name");
					let stmt = serialize_field(quote! {&self.#field_name}, field);
					quote_spanned! {field.span()=> #stmt }
				})
				.collect::<Vec<_>>();
			let inits = fields
				.named
				.iter()
				.map(|field| {
					let field_name = field.ident.as_ref().expect("Missing field name");
					let value = deserialize_field(field);
					quote_spanned! {field.span()=> #field_name: #value }
				})
				.collect::<Vec<_>>();
			(stmts, quote! { Self { #(#inits),* } })
		}
		Fields::Unnamed(fields) => {
			let stmts = fields
				.unnamed
				.iter()
				.enumerate()
				.map(|(index, field)| {
					let index = Index::from(index);
					let stmt = serialize_field(quote! {&self.#index}, field);
					quote_spanned! {field.span()=> #stmt }
				})
				.collect::<Vec<_>>();
			let values = fields.unnamed.iter().map(deserialize_field).collect::<Vec<_>>();
			(stmts, quote! { Self(#(#values),*) })
		}
		Fields::Unit => (vec![], quote! { Self }),
	};

	// Size hint. Fields serialized via a proxy contribute nothing.
	let reserved_sizes = data
		.fields
		.iter()
		.filter(|field| get_with(field).is_none())
		.map(|field| {
			let ty = &field.ty;
			quote! { + <#ty as ::ser_graph::Serialize>::RESERVED_SPACE }
		})
		.collect::<Vec<_>>();

	let (impl_generics, _, _) = generics_for_impl.split_for_impl();
	let (_, type_generics, where_clause) = generics.split_for_impl();

	quote! {
		#[automatically_derived]
		impl #impl_generics ::ser_graph::Serialize for #ident #type_generics #where_clause {
			const RESERVED_SPACE: usize = 0 #(#reserved_sizes)*;

			#[allow(unused_variables)]
			fn serialize(&self, ser: &mut ::ser_graph::Serializer<'_>) -> ::ser_graph::Result<()> {
				#(#field_stmts)*
				Ok(())
			}

			#[allow(unused_variables)]
			fn deserialize(de: &mut ::ser_graph::Deserializer<'_, '_>) -> ::ser_graph::Result<Self> {
				Ok(#construct)
			}
		}
	}
}
