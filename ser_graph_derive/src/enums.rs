use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{DataEnum, Fields, FieldsNamed, FieldsUnnamed, Generics, Ident, LitStr};

use crate::{deserialize_field, serialize_field};

/// Enums are written as `var_u32` variant index, followed by variant's fields.
pub fn derive_enum(
	data: DataEnum,
	ident: &Ident,
	generics: &Generics,
	generics_for_impl: &Generics,
) -> TokenStream {
	let type_name = LitStr::new(&ident.to_string(), ident.span());

	let (serialize_body, deserialize_body) = if data.variants.is_empty() {
		(
			quote! { match *self {} },
			quote! {
				let index = de.reader().read_var_u32()?;
				Err(::ser_graph::Error::InvalidEnumVariant { type_name: #type_name, index })
			},
		)
	} else {
		let mut write_arms = Vec::with_capacity(data.variants.len());
		let mut read_arms = Vec::with_capacity(data.variants.len());
		for (index, variant) in data.variants.iter().enumerate() {
			let index = index as u32;
			let (write_arm, read_arm) = match &variant.fields {
				Fields::Unit => get_arms_for_unit(&variant.ident, index),
				Fields::Unnamed(fields) => get_arms_for_unnamed_fields(&variant.ident, index, fields),
				Fields::Named(fields) => get_arms_for_named_fields(&variant.ident, index, fields),
			};
			write_arms.push(write_arm);
			read_arms.push(read_arm);
		}

		(
			quote! {
				match self {
					#(#write_arms)*
				}
				Ok(())
			},
			quote! {
				match de.reader().read_var_u32()? {
					#(#read_arms)*
					index => Err(::ser_graph::Error::InvalidEnumVariant { type_name: #type_name, index }),
				}
			},
		)
	};

	let (impl_generics, _, _) = generics_for_impl.split_for_impl();
	let (_, type_generics, where_clause) = generics.split_for_impl();

	quote! {
		#[automatically_derived]
		impl #impl_generics ::ser_graph::Serialize for #ident #type_generics #where_clause {
			fn serialize(&self, ser: &mut ::ser_graph::Serializer<'_>) -> ::ser_graph::Result<()> {
				#serialize_body
			}

			fn deserialize(de: &mut ::ser_graph::Deserializer<'_, '_>) -> ::ser_graph::Result<Self> {
				#deserialize_body
			}
		}
	}
}

fn get_arms_for_unit(ident: &Ident, index: u32) -> (TokenStream, TokenStream) {
	(
		quote_spanned! {ident.span()=>
			Self::#ident => {
				ser.writer().write_var_u32(#index);
			}
		},
		quote_spanned! {ident.span()=>
			#index => Ok(Self::#ident),
		},
	)
}

fn get_arms_for_unnamed_fields(
	ident: &Ident,
	index: u32,
	fields: &FieldsUnnamed,
) -> (TokenStream, TokenStream) {
	let fields = &fields.unnamed;
	let field_idents = (0..fields.len())
		.map(|index| Ident::new(&format!("val_{}", index), ident.span()))
		.collect::<Vec<_>>();
	let stmts = std::iter::zip(&field_idents, fields)
		.map(|(alias, field)| serialize_field(quote! {#alias}, field))
		.collect::<Vec<_>>();
	let values = fields.iter().map(deserialize_field).collect::<Vec<_>>();

	(
		quote_spanned! {ident.span()=>
			Self::#ident(#(#field_idents),*) => {
				ser.writer().write_var_u32(#index);
				#(#stmts)*
			}
		},
		quote_spanned! {ident.span()=>
			#index => Ok(Self::#ident(#(#values),*)),
		},
	)
}

fn get_arms_for_named_fields(
	ident: &Ident,
	index: u32,
	fields: &FieldsNamed,
) -> (TokenStream, TokenStream) {
	let fields = &fields.named;
	let field_idents = fields
		.iter()
		.map(|field| field.ident.clone().expect("Missing field name"))
		.collect::<Vec<_>>();

	// Aliases are required in case of a field called `ser`.
	// `Self::Foo {x: val_x} =>` instead of just `Self::Foo {x} =>`.
	let field_aliases = field_idents
		.iter()
		.map(|ident| Ident::new(&format!("val_{}", ident), ident.span()))
		.collect::<Vec<_>>();

	let var_mappings = std::iter::zip(&field_idents, &field_aliases)
		.map(|(ident, alias)| quote! { #ident: #alias })
		.collect::<Vec<_>>();

	let stmts = std::iter::zip(&field_aliases, fields)
		.map(|(alias, field)| serialize_field(quote! {#alias}, field))
		.collect::<Vec<_>>();

	let inits = std::iter::zip(&field_idents, fields)
		.map(|(ident, field)| {
			let value = deserialize_field(field);
			quote! { #ident: #value }
		})
		.collect::<Vec<_>>();

	(
		quote_spanned! {ident.span()=>
			Self::#ident{#(#var_mappings),*} => {
				ser.writer().write_var_u32(#index);
				#(#stmts)*
			}
		},
		quote_spanned! {ident.span()=>
			#index => Ok(Self::#ident{#(#inits),*}),
		},
	)
}
