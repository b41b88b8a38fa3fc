//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates an implementation of `tabview::Record` and one field-name
//! constant per exposed field.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Ident, Result};

use super::attrs::{parse_field_attrs, FieldKind};

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_arms: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        // Fields without a kind are not exposed
        let Some(kind) = attrs.kind else {
            continue;
        };

        let spec_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&spec_name));

        field_constants.push(quote! {
            /// Field name for filter, search and sort specs.
            pub const #const_name: &'static str = #spec_name;
        });

        let value_expr = if attrs.optional {
            optional_value_expr(kind, field_name)
        } else {
            value_expr(kind, field_name)
        };

        field_arms.push(quote! {
            #spec_name => #value_expr,
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::tabview::Record for #struct_name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::tabview::Value<'_> {
                match field {
                    #(#field_arms)*
                    _ => ::tabview::Value::Null,
                }
            }
        }
    };

    Ok(expanded)
}

fn value_expr(kind: FieldKind, field: &Ident) -> TokenStream {
    match kind {
        FieldKind::Text => quote! {
            ::tabview::Value::text(::core::convert::AsRef::<str>::as_ref(&self.#field))
        },
        FieldKind::Number => quote! {
            ::tabview::Value::Number(::tabview::Number::from(self.#field))
        },
        FieldKind::Date => quote! {
            ::tabview::Value::Date(::tabview::IntoTimestamp::to_timestamp(&self.#field))
        },
        FieldKind::Bool => quote! {
            ::tabview::Value::Bool(self.#field)
        },
    }
}

fn optional_value_expr(kind: FieldKind, field: &Ident) -> TokenStream {
    match kind {
        FieldKind::Text => quote! {
            match &self.#field {
                ::core::option::Option::Some(v) => {
                    ::tabview::Value::text(::core::convert::AsRef::<str>::as_ref(v))
                }
                ::core::option::Option::None => ::tabview::Value::Null,
            }
        },
        FieldKind::Number => quote! {
            match self.#field {
                ::core::option::Option::Some(v) => {
                    ::tabview::Value::Number(::tabview::Number::from(v))
                }
                ::core::option::Option::None => ::tabview::Value::Null,
            }
        },
        FieldKind::Date => quote! {
            match &self.#field {
                ::core::option::Option::Some(v) => {
                    ::tabview::Value::Date(::tabview::IntoTimestamp::to_timestamp(v))
                }
                ::core::option::Option::None => ::tabview::Value::Null,
            }
        },
        FieldKind::Bool => quote! {
            match self.#field {
                ::core::option::Option::Some(v) => ::tabview::Value::Bool(v),
                ::core::option::Option::None => ::tabview::Value::Null,
            }
        },
    }
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == '.' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("title"), "TITLE");
        assert_eq!(to_screaming_snake_case("enrolled_at"), "ENROLLED_AT");
        assert_eq!(to_screaming_snake_case("enrolledAt"), "ENROLLED_AT");
        assert_eq!(to_screaming_snake_case("course-id"), "COURSE_ID");
        assert_eq!(to_screaming_snake_case("author.name"), "AUTHOR_NAME");
    }

    #[test]
    fn test_rejects_tuple_struct() {
        let input: DeriveInput = syn::parse_str("struct Pair(u32, u32);").unwrap();
        let err = record_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn test_rejects_enum() {
        let input: DeriveInput = syn::parse_str("enum Role { Admin, Student }").unwrap();
        let err = record_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));
    }

    #[test]
    fn test_generates_constants_and_arms() {
        let input: DeriveInput = syn::parse_str(
            r#"
            struct Course {
                #[field(Text)]
                title: String,
                #[field(Number, rename = "price_cents")]
                price: u32,
                #[field(skip)]
                secret: String,
                internal: u8,
            }
            "#,
        )
        .unwrap();
        let tokens = record_derive_impl(input).unwrap().to_string();
        assert!(tokens.contains("TITLE"));
        assert!(tokens.contains("PRICE_CENTS"));
        assert!(tokens.contains("\"price_cents\""));
        assert!(!tokens.contains("SECRET"));
        assert!(!tokens.contains("INTERNAL"));
    }
}
