//! Attribute parsing for the Record derive macro.
//!
//! Parses the `#[field(...)]` attributes placed on struct fields.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, Meta, Result, Token,
};

/// The value kind a field is exposed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `#[field(Text)]`: anything that is `AsRef<str>`.
    Text,
    /// `#[field(Number)]`: any `Copy` primitive number.
    Number,
    /// `#[field(Date)]`: any `IntoTimestamp` type.
    Date,
    /// `#[field(Bool)]`
    Bool,
}

impl FieldKind {
    fn parse_name(name: &str, span: proc_macro2::Span) -> Result<Self> {
        match name {
            "Text" | "text" | "String" | "string" => Ok(FieldKind::Text),
            "Number" | "number" => Ok(FieldKind::Number),
            "Date" | "date" | "Timestamp" | "timestamp" => Ok(FieldKind::Date),
            "Bool" | "bool" | "boolean" => Ok(FieldKind::Bool),
            other => Err(Error::new(
                span,
                format!(
                    "unknown field kind: '{}'. Expected one of: Text, Number, Date, Bool",
                    other
                ),
            )),
        }
    }

    pub fn from_ident(ident: &Ident) -> Result<Self> {
        FieldKind::parse_name(&ident.to_string(), ident.span())
    }
}

/// Field-level attributes from `#[field(...)]`.
#[derive(Debug, Clone, Default)]
pub struct FieldAttr {
    pub kind: Option<FieldKind>,
    /// Exclude the field.
    pub skip: bool,
    /// The field is an `Option<_>`; `None` reads as null.
    pub optional: bool,
    /// Name used in specs (default: the Rust field name).
    pub rename: Option<String>,
}

impl Parse for FieldAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if p.is_ident("optional") {
                        attr.optional = true;
                    } else if let Some(ident) = p.get_ident() {
                        attr.kind = Some(FieldKind::from_ident(ident)?);
                    } else {
                        return Err(Error::new(
                            p.span(),
                            "expected field kind: Text, Number, Date, Bool, optional, or skip",
                        ));
                    }
                }

                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    match &nv.value {
                        syn::Expr::Lit(syn::ExprLit {
                            lit: Lit::Str(s), ..
                        }) => attr.rename = Some(s.value()),
                        other => {
                            return Err(Error::new(
                                other.span(),
                                "rename must be a string literal",
                            ))
                        }
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown field attribute. Expected: Text, Number, Date, Bool, optional, skip, or rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract the `#[field(...)]` attribute of a struct field.
pub fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttr> {
    for attr in attrs {
        if attr.path().is_ident("field") {
            return attr.parse_args::<FieldAttr>();
        }
    }
    Ok(FieldAttr::default())
}
