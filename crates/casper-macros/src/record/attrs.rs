//! Attribute parsing for the Record derive macro.
//!
//! Parses the `#[record(...)]` field attributes.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[record(...)]`.
#[derive(Debug, Clone, Default)]
pub struct RecordAttr {
    /// Exclude this field from queries.
    pub skip: bool,
    /// Custom field name for queries (default: field name).
    pub rename: Option<String>,
}

impl Parse for RecordAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RecordAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => {
                    attr.skip = true;
                }

                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        let name = s.value();
                        if !is_identifier(&name) {
                            return Err(Error::new(
                                s.span(),
                                "rename must be a non-empty identifier (letters, digits, '_')",
                            ));
                        }
                        attr.rename = Some(name);
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown record attribute. Expected: skip or rename = \"...\"",
                    ));
                }
            }
        }

        if attr.skip && attr.rename.is_some() {
            return Err(Error::new(
                input.span(),
                "skip and rename cannot be combined",
            ));
        }

        Ok(attr)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Extract `#[record(...)]` attributes from a field's attributes.
pub fn parse_record_attrs(attrs: &[Attribute]) -> Result<RecordAttr> {
    for attr in attrs {
        if attr.path().is_ident("record") {
            return attr.parse_args::<RecordAttr>();
        }
    }
    Ok(RecordAttr::default())
}
