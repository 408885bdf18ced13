//! `#[derive(AnyHash)]`
//!
//! Structs become records: every field is listed in declaration order with
//! its name, its visibility (only a plain `pub` counts as public) and its
//! optional tag. Tuple struct fields are named `"0"`, `"1"`, ...
//!
//! ```ignore
//! #[derive(AnyHash)]
//! #[anyhash(with = "Self::canonical")] // optional custom encoding hook
//! pub struct Entry {
//!     pub name: String,
//!     #[anyhash = "-"]                  // excluded from the digest
//!     pub cached: u64,
//!     secret: String,                   // private, excluded
//! }
//! ```
//!
//! Enums are dynamic wrappers: every variant must be either a unit variant
//! (encoded as its name) or a single-field tuple variant (encoded as its
//! payload).

extern crate proc_macro;

use proc_macro::TokenStream as TokenStream_1;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DataEnum, DeriveInput, Fields, Member};

macro_rules! format_err {
    ($span:expr => $($msg:tt)*) => { syn::Error::new_spanned($span, format!($($msg)*)) };
}

macro_rules! bail {
    ($span:expr => $($msg:tt)*) => { return Err(format_err!($span => $($msg)*)) };
}

#[proc_macro_derive(AnyHash, attributes(anyhash))]
pub fn derive_anyhash(item: TokenStream_1) -> TokenStream_1 {
    let input = syn::parse_macro_input!(item as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(mut input: DeriveInput) -> syn::Result<TokenStream> {
    let container = ContainerAttrs::parse(&input.attrs)?;
    add_trait_bounds(&mut input.generics);

    match &input.data {
        Data::Struct(data) => expand_struct(&input, &data.fields, container),
        Data::Enum(data) => {
            if let Some(path) = &container.with {
                bail!(path => "`with` is only supported on structs");
            }
            expand_enum(&input, data)
        }
        Data::Union(_) => bail!(&input.ident => "AnyHash cannot be derived for unions"),
    }
}

#[derive(Default)]
struct ContainerAttrs {
    /// Custom encoding hook, `fn(&Self) -> Option<Vec<u8>>`.
    with: Option<syn::ExprPath>,
}

impl ContainerAttrs {
    fn parse(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if !attr.path().is_ident("anyhash") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("with") {
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    this.with = Some(lit.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported anyhash attribute, expected `with = \"path\"`"))
                }
            })?;
        }
        Ok(this)
    }
}

/// The tag of a field, from `#[anyhash = "..."]`.
fn field_tag(field: &syn::Field) -> syn::Result<Option<syn::LitStr>> {
    let mut tag = None;
    for attr in &field.attrs {
        if !attr.path().is_ident("anyhash") {
            continue;
        }
        match &attr.meta {
            syn::Meta::NameValue(name_value) => match &name_value.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit),
                    ..
                }) => tag = Some(lit.clone()),
                other => bail!(other => "expected a string tag, e.g. #[anyhash = \"-\"]"),
            },
            other => bail!(other => "expected a field tag of the form #[anyhash = \"...\"]"),
        }
    }
    Ok(tag)
}

fn add_trait_bounds(generics: &mut syn::Generics) {
    for param in &mut generics.params {
        if let syn::GenericParam::Type(type_param) = param {
            type_param.bounds.push(syn::parse_quote!(::anyhash::AnyHash));
        }
    }
}

fn expand_struct(
    input: &DeriveInput,
    fields: &Fields,
    container: ContainerAttrs,
) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut field_exprs = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let (member, field_name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (Member::Unnamed(syn::Index::from(index)), index.to_string()),
        };
        let visibility = match field.vis {
            syn::Visibility::Public(_) => quote!(::anyhash::Visibility::Public),
            _ => quote!(::anyhash::Visibility::Private),
        };
        let tag = match field_tag(field)? {
            Some(tag) => quote!(::core::option::Option::Some(#tag)),
            None => quote!(::core::option::Option::None),
        };

        field_exprs.push(quote! {
            ::anyhash::Field {
                name: #field_name,
                value: &self.#member,
                visibility: #visibility,
                tag: #tag,
            }
        });
    }

    let hook = container.with.map(|path| {
        quote! {
            fn canonical_bytes(&self) -> ::core::option::Option<::std::vec::Vec<u8>> {
                #path(self)
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::anyhash::AnyHash for #name #ty_generics #where_clause {
            fn shape(&self) -> ::anyhash::Shape<'_> {
                ::anyhash::Shape::Record(self)
            }
        }

        impl #impl_generics ::anyhash::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<::anyhash::Field<'_>> {
                ::std::vec![#(#field_exprs),*]
            }

            #hook
        }
    })
}

fn expand_enum(input: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    if data.variants.is_empty() {
        bail!(name => "AnyHash cannot be derived for enums without variants");
    }

    let mut shape_arms = Vec::new();
    let mut zero_arms = Vec::new();
    for variant in &data.variants {
        let ident = &variant.ident;
        match &variant.fields {
            Fields::Unit => {
                let label = ident.unraw().to_string();
                shape_arms.push(quote!(Self::#ident => ::anyhash::Shape::Text(#label)));
                zero_arms.push(quote!(Self::#ident => false));
            }
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                shape_arms.push(quote! {
                    Self::#ident(inner) => ::anyhash::Shape::Dynamic(
                        ::core::option::Option::Some(inner as &dyn ::anyhash::AnyHash)
                    )
                });
                zero_arms.push(quote!(Self::#ident(inner) => ::anyhash::AnyHash::is_zero(inner)));
            }
            _ => bail!(
                variant => "AnyHash enums may only have unit or single-field tuple variants"
            ),
        }
    }

    Ok(quote! {
        impl #impl_generics ::anyhash::AnyHash for #name #ty_generics #where_clause {
            fn shape(&self) -> ::anyhash::Shape<'_> {
                match self {
                    #(#shape_arms,)*
                }
            }

            fn is_zero(&self) -> bool {
                match self {
                    #(#zero_arms,)*
                }
            }
        }
    })
}
