use crate::util::{first_type_arg, is_path_ident, strip_wrappers};
use convert_case::{Case, Casing};
use darling::{FromDeriveInput, FromField, ast::Data, util::Ignored};
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{DeriveInput, Error, Generics, Ident, Type, Visibility, ext::IdentExt};

///
/// EntityInput
///

#[derive(FromDeriveInput)]
#[darling(attributes(odata), supports(struct_named))]
struct EntityInput {
    ident: Ident,
    vis: Visibility,
    generics: Generics,
    data: Data<Ignored, EntityField>,

    #[darling(default)]
    entity_set: Option<String>,

    #[darling(default)]
    rename_all: Option<String>,
}

///
/// EntityField
///

#[derive(FromField)]
#[darling(attributes(odata))]
struct EntityField {
    ident: Option<Ident>,
    ty: Type,

    #[darling(default)]
    rename: Option<String>,

    #[darling(default)]
    skip: bool,

    #[darling(default)]
    nested: bool,
}

///
/// RenameRule
///

#[derive(Clone, Copy)]
enum RenameRule {
    Pascal,
    Camel,
    Snake,
}

impl RenameRule {
    fn parse(value: &str) -> Result<Self, Error> {
        match value {
            "PascalCase" => Ok(Self::Pascal),
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            other => Err(Error::new(
                Span::call_site(),
                format!(
                    "unsupported rename_all '{other}', expected PascalCase, camelCase or snake_case"
                ),
            )),
        }
    }

    fn apply(self, name: &str) -> String {
        match self {
            Self::Pascal => name.to_case(Case::Pascal),
            Self::Camel => name.to_case(Case::Camel),
            Self::Snake => name.to_case(Case::Snake),
        }
    }
}

///
/// Accessor
///
/// What a generated accessor method returns.
///

enum Accessor<'a> {
    Leaf,
    Nested(&'a Type),
    Collection(&'a Type),
}

// derive_entity
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let entity = match EntityInput::from_derive_input(&input) {
        Ok(entity) => entity,
        Err(err) => return err.write_errors(),
    };

    match expand(&entity) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(entity: &EntityInput) -> Result<TokenStream, Error> {
    if !entity.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &entity.generics,
            "Entity cannot be derived for generic structs",
        ));
    }

    let rule = entity
        .rename_all
        .as_deref()
        .map(RenameRule::parse)
        .transpose()?;

    let ident = &entity.ident;
    let vis = &entity.vis;
    let fields_ident = format_ident!("{}Fields", ident);
    let entity_set = entity
        .entity_set
        .clone()
        .unwrap_or_else(|| ident.unraw().to_string());

    let fields = match &entity.data {
        Data::Struct(fields) => &fields.fields,
        Data::Enum(_) => {
            return Err(Error::new_spanned(
                ident,
                "Entity can only be derived for structs with named fields",
            ));
        }
    };

    let methods = fields
        .iter()
        .filter(|field| !field.skip)
        .map(|field| accessor_method(field, rule))
        .collect::<Result<Vec<_>, _>>()?;

    let doc = format!("Typed field paths of [`{ident}`].");

    Ok(quote! {
        #[doc = #doc]
        #[derive(Clone, Debug)]
        #vis struct #fields_ident(::odata_query::path::FieldPath);

        impl ::odata_query::traits::Entity for #ident {
            type Fields = #fields_ident;

            const ENTITY_SET: &'static str = #entity_set;
        }

        impl ::odata_query::traits::PathRef for #fields_ident {
            fn field_path(&self) -> &::odata_query::path::FieldPath {
                &self.0
            }
        }

        impl ::odata_query::traits::PathList for #fields_ident {
            fn field_paths(&self) -> Vec<&::odata_query::path::FieldPath> {
                vec![&self.0]
            }
        }

        impl ::odata_query::traits::FieldSet for #fields_ident {
            fn at(path: ::odata_query::path::FieldPath) -> Self {
                Self(path)
            }
        }

        impl #fields_ident {
            #(#methods)*
        }
    })
}

fn accessor_method(field: &EntityField, rule: Option<RenameRule>) -> Result<TokenStream, Error> {
    let Some(ident) = &field.ident else {
        return Err(Error::new(
            Span::call_site(),
            "Entity can only be derived for structs with named fields",
        ));
    };

    let name = field_name(ident, field.rename.as_deref(), rule);
    let doc = format!("Path to `{name}`.");

    let body = match classify(field)? {
        Accessor::Leaf => quote! {
            pub fn #ident(&self) -> ::odata_query::path::Field {
                ::odata_query::path::Field::new(self.0.child(#name))
            }
        },
        Accessor::Nested(ty) => quote! {
            pub fn #ident(&self) -> <#ty as ::odata_query::traits::Entity>::Fields {
                <<#ty as ::odata_query::traits::Entity>::Fields as ::odata_query::traits::FieldSet>::at(
                    self.0.child(#name),
                )
            }
        },
        Accessor::Collection(ty) => quote! {
            pub fn #ident(&self) -> ::odata_query::path::Collection<#ty> {
                ::odata_query::path::Collection::new(self.0.child(#name))
            }
        },
    };

    Ok(quote! {
        #[doc = #doc]
        #[must_use]
        #body
    })
}

fn classify(field: &EntityField) -> Result<Accessor<'_>, Error> {
    if !field.nested {
        return Ok(Accessor::Leaf);
    }

    let ty = strip_wrappers(&field.ty);
    if !is_path_ident(ty, "Vec") {
        return Ok(Accessor::Nested(ty));
    }

    match first_type_arg(ty) {
        Some(element) => Ok(Accessor::Collection(strip_wrappers(element))),
        None => Err(Error::new_spanned(
            &field.ty,
            "nested collection must name its element type",
        )),
    }
}

fn field_name(ident: &Ident, rename: Option<&str>, rule: Option<RenameRule>) -> String {
    if let Some(rename) = rename {
        return rename.to_string();
    }

    let name = ident.unraw().to_string();
    match rule {
        Some(rule) => rule.apply(&name),
        None => name,
    }
}
