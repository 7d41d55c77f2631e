use proc_macro::TokenStream;

mod entity;
mod util;

/// Derive `odata_query::traits::Entity` and a `<Name>Fields` accessor type.
///
/// Struct attributes:
/// - `#[odata(entity_set = "Customers")]` resource path, defaults to the
///   struct name
/// - `#[odata(rename_all = "PascalCase" | "camelCase" | "snake_case")]`
///
/// Field attributes:
/// - `#[odata(rename = "...")]`
/// - `#[odata(skip)]`
/// - `#[odata(nested)]` on an entity-typed field (or `Option` / `Box` /
///   `Vec` of one) for multi-hop and collection accessors
#[proc_macro_derive(Entity, attributes(odata))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive_entity(input.into()).into()
}
