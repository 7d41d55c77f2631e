use crate::{
    error::ConstructionError,
    path::FieldPath,
    traits::{Entity, PathList, PathRef},
};

///
/// Resolution
///
/// An accessor is any closure from the entity's generated `Fields` type to a
/// path-bearing token. Resolution invokes it against the root accessor set
/// and reads back the accumulated hops, so it is deterministic and repeatable.
///

/// Resolve an accessor into its path.
pub fn resolve<E, P, F>(accessor: F) -> Result<FieldPath, ConstructionError>
where
    E: Entity,
    P: PathRef,
    F: FnOnce(E::Fields) -> P,
{
    let token = accessor(E::fields());
    let path = token.field_path();

    if path.is_root() {
        return Err(ConstructionError::unresolvable_path(
            std::any::type_name::<F>(),
        ));
    }

    Ok(path.clone())
}

/// Resolve an accessor returning one or more paths.
pub fn resolve_all<E, L, F>(accessor: F) -> Result<Vec<FieldPath>, ConstructionError>
where
    E: Entity,
    L: PathList,
    F: FnOnce(E::Fields) -> L,
{
    let tokens = accessor(E::fields());
    let paths = tokens.field_paths();

    if paths.is_empty() || paths.iter().any(|path| path.is_root()) {
        return Err(ConstructionError::unresolvable_path(
            std::any::type_name::<F>(),
        ));
    }

    Ok(paths.into_iter().cloned().collect())
}

/// Full protocol path, hops joined with `/`.
pub fn name_of<E, P, F>(accessor: F) -> Result<String, ConstructionError>
where
    E: Entity,
    P: PathRef,
    F: FnOnce(E::Fields) -> P,
{
    resolve::<E, P, F>(accessor).map(|path| path.to_string())
}

/// Last two hops in nested form, `outer(<keyword>=inner)`.
/// A single-hop accessor yields the bare field name.
pub fn sub_name_of<E, P, F>(accessor: F, keyword: &str) -> Result<String, ConstructionError>
where
    E: Entity,
    P: PathRef,
    F: FnOnce(E::Fields) -> P,
{
    let path = resolve::<E, P, F>(accessor)?;

    Ok(nested_form(&path, keyword))
}

pub(crate) fn nested_form(path: &FieldPath, keyword: &str) -> String {
    let segments: Vec<&str> = path.segments().collect();

    match segments.as_slice() {
        [] => String::new(),
        [single] => (*single).to_string(),
        [.., outer, inner] => format!("{outer}({keyword}={inner})"),
    }
}
