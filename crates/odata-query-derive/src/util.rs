use syn::{GenericArgument, PathArguments, Type};

/// Last path segment ident of `ty` equals `ident`, e.g. `Option` for
/// `std::option::Option<T>`.
pub fn is_path_ident(ty: &Type, ident: &str) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };

    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == ident)
}

/// First generic type argument of the last path segment, e.g. `T` for
/// `Vec<T>`.
pub fn first_type_arg(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };

    let segment = path.path.segments.last()?;
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

/// Strip any `Option<..>` / `Box<..>` layers.
pub fn strip_wrappers(mut ty: &Type) -> &Type {
    while is_path_ident(ty, "Option") || is_path_ident(ty, "Box") {
        match first_type_arg(ty) {
            Some(inner) => ty = inner,
            None => break,
        }
    }

    ty
}
