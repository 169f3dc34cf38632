use crate::errors::{Error, Result};
use proc_macro2::{Span, TokenStream as SynTokenStream};
use std::fmt::Display;
use syn::*;
use quote::*;

/// Creates an identifier with a format-like syntax.
#[macro_export]
macro_rules! ident {
    ($($tts:tt)*) => {
        ::syn::Ident::new(&format!($($tts)*), ::proc_macro2::Span::call_site())
    }
}

/// Helper function for emitting compile errors.
pub fn error<T>(span: Span, message: impl Display) -> Result<T> {
    Err(Error::new(span, &message.to_string()))
}

/// Helper function for matching the last element of a path.
pub fn last_path_segment(path: &Path) -> String {
    path.segments.iter().last().map(|x| x.ident.to_string()).unwrap_or_default()
}

/// Returns whether an attribute's path ends in `name`.
pub fn is_attr_named(attr: &Attribute, name: &str) -> bool {
    last_path_segment(&attr.path) == name
}

/// Removes any parenthesis or invisible groups surrounding a type.
pub fn strip_type(tp: &Type) -> &Type {
    match tp {
        Type::Paren(paren) => strip_type(&paren.elem),
        Type::Group(group) => strip_type(&group.elem),
        _ => tp,
    }
}

/// Returns whether a type is `()`.
pub fn is_unit_type(tp: &Type) -> bool {
    match strip_type(tp) {
        Type::Tuple(tuple) => tuple.elems.is_empty(),
        _ => false,
    }
}

/// Returns whether a function returns no value.
pub fn returns_unit(output: &ReturnType) -> bool {
    match output {
        ReturnType::Default => true,
        ReturnType::Type(_, tp) => is_unit_type(tp),
    }
}

/// Returns whether a type is exactly `Self`.
pub fn is_self_type(tp: &Type) -> bool {
    match strip_type(tp) {
        Type::Path(path) => path.qself.is_none() && path.path.is_ident("Self"),
        _ => false,
    }
}

/// Returns the type arguments of the last path segment of a type.
pub fn type_arguments(tp: &Type) -> Vec<&Type> {
    match strip_type(tp) {
        Type::Path(path) => match path.path.segments.iter().last().map(|x| &x.arguments) {
            Some(PathArguments::AngleBracketed(args)) => args.args.iter().filter_map(|x| match x {
                GenericArgument::Type(tp) => Some(tp),
                _ => None,
            }).collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Adds the bounds of `extra` as where predicates on `base`.
///
/// Both generics must name their parameters identically.
pub fn add_bounds(base: &Generics, extra: &Generics) -> Generics {
    let mut out = base.clone();
    let mut predicates = Vec::<WherePredicate>::new();
    for param in &extra.params {
        match param {
            GenericParam::Type(tp) if !tp.bounds.is_empty() => {
                let ident = &tp.ident;
                let bounds = &tp.bounds;
                predicates.push(parse_quote!(#ident: #bounds));
            }
            GenericParam::Lifetime(lt) if !lt.bounds.is_empty() => {
                let lifetime = &lt.lifetime;
                let bounds = &lt.bounds;
                predicates.push(parse_quote!(#lifetime: #bounds));
            }
            _ => { }
        }
    }
    if let Some(where_clause) = &extra.where_clause {
        predicates.extend(where_clause.predicates.iter().cloned());
    }
    if !predicates.is_empty() {
        let where_clause = out.make_where_clause();
        for predicate in predicates {
            if !where_clause.predicates.iter().any(|x| x == &predicate) {
                where_clause.predicates.push(predicate);
            }
        }
    }
    out
}

/// Converts a `CamelCase` identifier into `snake_case`. A run of capitals is one word, so
/// `HTTPBot` becomes `http_bot`.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::new();
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let prev = if i == 0 { None } else { Some(chars[i - 1]) };
            let next = chars.get(i + 1);
            let starts_word = match prev {
                None | Some('_') => false,
                Some(prev) => !prev.is_uppercase() ||
                    next.map(|x| x.is_lowercase()).unwrap_or(false),
            };
            if starts_word {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Creates a token stream that names a path given as a string, e.g. `::auto_listener`.
pub fn path_tokens(path: &str) -> SynTokenStream {
    let mut toks = SynTokenStream::new();
    for segment in path.split("::").filter(|x| !x.is_empty()) {
        let segment = Ident::new(segment, Span::call_site());
        if segment == "crate" || segment == "self" || segment == "super" {
            if toks.is_empty() {
                toks.extend(quote! { #segment });
                continue;
            }
        }
        toks.extend(quote! { :: #segment });
    }
    toks
}
