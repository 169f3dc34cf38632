//! A read-only view of the structure of a source type, and the facade used to query it.

use crate::catalog::EventClass;
use crate::config::ListenerAttrs;
use crate::utils::*;
use proc_macro2::Span;
use syn::*;
use syn::spanned::Spanned;

/// How a function takes `self`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReceiverKind {
    /// No receiver; an associated function.
    None,
    /// `&self`
    Ref,
    /// `&mut self`
    RefMut,
    /// `self`
    Value,
    /// Any other receiver type, such as `self: Box<Self>`.
    Other,
}
impl ReceiverKind {
    pub fn of(sig: &Signature) -> ReceiverKind {
        match sig.inputs.first() {
            Some(FnArg::Receiver(receiver)) => match (&receiver.reference, &receiver.mutability) {
                (Some(_), Some(_)) => ReceiverKind::RefMut,
                (Some(_), None) => ReceiverKind::Ref,
                (None, _) => ReceiverKind::Value,
            },
            Some(FnArg::Typed(typed)) => match &*typed.pat {
                Pat::Ident(pat) if pat.ident == "self" => match strip_type(&typed.ty) {
                    Type::Reference(rf) if is_self_type(&rf.elem) =>
                        if rf.mutability.is_some() { ReceiverKind::RefMut } else { ReceiverKind::Ref },
                    tp if is_self_type(tp) => ReceiverKind::Value,
                    _ => ReceiverKind::Other,
                },
                _ => ReceiverKind::None,
            },
            None => ReceiverKind::None,
        }
    }
}

/// The shape of the value returned by a constructor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReturnShape {
    /// Returns the constructed type directly.
    Plain,
    /// Returns the constructed type inside a `Result` or `Option`.
    Fallible,
}
impl ReturnShape {
    /// Determines whether a return type is the type itself or a `Result`/`Option` of it.
    pub fn of(output: &ReturnType, self_ident: &Ident) -> Option<ReturnShape> {
        let tp = match output {
            ReturnType::Default => return None,
            ReturnType::Type(_, tp) => tp,
        };
        if names_type(tp, self_ident) {
            return Some(ReturnShape::Plain);
        }
        if let Type::Path(path) = strip_type(tp) {
            let last = last_path_segment(&path.path);
            if last == "Result" || last == "Option" {
                if let Some(first) = type_arguments(tp).first() {
                    if names_type(first, self_ident) {
                        return Some(ReturnShape::Fallible);
                    }
                }
            }
        }
        None
    }
}

/// Returns whether a type is `Self` or a path naming `ident`.
pub fn names_type(tp: &Type, ident: &Ident) -> bool {
    match strip_type(tp) {
        Type::Path(path) if path.qself.is_none() =>
            path.path.is_ident("Self") || path.path.segments.iter().last()
                .map(|x| &x.ident == ident).unwrap_or(false),
        _ => false,
    }
}

/// An inherent `impl` block of a source type.
#[derive(Clone, Debug)]
pub struct ImplBlock {
    pub attrs: Vec<Attribute>,
    pub generics: Generics,
    pub self_ty: Type,
    pub span: Span,
}

/// A field of a source type.
#[derive(Clone, Debug)]
pub struct FieldMember {
    pub ident: Option<Ident>,
    pub vis: Visibility,
    pub ty: Type,
}

/// A method or constructor of a source type.
#[derive(Clone, Debug)]
pub struct MethodMember {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub sig: Signature,
    /// Index of the enclosing block in [`SourceType::blocks`].
    pub block: usize,
}
impl MethodMember {
    pub fn receiver(&self) -> ReceiverKind {
        ReceiverKind::of(&self.sig)
    }

    /// Arguments of the method, excluding the receiver.
    pub fn params(&self) -> Vec<&PatType> {
        self.sig.inputs.iter().filter_map(|x| match x {
            FnArg::Typed(typed) => match &*typed.pat {
                Pat::Ident(pat) if pat.ident == "self" => None,
                _ => Some(typed),
            },
            FnArg::Receiver(_) => None,
        }).collect()
    }

    /// Whether the function can be called from outside the type's module.
    pub fn is_public(&self) -> bool {
        match &self.vis {
            Visibility::Inherited => false,
            Visibility::Restricted(restricted) => !restricted.path.is_ident("self"),
            _ => true,
        }
    }

    /// Whether the function is declared `pub` with no restriction.
    pub fn vis_is_pub(&self) -> bool {
        match self.vis {
            Visibility::Public(_) => true,
            _ => false,
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|x| is_attr_named(x, name))
    }

    pub fn span(&self) -> Span {
        self.sig.ident.span()
    }
}

/// A member of a source type.
#[derive(Clone, Debug)]
pub enum SourceMember {
    Field(FieldMember),
    Method(MethodMember),
    Constructor(MethodMember),
}
impl SourceMember {
    /// Sorts an associated function of `ident` into a method or a constructor.
    pub fn from_fn(ident: &Ident, method: MethodMember) -> SourceMember {
        let is_ctor = method.receiver() == ReceiverKind::None &&
            ReturnShape::of(&method.sig.output, ident).is_some();
        if is_ctor {
            SourceMember::Constructor(method)
        } else {
            SourceMember::Method(method)
        }
    }
}

/// A trait implemented by a source type.
#[derive(Clone, Debug)]
pub struct TraitImpl {
    pub item: ItemImpl,
    pub trait_path: Path,
}
impl TraitImpl {
    pub fn new(item: ItemImpl) -> Option<TraitImpl> {
        let trait_path = item.trait_.as_ref()?.1.clone();
        Some(TraitImpl { item, trait_path })
    }

    pub fn trait_name(&self) -> String {
        last_path_segment(&self.trait_path)
    }

    pub fn span(&self) -> Span {
        self.item.span()
    }
}

/// The closest Rust equivalent of a supertype: a `Deref` impl and its target.
#[derive(Clone, Debug)]
pub struct Supertype {
    pub target: Type,
    pub implementation: TraitImpl,
}

/// A type marked with `#[auto_listener]`.
#[derive(Clone, Debug)]
pub struct SourceType {
    pub ident: Ident,
    pub vis: Visibility,
    /// Every attribute of the struct, including the marker.
    pub attrs: Vec<Attribute>,
    pub generics: Generics,
    pub marker: ListenerAttrs,
    /// Path of the declaring module relative to the processed root.
    pub module_path: Vec<String>,
    pub members: Vec<SourceMember>,
    pub blocks: Vec<ImplBlock>,
    pub supertype: Option<Supertype>,
    pub interfaces: Vec<TraitImpl>,
    pub span: Span,
}
impl SourceType {
    /// The name of the type including the module path.
    pub fn qualified_name(&self) -> String {
        let mut path = self.module_path.clone();
        path.push(self.ident.to_string());
        path.join("::")
    }

    pub fn adapter_name(&self) -> Ident {
        self.marker.adapter_name(&self.ident)
    }

    /// Constructors that are visible outside the type, in declaration order.
    pub fn public_constructors(&self) -> Vec<&MethodMember> {
        self.members.iter().filter_map(|x| match x {
            SourceMember::Constructor(ctor) if ctor.vis_is_pub() => Some(ctor),
            _ => None,
        }).collect()
    }

    /// Returns whether `block` covers every instantiation of this type, using the same
    /// parameter names as the struct declaration.
    pub fn is_canonical_block(&self, block: &ImplBlock) -> bool {
        let args = match strip_type(&block.self_ty) {
            Type::Path(path) => match path.path.segments.iter().last().map(|x| &x.arguments) {
                Some(PathArguments::AngleBracketed(args)) => args.args.iter().collect(),
                _ => Vec::new(),
            },
            _ => return false,
        };
        if args.len() != self.generics.params.len() {
            return false;
        }
        args.iter().zip(self.generics.params.iter()).all(|(arg, param)| match (arg, param) {
            (GenericArgument::Lifetime(lt), GenericParam::Lifetime(param)) =>
                lt.ident == param.lifetime.ident,
            (GenericArgument::Type(Type::Path(tp)), GenericParam::Type(param)) =>
                tp.qself.is_none() && tp.path.is_ident(&param.ident),
            (GenericArgument::Type(Type::Path(tp)), GenericParam::Const(param)) =>
                tp.qself.is_none() && tp.path.is_ident(&param.ident),
            (GenericArgument::Const(Expr::Path(expr)), GenericParam::Const(param)) =>
                expr.qself.is_none() && expr.path.is_ident(&param.ident),
            _ => false,
        })
    }
}

/// A type reference resolved to its declaring module and simple name.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ResolvedType {
    pub package: String,
    pub name: String,
}
impl ResolvedType {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        ResolvedType { package: package.into(), name: name.into() }
    }

    /// Splits a qualified path into a package and a simple name.
    pub fn from_qualified(path: &str) -> Self {
        match path.rfind("::") {
            Some(i) => ResolvedType::new(&path[..i], &path[i + 2..]),
            None => ResolvedType::new("", path),
        }
    }

    pub fn qualified(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.package, self.name)
        }
    }

    /// Whether this type is declared in `namespace` or one of its submodules.
    pub fn is_in(&self, namespace: &str) -> bool {
        self.package == namespace || self.package.starts_with(&format!("{}::", namespace))
    }
}

/// An event type accepted by a handler method.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EventType {
    pub resolved: ResolvedType,
    pub class: EventClass,
}
impl EventType {
    /// The canonical path of the event, used as the dispatch table key.
    pub fn key(&self) -> String {
        self.resolved.qualified()
    }
}

/// The queries the engine needs from the semantic model of a module.
///
/// Every query must be free of side effects.
pub trait TypeModel {
    /// Types in the model marked for adapter generation, in declaration order.
    fn source_types(&self) -> &[SourceType];

    /// Resolves a type reference (a path or a `dyn` trait object) to its declaring module.
    fn resolve(&self, ty: &Type) -> Option<ResolvedType>;

    /// Returns whether `sub` is `sup` or a subtype of it.
    fn is_subtype(&self, sub: &ResolvedType, sup: &ResolvedType) -> bool;

    /// Looks up a qualified name in the event namespace.
    fn lookup_event(&self, qualified: &str) -> Option<EventClass>;

    /// The root of every event type.
    fn event_root(&self) -> ResolvedType;

    /// The one namespace allowed to declare event types.
    fn event_namespace(&self) -> String;
}
