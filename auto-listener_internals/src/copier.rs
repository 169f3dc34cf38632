//! Copies the structure of a source type onto its adapter.

use crate::config::{MARKER_ATTR, NO_EVENT_ATTR};
use crate::description::*;
use crate::errors::{Error, Result};
use crate::model::*;
use crate::utils::*;
use proc_macro2::TokenStream as SynTokenStream;
use quote::*;
use syn::*;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::visit_mut::{self, VisitMut};

struct FindSelf(bool);
impl <'ast> Visit<'ast> for FindSelf {
    fn visit_type_path(&mut self, tp: &'ast TypePath) {
        if tp.qself.is_none() && tp.path.is_ident("Self") {
            self.0 = true;
        }
        visit::visit_type_path(self, tp);
    }
}

/// Returns whether `Self` appears anywhere in a type.
pub fn mentions_self(tp: &Type) -> bool {
    let mut find = FindSelf(false);
    find.visit_type(tp);
    find.0
}

struct FindImplTrait(bool);
impl <'ast> Visit<'ast> for FindImplTrait {
    fn visit_type_impl_trait(&mut self, _: &'ast TypeImplTrait) {
        self.0 = true;
    }
}

/// Replaces `Self` in types with a concrete type.
pub struct ReplaceSelf<'a>(pub &'a Type);
impl <'a> VisitMut for ReplaceSelf<'a> {
    fn visit_type_mut(&mut self, tp: &mut Type) {
        let target = self.0;
        let replacement: Option<Type> = match &*tp {
            Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self") =>
                Some(target.clone()),
            Type::Path(path) if path.qself.is_none() && path.path.segments.len() > 1 &&
                path.path.segments[0].ident == "Self" =>
            {
                let rest = path.path.segments.iter().skip(1);
                Some(parse_quote!(<#target> #(:: #rest)*))
            }
            _ => None,
        };
        match replacement {
            Some(replacement) => *tp = replacement,
            None => visit_mut::visit_type_mut(self, tp),
        }
    }
}

fn is_self_pat(pat: &Pat) -> bool {
    match pat {
        Pat::Ident(pat) => pat.ident == "self",
        _ => false,
    }
}

/// Turns `self: Self`, `self: &Self` or `self: &mut Self` into the shorthand receiver.
fn typed_receiver(typed: &PatType) -> Option<Receiver> {
    let self_token = match &*typed.pat {
        Pat::Ident(pat) => Token![self](pat.ident.span()),
        _ => return None,
    };
    match strip_type(&typed.ty) {
        Type::Reference(rf) if is_self_type(&rf.elem) => Some(Receiver {
            attrs: typed.attrs.clone(),
            reference: Some((rf.and_token, rf.lifetime.clone())),
            mutability: rf.mutability,
            self_token,
        }),
        tp if is_self_type(tp) => Some(Receiver {
            attrs: typed.attrs.clone(),
            reference: None,
            mutability: None,
            self_token,
        }),
        _ => None,
    }
}

/// Renames every parameter of a signature to a plain identifier, and returns the names of the
/// non-receiver parameters in order.
///
/// Destructuring patterns are replaced with `__arg<n>`, and `mut` is dropped. Typed `self`
/// receivers are written in their shorthand form.
pub fn normalize_params(sig: &Signature) -> (Signature, Vec<Ident>) {
    let mut sig = sig.clone();
    let mut args = Vec::new();
    for (i, input) in sig.inputs.iter_mut().enumerate() {
        match input {
            FnArg::Receiver(receiver) => if receiver.reference.is_none() {
                receiver.mutability = None;
            },
            FnArg::Typed(typed) if is_self_pat(&typed.pat) => {
                if let Some(receiver) = typed_receiver(typed) {
                    *input = FnArg::Receiver(receiver);
                }
            }
            FnArg::Typed(typed) => {
                let ident = match &*typed.pat {
                    Pat::Ident(pat) if pat.subpat.is_none() => pat.ident.clone(),
                    _ => ident!("__arg{}", i),
                };
                args.push(ident.clone());
                *typed.pat = Pat::Ident(PatIdent {
                    attrs: Vec::new(),
                    by_ref: None,
                    mutability: None,
                    ident,
                    subpat: None,
                });
            }
        }
    }
    (sig, args)
}

/// Returns explicit generic arguments for a call of `sig`, when they can be given.
pub fn turbofish(sig: &Signature) -> Option<SynTokenStream> {
    let params: Vec<_> = sig.generics.params.iter().filter_map(|x| match x {
        GenericParam::Type(tp) => Some(&tp.ident),
        GenericParam::Const(tp) => Some(&tp.ident),
        GenericParam::Lifetime(_) => None,
    }).collect();
    if params.is_empty() {
        return None;
    }
    // Explicit arguments are rejected when an argument uses `impl Trait`.
    let mut find = FindImplTrait(false);
    for input in &sig.inputs {
        find.visit_fn_arg(input);
    }
    if find.0 {
        None
    } else {
        Some(quote! { ::<#(#params),*> })
    }
}

/// Returns the given attributes without the ones named in `exclude`.
pub fn copy_attributes(attrs: &[Attribute], exclude: &[&str]) -> Vec<Attribute> {
    attrs.iter().filter(|x| !exclude.iter().any(|name| is_attr_named(x, name))).cloned().collect()
}

/// Replaces the first type argument of a `Result` or `Option` type.
fn replace_first_argument(tp: &Type, with: Type) -> Type {
    let mut tp = tp.clone();
    if let Type::Path(path) = &mut tp {
        if let Some(last) = path.path.segments.iter_mut().last() {
            if let PathArguments::AngleBracketed(args) = &mut last.arguments {
                if let Some(first) = args.args.iter_mut().find_map(|x| match x {
                    GenericArgument::Type(tp) => Some(tp),
                    _ => None,
                }) {
                    *first = with;
                }
            }
        }
    }
    tp
}

/// How `Self` can be passed through an argument of a forwarded trait method.
fn arg_pass(ident: Ident, tp: &Type) -> Result<ArgPass> {
    if is_self_type(tp) {
        return Ok(ArgPass::Unwrap(ident));
    }
    if let Type::Reference(rf) = strip_type(tp) {
        if is_self_type(&rf.elem) {
            return Ok(if rf.mutability.is_some() {
                ArgPass::UnwrapMut(ident)
            } else {
                ArgPass::UnwrapRef(ident)
            });
        }
    }
    if mentions_self(tp) {
        error(tp.span(), "`Self` can only be forwarded as `Self`, `&Self` or `&mut Self`.")
    } else {
        Ok(ArgPass::Plain(ident))
    }
}

/// How the return value of a forwarded trait method is wrapped.
fn output_wrap(output: &ReturnType) -> Result<OutputWrap> {
    let tp = match output {
        ReturnType::Default => return Ok(OutputWrap::Plain),
        ReturnType::Type(_, tp) => tp,
    };
    if is_self_type(tp) {
        return Ok(OutputWrap::Wrap);
    }
    if let Type::Path(path) = strip_type(tp) {
        let last = last_path_segment(&path.path);
        if last == "Result" || last == "Option" {
            let args = type_arguments(tp);
            let rest_is_plain = args.iter().skip(1).all(|x| !mentions_self(x));
            if args.first().map(|x| is_self_type(x)).unwrap_or(false) && rest_is_plain {
                return Ok(OutputWrap::WrapFallible);
            }
        }
    }
    if mentions_self(tp) {
        error(
            tp.span(),
            "`Self` can only be returned as `Self`, `Option<Self>` or `Result<Self, E>`.",
        )
    } else {
        Ok(OutputWrap::Plain)
    }
}

/// Copies the structural properties of one source type onto its adapter.
pub struct Copier<'a> {
    source: &'a SourceType,
    adapter: Ident,
}
impl <'a> Copier<'a> {
    pub fn new(source: &'a SourceType) -> Self {
        Copier { source, adapter: source.adapter_name() }
    }

    pub fn adapter_ident(&self) -> &Ident {
        &self.adapter
    }

    /// Attributes of the source type, minus the marker.
    pub fn attributes(&self) -> Vec<Attribute> {
        copy_attributes(&self.source.attrs, &[MARKER_ATTR])
    }

    pub fn generics(&self) -> Generics {
        self.source.generics.clone()
    }

    /// The source type instantiated with the adapter's own generic parameters.
    pub fn delegate_type(&self) -> Type {
        let ident = &self.source.ident;
        let (_, ty_generics, _) = self.source.generics.split_for_impl();
        parse_quote!(#ident #ty_generics)
    }

    /// Turns the self type of one of the source type's impl blocks into the adapter's.
    pub fn adapter_type(&self, self_ty: &Type) -> Result<Type> {
        match strip_type(self_ty) {
            Type::Path(path) if path.qself.is_none() => match path.path.segments.iter().last() {
                Some(last) => {
                    let mut last = last.clone();
                    last.ident = self.adapter.clone();
                    Ok(parse_quote!(#last))
                }
                None => error(self_ty.span(), "Impl block has an empty self type."),
            },
            _ => error(
                self_ty.span(),
                format_args!("Could not find the adapter type of `{}`.", self.source.ident),
            ),
        }
    }

    fn trait_method(&self, method: &ImplItemMethod) -> Result<TraitMethod> {
        let receiver = ReceiverKind::of(&method.sig);
        if receiver == ReceiverKind::Other {
            return error(
                method.sig.span(),
                "Only `self`, `&self` and `&mut self` receivers can be forwarded.",
            );
        }
        let (sig, idents) = normalize_params(&method.sig);
        let params = method.sig.inputs.iter().filter_map(|x| match x {
            FnArg::Typed(typed) => match &*typed.pat {
                Pat::Ident(pat) if pat.ident == "self" => None,
                _ => Some(&*typed.ty),
            },
            FnArg::Receiver(_) => None,
        });

        let mut args = Vec::new();
        let mut errors = Error::empty();
        for (ident, tp) in idents.into_iter().zip(params) {
            match arg_pass(ident, tp) {
                Ok(pass) => args.push(pass),
                Err(e) => errors = errors.combine(e),
            }
        }
        let output = match output_wrap(&method.sig.output) {
            Ok(output) => output,
            Err(e) => return Err(errors.combine(e)),
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TraitMethod {
            attrs: method.attrs.clone(),
            turbofish: turbofish(&sig),
            sig,
            receiver,
            args,
            output,
        })
    }

    /// Forwards a trait impl of the source type to the adapter.
    ///
    /// Returns `None` for impls that must not be copied.
    pub fn trait_block(&self, imp: &TraitImpl) -> Result<Option<TraitBlock>> {
        let name = imp.trait_name();
        if name == "Drop" {
            return Ok(None);
        }
        if name == "EventListener" {
            return error(imp.span(), format_args!(
                "`{}` already implements EventListener; remove #[auto_listener] or the impl.",
                self.source.ident,
            ));
        }

        let item = &imp.item;
        let mut items = Vec::new();
        let mut errors = Error::empty();
        for impl_item in &item.items {
            match impl_item {
                ImplItem::Type(tp) => items.push(TraitItemDesc::Type(tp.clone())),
                ImplItem::Const(c) if mentions_self(&c.ty) => errors = errors.combine(
                    Error::new(c.ty.span(), "Associated constants of type `Self` cannot be forwarded."),
                ),
                ImplItem::Const(c) => items.push(TraitItemDesc::Const {
                    attrs: c.attrs.clone(),
                    ident: c.ident.clone(),
                    ty: c.ty.clone(),
                }),
                ImplItem::Method(method) => match self.trait_method(method) {
                    Ok(method) => items.push(TraitItemDesc::Method(method)),
                    Err(e) => errors = errors.combine(e),
                },
                other => errors = errors.combine(Error::new(
                    other.span(),
                    format_args!("Cannot forward this item of `{}` to the adapter.", name),
                )),
            }
        }
        let self_ty = match self.adapter_type(&item.self_ty) {
            Ok(tp) => tp,
            Err(e) => return Err(errors.combine(e)),
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Some(TraitBlock {
            attrs: item.attrs.clone(),
            unsafety: item.unsafety,
            generics: item.generics.clone(),
            negative: item.trait_.as_ref().and_then(|x| x.0),
            trait_path: imp.trait_path.clone(),
            self_ty,
            delegate_ty: (*item.self_ty).clone(),
            items,
        }))
    }

    /// The supertype of the source type, forwarded to the adapter.
    pub fn supertype(&self) -> Result<Option<TraitBlock>> {
        match &self.source.supertype {
            Some(supertype) => self.trait_block(&supertype.implementation),
            None => Ok(None),
        }
    }

    /// Every interface of the source type, forwarded to the adapter, in declaration order.
    pub fn interfaces(&self) -> Result<Vec<TraitBlock>> {
        let mut blocks = Vec::new();
        let mut errors = Error::empty();
        for imp in &self.source.interfaces {
            match self.trait_block(imp) {
                Ok(Some(block)) => blocks.push(block),
                Ok(None) => { }
                Err(e) => errors = errors.combine(e),
            }
        }
        if errors.is_empty() {
            Ok(blocks)
        } else {
            Err(errors)
        }
    }

    /// Whether the source type visibly implements `Default`, by derive or by an impl block.
    pub fn has_default(&self) -> bool {
        let derived = self.source.attrs.iter()
            .filter(|x| is_attr_named(x, "derive"))
            .filter_map(|x| x.parse_meta().ok())
            .any(|meta| match meta {
                Meta::List(list) => list.nested.iter().any(|x| match x {
                    NestedMeta::Meta(Meta::Path(path)) => last_path_segment(path) == "Default",
                    _ => false,
                }),
                _ => false,
            });
        derived || self.source.interfaces.iter().any(|x| x.trait_name() == "Default")
    }

    fn has_fields(&self) -> bool {
        self.source.members.iter().any(|x| match x {
            SourceMember::Field(_) => true,
            _ => false,
        })
    }

    /// The `new` constructor generated when the source type has no public constructor.
    ///
    /// A type without fields is built with a struct literal, anything else with `Default`.
    pub fn default_constructor(&self) -> ConstructorDesc {
        let generic = !self.source.generics.params.is_empty();
        let method: ImplItemMethod = if generic {
            let delegate = self.delegate_type();
            parse_quote!(pub fn new() -> Self where #delegate: ::core::default::Default { })
        } else {
            parse_quote!(pub fn new() -> Self { })
        };
        let body = if !generic && !self.has_fields() {
            ConstructorBody::Empty
        } else {
            ConstructorBody::Default
        };
        ConstructorDesc {
            attrs: Vec::new(),
            vis: method.vis,
            sig: method.sig,
            body,
        }
    }

    fn forward_constructor(&self, ctor: &MethodMember) -> Result<ConstructorDesc> {
        let shape = match ReturnShape::of(&ctor.sig.output, &self.source.ident) {
            Some(shape) => shape,
            None => return error(ctor.span(), "Not a constructor."),
        };
        let delegate = &self.source.blocks[ctor.block].self_ty;
        let (mut sig, args) = normalize_params(&ctor.sig);
        ReplaceSelf(delegate).visit_signature_mut(&mut sig);
        let output = match (&ctor.sig.output, shape) {
            (ReturnType::Type(arrow, _), ReturnShape::Plain) =>
                ReturnType::Type(*arrow, Box::new(parse_quote!(Self))),
            (ReturnType::Type(arrow, tp), ReturnShape::Fallible) =>
                ReturnType::Type(*arrow, Box::new(replace_first_argument(tp, parse_quote!(Self)))),
            (ReturnType::Default, _) => return error(ctor.span(), "Not a constructor."),
        };
        sig.output = output;
        Ok(ConstructorDesc {
            attrs: copy_attributes(&ctor.attrs, &[NO_EVENT_ATTR]),
            vis: ctor.vis.clone(),
            sig,
            body: ConstructorBody::Forward { target: ctor.sig.ident.clone(), args, shape },
        })
    }

    /// The adapter's constructors, each paired with the index of the source impl block that
    /// declares the constructor it forwards to.
    ///
    /// A type without public constructors gets a `new` constructor with no block.
    pub fn constructors(&self) -> Result<Vec<(Option<usize>, ConstructorDesc)>> {
        let public = self.source.public_constructors();
        if public.is_empty() {
            return Ok(vec![(None, self.default_constructor())]);
        }
        let mut ctors = Vec::new();
        let mut errors = Error::empty();
        for ctor in public {
            match self.forward_constructor(ctor) {
                Ok(desc) => ctors.push((Some(ctor.block), desc)),
                Err(e) => errors = errors.combine(e),
            }
        }
        if errors.is_empty() {
            Ok(ctors)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::diagnostics::Diagnostics;
    use crate::syn_model::SynTypeModel;

    fn with_source<R>(file: File, f: impl FnOnce(&Copier) -> R) -> R {
        let mut diags = Diagnostics::new();
        let model = SynTypeModel::new(&Config::default(), Vec::new(), &file.items, &mut diags);
        assert!(diags.is_empty(), "{:?}", diags);
        f(&Copier::new(&model.source_types()[0]))
    }

    fn tokens(t: impl ToTokens) -> String {
        t.into_token_stream().to_string()
    }

    #[test]
    fn marker_is_dropped_from_attributes() {
        with_source(parse_quote! {
            /// Docs.
            #[auto_listener(name = "Handler")]
            #[derive(Debug)]
            pub struct Bot<T: Clone> { inner: T }
        }, |copier| {
            let attrs = copier.attributes();
            assert_eq!(attrs.len(), 2);
            assert!(attrs.iter().all(|x| !is_attr_named(x, MARKER_ATTR)));
            assert_eq!(copier.adapter_ident(), "Handler");
            assert_eq!(tokens(copier.delegate_type()), tokens(quote!(Bot<T>)));
            assert_eq!(tokens(copier.generics()), tokens(quote!(<T: Clone>)));
        });
    }

    #[test]
    fn missing_constructors_become_new() {
        let ctors = with_source(parse_quote! {
            #[auto_listener]
            pub struct Bot<T> { inner: T }
            impl<T> Bot<T> {
                fn hidden() -> Self { unimplemented!() }
            }
        }, |copier| copier.constructors().unwrap());
        assert_eq!(ctors.len(), 1);
        assert!(ctors[0].0.is_none());
        assert_eq!(ctors[0].1.sig.ident, "new");
        assert!(matches!(ctors[0].1.body, ConstructorBody::Default));
        assert!(tokens(&ctors[0].1.sig).contains("Default"));
    }

    #[test]
    fn default_constructor_bodies() {
        let unit = with_source(parse_quote! {
            #[auto_listener]
            pub struct Bot;
        }, |copier| (copier.default_constructor(), copier.has_default()));
        assert!(matches!(unit.0.body, ConstructorBody::Empty));
        assert!(!unit.1);

        let derived = with_source(parse_quote! {
            #[auto_listener]
            #[derive(Clone, Default)]
            pub struct Bot { token: String }
        }, |copier| (copier.default_constructor(), copier.has_default()));
        assert!(matches!(derived.0.body, ConstructorBody::Default));
        assert!(derived.1);

        let implemented = with_source(parse_quote! {
            #[auto_listener]
            pub struct Bot { token: String }
            impl Default for Bot {
                fn default() -> Self { Bot { token: String::new() } }
            }
        }, |copier| copier.has_default());
        assert!(implemented);

        let missing = with_source(parse_quote! {
            #[auto_listener]
            #[derive(Clone)]
            pub struct Bot { token: String }
        }, |copier| copier.has_default());
        assert!(!missing);
    }

    #[test]
    fn constructors_keep_their_shape() {
        let ctors = with_source(parse_quote! {
            #[auto_listener]
            pub struct Bot { token: String }
            impl Bot {
                /// Creates a bot.
                pub fn new(mut token: String) -> Bot { Bot { token } }
                pub fn load((a, b): (u32, u32), path: &str) -> io::Result<Self> { todo!() }
                pub fn copy_of(other: &Self) -> Option<Bot> { None }
            }
        }, |copier| copier.constructors().unwrap());
        assert_eq!(ctors.len(), 3);

        let (block, new) = &ctors[0];
        assert_eq!(*block, Some(0));
        assert_eq!(new.attrs.len(), 1);
        assert_eq!(tokens(&new.sig), tokens(quote!(fn new(token: String) -> Self)));

        let load = &ctors[1].1;
        assert_eq!(
            tokens(&load.sig),
            tokens(quote!(fn load(__arg0: (u32, u32), path: &str) -> io::Result<Self>)),
        );
        match &load.body {
            ConstructorBody::Forward { target, args, shape } => {
                assert_eq!(target, "load");
                assert_eq!(args.len(), 2);
                assert_eq!(*shape, ReturnShape::Fallible);
            }
            _ => panic!("expected a forwarding constructor"),
        }

        let copy_of = &ctors[2].1;
        assert_eq!(tokens(&copy_of.param_types()[0]), tokens(quote!(&Bot)));
        assert_eq!(tokens(&copy_of.sig.output), tokens(quote!(-> Option<Self>)));
    }

    #[test]
    fn trait_impls_are_forwarded() {
        let blocks = with_source(parse_quote! {
            #[auto_listener]
            pub struct Bot<T> { inner: T }
            impl<T: Clone> Clone for Bot<T> {
                fn clone(&self) -> Self { Bot { inner: self.inner.clone() } }
            }
            impl<T> PartialEq for Bot<T> {
                fn eq(&self, other: &Self) -> bool { true }
            }
            impl<T> Iterator for Bot<T> {
                type Item = u32;
                fn next(&mut self) -> Option<Self::Item> { None }
            }
            impl<T> Drop for Bot<T> {
                fn drop(&mut self) { }
            }
        }, |copier| copier.interfaces().unwrap());
        assert_eq!(blocks.len(), 3);
        assert_eq!(tokens(&blocks[0].self_ty), tokens(quote!(BotListener<T>)));
        assert_eq!(tokens(&blocks[0].delegate_ty), tokens(quote!(Bot<T>)));
        match &blocks[0].items[0] {
            TraitItemDesc::Method(method) => {
                assert_eq!(method.receiver, ReceiverKind::Ref);
                assert_eq!(method.output, OutputWrap::Wrap);
            }
            _ => panic!("expected a method"),
        }
        match &blocks[1].items[0] {
            TraitItemDesc::Method(method) => {
                assert_eq!(method.args, vec![ArgPass::UnwrapRef(ident!("other"))]);
                assert_eq!(method.output, OutputWrap::Plain);
            }
            _ => panic!("expected a method"),
        }
        assert!(matches!(blocks[2].items[0], TraitItemDesc::Type(_)));
        match &blocks[2].items[1] {
            TraitItemDesc::Method(method) => assert_eq!(method.output, OutputWrap::Plain),
            _ => panic!("expected a method"),
        }
    }

    #[test]
    fn unsupported_trait_impls_are_errors() {
        let result = with_source(parse_quote! {
            #[auto_listener]
            pub struct Bot;
            impl EventListener for Bot {
                fn on_event(&mut self, event: &dyn Event) { }
            }
        }, |copier| copier.interfaces().map(|x| x.len()));
        assert!(result.unwrap_err().to_string().contains("EventListener"));

        let result = with_source(parse_quote! {
            #[auto_listener]
            pub struct Bot;
            impl Merge for Bot {
                fn merge(&self, all: Vec<Self>) { }
                fn boxed(self: Box<Self>) { }
            }
        }, |copier| copier.interfaces().map(|x| x.len()));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("`Self` can only be forwarded"));
        assert!(message.contains("receivers"));
    }

    #[test]
    fn self_is_replaced() {
        let method: ImplItemMethod =
            parse_quote!(fn a(&self, x: Self, y: Self::Item) -> Vec<Self> { });
        let mut sig = method.sig;
        let delegate: Type = parse_quote!(Bot<T>);
        ReplaceSelf(&delegate).visit_signature_mut(&mut sig);
        assert_eq!(
            tokens(&sig),
            tokens(quote!(fn a(&self, x: Bot<T>, y: <Bot<T> >::Item) -> Vec<Bot<T> >)),
        );
    }

    #[test]
    fn turbofish_is_skipped_for_impl_trait() {
        let method: ImplItemMethod = parse_quote!(fn a<'a, T, const N: usize>(x: &'a T) {});
        assert_eq!(
            turbofish(&method.sig).unwrap().to_string(),
            quote!(::<T, N>).to_string(),
        );
        let method: ImplItemMethod = parse_quote!(fn a<T>(x: impl Into<T>) {});
        assert!(turbofish(&method.sig).is_none());
        let method: ImplItemMethod = parse_quote!(fn a<'a>(x: &'a str) {});
        assert!(turbofish(&method.sig).is_none());
    }
}
