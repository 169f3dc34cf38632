//! A [`TypeModel`] built from the items of one module.

use crate::catalog::{self, EventClass, ROOT_EVENT};
use crate::config::{Config, ListenerAttrs, MARKER_ATTR};
use crate::diagnostics::Diagnostics;
use crate::model::*;
use crate::utils::*;
use std::collections::{HashMap, HashSet};
use syn::*;
use syn::spanned::Spanned;

fn impl_names_type(item: &ItemImpl, ident: &Ident) -> bool {
    match strip_type(&item.self_ty) {
        Type::Path(path) if path.qself.is_none() =>
            path.path.segments.iter().last().map(|x| &x.ident == ident).unwrap_or(false),
        _ => false,
    }
}

fn deref_target(item: &ItemImpl) -> Option<Type> {
    item.items.iter().find_map(|x| match x {
        ImplItem::Type(tp) if tp.ident == "Target" => Some(tp.ty.clone()),
        _ => None,
    })
}

/// The type model of one module, answering queries with the module's `use` declarations.
pub struct SynTypeModel {
    config: Config,
    module_path: Vec<String>,
    imports: HashMap<String, String>,
    globs: Vec<String>,
    locals: HashSet<String>,
    local_events: HashSet<String>,
    sources: Vec<SourceType>,
}
impl SynTypeModel {
    /// Scans the items of a module. Malformed markers are reported to `diags` and the types
    /// carrying them are skipped.
    pub fn new(
        config: &Config, module_path: Vec<String>, items: &[Item], diags: &mut Diagnostics,
    ) -> SynTypeModel {
        let mut model = SynTypeModel {
            config: config.clone(),
            module_path,
            imports: HashMap::new(),
            globs: Vec::new(),
            locals: HashSet::new(),
            local_events: HashSet::new(),
            sources: Vec::new(),
        };
        for item in items {
            match item {
                Item::Use(item) => model.add_use(Vec::new(), &item.tree),
                Item::Struct(item) => { model.locals.insert(item.ident.to_string()); }
                Item::Enum(item) => { model.locals.insert(item.ident.to_string()); }
                Item::Union(item) => { model.locals.insert(item.ident.to_string()); }
                Item::Trait(item) => { model.locals.insert(item.ident.to_string()); }
                Item::Type(item) => { model.locals.insert(item.ident.to_string()); }
                _ => { }
            }
        }
        for item in items {
            if let Item::Impl(item) = item {
                model.add_event_impl(item);
            }
        }
        for item in items {
            model.add_source(item, items, diags);
        }
        model
    }

    fn add_use(&mut self, mut prefix: Vec<String>, tree: &UseTree) {
        match tree {
            UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.add_use(prefix, &path.tree);
            }
            UseTree::Name(name) => {
                let name = name.ident.to_string();
                if name == "self" {
                    if let Some(last) = prefix.last().cloned() {
                        let full = self.absolute(&prefix);
                        self.imports.insert(last, full);
                    }
                } else {
                    prefix.push(name.clone());
                    let full = self.absolute(&prefix);
                    self.imports.insert(name, full);
                }
            }
            UseTree::Rename(rename) => {
                if rename.ident != "self" {
                    prefix.push(rename.ident.to_string());
                }
                let full = self.absolute(&prefix);
                self.imports.insert(rename.rename.to_string(), full);
            }
            UseTree::Glob(_) => {
                let full = self.absolute(&prefix);
                self.globs.push(full);
            }
            UseTree::Group(group) => for tree in &group.items {
                self.add_use(prefix.clone(), tree);
            },
        }
    }

    /// Turns the segments of a path as written into a canonical path.
    fn absolute(&self, segments: &[String]) -> String {
        let mut out: Vec<String> = Vec::new();
        match segments.first().map(|x| x.as_str()) {
            Some("self") => {
                out.extend(self.module_path.iter().cloned());
                out.extend(segments[1..].iter().cloned());
            }
            Some(first) if segments.len() > 1 && self.imports.contains_key(first) => {
                out.push(self.imports[first].clone());
                out.extend(segments[1..].iter().cloned());
            }
            _ => out.extend(segments.iter().cloned()),
        }
        self.config.canonicalize(&out.join("::"))
    }

    fn resolve_segments(&self, segments: &[String], leading_colon: bool) -> Option<ResolvedType> {
        let first = segments.first()?;
        if first == "Self" {
            return None;
        }
        if leading_colon {
            return Some(ResolvedType::from_qualified(&self.config.canonicalize(&segments.join("::"))));
        }
        if let Some(import) = self.imports.get(first) {
            let mut path = vec![import.clone()];
            path.extend(segments[1..].iter().cloned());
            return Some(ResolvedType::from_qualified(&self.config.canonicalize(&path.join("::"))));
        }
        let crate_glob = self.globs.iter().any(|x| x == self.config.crate_name());
        if segments.len() == 1 {
            if self.locals.contains(first) {
                return Some(ResolvedType::new(self.module_path.join("::"), first.clone()));
            }
            let namespace = self.config.event_namespace();
            if self.globs.iter().any(|x| x == &namespace) && catalog::find(first).is_some() {
                return Some(ResolvedType::new(namespace, first.clone()));
            }
            if crate_glob && first == ROOT_EVENT {
                return Some(self.root());
            }
            return None;
        }
        if crate_glob && self.config.is_crate_module(first) {
            let mut path = vec![self.config.crate_name().to_string()];
            path.extend(segments.iter().cloned());
            return Some(ResolvedType::from_qualified(&self.config.canonicalize(&path.join("::"))));
        }
        Some(ResolvedType::from_qualified(&self.absolute(segments)))
    }

    fn resolve_path(&self, path: &Path) -> Option<ResolvedType> {
        let segments: Vec<_> = path.segments.iter().map(|x| x.ident.to_string()).collect();
        self.resolve_segments(&segments, path.leading_colon.is_some())
    }

    fn add_event_impl(&mut self, item: &ItemImpl) {
        let trait_path = match &item.trait_ {
            Some((None, path, _)) => path,
            _ => return,
        };
        let local = match strip_type(&item.self_ty) {
            Type::Path(path) if path.qself.is_none() && path.path.segments.len() == 1 =>
                path.path.segments[0].ident.to_string(),
            _ => return,
        };
        if !self.locals.contains(&local) {
            return;
        }
        if let Some(resolved) = self.resolve_path(trait_path) {
            let is_event = resolved.package == self.config.event_namespace() &&
                catalog::find(&resolved.name).map(|x| x.is_trait()).unwrap_or(false);
            if is_event {
                self.local_events.insert(local);
            }
        }
    }

    fn add_source(&mut self, item: &Item, items: &[Item], diags: &mut Diagnostics) {
        let (attrs, span) = match item {
            Item::Struct(item) => (&item.attrs, item.ident.span()),
            Item::Enum(item) => (&item.attrs, item.ident.span()),
            Item::Union(item) => (&item.attrs, item.ident.span()),
            Item::Fn(item) => (&item.attrs, item.sig.ident.span()),
            Item::Trait(item) => (&item.attrs, item.ident.span()),
            Item::Impl(item) => (&item.attrs, item.self_ty.span()),
            _ => return,
        };
        let marker = match attrs.iter().find(|x| is_attr_named(x, MARKER_ATTR)) {
            Some(marker) => marker,
            None => return,
        };
        let item = match item {
            Item::Struct(item) => item,
            _ => {
                diags.error(span, "#[auto_listener] can only be applied to structs.");
                return
            }
        };
        let marker = match ListenerAttrs::from_attr(marker) {
            Ok(marker) => marker,
            Err(e) => {
                diags.error(marker.span(), e.to_string());
                return
            }
        };

        let ident = &item.ident;
        let mut members = Vec::new();
        for field in &item.fields {
            members.push(SourceMember::Field(FieldMember {
                ident: field.ident.clone(),
                vis: field.vis.clone(),
                ty: field.ty.clone(),
            }));
        }

        let mut blocks = Vec::new();
        let mut supertype = None;
        let mut interfaces = Vec::new();
        for impl_item in items {
            let impl_item = match impl_item {
                Item::Impl(impl_item) if impl_names_type(impl_item, ident) => impl_item,
                _ => continue,
            };
            if impl_item.trait_.is_some() {
                if let Some(implementation) = TraitImpl::new(impl_item.clone()) {
                    match deref_target(impl_item) {
                        Some(target) if implementation.trait_name() == "Deref" =>
                            supertype = Some(Supertype { target, implementation }),
                        _ => interfaces.push(implementation),
                    }
                }
                continue;
            }

            let block = blocks.len();
            blocks.push(ImplBlock {
                attrs: impl_item.attrs.clone(),
                generics: impl_item.generics.clone(),
                self_ty: (*impl_item.self_ty).clone(),
                span: impl_item.self_ty.span(),
            });
            for member in &impl_item.items {
                if let ImplItem::Method(method) = member {
                    members.push(SourceMember::from_fn(ident, MethodMember {
                        attrs: method.attrs.clone(),
                        vis: method.vis.clone(),
                        sig: method.sig.clone(),
                        block,
                    }));
                }
            }
        }

        self.sources.push(SourceType {
            ident: ident.clone(),
            vis: item.vis.clone(),
            attrs: item.attrs.clone(),
            generics: item.generics.clone(),
            marker,
            module_path: self.module_path.clone(),
            members,
            blocks,
            supertype,
            interfaces,
            span,
        });
    }

    fn root(&self) -> ResolvedType {
        ResolvedType::new(self.config.event_namespace(), ROOT_EVENT)
    }
}

impl TypeModel for SynTypeModel {
    fn source_types(&self) -> &[SourceType] {
        &self.sources
    }

    fn resolve(&self, ty: &Type) -> Option<ResolvedType> {
        match strip_type(ty) {
            Type::Path(path) if path.qself.is_none() => self.resolve_path(&path.path),
            Type::TraitObject(object) => object.bounds.iter().find_map(|x| match x {
                TypeParamBound::Trait(bound) => self.resolve_path(&bound.path),
                _ => None,
            }),
            _ => None,
        }
    }

    fn is_subtype(&self, sub: &ResolvedType, sup: &ResolvedType) -> bool {
        if sub == sup {
            return true;
        }
        let namespace = self.config.event_namespace();
        let root = self.root();
        if sub.package == namespace {
            if sup == &root {
                return true;
            }
            return sup.package == namespace && catalog::extends(&sub.name, &sup.name);
        }
        let is_local = sub.package == self.module_path.join("::");
        is_local && self.local_events.contains(&sub.name) && sup == &root
    }

    fn lookup_event(&self, qualified: &str) -> Option<EventClass> {
        let resolved = ResolvedType::from_qualified(qualified);
        if resolved.package != self.config.event_namespace() {
            return None;
        }
        catalog::find(&resolved.name).copied()
    }

    fn event_root(&self) -> ResolvedType {
        self.root()
    }

    fn event_namespace(&self) -> String {
        self.config.event_namespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(file: File) -> (SynTypeModel, Diagnostics) {
        let mut diags = Diagnostics::new();
        let model = SynTypeModel::new(
            &Config::default(), vec!["handlers".to_string()], &file.items, &mut diags,
        );
        (model, diags)
    }

    fn resolve(model: &SynTypeModel, ty: Type) -> Option<String> {
        model.resolve(&ty).map(|x| x.qualified())
    }

    #[test]
    fn resolves_through_imports() {
        let (model, _) = model(parse_quote! {
            use auto_listener::events::{ReadyEvent, MessageReceivedEvent as Received};
            use auto_listener::events;
            use auto_listener::prelude::*;
            struct Local;
        });
        assert_eq!(
            resolve(&model, parse_quote!(ReadyEvent)).unwrap(),
            "auto_listener::events::ReadyEvent",
        );
        assert_eq!(
            resolve(&model, parse_quote!(Received)).unwrap(),
            "auto_listener::events::MessageReceivedEvent",
        );
        assert_eq!(
            resolve(&model, parse_quote!(events::ShutdownEvent)).unwrap(),
            "auto_listener::events::ShutdownEvent",
        );
        assert_eq!(
            resolve(&model, parse_quote!(GuildJoinEvent)).unwrap(),
            "auto_listener::events::GuildJoinEvent",
        );
        assert_eq!(
            resolve(&model, parse_quote!(dyn GenericMessageEvent)).unwrap(),
            "auto_listener::events::GenericMessageEvent",
        );
        assert_eq!(resolve(&model, parse_quote!(Local)).unwrap(), "handlers::Local");
        assert_eq!(
            resolve(&model, parse_quote!(::auto_listener::Event)).unwrap(),
            "auto_listener::events::Event",
        );
        assert!(resolve(&model, parse_quote!(String)).is_none());
    }

    #[test]
    fn subtypes() {
        let (model, _) = model(parse_quote! {
            use auto_listener::events::*;
            #[derive(Debug)]
            struct CustomEvent;
            impl Event for CustomEvent { }
            struct NotAnEvent;
        });
        let root = model.event_root();
        let tp = |name: &str| ResolvedType::from_qualified(name);
        assert!(model.is_subtype(&tp("auto_listener::events::ReadyEvent"), &root));
        assert!(model.is_subtype(&root, &root));
        assert!(model.is_subtype(
            &tp("auto_listener::events::MessageDeleteEvent"),
            &tp("auto_listener::events::GenericMessageEvent"),
        ));
        assert!(model.is_subtype(&tp("handlers::CustomEvent"), &root));
        assert!(!model.is_subtype(&tp("handlers::NotAnEvent"), &root));
        assert!(model.lookup_event("auto_listener::events::ReadyEvent").is_some());
        assert!(model.lookup_event("auto_listener::events::NoSuchEvent").is_none());
        assert!(model.lookup_event("handlers::CustomEvent").is_none());
    }

    #[test]
    fn collects_members_and_traits() {
        let (model, diags) = model(parse_quote! {
            #[auto_listener(name = "Handler")]
            #[derive(Default)]
            pub struct Bot { token: String }

            impl Bot {
                pub fn new(token: String) -> Self { Bot { token } }
                pub fn on_ready(&self, e: &ReadyEvent) { }
                fn secret(&self) { }
            }

            impl std::ops::Deref for Bot {
                type Target = String;
                fn deref(&self) -> &String { &self.token }
            }

            impl std::fmt::Display for Bot {
                fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result { Ok(()) }
            }

            #[auto_listener]
            enum NotAStruct { }
        });
        assert_eq!(diags.errors().count(), 1);
        let sources = model.source_types();
        assert_eq!(sources.len(), 1);
        let bot = &sources[0];
        assert_eq!(bot.adapter_name(), "Handler");
        assert_eq!(bot.qualified_name(), "handlers::Bot");
        assert_eq!(bot.members.len(), 4);
        assert!(matches!(bot.members[0], SourceMember::Field(_)));
        assert!(matches!(bot.members[1], SourceMember::Constructor(_)));
        assert!(matches!(bot.members[2], SourceMember::Method(_)));
        assert_eq!(bot.public_constructors().len(), 1);
        assert!(bot.supertype.is_some());
        assert_eq!(bot.interfaces.len(), 1);
        assert_eq!(bot.interfaces[0].trait_name(), "Display");
    }
}
