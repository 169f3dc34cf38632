//! Builds the complete description of an adapter from a classified source type.

use crate::classify::{Classifier, Role};
use crate::config::{Config, DELEGATE_FIELD, NO_EVENT_ATTR};
use crate::copier::*;
use crate::description::*;
use crate::diagnostics::Diagnostics;
use crate::dispatch::DispatchTable;
use crate::errors::{Error, Result};
use crate::model::*;
use crate::utils::*;
use syn::*;
use syn::visit_mut::VisitMut;

fn forward_method(source: &SourceType, method: &MethodMember) -> Result<ForwardedMethod> {
    match method.receiver() {
        ReceiverKind::Ref | ReceiverKind::RefMut | ReceiverKind::Value => { }
        _ => return error(method.span(), format_args!(
            "Cannot forward `{}`: only `self`, `&self` and `&mut self` receivers are supported.",
            method.sig.ident,
        )),
    }
    let delegate = &source.blocks[method.block].self_ty;
    let (mut sig, args) = normalize_params(&method.sig);
    ReplaceSelf(delegate).visit_signature_mut(&mut sig);
    Ok(ForwardedMethod {
        attrs: copy_attributes(&method.attrs, &[NO_EVENT_ATTR]),
        vis: method.vis.clone(),
        turbofish: turbofish(&sig),
        sig,
        args,
        returns_value: !returns_unit(&method.sig.output),
    })
}

/// Assembles adapter descriptions for the source types of one type model.
pub struct Assembler<'a, M: TypeModel + ?Sized> {
    model: &'a M,
    config: &'a Config,
}
impl <'a, M: TypeModel + ?Sized> Assembler<'a, M> {
    pub fn new(model: &'a M, config: &'a Config) -> Self {
        Assembler { model, config }
    }

    /// Assembles the adapter of `source`.
    ///
    /// Problems with single members are reported to `diags` and leave the member out. Problems
    /// with the structure of the type are returned as an error, and no adapter is produced.
    pub fn assemble(
        &self, source: &SourceType, diags: &mut Diagnostics,
    ) -> Result<AdapterDescription> {
        let copier = Copier::new(source);
        let classifier = Classifier::new(self.model, source);

        let mut table = DispatchTable::new();
        let mut forwarded = Vec::new();
        for member in &source.members {
            match classifier.classify(member, diags) {
                Role::EventHandler(event) => if let SourceMember::Method(method) = member {
                    table.add(event, method.clone());
                },
                Role::Forwarded => if let SourceMember::Method(method) = member {
                    forwarded.push(method);
                },
                Role::Ignored => { }
            }
        }

        let mut errors = Error::empty();
        let mut methods = Vec::new();
        for method in forwarded {
            match forward_method(source, method) {
                Ok(desc) => methods.push((method.block, desc)),
                Err(e) => errors = errors.combine(e),
            }
        }
        let ctors = match copier.constructors() {
            Ok(ctors) => {
                let needs_default = ctors.iter()
                    .any(|x| matches!(x.1.body, ConstructorBody::Default));
                if needs_default && !copier.has_default() {
                    diags.warning(source.span, format!(
                        "`{0}` has no public constructors, so `{1}::new` builds it with \
                         `Default::default()`, but `{0}` does not derive or implement `Default`. \
                         Add a public constructor or implement `Default` for `{0}`.",
                        source.ident, copier.adapter_ident(),
                    ));
                }
                ctors
            }
            Err(e) => {
                errors = errors.combine(e);
                Vec::new()
            }
        };
        let supertype = match copier.supertype() {
            Ok(supertype) => supertype,
            Err(e) => {
                errors = errors.combine(e);
                None
            }
        };
        let interfaces = match copier.interfaces() {
            Ok(interfaces) => interfaces,
            Err(e) => {
                errors = errors.combine(e);
                Vec::new()
            }
        };

        let adapter = copier.adapter_ident();
        let mut blocks = Vec::new();
        let default_ctors: Vec<_> = ctors.iter()
            .filter(|x| x.0.is_none())
            .map(|x| x.1.clone())
            .collect();
        if !default_ctors.is_empty() {
            let (_, ty_generics, _) = source.generics.split_for_impl();
            blocks.push(InherentBlock {
                attrs: Vec::new(),
                generics: copier.generics(),
                self_ty: parse_quote!(#adapter #ty_generics),
                delegate_ty: copier.delegate_type(),
                constructors: default_ctors,
                methods: Vec::new(),
            });
        }
        for (i, block) in source.blocks.iter().enumerate() {
            let constructors: Vec<_> = ctors.iter()
                .filter(|x| x.0 == Some(i))
                .map(|x| x.1.clone())
                .collect();
            let block_methods: Vec<_> = methods.iter()
                .filter(|x| x.0 == i)
                .map(|x| x.1.clone())
                .collect();
            if constructors.is_empty() && block_methods.is_empty() {
                continue;
            }
            match copier.adapter_type(&block.self_ty) {
                Ok(self_ty) => blocks.push(InherentBlock {
                    attrs: block.attrs.clone(),
                    generics: block.generics.clone(),
                    self_ty,
                    delegate_ty: block.self_ty.clone(),
                    constructors,
                    methods: block_methods,
                }),
                Err(e) => errors = errors.combine(e),
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut dispatch_generics = copier.generics();
        let mut branches = Vec::new();
        for entry in table.entries() {
            for handler in &entry.handlers {
                let block = &source.blocks[handler.block];
                dispatch_generics = add_bounds(&dispatch_generics, &block.generics);
            }
            branches.push(Branch {
                event: entry.event.clone(),
                handlers: entry.handlers.iter().map(|x| x.sig.ident.clone()).collect(),
            });
        }

        Ok(AdapterDescription {
            ident: adapter.clone(),
            source: source.ident.clone(),
            vis: source.vis.clone(),
            attrs: copier.attributes(),
            generics: copier.generics(),
            delegate: DelegateField { ident: ident!("{}", DELEGATE_FIELD), ty: copier.delegate_type() },
            blocks,
            supertype,
            interfaces,
            dispatch: DispatchMethod { generics: dispatch_generics, branches },
            crate_path: self.config.crate_path(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syn_model::SynTypeModel;
    use quote::*;

    fn assemble(file: File) -> (Result<AdapterDescription>, Diagnostics) {
        let config = Config::default();
        let mut diags = Diagnostics::new();
        let model = SynTypeModel::new(&config, Vec::new(), &file.items, &mut diags);
        let result = Assembler::new(&model, &config).assemble(&model.source_types()[0], &mut diags);
        (result, diags)
    }

    fn tokens(t: impl ToTokens) -> String {
        t.into_token_stream().to_string()
    }

    #[test]
    fn handlers_and_forwarded_methods() {
        let (adapter, diags) = assemble(parse_quote! {
            use auto_listener::events::*;

            #[auto_listener]
            #[derive(Default)]
            pub struct Counter { count: u32 }

            impl Counter {
                pub fn on_ready(&mut self, e: &ReadyEvent) { self.count += 1; }
                pub fn on_message(&mut self, e: &dyn GenericMessageEvent) { }
                pub fn also_on_ready(&self, e: &ReadyEvent) { }
                pub fn count(&self) -> u32 { self.count }
                pub fn reset(&mut self, #[allow(unused_mut)] mut to: u32) { self.count = to; }
                #[no_event]
                pub fn replay(&self, e: &ReadyEvent) { }
            }
        });
        assert!(diags.is_empty());
        let adapter = adapter.unwrap();
        assert_eq!(adapter.ident, "CounterListener");
        assert_eq!(adapter.delegate.ident, "instance");

        let branches = &adapter.dispatch.branches;
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].event.resolved.name, "ReadyEvent");
        assert_eq!(branches[0].handlers, vec![ident!("on_ready"), ident!("also_on_ready")]);
        assert_eq!(branches[1].event.resolved.name, "GenericMessageEvent");

        let methods: Vec<_> = adapter.forwarded_methods().iter()
            .map(|x| x.sig.ident.to_string())
            .collect();
        assert_eq!(methods, vec!["count", "reset", "replay"]);
        let replay = adapter.forwarded_methods()[2];
        assert!(replay.attrs.is_empty());
        let reset = adapter.forwarded_methods()[1];
        assert_eq!(tokens(&reset.sig), tokens(quote!(fn reset(&mut self, #[allow(unused_mut)] to: u32))));

        let ctors = adapter.constructors();
        assert_eq!(ctors.len(), 1);
        assert!(matches!(ctors[0].body, ConstructorBody::Default));
        assert_eq!(adapter.attrs.len(), 1);
    }

    #[test]
    fn forwarded_self_becomes_the_delegate() {
        let (adapter, _) = assemble(parse_quote! {
            #[auto_listener]
            pub struct Bot<T> { inner: T }

            impl<T: Clone> Bot<T> {
                pub fn new(inner: T) -> Self { Bot { inner } }
                pub fn fork(&self) -> Self { Bot { inner: self.inner.clone() } }
                pub fn merge(self: &mut Self, other: Self) { }
            }
        });
        let adapter = adapter.unwrap();
        assert_eq!(adapter.blocks.len(), 1);
        let block = &adapter.blocks[0];
        assert_eq!(tokens(&block.self_ty), tokens(quote!(BotListener<T>)));
        assert_eq!(block.constructors.len(), 1);
        assert_eq!(tokens(&block.methods[0].sig), tokens(quote!(fn fork(&self) -> Bot<T>)));
        assert!(block.methods[0].returns_value);
        assert_eq!(
            tokens(&block.methods[1].sig),
            tokens(quote!(fn merge(&mut self, other: Bot<T>))),
        );
        assert!(!block.methods[1].returns_value);
    }

    #[test]
    fn dispatch_carries_handler_bounds() {
        let (adapter, _) = assemble(parse_quote! {
            use auto_listener::events::*;

            #[auto_listener]
            pub struct Store<T> { items: Vec<T> }

            impl<T: Clone + Send> Store<T> {
                pub fn on_ready(&self, e: &ReadyEvent) { }
            }
        });
        let adapter = adapter.unwrap();
        let (_, _, where_clause) = adapter.dispatch.generics.split_for_impl();
        assert_eq!(tokens(where_clause), tokens(quote!(where T: Clone + Send)));
    }

    #[test]
    fn structural_errors_abort_the_type() {
        let (adapter, diags) = assemble(parse_quote! {
            use auto_listener::events::*;

            #[auto_listener]
            pub struct Bot;

            impl Bot {
                pub fn on_typo(&self, e: &auto_listener::events::NoSuchEvent) { }
                pub fn boxed(self: Box<Self>) { }
            }
        });
        assert_eq!(diags.errors().count(), 1);
        assert!(adapter.unwrap_err().to_string().contains("boxed"));
    }

    #[test]
    fn missing_default_is_reported() {
        let (adapter, diags) = assemble(parse_quote! {
            #[auto_listener]
            pub struct Bot { token: String }
        });
        assert!(adapter.is_ok());
        assert_eq!(diags.warnings().count(), 1);
        assert!(diags.iter().next().unwrap().message.contains("`Default`"));

        let (_, diags) = assemble(parse_quote! {
            #[auto_listener]
            pub struct Quiet;
        });
        assert!(diags.is_empty());
    }
}
