//! Renders adapter descriptions into Rust code.

use crate::config::DELEGATE_FIELD;
use crate::copier::turbofish;
use crate::description::*;
use crate::utils::*;
use proc_macro2::TokenStream as SynTokenStream;
use quote::*;
use std::path::PathBuf;
use syn::*;

fn delegate_field() -> Ident {
    ident!("{}", DELEGATE_FIELD)
}

fn await_token(sig: &Signature) -> SynTokenStream {
    if sig.asyncness.is_some() {
        quote! { .await }
    } else {
        quote! { }
    }
}

fn constructor_tokens(ctor: &ConstructorDesc, delegate_ty: &Type) -> SynTokenStream {
    let field = delegate_field();
    let attrs = &ctor.attrs;
    let vis = &ctor.vis;
    let sig = &ctor.sig;
    let body = match &ctor.body {
        ConstructorBody::Default => quote! {
            Self { #field: ::core::default::Default::default() }
        },
        ConstructorBody::Empty => quote! {
            Self { #field: #delegate_ty {} }
        },
        ConstructorBody::Forward { target, args, shape } => {
            let turbofish = turbofish(sig);
            let await_token = await_token(sig);
            let call = quote! { <#delegate_ty>::#target #turbofish (#(#args),*) #await_token };
            match shape {
                crate::model::ReturnShape::Plain => quote! { Self { #field: #call } },
                crate::model::ReturnShape::Fallible => quote! {
                    #call.map(|#field| Self { #field })
                },
            }
        }
    };
    quote! {
        #(#attrs)*
        #vis #sig {
            #body
        }
    }
}

impl ToTokens for ForwardedMethod {
    fn to_tokens(&self, tokens: &mut SynTokenStream) {
        let field = delegate_field();
        let attrs = &self.attrs;
        let vis = &self.vis;
        let sig = &self.sig;
        let name = &sig.ident;
        let turbofish = &self.turbofish;
        let args = &self.args;
        let await_token = await_token(sig);
        let call = quote! { self.#field.#name #turbofish (#(#args),*) #await_token };
        let body = if self.returns_value {
            call
        } else {
            quote! { #call; }
        };
        tokens.extend(quote! {
            #(#attrs)*
            #vis #sig {
                #body
            }
        });
    }
}

impl ToTokens for InherentBlock {
    fn to_tokens(&self, tokens: &mut SynTokenStream) {
        let attrs = &self.attrs;
        let (impl_generics, _, where_clause) = self.generics.split_for_impl();
        let self_ty = &self.self_ty;
        let ctors = self.constructors.iter().map(|x| constructor_tokens(x, &self.delegate_ty));
        let methods = &self.methods;
        tokens.extend(quote! {
            #(#attrs)*
            impl #impl_generics #self_ty #where_clause {
                #(#ctors)*
                #(#methods)*
            }
        });
    }
}

impl ToTokens for ArgPass {
    fn to_tokens(&self, tokens: &mut SynTokenStream) {
        let field = delegate_field();
        tokens.extend(match self {
            ArgPass::Plain(ident) => quote! { #ident },
            ArgPass::Unwrap(ident) => quote! { #ident.#field },
            ArgPass::UnwrapRef(ident) => quote! { &#ident.#field },
            ArgPass::UnwrapMut(ident) => quote! { &mut #ident.#field },
        });
    }
}

fn trait_method_tokens(block: &TraitBlock, method: &TraitMethod) -> SynTokenStream {
    let field = delegate_field();
    let delegate_ty = &block.delegate_ty;
    let trait_path = &block.trait_path;
    let attrs = &method.attrs;
    let sig = &method.sig;
    let name = &sig.ident;
    let turbofish = &method.turbofish;
    let receiver = match method.receiver {
        crate::model::ReceiverKind::Ref => Some(quote! { &self.#field }),
        crate::model::ReceiverKind::RefMut => Some(quote! { &mut self.#field }),
        crate::model::ReceiverKind::Value => Some(quote! { self.#field }),
        _ => None,
    };
    let args = receiver.iter().cloned().chain(method.args.iter().map(|x| x.to_token_stream()));
    let await_token = await_token(sig);
    let call = quote! {
        <#delegate_ty as #trait_path>::#name #turbofish (#(#args),*) #await_token
    };
    let body = match method.output {
        OutputWrap::Plain => call,
        OutputWrap::Wrap => quote! { Self { #field: #call } },
        OutputWrap::WrapFallible => quote! { #call.map(|#field| Self { #field }) },
    };
    quote! {
        #(#attrs)*
        #sig {
            #body
        }
    }
}

impl ToTokens for TraitBlock {
    fn to_tokens(&self, tokens: &mut SynTokenStream) {
        let attrs = &self.attrs;
        let unsafety = &self.unsafety;
        let (impl_generics, _, where_clause) = self.generics.split_for_impl();
        let negative = &self.negative;
        let trait_path = &self.trait_path;
        let self_ty = &self.self_ty;
        let delegate_ty = &self.delegate_ty;
        let items = self.items.iter().map(|item| match item {
            TraitItemDesc::Type(tp) => tp.to_token_stream(),
            TraitItemDesc::Const { attrs, ident, ty } => quote! {
                #(#attrs)*
                const #ident: #ty = <#delegate_ty as #trait_path>::#ident;
            },
            TraitItemDesc::Method(method) => trait_method_tokens(self, method),
        });
        tokens.extend(quote! {
            #(#attrs)*
            #[automatically_derived]
            #unsafety impl #impl_generics #negative #trait_path for #self_ty #where_clause {
                #(#items)*
            }
        });
    }
}

impl Branch {
    /// The type the dispatch method tests the event against.
    pub fn event_type(&self, crate_path: &SynTokenStream) -> SynTokenStream {
        let name = ident!("{}", self.event.resolved.name);
        if self.event.class.is_trait() {
            quote! { dyn #crate_path::events::#name }
        } else {
            quote! { #crate_path::events::#name }
        }
    }
}

impl AdapterDescription {
    /// Renders the adapter struct.
    pub fn struct_tokens(&self) -> SynTokenStream {
        let attrs = &self.attrs;
        let vis = &self.vis;
        let ident = &self.ident;
        let generics = &self.generics;
        let where_clause = &self.generics.where_clause;
        let field = &self.delegate.ident;
        let ty = &self.delegate.ty;
        let doc = format!(" Event listener for `{}`, generated by auto-listener.", self.source);
        quote! {
            #(#attrs)*
            #[doc = #doc]
            #vis struct #ident #generics #where_clause {
                #field: #ty,
            }
        }
    }

    /// Renders the `EventListener` implementation of the adapter.
    pub fn dispatch_tokens(&self) -> SynTokenStream {
        let crate_path = &self.crate_path;
        let ident = &self.ident;
        let field = &self.delegate.ident;
        let (_, ty_generics, _) = self.generics.split_for_impl();
        let (impl_generics, _, where_clause) = self.dispatch.generics.split_for_impl();
        let branches = self.dispatch.branches.iter().map(|branch| {
            let event_ty = branch.event_type(crate_path);
            let handlers = &branch.handlers;
            quote! {
                if let ::core::option::Option::Some(ev) =
                    <#event_ty as #crate_path::Narrow>::narrow(event)
                {
                    #(self.#field.#handlers(ev);)*
                }
            }
        });
        quote! {
            #[automatically_derived]
            impl #impl_generics #crate_path::EventListener for #ident #ty_generics #where_clause {
                #[allow(unused_variables)]
                fn on_event(&mut self, event: &dyn #crate_path::Event) {
                    #(#branches)*
                }
            }
        }
    }

    /// Every top-level item of the adapter, in output order.
    pub fn items(&self) -> Vec<SynTokenStream> {
        let mut items = vec![self.struct_tokens()];
        items.extend(self.blocks.iter().map(ToTokens::to_token_stream));
        items.extend(self.supertype.iter().map(ToTokens::to_token_stream));
        items.extend(self.interfaces.iter().map(ToTokens::to_token_stream));
        items.push(self.dispatch_tokens());
        items
    }
}
impl ToTokens for AdapterDescription {
    fn to_tokens(&self, tokens: &mut SynTokenStream) {
        tokens.extend(self.items());
    }
}

impl AdapterFile {
    /// The file name of the adapter, e.g. `command_handler_listener.rs`.
    pub fn file_name(&self) -> String {
        format!("{}.rs", snake_case(&self.adapter.ident.to_string()))
    }

    /// The path of the adapter's file relative to the output directory.
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.package.iter().collect();
        path.push(self.file_name());
        path
    }

    /// Renders the adapter as the contents of a source file.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        for line in &self.header {
            out.push_str("// ");
            out.push_str(line);
            out.push('\n');
        }
        for item in self.adapter.items() {
            out.push('\n');
            out.push_str(&item.to_string());
            out.push('\n');
        }
        out
    }
}
impl ToTokens for AdapterFile {
    fn to_tokens(&self, tokens: &mut SynTokenStream) {
        self.adapter.to_tokens(tokens);
    }
}
