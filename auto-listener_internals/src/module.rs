use crate::config::{ListenerAttrs, PassAttrs, MARKER_ATTR, NO_EVENT_ATTR};
use crate::errors::Result;
use crate::pass::ListenerPass;
use crate::utils::*;
use proc_macro2::TokenStream as SynTokenStream;
use quote::*;
use syn::*;
use syn::spanned::Spanned;
use tracing::debug;

/// Contains the implementation for `#[generate_listeners]`.
pub struct GenerateListeners {
    module: ItemMod,
    pass: ListenerPass,
}
impl GenerateListeners {
    /// Prepares a pass over an inline module.
    pub fn new(attr: SynTokenStream, module: ItemMod) -> Result<Self> {
        if module.content.is_none() {
            return error(
                module.span(),
                "#[generate_listeners] can only be applied to inline modules (`mod name { ... }`).",
            );
        }
        let config = PassAttrs::from_tokens(attr)?.into_config()?;
        Ok(GenerateListeners { module, pass: ListenerPass::new(config) })
    }

    /// Parses a token stream.
    pub fn from_tokens(attr: impl ToTokens, item: impl ToTokens) -> Result<Self> {
        Self::new(attr.into_token_stream(), parse2(item.into_token_stream())?)
    }

    /// Parses a token stream.
    pub fn from_tokens_raw(
        attr: proc_macro::TokenStream, item: proc_macro::TokenStream,
    ) -> Result<Self> {
        Self::new(attr.into(), parse(item)?)
    }

    /// Generates the module with every adapter appended, followed by the diagnostics.
    pub fn generate(self) -> SynTokenStream {
        let GenerateListeners { mut module, mut pass } = self;
        if let Some((_, items)) = &mut module.content {
            pass.process_items(Vec::new(), items);
        }
        let (adapters, diagnostics) = pass.finish();
        debug!(
            module = %module.ident,
            adapters = adapters.len(),
            diagnostics = diagnostics.len(),
            "Finished #[generate_listeners]",
        );
        let diagnostics = diagnostics.to_tokens();
        quote! {
            #module
            #diagnostics
        }
    }
}

/// Contains the implementation of a standalone `#[auto_listener]`.
///
/// Outside of `#[generate_listeners]` the marker only has meaning to a build script, so the item
/// is passed through after its arguments are checked.
pub struct ListenerMarker {
    item: ItemStruct,
}
impl ListenerMarker {
    pub fn new(attr: SynTokenStream, item: SynTokenStream) -> Result<Self> {
        let item = match parse2::<Item>(item)? {
            Item::Struct(item) => item,
            other => return error(
                other.span(),
                format_args!("#[{}] can only be applied to structs.", MARKER_ATTR),
            ),
        };
        ListenerAttrs::from_tokens(attr)?;
        Ok(ListenerMarker { item })
    }

    /// Parses a token stream.
    pub fn from_tokens_raw(
        attr: proc_macro::TokenStream, item: proc_macro::TokenStream,
    ) -> Result<Self> {
        Self::new(attr.into(), item.into())
    }

    pub fn generate(self) -> SynTokenStream {
        self.item.into_token_stream()
    }
}

/// Contains the implementation of a standalone `#[no_event]`.
pub struct NoEventMarker {
    item: SynTokenStream,
}
impl NoEventMarker {
    pub fn new(attr: SynTokenStream, item: SynTokenStream) -> Result<Self> {
        if !attr.is_empty() {
            return error(attr.span(), format_args!("#[{}] takes no arguments.", NO_EVENT_ATTR));
        }
        if parse2::<ImplItemMethod>(item.clone()).is_err() {
            return error(
                item.span(),
                format_args!("#[{}] can only be applied to methods.", NO_EVENT_ATTR),
            );
        }
        Ok(NoEventMarker { item })
    }

    /// Parses a token stream.
    pub fn from_tokens_raw(
        attr: proc_macro::TokenStream, item: proc_macro::TokenStream,
    ) -> Result<Self> {
        Self::new(attr.into(), item.into())
    }

    pub fn generate(self) -> SynTokenStream {
        self.item
    }
}
