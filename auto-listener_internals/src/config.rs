//! Options for the marker attributes and for a generation pass.

use crate::errors::Result;
use crate::utils::*;
use darling::FromMeta;
use proc_macro2::{Span, TokenStream as SynTokenStream};
use syn::*;

/// The suffix appended to a source type's name when no name is given in `#[auto_listener]`.
pub const LISTENER_SUFFIX: &str = "Listener";

/// The name of the marker attribute that requests an adapter for a struct.
pub const MARKER_ATTR: &str = "auto_listener";

/// The name of the attribute that keeps a method out of event dispatch.
pub const NO_EVENT_ATTR: &str = "no_event";

/// The name of the field holding the wrapped instance in generated adapters.
pub const DELEGATE_FIELD: &str = "instance";

/// The crate that defines the event root and the event namespace.
pub const DEFAULT_CRATE: &str = "auto_listener";

/// The module of the runtime crate that holds every recognized event type.
pub const EVENT_MODULE: &str = "events";

/// Modules of the runtime crate that re-export the event namespace.
pub const NAMESPACE_ALIASES: &[&str] = &["prelude"];

/// The comments placed at the top of every generated file.
pub const FILE_HEADER: [&str; 3] = [
    "Generated using auto-listener.",
    "This file should not be modified.",
    "Modifications will be removed upon recompilation!",
];

/// Arguments of `#[auto_listener(...)]`.
#[derive(FromMeta, Default, Debug, Clone)]
pub struct ListenerAttrs {
    /// Name of the generated adapter. Blank means the default.
    #[darling(default)]
    pub name: Option<String>,
}
impl ListenerAttrs {
    /// Parses the arguments of a marker attribute.
    pub fn from_attr(attr: &Attribute) -> Result<ListenerAttrs> {
        if attr.tokens.is_empty() {
            return Ok(ListenerAttrs::default());
        }
        Ok(ListenerAttrs::from_meta(&attr.parse_meta()?)?)
    }

    /// Parses the token stream given to a standalone `#[auto_listener]` attribute.
    pub fn from_tokens(toks: SynTokenStream) -> Result<ListenerAttrs> {
        if toks.is_empty() {
            return Ok(ListenerAttrs::default());
        }
        let attr: Attribute = parse_quote!(#[auto_listener(#toks)]);
        Self::from_attr(&attr)
    }

    /// Returns the adapter name for a source type called `source`.
    pub fn adapter_name(&self, source: &Ident) -> Ident {
        match &self.name {
            Some(name) if !name.trim().is_empty() => Ident::new(name.trim(), source.span()),
            _ => Ident::new(&format!("{}{}", source, LISTENER_SUFFIX), source.span()),
        }
    }
}

/// Arguments of `#[generate_listeners(...)]`.
#[derive(FromMeta, Default, Debug)]
pub struct PassAttrs {
    /// Path to the runtime crate, for users who renamed the dependency.
    #[darling(default, rename = "crate")]
    pub crate_name: Option<String>,
}
impl PassAttrs {
    /// Parses the token stream given to `#[generate_listeners]`.
    pub fn from_tokens(toks: SynTokenStream) -> Result<PassAttrs> {
        if toks.is_empty() {
            return Ok(PassAttrs::default());
        }
        let attr: Attribute = parse_quote!(#[generate_listeners(#toks)]);
        Ok(PassAttrs::from_meta(&attr.parse_meta()?)?)
    }

    pub fn into_config(self) -> Result<Config> {
        match self.crate_name {
            Some(name) => Config::with_crate(&name),
            None => Ok(Config::default()),
        }
    }
}

/// Settings shared by every source type processed in one pass.
#[derive(Debug, Clone)]
pub struct Config {
    crate_name: String,
}
impl Config {
    /// Creates a config that refers to the runtime crate at `path`.
    pub fn with_crate(path: &str) -> Result<Config> {
        let trimmed = path.trim().trim_start_matches("::");
        if trimmed.is_empty() || parse_str::<Path>(trimmed).is_err() {
            return error(Span::call_site(), format!("'{}' is not a valid crate path.", path));
        }
        Ok(Config { crate_name: trimmed.to_string() })
    }

    /// The runtime crate path, without a leading `::`.
    pub fn crate_name(&self) -> &str {
        &self.crate_name
    }

    /// The runtime crate as tokens, e.g. `::auto_listener`.
    pub fn crate_path(&self) -> SynTokenStream {
        path_tokens(&self.crate_name)
    }

    /// The one allowed event namespace, e.g. `auto_listener::events`.
    pub fn event_namespace(&self) -> String {
        format!("{}::{}", self.crate_name, EVENT_MODULE)
    }

    /// Whether `name` is a module of the runtime crate that exposes the event namespace.
    pub fn is_crate_module(&self, name: &str) -> bool {
        name == EVENT_MODULE || NAMESPACE_ALIASES.contains(&name)
    }

    /// Maps runtime crate paths that re-export the namespace onto the namespace itself.
    pub fn canonicalize(&self, path: &str) -> String {
        for alias in NAMESPACE_ALIASES {
            let alias = format!("{}::{}", self.crate_name, alias);
            if path == alias {
                return self.event_namespace();
            }
            if let Some(rest) = path.strip_prefix(&format!("{}::", alias)) {
                return format!("{}::{}", self.event_namespace(), rest);
            }
        }
        let root = format!("{}::{}", self.crate_name, crate::catalog::ROOT_EVENT);
        if path == root {
            return format!("{}::{}", self.event_namespace(), crate::catalog::ROOT_EVENT);
        }
        path.to_string()
    }
}
impl Default for Config {
    fn default() -> Self {
        Config { crate_name: DEFAULT_CRATE.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    #[test]
    fn adapter_name_defaults_to_suffix() {
        let source = ident!("CommandHandler");
        assert_eq!(ListenerAttrs::default().adapter_name(&source), "CommandHandlerListener");
        let blank = ListenerAttrs { name: Some("  ".to_string()) };
        assert_eq!(blank.adapter_name(&source), "CommandHandlerListener");
        let named = ListenerAttrs::from_tokens(quote!(name = "Commands")).unwrap();
        assert_eq!(named.adapter_name(&source), "Commands");
    }

    #[test]
    fn unknown_marker_options_are_rejected() {
        assert!(ListenerAttrs::from_tokens(quote!(nmae = "Commands")).is_err());
    }

    #[test]
    fn crate_override() {
        let config = PassAttrs::from_tokens(quote!(crate = "::renamed")).unwrap()
            .into_config().unwrap();
        assert_eq!(config.crate_name(), "renamed");
        assert_eq!(config.event_namespace(), "renamed::events");
        assert!(Config::with_crate("not a path").is_err());
    }

    #[test]
    fn aliases_are_canonicalized() {
        let config = Config::default();
        assert_eq!(
            config.canonicalize("auto_listener::prelude::ReadyEvent"),
            "auto_listener::events::ReadyEvent",
        );
        assert_eq!(config.canonicalize("auto_listener::Event"), "auto_listener::events::Event");
        assert_eq!(config.canonicalize("my::Thing"), "my::Thing");
    }
}
