//! Drives adapter generation over a tree of modules.

use crate::assemble::Assembler;
use crate::config::{Config, FILE_HEADER, MARKER_ATTR, NO_EVENT_ATTR};
use crate::description::AdapterFile;
use crate::diagnostics::Diagnostics;
use crate::model::{SourceType, TypeModel};
use crate::syn_model::SynTypeModel;
use crate::utils::*;
use quote::ToTokens;
use std::collections::HashSet;
use syn::*;
use tracing::{debug, trace};

/// Removes the marker attributes from an item, so the compiler never sees them.
fn strip_markers(item: &mut Item) {
    match item {
        Item::Struct(item) => item.attrs.retain(|x| !is_attr_named(x, MARKER_ATTR)),
        Item::Impl(item) => for impl_item in &mut item.items {
            if let ImplItem::Method(method) = impl_item {
                method.attrs.retain(|x| !is_attr_named(x, NO_EVENT_ATTR));
            }
        },
        _ => { }
    }
}

/// The state of one generation pass.
///
/// A pass generates at most one adapter per adapter name, and collects every diagnostic
/// produced along the way.
pub struct ListenerPass {
    config: Config,
    diagnostics: Diagnostics,
    adapters: Vec<AdapterFile>,
    names: HashSet<String>,
}
impl ListenerPass {
    pub fn new(config: Config) -> Self {
        ListenerPass {
            config,
            diagnostics: Diagnostics::new(),
            adapters: Vec::new(),
            names: HashSet::new(),
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Adapters generated so far, in generation order.
    pub fn adapters(&self) -> &[AdapterFile] {
        &self.adapters
    }

    /// Generates the adapter of one source type.
    ///
    /// Returns the index of the new adapter in [`ListenerPass::adapters`]. A failure is
    /// recorded as an error diagnostic and affects no other type.
    pub fn process<M: TypeModel + ?Sized>(
        &mut self, model: &M, source: &SourceType,
    ) -> Option<usize> {
        let adapter_name = source.adapter_name();
        let mut qualified = source.module_path.clone();
        qualified.push(adapter_name.to_string());
        let qualified = qualified.join("::");
        if !self.names.insert(qualified.clone()) {
            self.diagnostics.error(source.span, format!(
                "Could not generate `{}` for `{}`: an adapter with this name was already \
                 generated in this module.",
                adapter_name, source.ident,
            ));
            return None;
        }

        let assembler = Assembler::new(model, &self.config);
        match assembler.assemble(source, &mut self.diagnostics) {
            Ok(adapter) => {
                debug!(
                    source = %source.qualified_name(),
                    adapter = %qualified,
                    handlers = adapter.dispatch.branches.iter().map(|x| x.handlers.len()).sum::<usize>(),
                    "Generated adapter",
                );
                self.adapters.push(AdapterFile {
                    package: source.module_path.clone(),
                    header: FILE_HEADER,
                    adapter,
                });
                Some(self.adapters.len() - 1)
            }
            Err(e) => {
                debug!(source = %source.qualified_name(), error = %e, "Adapter generation failed");
                for (span, message) in e.messages() {
                    self.diagnostics.error(span, format!(
                        "Could not generate `{}` for `{}`: {}", adapter_name, source.ident, message,
                    ));
                }
                None
            }
        }
    }

    /// Generates adapters for every source type of a model, in declaration order.
    pub fn process_model<M: TypeModel + ?Sized>(&mut self, model: &M) -> Vec<usize> {
        model.source_types().iter().filter_map(|source| self.process(model, source)).collect()
    }

    /// Generates adapters for a module and every inline module nested in it.
    ///
    /// Each adapter is appended to the items of the module declaring its source type, and the
    /// marker attributes are removed.
    pub fn process_items(&mut self, module_path: Vec<String>, items: &mut Vec<Item>) {
        trace!(module = %module_path.join("::"), items = items.len(), "Scanning module");
        let mut diags = Diagnostics::new();
        let model = SynTypeModel::new(&self.config, module_path.clone(), items, &mut diags);
        self.diagnostics.append(diags);
        let generated = self.process_model(&model);

        for item in items.iter_mut() {
            strip_markers(item);
            if let Item::Mod(module) = item {
                if let Some((_, content)) = &mut module.content {
                    let mut path = module_path.clone();
                    path.push(module.ident.to_string());
                    self.process_items(path, content);
                }
            }
        }
        for index in generated {
            items.push(Item::Verbatim(self.adapters[index].to_token_stream()));
        }
    }

    /// Ends the pass, returning the generated adapters and every diagnostic.
    pub fn finish(self) -> (Vec<AdapterFile>, Diagnostics) {
        (self.adapters, self.diagnostics)
    }
}
