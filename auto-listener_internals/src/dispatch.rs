use crate::model::{EventType, MethodMember};

/// An event type and the handlers it is routed to.
#[derive(Clone, Debug)]
pub struct DispatchEntry {
    pub event: EventType,
    pub handlers: Vec<MethodMember>,
}

/// An ordered mapping from event types to the methods handling them.
///
/// Entries are kept in the order their first handler was discovered, and handlers are kept in
/// discovery order within an entry.
#[derive(Clone, Debug, Default)]
pub struct DispatchTable {
    entries: Vec<DispatchEntry>,
}
impl DispatchTable {
    pub fn new() -> Self {
        DispatchTable::default()
    }

    /// Appends a handler for an event type, creating the entry on first use.
    pub fn add(&mut self, event: EventType, method: MethodMember) {
        let key = event.key();
        match self.entries.iter_mut().find(|x| x.event.key() == key) {
            Some(entry) => entry.handlers.push(method),
            None => self.entries.push(DispatchEntry { event, handlers: vec![method] }),
        }
    }

    pub fn entries(&self) -> &[DispatchEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of handlers across every entry.
    pub fn handler_count(&self) -> usize {
        self.entries.iter().map(|x| x.handlers.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::model::ResolvedType;
    use syn::*;

    fn event(name: &str) -> EventType {
        EventType {
            resolved: ResolvedType::new("auto_listener::events", name),
            class: *catalog::find(name).unwrap(),
        }
    }

    fn method(name: &str) -> MethodMember {
        let ident = Ident::new(name, proc_macro2::Span::call_site());
        let method: ImplItemMethod = parse_quote!(pub fn #ident(&self, e: &ReadyEvent) { });
        MethodMember { attrs: Vec::new(), vis: method.vis, sig: method.sig, block: 0 }
    }

    fn names(entry: &DispatchEntry) -> Vec<String> {
        entry.handlers.iter().map(|x| x.sig.ident.to_string()).collect()
    }

    #[test]
    fn keeps_discovery_order() {
        let mut table = DispatchTable::new();
        assert!(table.is_empty());
        table.add(event("MessageReceivedEvent"), method("on_a"));
        table.add(event("MessageReceivedEvent"), method("on_b"));
        table.add(event("ReadyEvent"), method("on_c"));
        table.add(event("MessageReceivedEvent"), method("on_d"));

        let entries = table.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event.resolved.name, "MessageReceivedEvent");
        assert_eq!(names(&entries[0]), vec!["on_a", "on_b", "on_d"]);
        assert_eq!(entries[1].event.resolved.name, "ReadyEvent");
        assert_eq!(names(&entries[1]), vec!["on_c"]);
        assert_eq!(table.handler_count(), 4);
    }
}
