//! Decides which role each member of a source type plays in the adapter.

use crate::catalog;
use crate::config::NO_EVENT_ATTR;
use crate::diagnostics::Diagnostics;
use crate::model::*;
use crate::utils::*;
use syn::*;

/// The role a member plays in the generated adapter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Role {
    /// Not visible on the adapter at all.
    Ignored,
    /// Called from the dispatch method when an event of this type arrives.
    EventHandler(EventType),
    /// Copied onto the adapter as a call on the delegate.
    Forwarded,
}

/// Returns the `T` of a single `&T` parameter.
fn event_param(method: &MethodMember) -> Option<&Type> {
    let params = method.params();
    if params.len() != 1 {
        return None;
    }
    match strip_type(&params[0].ty) {
        Type::Reference(rf) if rf.mutability.is_none() => Some(&rf.elem),
        _ => None,
    }
}

/// Returns the name of a catalog event that an unresolved type appears to refer to.
fn catalog_name(tp: &Type) -> Option<String> {
    let path = match strip_type(tp) {
        Type::Path(path) if path.qself.is_none() => &path.path,
        Type::TraitObject(object) => object.bounds.iter().find_map(|x| match x {
            TypeParamBound::Trait(bound) => Some(&bound.path),
            _ => None,
        })?,
        _ => return None,
    };
    let name = last_path_segment(path);
    catalog::find(&name).map(|_| name)
}

/// Whether the dispatch method can call this method with nothing but a narrowed event.
fn is_callable_handler(method: &MethodMember) -> bool {
    let sig = &method.sig;
    let plain = sig.asyncness.is_none() && sig.unsafety.is_none() &&
        sig.abi.is_none() && sig.variadic.is_none();
    let only_lifetimes = sig.generics.params.iter().all(|x| match x {
        GenericParam::Lifetime(_) => true,
        _ => false,
    });
    let receiver = match method.receiver() {
        ReceiverKind::Ref | ReceiverKind::RefMut => true,
        _ => false,
    };
    plain && only_lifetimes && receiver
}

/// Classifies the members of one source type against a type model.
pub struct Classifier<'a, M: TypeModel + ?Sized> {
    model: &'a M,
    source: &'a SourceType,
}
impl <'a, M: TypeModel + ?Sized> Classifier<'a, M> {
    pub fn new(model: &'a M, source: &'a SourceType) -> Self {
        Classifier { model, source }
    }

    /// Decides the role of one member. Problems are reported to `diags`.
    pub fn classify(&self, member: &SourceMember, diags: &mut Diagnostics) -> Role {
        let method = match member {
            SourceMember::Field(_) | SourceMember::Constructor(_) => return Role::Ignored,
            SourceMember::Method(method) => method,
        };

        // Modifier checks come before shape checks.
        if method.receiver() == ReceiverKind::None || !method.is_public() {
            return Role::Ignored;
        }

        let param = match event_param(method) {
            Some(param) if returns_unit(&method.sig.output) => param,
            _ => return Role::Forwarded,
        };
        if method.has_attr(NO_EVENT_ATTR) || !is_callable_handler(method) {
            return Role::Forwarded;
        }
        let resolved = match self.model.resolve(param) {
            Some(resolved) => resolved,
            None => match catalog_name(param) {
                Some(name) => {
                    diags.error(method.span(), format!(
                        "Could not resolve the event type `{}` of `{}`. Import it from `{}`.",
                        name, method.sig.ident, self.model.event_namespace(),
                    ));
                    return Role::Ignored;
                }
                None => return Role::Forwarded,
            },
        };
        if !self.model.is_subtype(&resolved, &self.model.event_root()) {
            return Role::Forwarded;
        }

        let namespace = self.model.event_namespace();
        if !resolved.is_in(&namespace) {
            diags.warning(method.span(), format!(
                "`{}` is an event type outside of `{}`, so `{}` will not receive events. \
                 Only events from `{}` can be dispatched; apply #[no_event] to `{}` to \
                 silence this warning.",
                resolved.qualified(), namespace, method.sig.ident, namespace, method.sig.ident,
            ));
            return Role::Forwarded;
        }

        let class = match self.model.lookup_event(&resolved.qualified()) {
            Some(class) => class,
            None => {
                diags.error(
                    method.span(),
                    format!("Could not find event type for '{}'!", resolved.qualified()),
                );
                return Role::Ignored;
            }
        };

        let block = &self.source.blocks[method.block];
        if !self.source.is_canonical_block(block) {
            diags.error(method.span(), format!(
                "Event handler `{}` must be declared in an impl block that covers every \
                 instantiation of `{}`, using the same generic parameter names.",
                method.sig.ident, self.source.ident,
            ));
            return Role::Ignored;
        }

        Role::EventHandler(EventType { resolved, class })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::syn_model::SynTypeModel;

    fn classify_all(file: File) -> (Vec<(String, Role)>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let model = SynTypeModel::new(&Config::default(), Vec::new(), &file.items, &mut diags);
        let source = &model.source_types()[0];
        let classifier = Classifier::new(&model, source);
        let roles = source.members.iter().filter_map(|member| match member {
            SourceMember::Method(method) | SourceMember::Constructor(method) =>
                Some((method.sig.ident.to_string(), classifier.classify(member, &mut diags))),
            SourceMember::Field(_) => None,
        }).collect();
        (roles, diags)
    }

    fn role_of<'a>(roles: &'a [(String, Role)], name: &str) -> &'a Role {
        &roles.iter().find(|x| x.0 == name).expect("no such method").1
    }

    fn is_handler(role: &Role, event: &str) -> bool {
        match role {
            Role::EventHandler(tp) => tp.resolved.name == event,
            _ => false,
        }
    }

    #[test]
    fn classification_rules() {
        let (roles, diags) = classify_all(parse_quote! {
            use auto_listener::events::*;

            #[auto_listener]
            pub struct Bot;

            impl Bot {
                pub fn new() -> Self { Bot }
                pub fn on_ready(&self, e: &ReadyEvent) { }
                pub fn on_message(&mut self, e: &dyn GenericMessageEvent) { }
                pub fn on_any(&self, e: &dyn Event) { }
                fn on_private(&self, e: &ReadyEvent) { }
                pub fn on_static(e: &ReadyEvent) { }
                pub fn describe(&self) -> String { String::new() }
                pub fn returns_value(&self, e: &ReadyEvent) -> bool { true }
                pub fn two_params(&self, e: &ReadyEvent, x: u32) { }
                pub fn by_value(&self, e: ReadyEvent) { }
                pub fn not_an_event(&self, e: &String) { }
                #[no_event]
                pub fn excluded(&self, e: &ReadyEvent) { }
                pub async fn later(&self, e: &ReadyEvent) { }
                pub fn consume(self, e: &ReadyEvent) { }
                pub(crate) fn crate_visible(&self, e: &ShutdownEvent) { }
            }
        });
        assert!(diags.is_empty());
        assert_eq!(role_of(&roles, "new"), &Role::Ignored);
        assert!(is_handler(role_of(&roles, "on_ready"), "ReadyEvent"));
        assert!(is_handler(role_of(&roles, "on_message"), "GenericMessageEvent"));
        assert!(is_handler(role_of(&roles, "on_any"), "Event"));
        assert!(is_handler(role_of(&roles, "crate_visible"), "ShutdownEvent"));
        assert_eq!(role_of(&roles, "on_private"), &Role::Ignored);
        assert_eq!(role_of(&roles, "on_static"), &Role::Ignored);
        for name in &[
            "describe", "returns_value", "two_params", "by_value", "not_an_event", "excluded",
            "later", "consume",
        ] {
            assert_eq!(role_of(&roles, name), &Role::Forwarded, "{}", name);
        }
    }

    #[test]
    fn foreign_events_are_forwarded_with_a_warning() {
        let (roles, diags) = classify_all(parse_quote! {
            use auto_listener::events::*;

            #[derive(Debug)]
            pub struct CustomEvent;
            impl Event for CustomEvent { }

            #[auto_listener]
            pub struct Bot;

            impl Bot {
                pub fn on_custom(&self, e: &CustomEvent) { }
                #[no_event]
                pub fn on_custom_quietly(&self, e: &CustomEvent) { }
            }
        });
        assert_eq!(role_of(&roles, "on_custom"), &Role::Forwarded);
        assert_eq!(role_of(&roles, "on_custom_quietly"), &Role::Forwarded);
        assert_eq!(diags.warnings().count(), 1);
        assert!(!diags.has_errors());
        assert!(diags.iter().next().unwrap().message.contains("on_custom"));
    }

    #[test]
    fn unknown_events_are_errors() {
        let (roles, diags) = classify_all(parse_quote! {
            use auto_listener::events;

            #[auto_listener]
            pub struct Bot;

            impl Bot {
                pub fn on_typo(&self, e: &events::ReadyEvnet) { }
            }
        });
        assert_eq!(role_of(&roles, "on_typo"), &Role::Ignored);
        assert_eq!(diags.errors().count(), 1);
        assert!(diags.iter().next().unwrap().message.contains("ReadyEvnet"));
    }

    #[test]
    fn handlers_need_a_generic_impl() {
        let (roles, diags) = classify_all(parse_quote! {
            use auto_listener::events::*;

            #[auto_listener]
            pub struct Store<T> { items: Vec<T> }

            impl<T: Clone> Store<T> {
                pub fn on_ready(&self, e: &ReadyEvent) { }
            }

            impl Store<String> {
                pub fn on_shutdown(&self, e: &ShutdownEvent) { }
            }
        });
        assert!(is_handler(role_of(&roles, "on_ready"), "ReadyEvent"));
        assert_eq!(role_of(&roles, "on_shutdown"), &Role::Ignored);
        assert_eq!(diags.errors().count(), 1);
    }

    #[test]
    fn crate_root_imports() {
        let (roles, diags) = classify_all(parse_quote! {
            use auto_listener::*;

            #[auto_listener]
            pub struct Bot;

            impl Bot {
                pub fn on_any(&self, e: &dyn Event) { }
                pub fn on_ready(&self, e: &events::ReadyEvent) { }
                pub fn on_joined(&self, e: &prelude::GuildJoinEvent) { }
            }
        });
        assert!(diags.is_empty(), "{:?}", diags);
        assert!(is_handler(role_of(&roles, "on_any"), "Event"));
        assert!(is_handler(role_of(&roles, "on_ready"), "ReadyEvent"));
        assert!(is_handler(role_of(&roles, "on_joined"), "GuildJoinEvent"));
    }

    #[test]
    fn renamed_namespace_imports() {
        let (roles, diags) = classify_all(parse_quote! {
            use auto_listener::events::{self as ev};

            #[auto_listener]
            pub struct Bot;

            impl Bot {
                pub fn on_ready(&self, e: &ev::ReadyEvent) { }
                pub fn on_message(&self, e: &dyn ev::GenericMessageEvent) { }
            }
        });
        assert!(diags.is_empty(), "{:?}", diags);
        assert!(is_handler(role_of(&roles, "on_ready"), "ReadyEvent"));
        assert!(is_handler(role_of(&roles, "on_message"), "GenericMessageEvent"));
    }

    #[test]
    fn unresolved_event_names_are_errors() {
        let (roles, diags) = classify_all(parse_quote! {
            #[auto_listener]
            pub struct Bot;

            impl Bot {
                pub fn on_ready(&self, e: &ReadyEvent) { }
                pub fn on_message(&self, e: &dyn GenericMessageEvent) { }
                pub fn on_text(&self, e: &String) { }
            }
        });
        assert_eq!(role_of(&roles, "on_ready"), &Role::Ignored);
        assert_eq!(role_of(&roles, "on_message"), &Role::Ignored);
        assert_eq!(role_of(&roles, "on_text"), &Role::Forwarded);
        assert_eq!(diags.errors().count(), 2);
        assert!(diags.iter().next().unwrap().message.contains("ReadyEvent"));
    }
}
