//! The fixed family of event types declared by the runtime crate's `events` module.
//!
//! This must be kept in sync with `auto_listener::events`.

/// The name of the root of every event type.
pub const ROOT_EVENT: &str = "Event";

/// How an event type is represented in the runtime crate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// The root trait. Handlers take `&dyn Event`.
    Root,
    /// A trait implemented by a group of events. Handlers take `&dyn Trait`.
    Category,
    /// A concrete event struct.
    Concrete,
}

/// An entry of the event catalog.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct EventClass {
    pub name: &'static str,
    pub kind: EventKind,
    /// The direct supertypes of this event. Empty only for the root.
    pub parents: &'static [&'static str],
}
impl EventClass {
    /// Whether this event is represented by a trait object.
    pub fn is_trait(&self) -> bool {
        self.kind != EventKind::Concrete
    }
}

macro_rules! catalog {
    ($(($name:literal, $kind:ident, [$($parent:literal),*]))*) => {
        /// Every event type of the namespace, in declaration order.
        pub const EVENT_CATALOG: &[EventClass] = &[$(
            EventClass { name: $name, kind: EventKind::$kind, parents: &[$($parent),*] },
        )*];
    }
}
catalog! {
    ("Event"               , Root    , [])
    ("GenericMessageEvent" , Category, ["Event"])
    ("GenericGuildEvent"   , Category, ["Event"])
    ("ReadyEvent"          , Concrete, ["Event"])
    ("ResumedEvent"        , Concrete, ["Event"])
    ("ShutdownEvent"       , Concrete, ["Event"])
    ("MessageReceivedEvent", Concrete, ["GenericMessageEvent"])
    ("MessageUpdateEvent"  , Concrete, ["GenericMessageEvent"])
    ("MessageDeleteEvent"  , Concrete, ["GenericMessageEvent"])
    ("GuildJoinEvent"      , Concrete, ["GenericGuildEvent"])
    ("GuildLeaveEvent"     , Concrete, ["GenericGuildEvent"])
}

/// Finds an event by its simple name.
pub fn find(name: &str) -> Option<&'static EventClass> {
    EVENT_CATALOG.iter().find(|x| x.name == name)
}

/// Returns whether the event `sub` is `sup` or one of its descendants.
pub fn extends(sub: &str, sup: &str) -> bool {
    if sub == sup {
        return true;
    }
    match find(sub) {
        Some(class) => class.parents.iter().any(|parent| extends(parent, sup)),
        None => false,
    }
}
