use crate::events::*;

/// A type that receives every event of the namespace.
///
/// This is implemented by the adapters generated for `#[auto_listener]` structs, but can be
/// implemented by hand as well.
pub trait EventListener {
    /// Called once for every event.
    fn on_event(&mut self, event: &dyn Event);
}

impl <T: EventListener + ?Sized> EventListener for Box<T> {
    fn on_event(&mut self, event: &dyn Event) {
        (**self).on_event(event)
    }
}

/// A type test on an event.
///
/// Implemented for [`Event`] itself, for each category trait object and for each concrete event.
pub trait Narrow {
    /// Returns the event as `Self`, if it is one.
    fn narrow(event: &dyn Event) -> Option<&Self>;
}

impl Narrow for dyn Event {
    fn narrow(event: &dyn Event) -> Option<&Self> {
        Some(event)
    }
}

impl Narrow for dyn GenericMessageEvent {
    fn narrow(event: &dyn Event) -> Option<&Self> {
        event.as_message_event()
    }
}

impl Narrow for dyn GenericGuildEvent {
    fn narrow(event: &dyn Event) -> Option<&Self> {
        event.as_guild_event()
    }
}

macro_rules! concrete_events {
    ($($name:ident)*) => {$(
        impl Narrow for $name {
            fn narrow(event: &dyn Event) -> Option<&Self> {
                event.as_any().downcast_ref()
            }
        }
    )*}
}
concrete_events! {
    ReadyEvent ResumedEvent ShutdownEvent
    MessageReceivedEvent MessageUpdateEvent MessageDeleteEvent
    GuildJoinEvent GuildLeaveEvent
}
