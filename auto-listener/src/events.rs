//! The event namespace: every event type a generated adapter can dispatch.
//!
//! Events form a small fixed hierarchy. [`Event`] is the root, [`GenericMessageEvent`] and
//! [`GenericGuildEvent`] are categories, and every struct in this module is a concrete event.
//! A handler method can take any of them by reference:
//!
//! * `&ReadyEvent` is called for that exact event only.
//! * `&dyn GenericMessageEvent` is called for every message event.
//! * `&dyn Event` is called for every event.
//!
//! Event types declared outside of this module can not be dispatched to handlers.

use std::any::Any;
use std::fmt::Debug;

/// Allows an event to be downcast to its concrete type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}
impl <T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The root of every event type.
pub trait Event: AsAny + Debug + Send + Sync + 'static {
    /// Returns this event as a message event, if it is one.
    fn as_message_event(&self) -> Option<&dyn GenericMessageEvent> {
        None
    }

    /// Returns this event as a guild event, if it is one.
    fn as_guild_event(&self) -> Option<&dyn GenericGuildEvent> {
        None
    }
}

/// An event concerning a single message.
pub trait GenericMessageEvent: Event + 'static {
    fn message_id(&self) -> u64;
    fn channel_id(&self) -> u64;
}

/// An event concerning a single guild.
pub trait GenericGuildEvent: Event + 'static {
    fn guild_id(&self) -> u64;
}

/// Sent once the connection is established and every guild is available.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReadyEvent {
    pub session_id: String,
    pub guild_count: usize,
}
impl Event for ReadyEvent { }

/// Sent when a dropped connection is resumed without losing events.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResumedEvent {
    pub session_id: String,
}
impl Event for ResumedEvent { }

/// Sent once before the connection is closed for good.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ShutdownEvent {
    pub code: u16,
}
impl Event for ShutdownEvent { }

macro_rules! message_event {
    ($name:ident) => {
        impl Event for $name {
            fn as_message_event(&self) -> Option<&dyn GenericMessageEvent> {
                Some(self)
            }
        }
        impl GenericMessageEvent for $name {
            fn message_id(&self) -> u64 {
                self.message_id
            }
            fn channel_id(&self) -> u64 {
                self.channel_id
            }
        }
    }
}

macro_rules! guild_event {
    ($name:ident) => {
        impl Event for $name {
            fn as_guild_event(&self) -> Option<&dyn GenericGuildEvent> {
                Some(self)
            }
        }
        impl GenericGuildEvent for $name {
            fn guild_id(&self) -> u64 {
                self.guild_id
            }
        }
    }
}

/// Sent when a message is posted in a channel the bot can see.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MessageReceivedEvent {
    pub message_id: u64,
    pub channel_id: u64,
    pub author: String,
    pub content: String,
}
message_event!(MessageReceivedEvent);

/// Sent when a message is edited.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MessageUpdateEvent {
    pub message_id: u64,
    pub channel_id: u64,
    pub content: String,
}
message_event!(MessageUpdateEvent);

/// Sent when a message is deleted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MessageDeleteEvent {
    pub message_id: u64,
    pub channel_id: u64,
}
message_event!(MessageDeleteEvent);

/// Sent when the bot joins a guild.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GuildJoinEvent {
    pub guild_id: u64,
    pub name: String,
}
guild_event!(GuildJoinEvent);

/// Sent when the bot leaves or is removed from a guild.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GuildLeaveEvent {
    pub guild_id: u64,
}
guild_event!(GuildLeaveEvent);
