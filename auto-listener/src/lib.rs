//! Generates event listener adapters for plain structs.
//!
//! A struct marked with `#[auto_listener]` declares its event handlers as ordinary public
//! methods taking a single event by reference. For each such struct an adapter type is
//! generated that owns an instance of the struct, implements [`EventListener`] by calling the
//! matching handlers, and forwards every other public method and trait to the instance.
//!
//! # Basic model
//!
//! Events are the types in the [`events`] module. A public method is an event handler when it
//! takes `&self` or `&mut self` and exactly one `&T` argument where `T` is an event, and returns
//! nothing. `T` can be a concrete event, a category (`dyn GenericMessageEvent`) or the root
//! (`dyn Event`). A method marked with `#[no_event]` is never a handler.
//!
//! The adapter is named after the struct with a `Listener` suffix, unless a name is given with
//! `#[auto_listener(name = "...")]`. Its constructors mirror the struct's public constructors.
//! A struct without public constructors gets a `new` constructor building the struct with
//! [`Default`].
//!
//! Example:
//! ```
//! #[auto_listener::generate_listeners]
//! mod handlers {
//!     use auto_listener::events::*;
//!
//!     #[auto_listener]
//!     #[derive(Default)]
//!     pub struct CommandHandler {
//!         pub pings: u32,
//!     }
//!
//!     impl CommandHandler {
//!         pub fn on_message(&mut self, event: &MessageReceivedEvent) {
//!             if event.content.starts_with("!ping") {
//!                 self.pings += 1;
//!             }
//!         }
//!
//!         pub fn pings(&self) -> u32 {
//!             self.pings
//!         }
//!     }
//! }
//!
//! use auto_listener::EventListener;
//! use auto_listener::events::MessageReceivedEvent;
//!
//! let mut listener = handlers::CommandHandlerListener::new();
//! listener.on_event(&MessageReceivedEvent { content: "!ping".into(), ..Default::default() });
//! assert_eq!(listener.pings(), 1);
//! ```
//!
//! # Dispatch
//!
//! The generated [`EventListener::on_event`] tests the event against each handled type in the
//! order the handlers were declared, and calls every handler of every type that matches. A
//! `MessageReceivedEvent` is passed both to handlers of `MessageReceivedEvent` and to handlers of
//! `dyn GenericMessageEvent`. Events without handlers are ignored.
//!
//! # Build scripts
//!
//! The adapters can also be written to files by a build script through
//! `auto_listener_internals::Builder`, and pulled in with `include!`. Outside of
//! `#[generate_listeners]` the marker attributes do nothing but check their arguments.

pub use auto_listener_derive::{generate_listeners, auto_listener, no_event};

pub mod events;
mod listener;
#[cfg(feature = "std")]
mod manager;

pub use crate::events::Event;
pub use crate::listener::{EventListener, Narrow};
#[cfg(feature = "std")]
pub use crate::manager::{EventManager, ListenerId};

/// Re-exports the event namespace and the traits needed to use generated adapters.
pub mod prelude {
    pub use crate::events::*;
    pub use crate::listener::{EventListener, Narrow};
    pub use auto_listener_derive::{generate_listeners, auto_listener, no_event};
}
