#![recursion_limit="256"]

//! The engine behind `auto-listener`: discovers structs marked with `#[auto_listener]`, sorts
//! their methods into event handlers and forwarded methods, and synthesizes an adapter type for
//! each one.
//!
//! The same engine runs inside the `#[generate_listeners]` attribute and inside build scripts
//! through [`Builder`].

extern crate proc_macro;

#[macro_use] pub mod utils;

pub mod assemble;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod copier;
pub mod description;
pub mod diagnostics;
pub mod dispatch;
pub mod model;
pub mod pass;
pub mod syn_model;

mod builder;
mod emit;
mod errors;
mod module;

pub use crate::builder::{Builder, BuildReport};
pub use crate::errors::*;
pub use crate::module::{GenerateListeners, ListenerMarker, NoEventMarker};
