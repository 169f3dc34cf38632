use proc_macro::TokenStream;
use auto_listener_internals::*;

#[proc_macro_attribute]
pub fn generate_listeners(attr: TokenStream, item: TokenStream) -> TokenStream {
    try_syn!(GenerateListeners::from_tokens_raw(attr, item)).generate().into()
}

#[proc_macro_attribute]
pub fn auto_listener(attr: TokenStream, item: TokenStream) -> TokenStream {
    try_syn!(ListenerMarker::from_tokens_raw(attr, item)).generate().into()
}

#[proc_macro_attribute]
pub fn no_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    try_syn!(NoEventMarker::from_tokens_raw(attr, item)).generate().into()
}
