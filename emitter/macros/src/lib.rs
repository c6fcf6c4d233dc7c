mod event;

use proc_macro::TokenStream;

/// Implement `rusty_emitter::Event` for a struct carrying a `Cancellation` field.
///
/// The field is found by type. When that is ambiguous, or the type is aliased, mark the field
/// with `#[event(cancellation)]`.
#[proc_macro_derive(Event, attributes(event))]
pub fn derive_event(item: TokenStream) -> TokenStream {
    event::derive_event(item)
}
