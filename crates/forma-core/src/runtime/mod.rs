//! Single-threaded turn runtime.
//!
//! A host processes one input event per *turn*. Everything a widget does in
//! response happens synchronously inside that turn, with two exceptions
//! modelled here:
//!
//! - [`TurnQueue`]: work deferred until the current turn has finished.
//! - [`WindowListeners`]: subscriptions to surface-wide events, held through a
//!   [`ListenerGuard`] that unsubscribes when dropped.

mod deferred;
mod listeners;

pub use deferred::TurnQueue;
pub use listeners::{ListenerGuard, WindowListeners};
