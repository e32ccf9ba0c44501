//! Event streaming Relay
//!
//! A Relay is the sending half of an unbounded channel. UI handlers emit
//! events into it and exactly one Actor loop consumes the receiver.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};

/// Typed event channel from the UI into an Actor loop.
///
/// Relays follow the `{source}_{event}_relay` naming pattern, e.g.
/// `node_toggled_relay` or `collapse_all_clicked_relay`.
///
/// ```rust
/// let (node_toggled_relay, mut node_toggled_stream) = relay::<String>();
/// node_toggled_relay.send("docs".to_string());
/// // in the Actor loop:
/// while let Some(path) = node_toggled_stream.next().await { /* ... */ }
/// ```
#[derive(Debug)]
pub struct Relay<T> {
    sender: UnboundedSender<T>,
}

// Manual impl: cloning the sender must not require `T: Clone`
impl<T> Clone for Relay<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: 'static> Relay<T> {
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }

    /// Emit an event. Dropped silently when nothing listens anymore.
    pub fn send(&self, value: T) {
        let _ = self.sender.unbounded_send(value);
    }
}

pub fn relay<T: 'static>() -> (Relay<T>, UnboundedReceiver<T>) {
    Relay::new()
}
