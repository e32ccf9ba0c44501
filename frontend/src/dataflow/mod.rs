//! Reactive dataflow primitives used by the explorer UI
//!
//! - **[`Relay`]** - UI event channel into an Actor loop
//! - **[`Actor`]** - single value owned by a processing loop
//! - **[`ActorVec`]** - collection owned by a processing loop
//! - **[`Atom`]** - view-local state
//!
//! Relays follow the `{source}_{event}_relay` naming pattern.

pub mod actor;
pub mod actor_vec;
pub mod atom;
pub mod relay;

pub use actor::Actor;
pub use actor_vec::ActorVec;
pub use atom::Atom;
pub use relay::{Relay, relay};
