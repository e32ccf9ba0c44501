//! Local UI state
//!
//! Atom is for view-only state that no domain loop reads: the hovered drop
//! target, whether the context menu is open, and similar.

use zoon::{Mutable, Signal};

#[derive(Clone, Debug, Default)]
pub struct Atom<T> {
    value: Mutable<T>,
}

impl<T: Clone + PartialEq + 'static> Atom<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: Mutable::new(initial),
        }
    }

    pub fn set(&self, value: T) {
        self.value.set(value);
    }

    /// Set only when the value differs, so dependent signals stay quiet.
    pub fn set_neq(&self, value: T) {
        self.value.set_neq(value);
    }

    pub fn get_cloned(&self) -> T {
        self.value.get_cloned()
    }

    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.value.signal_cloned()
    }

    pub fn signal_ref<U, F>(&self, f: F) -> impl Signal<Item = U> + use<T, U, F>
    where
        F: FnMut(&T) -> U + 'static,
    {
        self.value.signal_ref(f)
    }
}
