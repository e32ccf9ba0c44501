//! Single-value Actor
//!
//! An Actor owns a `Mutable<T>` and the task that processes Relay events to
//! update it. Dropping the last clone of the Actor aborts the task.

use std::future::Future;
use std::rc::Rc;
use zoon::{Mutable, Signal, Task, TaskHandle};

#[derive(Clone)]
pub struct Actor<T> {
    state: Mutable<T>,
    #[allow(dead_code)]
    task_handle: Rc<TaskHandle>,
}

impl<T: Clone + 'static> Actor<T> {
    /// Start `processor` with the Actor's state handle.
    ///
    /// ```rust
    /// let (collapse_all_clicked_relay, mut clicks) = relay::<()>();
    /// let collapse_count = Actor::new(0, async move |state| {
    ///     while clicks.next().await.is_some() {
    ///         state.update_mut(|count| *count += 1);
    ///     }
    /// });
    /// ```
    pub fn new<F, Fut>(initial_state: T, processor: F) -> Self
    where
        F: FnOnce(Mutable<T>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        let state = Mutable::new(initial_state);
        let task_handle = Rc::new(Task::start_droppable(processor(state.clone())));
        Self { state, task_handle }
    }

    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.state.signal_cloned()
    }
}
