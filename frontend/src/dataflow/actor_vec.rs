//! Collection Actor
//!
//! Same ownership model as [`Actor`](super::Actor) but over a `MutableVec<T>`.
//! Toast notifications live in one.

use std::future::Future;
use std::rc::Rc;
use zoon::{MutableVec, SignalVec, Task, TaskHandle};

#[derive(Clone)]
pub struct ActorVec<T> {
    items: MutableVec<T>,
    #[allow(dead_code)]
    task_handle: Rc<TaskHandle>,
}

impl<T: Clone + 'static> ActorVec<T> {
    pub fn new<F, Fut>(initial_items: Vec<T>, processor: F) -> Self
    where
        F: FnOnce(MutableVec<T>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        let items = MutableVec::new_with_values(initial_items);
        let task_handle = Rc::new(Task::start_droppable(processor(items.clone())));
        Self { items, task_handle }
    }

    pub fn signal_vec(&self) -> impl SignalVec<Item = T> + use<T> {
        self.items.signal_vec_cloned()
    }
}
