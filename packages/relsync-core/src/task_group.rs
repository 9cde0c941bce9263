//! Spawn-and-join barrier for a known number of concurrent tasks.

use std::collections::HashMap;
use std::future::Future;
use tokio::task::{Id, JoinError, JoinSet};

/// A group of keyed tasks that is joined as a whole.
///
/// [`TaskGroup::join_all`] returns only after every spawned task finished,
/// yielding exactly one `(key, result)` pair per spawn in completion order.
/// A task that panics still reports, as a [`JoinError`], under its own key.
pub struct TaskGroup<K, T> {
    tasks: JoinSet<T>,
    keys: HashMap<Id, K>,
}

impl<K, T> Default for TaskGroup<K, T>
where
    T: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> TaskGroup<K, T>
where
    T: Send + 'static,
{
    pub fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
            keys: HashMap::new(),
        }
    }

    pub fn spawn<F>(&mut self, key: K, task: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        let handle = self.tasks.spawn(task);
        self.keys.insert(handle.id(), key);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub async fn join_all(mut self) -> Vec<(K, Result<T, JoinError>)> {
        let mut results = Vec::with_capacity(self.keys.len());
        while let Some(joined) = self.tasks.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, output)) => (id, Ok(output)),
                Err(err) => (err.id(), Err(err)),
            };
            if let Some(key) = self.keys.remove(&id) {
                results.push((key, result));
            }
        }
        results
    }
}
