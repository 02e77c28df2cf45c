use std::fmt;
use std::ops::{Deref, DerefMut};

use tokio::sync::{Mutex, MutexGuard};

/// Identity of a render worker. Decides which pool slot the worker uses, so
/// the same worker always lands on the same model instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerId(usize);

impl WorkerId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker-{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelPoolError {
    #[error("model pool '{0}' needs at least one instance")]
    Empty(&'static str),
}

/// Fixed set of model instances that must never be driven by two callers at
/// once. A one-slot pool serializes every call behind a single lock.
pub struct ModelPool<M: ?Sized> {
    name: &'static str,
    slots: Vec<Mutex<Box<M>>>,
}

impl<M: ?Sized + Send> ModelPool<M> {
    pub fn new(name: &'static str, instances: Vec<Box<M>>) -> Result<Self, ModelPoolError> {
        if instances.is_empty() {
            return Err(ModelPoolError::Empty(name));
        }
        tracing::info!(pool = name, size = instances.len(), "Model pool ready");
        Ok(Self {
            name,
            slots: instances.into_iter().map(Mutex::new).collect(),
        })
    }

    pub fn single(name: &'static str, instance: Box<M>) -> Self {
        Self {
            name,
            slots: vec![Mutex::new(instance)],
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn slot_for(&self, worker: WorkerId) -> usize {
        worker.as_usize() % self.slots.len()
    }

    /// Waits for the worker's slot. The slot is released when the returned
    /// guard is dropped, including on error and on cancellation.
    pub async fn acquire(&self, worker: WorkerId) -> PooledModel<'_, M> {
        let slot = self.slot_for(worker);
        let guard = self.slots[slot].lock().await;
        tracing::trace!(pool = self.name, slot, worker = %worker, "Model slot acquired");
        PooledModel {
            pool: self.name,
            slot,
            guard,
        }
    }

    pub fn try_acquire(&self, worker: WorkerId) -> Option<PooledModel<'_, M>> {
        let slot = self.slot_for(worker);
        let guard = self.slots[slot].try_lock().ok()?;
        Some(PooledModel {
            pool: self.name,
            slot,
            guard,
        })
    }
}

/// Exclusive, scoped access to one pooled model instance.
pub struct PooledModel<'a, M: ?Sized> {
    pool: &'static str,
    slot: usize,
    guard: MutexGuard<'a, Box<M>>,
}

impl<M: ?Sized> PooledModel<'_, M> {
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn release(self) {}
}

impl<M: ?Sized> Deref for PooledModel<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        &**self.guard
    }
}

impl<M: ?Sized> DerefMut for PooledModel<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        &mut **self.guard
    }
}

impl<M: ?Sized> Drop for PooledModel<'_, M> {
    fn drop(&mut self) {
        tracing::trace!(pool = self.pool, slot = self.slot, "Model slot released");
    }
}
