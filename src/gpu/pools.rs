//! Shader and texture reuse pools.
//!
//! Compiling a shader or uploading a texture is expensive, so the backing
//! GPU objects should be created once and reused for the lifetime of the
//! process. The pools here hand out stable slot ids keyed by name; what
//! actually lives in a slot (compiled program, uploaded texture) is the
//! renderer's business, not the manager's.

use rustc_hash::FxHashMap;
use std::sync::Mutex;

/// Stable identifier for a pooled shader program slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u64);

/// Stable identifier for a pooled texture slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Name-keyed shader slot pool. One name maps to one slot, forever.
#[derive(Debug, Default)]
pub struct ShaderPool {
    slots: Mutex<FxHashMap<String, ShaderId>>,
}

impl ShaderPool {
    /// An empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot id for the named shader, allocated on first request and
    /// reused afterwards.
    pub fn obtain(&self, name: &str) -> ShaderId {
        let mut slots = lock(&self.slots);
        if let Some(&id) = slots.get(name) {
            return id;
        }
        let id = ShaderId(slots.len() as u64);
        let _ = slots.insert(name.to_owned(), id);
        id
    }

    /// Number of allocated slots.
    pub fn len(&self) -> usize {
        lock(&self.slots).len()
    }

    /// Whether no slots have been allocated yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Name-keyed texture slot pool, mirroring [`ShaderPool`].
#[derive(Debug, Default)]
pub struct TexturePool {
    slots: Mutex<FxHashMap<String, TextureId>>,
}

impl TexturePool {
    /// An empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot id for the named texture, allocated on first request and
    /// reused afterwards.
    pub fn obtain(&self, name: &str) -> TextureId {
        let mut slots = lock(&self.slots);
        if let Some(&id) = slots.get(name) {
            return id;
        }
        let id = TextureId(slots.len() as u64);
        let _ = slots.insert(name.to_owned(), id);
        id
    }

    /// Number of allocated slots.
    pub fn len(&self) -> usize {
        lock(&self.slots).len()
    }

    /// Whether no slots have been allocated yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// A poisoned pool mutex means a panic mid-insert; the map itself is still
// coherent, so keep serving it.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
