// Copyright 2025 Cowboy AI, LLC.

//! Prototype cache of fully decorated controller stacks
//!
//! Entries are immutable once stored; callers receive shared references to
//! the stack and keep their request state elsewhere. Two requests missing the
//! cache for the same identifier both build a stack and the later store wins.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::controller::Controller;
use crate::registry::ClassId;

/// Process-wide store of controller stacks by class identifier
pub struct PrototypeCache {
    enabled: AtomicBool,
    entries: RwLock<HashMap<ClassId, Arc<dyn Controller>>>,
}

impl PrototypeCache {
    /// Create an enabled, empty cache
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Whether lookups and stores are active
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Toggle caching; every toggle drops all entries
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
        self.clear();
        info!(enabled, "Controller cache toggled");
    }

    /// Cached stack, `None` when missing or caching is disabled
    pub fn get(&self, class_id: &ClassId) -> Option<Arc<dyn Controller>> {
        if !self.is_enabled() {
            return None;
        }
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(class_id)
            .cloned()
    }

    /// Store a stack if caching is enabled
    pub fn put(&self, class_id: ClassId, controller: Arc<dyn Controller>) {
        if !self.is_enabled() {
            return;
        }
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.insert(class_id.clone(), controller).is_some() {
            warn!(%class_id, "Replaced concurrently built controller");
        }
    }

    /// Force an entry regardless of the toggle, or clear it with `None`
    pub fn inject(&self, class_id: ClassId, controller: Option<Arc<dyn Controller>>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        info!(%class_id, injected = controller.is_some(), "Controller injected");
        match controller {
            Some(controller) => entries.insert(class_id, controller),
            None => entries.remove(&class_id),
        };
    }

    /// Remove one entry
    pub fn remove(&self, class_id: &ClassId) -> Option<Arc<dyn Controller>> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(class_id)
    }

    /// Drop all entries
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached stacks
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the cache holds no stacks
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PrototypeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PrototypeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrototypeCache")
            .field("enabled", &self.is_enabled())
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{OuterRef, StandardController};

    fn controller() -> Arc<dyn Controller> {
        Arc::new(StandardController::new("product", OuterRef::new()))
    }

    #[test]
    fn test_put_and_get() {
        let cache = PrototypeCache::new();
        let id = ClassId::from("Product::Standard");
        let stored = controller();

        cache.put(id.clone(), stored.clone());

        assert!(Arc::ptr_eq(&cache.get(&id).unwrap(), &stored));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_later_put_wins() {
        let cache = PrototypeCache::new();
        let id = ClassId::from("Product::Standard");
        let first = controller();
        let second = controller();

        cache.put(id.clone(), first.clone());
        cache.put(id.clone(), second.clone());

        let cached = cache.get(&id).unwrap();
        assert!(Arc::ptr_eq(&cached, &second));
        assert!(!Arc::ptr_eq(&cached, &first));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_disable_clears_and_blocks() {
        let cache = PrototypeCache::new();
        let id = ClassId::from("Product::Standard");
        cache.put(id.clone(), controller());

        cache.set_enabled(false);
        assert!(cache.is_empty());

        cache.put(id.clone(), controller());
        assert!(cache.get(&id).is_none());
        assert!(cache.is_empty());

        cache.set_enabled(true);
        assert!(cache.get(&id).is_none());
    }

    #[test]
    fn test_inject_and_clear_slot() {
        let cache = PrototypeCache::new();
        let id = ClassId::from("Product::Standard");
        let injected = controller();

        cache.inject(id.clone(), Some(injected.clone()));
        assert!(Arc::ptr_eq(&cache.get(&id).unwrap(), &injected));

        cache.inject(id.clone(), None);
        assert!(cache.get(&id).is_none());
    }

    #[test]
    fn test_remove() {
        let cache = PrototypeCache::new();
        let id = ClassId::from("Basket::Standard");
        cache.put(id.clone(), controller());

        assert!(cache.remove(&id).is_some());
        assert!(cache.remove(&id).is_none());
    }
}
