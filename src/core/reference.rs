//! Object identity - WHICH object a field points at.
//!
//! An `ObjectRef` is a small `Copy` handle into a `ReferenceTable`. The table
//! owns the per-reference state (the 24-character key once assigned, the
//! optional disambiguation context, and whether the reference is attached to
//! a live object). Handles from one table never resolve in another.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh registry identities.
static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one object registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryId(u64);

impl RegistryId {
    /// Allocate a registry identity that has never been handed out before.
    pub fn fresh() -> Self {
        RegistryId(NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A handle naming one object of one registry.
///
/// Cheap to copy, compare and hash. Two handles are equal exactly when they
/// name the same slot of the same registry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    registry: RegistryId,
    slot: u32,
}

impl ObjectRef {
    /// The registry this handle belongs to.
    pub fn registry(&self) -> RegistryId {
        self.registry
    }

    pub(crate) fn slot(&self) -> usize {
        self.slot as usize
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef(#{}@{})", self.slot, self.registry.0)
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.slot)
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    key: Option<String>,
    context: Option<String>,
    attached: bool,
}

/// Per-registry identity table.
///
/// Keys are interned: asking twice for the same key yields the same handle.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    registry: RegistryId,
    slots: Vec<Slot>,
    by_key: HashMap<String, ObjectRef>,
}

impl ReferenceTable {
    /// Create an empty table for the given registry.
    pub fn new(registry: RegistryId) -> Self {
        ReferenceTable {
            registry,
            slots: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    pub fn registry(&self) -> RegistryId {
        self.registry
    }

    /// Number of handles ever issued by this table.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `reference` was issued by this table.
    pub fn owns(&self, reference: ObjectRef) -> bool {
        reference.registry == self.registry && reference.slot() < self.slots.len()
    }

    /// Issue a fresh handle with no key yet.
    pub fn allocate(&mut self) -> ObjectRef {
        let reference = ObjectRef {
            registry: self.registry,
            slot: self.slots.len() as u32,
        };
        self.slots.push(Slot::default());
        reference
    }

    /// Return the handle for `key`, creating it on first use.
    pub fn get_or_create(&mut self, key: &str) -> ObjectRef {
        if let Some(&existing) = self.by_key.get(key) {
            return existing;
        }
        let reference = self.allocate();
        self.slots[reference.slot()].key = Some(key.to_string());
        self.by_key.insert(key.to_string(), reference);
        reference
    }

    /// Find the handle already carrying `key`.
    pub fn lookup(&self, key: &str) -> Option<ObjectRef> {
        self.by_key.get(key).copied()
    }

    /// The key of `reference`, if one has been assigned.
    pub fn key(&self, reference: ObjectRef) -> Option<&str> {
        self.slot(reference).and_then(|slot| slot.key.as_deref())
    }

    /// Assign `key` to a handle that has none.
    ///
    /// Returns `false` when the handle already has a key or another handle
    /// already carries `key`.
    pub fn assign_key(&mut self, reference: ObjectRef, key: String) -> bool {
        if !self.owns(reference) || self.by_key.contains_key(&key) {
            return false;
        }
        let slot = &mut self.slots[reference.slot()];
        if slot.key.is_some() {
            return false;
        }
        slot.key = Some(key.clone());
        self.by_key.insert(key, reference);
        true
    }

    /// Whether `key` is already carried by some handle.
    pub fn is_key_taken(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn context(&self, reference: ObjectRef) -> Option<&str> {
        self.slot(reference).and_then(|slot| slot.context.as_deref())
    }

    /// Set the disambiguation context used when a key is generated.
    pub fn set_context(&mut self, reference: ObjectRef, context: Option<String>) {
        if self.owns(reference) {
            self.slots[reference.slot()].context = context;
        }
    }

    /// Whether `reference` currently names a live object.
    pub fn is_attached(&self, reference: ObjectRef) -> bool {
        self.slot(reference).is_some_and(|slot| slot.attached)
    }

    pub(crate) fn attach(&mut self, reference: ObjectRef) {
        if self.owns(reference) {
            self.slots[reference.slot()].attached = true;
        }
    }

    pub(crate) fn detach(&mut self, reference: ObjectRef) {
        if self.owns(reference) {
            self.slots[reference.slot()].attached = false;
        }
    }

    /// Handles that are attached but have no key yet, in issue order.
    pub fn unkeyed(&self) -> Vec<ObjectRef> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.attached && slot.key.is_none())
            .map(|(index, _)| ObjectRef {
                registry: self.registry,
                slot: index as u32,
            })
            .collect()
    }

    fn slot(&self, reference: ObjectRef) -> Option<&Slot> {
        if self.owns(reference) {
            self.slots.get(reference.slot())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_interns_keys() {
        let mut table = ReferenceTable::new(RegistryId::fresh());
        let a = table.get_or_create("AAAAAAAAAAAAAAAAAAAAAAAA");
        let b = table.get_or_create("AAAAAAAAAAAAAAAAAAAAAAAA");
        let c = table.get_or_create("BBBBBBBBBBBBBBBBBBBBBBBB");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(table.len(), 2);
        assert_eq!(table.key(a), Some("AAAAAAAAAAAAAAAAAAAAAAAA"));
    }

    #[test]
    fn test_foreign_handles_do_not_resolve() {
        let mut first = ReferenceTable::new(RegistryId::fresh());
        let second = ReferenceTable::new(RegistryId::fresh());
        let reference = first.get_or_create("KEY");

        assert!(first.owns(reference));
        assert!(!second.owns(reference));
        assert_eq!(second.key(reference), None);
    }

    #[test]
    fn test_assign_key_once() {
        let mut table = ReferenceTable::new(RegistryId::fresh());
        let taken = table.get_or_create("TAKEN");
        let fresh = table.allocate();

        assert_eq!(table.key(fresh), None);
        assert!(!table.assign_key(fresh, "TAKEN".to_string()));
        assert!(table.assign_key(fresh, "FRESH".to_string()));
        assert!(!table.assign_key(fresh, "OTHER".to_string()));
        assert_eq!(table.lookup("FRESH"), Some(fresh));
        assert_eq!(table.lookup("TAKEN"), Some(taken));
    }

    #[test]
    fn test_unkeyed_lists_attached_handles_only() {
        let mut table = ReferenceTable::new(RegistryId::fresh());
        let keyed = table.get_or_create("KEY");
        let attached = table.allocate();
        let _detached = table.allocate();
        table.attach(keyed);
        table.attach(attached);

        assert_eq!(table.unkeyed(), vec![attached]);

        table.detach(attached);
        assert!(table.unkeyed().is_empty());
        assert!(!table.is_attached(attached));
    }

    #[test]
    fn test_context() {
        let mut table = ReferenceTable::new(RegistryId::fresh());
        let reference = table.allocate();
        table.set_context(reference, Some("Debug".to_string()));
        assert_eq!(table.context(reference), Some("Debug"));
    }
}
