//! Object registry - WHERE objects live.
//!
//! `Objects` is the store itself: one ordered map per kind plus the identity
//! table. `ObjectRegistry` wraps it in a re-entrant lock so a document can be
//! shared across threads and compound operations run as one transaction.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use parking_lot::ReentrantMutex;
use tracing::trace;

use crate::core::error::ProjectError;
use crate::core::kind::ObjectKind;
use crate::core::object::{Object, ObjectVariant};
use crate::core::reference::{ObjectRef, ReferenceTable, RegistryId};

/// The object store of one document.
#[derive(Debug, Clone)]
pub struct Objects {
    refs: ReferenceTable,
    by_kind: BTreeMap<ObjectKind, BTreeMap<ObjectRef, Object>>,
    kind_of: HashMap<ObjectRef, ObjectKind>,
}

impl Objects {
    /// Create an empty store with a fresh registry identity.
    pub fn new() -> Self {
        Objects {
            refs: ReferenceTable::new(RegistryId::fresh()),
            by_kind: BTreeMap::new(),
            kind_of: HashMap::new(),
        }
    }

    pub fn registry_id(&self) -> RegistryId {
        self.refs.registry()
    }

    pub fn references(&self) -> &ReferenceTable {
        &self.refs
    }

    pub fn references_mut(&mut self) -> &mut ReferenceTable {
        &mut self.refs
    }

    /// The handle for `key`, interned for the lifetime of the store.
    pub fn get_or_create_reference(&mut self, key: &str) -> ObjectRef {
        self.refs.get_or_create(key)
    }

    /// The key of `reference`, if assigned.
    pub fn key(&self, reference: ObjectRef) -> Option<&str> {
        self.refs.key(reference)
    }

    /// Add a new object under a fresh handle.
    pub fn add(&mut self, object: impl Into<Object>) -> ObjectRef {
        let reference = self.refs.allocate();
        self.store(reference, object.into());
        reference
    }

    /// Store `object` under an existing handle of this store.
    ///
    /// If the handle already names an object (of any kind) that object is
    /// replaced and returned.
    pub fn insert(
        &mut self,
        reference: ObjectRef,
        object: impl Into<Object>,
    ) -> Result<Option<Object>, ProjectError> {
        let object = object.into();
        if !self.refs.owns(reference) {
            return Err(ProjectError::orphaned(object.kind(), reference));
        }
        let displaced = self.remove_entry(reference);
        self.store(reference, object);
        Ok(displaced)
    }

    /// Remove the object named by `reference`.
    ///
    /// The handle stays valid as an identity but no longer resolves.
    pub fn delete(&mut self, reference: ObjectRef) -> Option<Object> {
        let removed = self.remove_entry(reference);
        if let Some(object) = &removed {
            trace!(kind = %object.kind(), %reference, "deleted object");
        }
        removed
    }

    pub fn get(&self, reference: ObjectRef) -> Option<&Object> {
        if !self.refs.is_attached(reference) {
            return None;
        }
        let kind = self.kind_of.get(&reference)?;
        self.by_kind.get(kind)?.get(&reference)
    }

    pub fn get_mut(&mut self, reference: ObjectRef) -> Option<&mut Object> {
        if !self.refs.is_attached(reference) {
            return None;
        }
        let kind = self.kind_of.get(&reference)?;
        self.by_kind.get_mut(kind)?.get_mut(&reference)
    }

    /// Resolve `reference` to a typed record.
    pub fn get_as<T: ObjectVariant>(&self, reference: ObjectRef) -> Option<&T> {
        self.get(reference).and_then(T::extract)
    }

    pub fn get_as_mut<T: ObjectVariant>(&mut self, reference: ObjectRef) -> Option<&mut T> {
        self.get_mut(reference).and_then(T::extract_mut)
    }

    /// Resolve `reference` to a typed record or fail with `OrphanedObject`.
    pub fn require<T: ObjectVariant>(
        &self,
        reference: ObjectRef,
        kind: ObjectKind,
    ) -> Result<&T, ProjectError> {
        self.get_as(reference)
            .ok_or_else(|| ProjectError::orphaned(kind, reference))
    }

    pub fn require_mut<T: ObjectVariant>(
        &mut self,
        reference: ObjectRef,
        kind: ObjectKind,
    ) -> Result<&mut T, ProjectError> {
        self.get_as_mut(reference)
            .ok_or_else(|| ProjectError::orphaned(kind, reference))
    }

    pub fn kind_of(&self, reference: ObjectRef) -> Option<ObjectKind> {
        if self.refs.is_attached(reference) {
            self.kind_of.get(&reference).copied()
        } else {
            None
        }
    }

    pub fn contains(&self, reference: ObjectRef) -> bool {
        self.get(reference).is_some()
    }

    /// Every object, kinds in canonical order, handles in issue order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectRef, &Object)> {
        self.by_kind
            .values()
            .flat_map(|objects| objects.iter().map(|(r, o)| (*r, o)))
    }

    /// Objects of one kind, in issue order.
    pub fn of_kind(&self, kind: ObjectKind) -> impl Iterator<Item = (ObjectRef, &Object)> {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flat_map(|objects| objects.iter().map(|(r, o)| (*r, o)))
    }

    /// Visit every object in canonical order.
    pub fn for_each(&self, mut visit: impl FnMut(ObjectRef, &Object)) {
        for (reference, object) in self.iter() {
            visit(reference, object);
        }
    }

    /// Targets named `name`: native first, then legacy, then aggregate.
    pub fn targets_named(&self, name: &str) -> Vec<ObjectRef> {
        ObjectKind::TARGETS
            .iter()
            .flat_map(|&kind| self.of_kind(kind))
            .filter(|(_, object)| {
                <crate::core::objects::Target as ObjectVariant>::extract(object)
                    .is_some_and(|target| target.name == name)
            })
            .map(|(reference, _)| reference)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.kind_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kind_of.is_empty()
    }

    /// Detach every handle from its object.
    ///
    /// Run when a document is torn down so stale handles held elsewhere stop
    /// resolving.
    pub fn invalidate_references(&mut self) {
        let live: Vec<ObjectRef> = self.kind_of.keys().copied().collect();
        for reference in live {
            self.refs.detach(reference);
        }
        self.kind_of.clear();
        self.by_kind.clear();
    }

    fn store(&mut self, reference: ObjectRef, object: Object) {
        let kind = object.kind();
        self.by_kind
            .entry(kind)
            .or_default()
            .insert(reference, object);
        self.kind_of.insert(reference, kind);
        self.refs.attach(reference);
    }

    fn remove_entry(&mut self, reference: ObjectRef) -> Option<Object> {
        let kind = self.kind_of.remove(&reference)?;
        self.refs.detach(reference);
        let objects = self.by_kind.get_mut(&kind)?;
        let removed = objects.remove(&reference);
        if objects.is_empty() {
            self.by_kind.remove(&kind);
        }
        removed
    }
}

impl Default for Objects {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe owner of a document's objects.
///
/// Every public operation takes the re-entrant lock, so operations may nest
/// on one thread:
///
/// - queries nest inside queries and inside transactions; inside a
///   transaction they observe the last committed state
/// - a transaction nested inside a query fails with
///   [`ProjectError::EditDuringQuery`]
/// - a transaction whose store was changed by a nested operation fails with
///   [`ProjectError::ConflictingEdit`] and commits nothing
pub struct ObjectRegistry {
    id: RegistryId,
    inner: ReentrantMutex<Shared>,
}

struct Shared {
    objects: RefCell<Objects>,
    generation: Cell<u64>,
}

impl Shared {
    fn commit<R>(&self, f: impl FnOnce(&mut Objects) -> R) -> Result<R, ProjectError> {
        let mut objects = self
            .objects
            .try_borrow_mut()
            .map_err(|_| ProjectError::EditDuringQuery)?;
        let result = f(&mut objects);
        self.generation.set(self.generation.get() + 1);
        Ok(result)
    }
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::from_objects(Objects::new())
    }

    pub fn from_objects(objects: Objects) -> Self {
        ObjectRegistry {
            id: objects.registry_id(),
            inner: ReentrantMutex::new(Shared {
                objects: RefCell::new(objects),
                generation: Cell::new(0),
            }),
        }
    }

    pub fn id(&self) -> RegistryId {
        self.id
    }

    /// Run `f` with shared access under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&Objects) -> R) -> R {
        let guard = self.inner.lock();
        // Mutable borrows only live inside `write`, whose closures never
        // call back into the registry.
        let objects = guard.objects.borrow();
        f(&objects)
    }

    /// Run a short internal mutation in place.
    ///
    /// `f` must work only through the `Objects` it receives.
    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut Objects) -> R) -> Result<R, ProjectError> {
        self.inner.lock().commit(f)
    }

    /// Run `f` against a working copy and commit it if `f` succeeds.
    ///
    /// The working copy is a full clone of the store. Nothing is committed
    /// if `f` fails.
    pub fn transaction<R>(
        &self,
        f: impl FnOnce(&mut Objects) -> Result<R, ProjectError>,
    ) -> Result<R, ProjectError> {
        let guard = self.inner.lock();
        let generation = guard.generation.get();
        let mut working = guard.objects.borrow().clone();

        let value = f(&mut working)?;

        if guard.generation.get() != generation {
            return Err(ProjectError::ConflictingEdit);
        }
        guard.commit(|objects| *objects = working)?;
        Ok(value)
    }

    pub fn add(&self, object: impl Into<Object>) -> Result<ObjectRef, ProjectError> {
        self.write(|objects| objects.add(object))
    }

    pub fn insert(
        &self,
        reference: ObjectRef,
        object: impl Into<Object>,
    ) -> Result<Option<Object>, ProjectError> {
        self.write(|objects| objects.insert(reference, object))?
    }

    pub fn delete(&self, reference: ObjectRef) -> Result<Option<Object>, ProjectError> {
        self.write(|objects| objects.delete(reference))
    }

    /// A snapshot of the object named by `reference`.
    pub fn get(&self, reference: ObjectRef) -> Option<Object> {
        self.read(|objects| objects.get(reference).cloned())
    }

    pub fn contains(&self, reference: ObjectRef) -> bool {
        self.read(|objects| objects.contains(reference))
    }

    pub fn for_each(&self, visit: impl FnMut(ObjectRef, &Object)) {
        self.read(|objects| objects.for_each(visit))
    }

    pub fn targets_named(&self, name: &str) -> Vec<ObjectRef> {
        self.read(|objects| objects.targets_named(name))
    }

    pub fn len(&self) -> usize {
        self.read(Objects::len)
    }

    pub fn is_empty(&self) -> bool {
        self.read(Objects::is_empty)
    }

    /// Take the store out, leaving an empty one behind.
    pub fn into_objects(self) -> Objects {
        self.inner.into_inner().objects.into_inner()
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("id", &self.id)
            .field("len", &self.len())
            .finish()
    }
}
