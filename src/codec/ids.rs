//! Deterministic key assignment for objects created in memory.
//!
//! Objects reachable from the root are visited depth-first in field order.
//! An unkeyed object gets the fingerprint of its parent's key, its `isa`, its
//! identity (name, path, product...) and its reference context. Unreachable
//! objects follow, sorted by kind and identity. On a collision the
//! fingerprint is re-hashed with an increasing counter. The result depends
//! only on graph content, so encoding twice yields the same keys.

use std::collections::HashSet;

use tracing::debug;

use crate::core::object::Object;
use crate::core::reference::ObjectRef;
use crate::core::registry::Objects;
use crate::util::hash::Fingerprint;

const ROOT_SEED: &str = "rootObject";
const ORPHAN_SEED: &str = "orphan";

/// Give every live, unkeyed object a key. Returns how many were assigned.
pub(crate) fn assign_missing_keys(objects: &mut Objects, root: ObjectRef) -> usize {
    if objects.references().unkeyed().is_empty() {
        return 0;
    }

    let mut assigned = 0;
    let mut visited = HashSet::new();
    let mut stack = vec![(root, ROOT_SEED.to_string())];
    while let Some((reference, parent_key)) = stack.pop() {
        if !visited.insert(reference) {
            continue;
        }
        let Some(object) = objects.get(reference) else {
            continue;
        };
        let children = object.references();
        let key = match objects.key(reference).map(str::to_string) {
            Some(key) => key,
            None => {
                assigned += 1;
                assign(objects, reference, &parent_key)
            }
        };
        for child in children.into_iter().rev() {
            stack.push((child, key.clone()));
        }
    }

    let mut orphans: Vec<(ObjectRef, String)> = objects
        .references()
        .unkeyed()
        .into_iter()
        .filter_map(|reference| {
            let object = objects.get(reference)?;
            Some((reference, format!("{}\0{}", object.kind().isa(), identity(objects, object))))
        })
        .collect();
    orphans.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
    for (reference, _) in orphans {
        assigned += 1;
        assign(objects, reference, ORPHAN_SEED);
    }

    debug!(assigned, "assigned object keys");
    assigned
}

fn assign(objects: &mut Objects, reference: ObjectRef, parent_key: &str) -> String {
    let base = {
        let mut fp = Fingerprint::new();
        fp.update_str(parent_key);
        if let Some(object) = objects.get(reference) {
            fp.update_str(object.kind().isa())
                .update_str(&identity(objects, object));
        }
        fp.update_opt(objects.references().context(reference));
        fp.finish()
    };

    let mut key = candidate(&base, 0);
    let mut attempt = 0;
    while objects.references().is_key_taken(&key) {
        attempt += 1;
        key = candidate(&base, attempt);
    }
    objects.references_mut().assign_key(reference, key.clone());
    key
}

fn candidate(base: &str, attempt: u64) -> String {
    let mut fp = Fingerprint::new();
    fp.update_str(base).update_u64(attempt);
    fp.finish_key()
}

/// The content that distinguishes an object from its siblings.
fn identity(objects: &Objects, object: &Object) -> String {
    if let Some(name) = object.name() {
        return name;
    }
    let named = |reference: Option<ObjectRef>| {
        reference
            .and_then(|r| objects.get(r))
            .and_then(Object::name)
            .unwrap_or_default()
    };
    match object {
        Object::BuildFile(file) => named(file.file_ref.or(file.product_ref)),
        Object::ContainerItemProxy(proxy) => proxy.remote_info.clone().unwrap_or_default(),
        Object::BuildFileExceptionSet(set) => named(set.target),
        Object::MembershipExceptionSet(set) => named(set.build_phase),
        Object::ConfigurationList(list) => list
            .default_configuration_name
            .clone()
            .unwrap_or_default(),
        _ => String::new(),
    }
}
