//! Pure functions for the two halves of enrichment.
//!
//! The I/O between them (the identity lookups) lives in the `wayfare` crate.

use std::collections::{BTreeSet, HashMap};

use crate::identity::{DisplayIdentity, UserId};

use super::IdentityRefs;

/// Collects the distinct identifiers referenced anywhere in `items`.
pub fn collect_identifiers<T: IdentityRefs>(items: &[T]) -> BTreeSet<UserId> {
    items
        .iter()
        .flat_map(|item| item.user_refs())
        .map(|r| r.id.clone())
        .collect()
}

/// Attaches resolved identities to every reference in `items`.
///
/// Returns the sorted, deduplicated ids that have no entry in `identities`.
/// When any id is missing, `items` is left untouched.
pub fn apply_identities<T: IdentityRefs>(
    items: &mut [T],
    identities: &HashMap<UserId, DisplayIdentity>,
) -> Result<(), Vec<UserId>> {
    let missing: BTreeSet<UserId> = items
        .iter()
        .flat_map(|item| item.user_refs())
        .filter(|r| !identities.contains_key(&r.id))
        .map(|r| r.id.clone())
        .collect();

    if !missing.is_empty() {
        return Err(missing.into_iter().collect());
    }

    for reference in items.iter_mut().flat_map(|item| item.user_refs_mut()) {
        reference.identity = identities.get(&reference.id).cloned();
    }

    Ok(())
}
