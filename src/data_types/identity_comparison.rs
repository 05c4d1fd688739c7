
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

/// Partition of two identity sets into the entries unique to each side and the shared entries.
/// The three sets are disjoint and together cover the union of both inputs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IdentitySetComparison<K: Eq + Hash> {
    /// Entries only found in the first set
    only_in_first: FxHashSet<K>,
    /// Entries only found in the second set
    only_in_second: FxHashSet<K>,
    /// Entries found in both sets
    shared: FxHashSet<K>,
}

impl<K: Clone + Eq + Hash> IdentitySetComparison<K> {
    /// Compares two sets of identities.
    /// Works for any hashable identity, e.g. variant keys or relative file paths.
    /// # Arguments
    /// * `first` - identities from the first run
    /// * `second` - identities from the second run
    pub fn compare<S1: BuildHasher, S2: BuildHasher>(first: &HashSet<K, S1>, second: &HashSet<K, S2>) -> Self {
        let mut only_in_first: FxHashSet<K> = Default::default();
        let mut shared: FxHashSet<K> = Default::default();
        for identity in first.iter() {
            if second.contains(identity) {
                shared.insert(identity.clone());
            } else {
                only_in_first.insert(identity.clone());
            }
        }

        let only_in_second: FxHashSet<K> = second.iter()
            .filter(|identity| !first.contains(*identity))
            .cloned()
            .collect();

        Self {
            only_in_first,
            only_in_second,
            shared
        }
    }

    // getters
    pub fn only_in_first(&self) -> &FxHashSet<K> {
        &self.only_in_first
    }

    pub fn only_in_second(&self) -> &FxHashSet<K> {
        &self.only_in_second
    }

    pub fn shared(&self) -> &FxHashSet<K> {
        &self.shared
    }
}

impl<K: Clone + Eq + Hash + Ord> IdentitySetComparison<K> {
    /// Entries unique to the first set in sorted order, for reproducible output
    pub fn sorted_only_in_first(&self) -> Vec<&K> {
        self.only_in_first.iter().sorted().collect()
    }

    /// Entries unique to the second set in sorted order, for reproducible output
    pub fn sorted_only_in_second(&self) -> Vec<&K> {
        self.only_in_second.iter().sorted().collect()
    }

    /// Shared entries in sorted order, for reproducible output
    pub fn sorted_shared(&self) -> Vec<&K> {
        self.shared.iter().sorted().collect()
    }
}
