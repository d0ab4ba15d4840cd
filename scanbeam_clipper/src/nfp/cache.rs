use std::collections::{hash_map::Entry, HashMap, HashSet};

use log::debug;

use crate::core::math::Paths;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
/// Identity of a no-fit polygon: the two parts, their rotations and the placement mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NfpKey {
    pub a: u32,
    pub b: u32,
    pub inside: bool,
    pub a_rotation: u16,
    pub b_rotation: u16,
}

impl NfpKey {
    #[inline]
    pub fn new(a: u32, b: u32, inside: bool, a_rotation: u16, b_rotation: u16) -> Self {
        Self {
            a,
            b,
            inside,
            a_rotation,
            b_rotation,
        }
    }
}

/// Generational no-fit polygon cache.
///
/// Every placement cycle is bracketed by [NfpCache::begin_generation] and
/// [NfpCache::finish_generation]. Keys requested during the cycle are either carried over from
/// the previous generation or queued (once per unique key) for computation; when the generation
/// finishes, anything not requested during it is dropped.
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::path;
/// # use scanbeam_clipper::nfp::*;
/// let mut cache = NfpCache::new();
/// let key = NfpKey::new(1, 2, false, 0, 90);
///
/// cache.begin_generation();
/// assert!(cache.request(key).is_none());
/// assert!(cache.request(key).is_none());
/// assert_eq!(cache.pending(), &[key]);
/// cache.finish_generation(vec![(key, Some(vec![path![(0, 0), (1, 0), (1, 1)]]))]);
///
/// cache.begin_generation();
/// assert!(cache.request(key).is_some());
/// assert!(cache.pending().is_empty());
/// cache.finish_generation(Vec::new());
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct NfpCache<V = Paths> {
    entries: HashMap<NfpKey, V>,
    next: HashMap<NfpKey, V>,
    pending: Vec<NfpKey>,
    pending_set: HashSet<NfpKey>,
    generation: u64,
}

impl<V> Default for NfpCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next: HashMap::new(),
            pending: Vec::new(),
            pending_set: HashSet::new(),
            generation: 0,
        }
    }
}

impl<V> NfpCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new cycle. Pending keys of an unfinished cycle are discarded, its hits are kept.
    pub fn begin_generation(&mut self) {
        self.entries.extend(self.next.drain());
        self.pending.clear();
        self.pending_set.clear();
    }

    /// Look up `key` for the current cycle.
    ///
    /// On a hit the entry is kept for the next generation and returned. On a miss the key is
    /// queued for computation (once) and `None` is returned.
    pub fn request(&mut self, key: NfpKey) -> Option<&V> {
        if !self.next.contains_key(&key) {
            match self.entries.remove(&key) {
                Some(value) => {
                    self.next.insert(key, value);
                }
                None => {
                    if self.pending_set.insert(key) {
                        self.pending.push(key);
                    }
                    return None;
                }
            }
        }
        self.next.get(&key)
    }

    /// Keys queued for computation in the current cycle, in request order.
    #[inline]
    pub fn pending(&self) -> &[NfpKey] {
        &self.pending
    }

    /// Commit the cycle: computed results are inserted (a `None` result, i.e. a failed
    /// derivation, is not cached) and entries not requested this cycle are dropped.
    pub fn finish_generation<I>(&mut self, results: I)
    where
        I: IntoIterator<Item = (NfpKey, Option<V>)>,
    {
        for (key, value) in results {
            let Some(value) = value else {
                continue;
            };
            if let Entry::Vacant(e) = self.next.entry(key) {
                e.insert(value);
            }
        }

        let dropped = self.entries.len();
        self.entries = std::mem::take(&mut self.next);
        self.pending.clear();
        self.pending_set.clear();
        self.generation += 1;
        debug!(
            "nfp cache generation {} committed with {} entries, {} dropped",
            self.generation,
            self.entries.len(),
            dropped
        );
    }

    /// Entry for `key` if committed or carried into the current cycle, without requesting it.
    #[inline]
    pub fn get(&self, key: &NfpKey) -> Option<&V> {
        self.entries.get(key).or_else(|| self.next.get(key))
    }

    /// Number of committed generations.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.next.clear();
        self.pending.clear();
        self.pending_set.clear();
    }
}
