//! Ordered fragment storage for one chapter.
//!
//! The store owns the identity and ordering invariants: fragment ids are
//! unique, and iteration ascends strictly by `order`. Clip intervals are
//! not checked for overlap; overlapping edits are a caller error that the
//! store surfaces rather than rejects.

use super::types::{Fragment, FragmentError, FragmentResult};

/// The ordered set of alignment fragments for one chapter.
///
/// Held in memory for the lifetime of an editing session; persisted only
/// through the media overlay codec on export.
#[derive(Debug, Clone, Default)]
pub struct FragmentStore {
    /// Fragments, kept sorted ascending by `order`.
    fragments: Vec<Fragment>,
}

impl FragmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an existing fragment list.
    ///
    /// Fragments are sorted by their current `order` (stable, so document
    /// order wins between equal values) and renumbered sequentially from 1
    /// to re-establish the strict-increase invariant.
    pub fn from_fragments(fragments: Vec<Fragment>) -> FragmentResult<Self> {
        let mut fragments = fragments;
        fragments.sort_by_key(|f| f.order);
        for (i, frag) in fragments.iter_mut().enumerate() {
            frag.order = (i + 1) as u32;
        }

        for i in 0..fragments.len() {
            for j in (i + 1)..fragments.len() {
                if fragments[i].id == fragments[j].id {
                    return Err(FragmentError::DuplicateId(fragments[i].id.clone()));
                }
            }
        }

        Ok(Self { fragments })
    }

    /// Number of fragments in the store.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the store holds no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Iterate fragments in ascending `order`.
    pub fn iter(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter()
    }

    /// The fragments as an ordered slice.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Look up a fragment by id.
    pub fn get(&self, id: &str) -> FragmentResult<&Fragment> {
        self.fragments
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| FragmentError::NotFound(id.to_string()))
    }

    /// Whether a fragment with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.fragments.iter().any(|f| f.id == id)
    }

    /// Mutable lookup, for edit operations in this module tree.
    ///
    /// Not public: callers outside the crate go through the edit
    /// operations, which keep the ordering invariant intact.
    pub(crate) fn get_mut(&mut self, id: &str) -> FragmentResult<&mut Fragment> {
        self.fragments
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| FragmentError::NotFound(id.to_string()))
    }

    /// Mutable iteration in ascending `order`, for bulk edits.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Fragment> {
        self.fragments.iter_mut()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.fragments.iter().position(|f| f.id == id)
    }

    /// Replace the fragment at `id` with `fragment`, keeping its position.
    ///
    /// The replacement takes over the old fragment's `order` value; its own
    /// `order` field on entry is ignored. The replacement may carry a new
    /// id, as long as that id is not already taken by another fragment.
    pub fn replace(&mut self, id: &str, mut fragment: Fragment) -> FragmentResult<()> {
        let idx = self
            .position(id)
            .ok_or_else(|| FragmentError::NotFound(id.to_string()))?;

        if fragment.id != id && self.contains(&fragment.id) {
            return Err(FragmentError::DuplicateId(fragment.id));
        }

        fragment.order = self.fragments[idx].order;
        self.fragments[idx] = fragment;
        Ok(())
    }

    /// Insert `fragment` immediately after the fragment at `id`.
    ///
    /// The new fragment's `order` is assigned strictly between its
    /// neighbors, reusing a gap when one exists and otherwise shifting
    /// every later fragment up by one. Appending after the last fragment
    /// takes the last `order` plus one.
    ///
    /// Returns the inserted fragment's id.
    pub fn insert_after(&mut self, id: &str, mut fragment: Fragment) -> FragmentResult<String> {
        let idx = self
            .position(id)
            .ok_or_else(|| FragmentError::NotFound(id.to_string()))?;

        if self.contains(&fragment.id) {
            return Err(FragmentError::DuplicateId(fragment.id));
        }

        let ref_order = self.fragments[idx].order;
        match self.fragments.get(idx + 1).map(|f| f.order) {
            None => {
                fragment.order = ref_order + 1;
            }
            Some(next_order) if next_order > ref_order + 1 => {
                fragment.order = ref_order + 1;
            }
            Some(_) => {
                for later in &mut self.fragments[idx + 1..] {
                    later.order += 1;
                }
                fragment.order = ref_order + 1;
            }
        }

        let new_id = fragment.id.clone();
        self.fragments.insert(idx + 1, fragment);
        Ok(new_id)
    }

    /// Remove and return the fragment at `id`.
    ///
    /// Remaining fragments keep their `order` values; removal cannot break
    /// the strict-increase invariant.
    pub fn remove(&mut self, id: &str) -> FragmentResult<Fragment> {
        let idx = self
            .position(id)
            .ok_or_else(|| FragmentError::NotFound(id.to_string()))?;
        Ok(self.fragments.remove(idx))
    }
}
