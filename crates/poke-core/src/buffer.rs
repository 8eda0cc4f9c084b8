//! Owned growable array with an explicit, swappable growth policy.
//!
//! `GrowableArray` keeps two numbers apart: `count`, the elements written so
//! far, and `capacity`, the slots reserved by the last growth step. The
//! capacity is whatever the policy chose, not what the allocator rounded it
//! up to, so growth stays observable and deterministic.
//!
//! Storage is a `Vec<T>` whose length is always `count`. Growing reserves
//! room for exactly the new capacity in one fallible call; on failure nothing
//! changes.

use core::slice;

use crate::memory::{required_capacity, Doubling, GrowthPolicy};
use crate::{CoreError, CoreResult};

/// Growable array driven by a [`GrowthPolicy`].
///
/// Invariant: `count <= capacity`, and `capacity == 0` means no allocation.
#[derive(Debug, PartialEq, Eq)]
pub struct GrowableArray<T, P = Doubling> {
    data: Vec<T>,
    capacity: usize,
    policy: P,
}

impl<T> GrowableArray<T> {
    /// Empty array using the default doubling policy. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_policy(Doubling::new(
            crate::memory::MIN_CAPACITY,
            crate::memory::GROWTH_FACTOR,
        ))
    }
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> GrowableArray<T, P> {
    /// Empty array using `policy`. Does not allocate.
    pub const fn with_policy(policy: P) -> Self {
        Self { data: Vec::new(), capacity: 0, policy }
    }

    /// Number of elements written.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Alias of [`len`](Self::len), in VM vocabulary.
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Slots reserved by the last growth step.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Written elements, in order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Element at `index`, if written.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Iterate over written elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Growth policy in use.
    pub const fn policy(&self) -> &P {
        &self.policy
    }

    /// Release the storage and return to the freshly created state.
    pub fn free(&mut self) {
        self.data = Vec::new();
        self.capacity = 0;
    }
}

impl<T, P: GrowthPolicy> GrowableArray<T, P> {
    /// Append one element, growing first if the array is full.
    ///
    /// # Errors
    /// [`CoreError::CapacityOverflow`] if the policy does not grow past the
    /// current capacity, [`CoreError::AllocationFailed`] if the allocator
    /// refuses the new storage. The array is unchanged in both cases.
    pub fn push(&mut self, value: T) -> CoreResult<()> {
        let count = self.data.len();
        if self.capacity < count + 1 {
            let next = self.policy.next_capacity(self.capacity);
            if next <= self.capacity {
                return Err(CoreError::CapacityOverflow { count });
            }
            self.reallocate(next)?;
        }
        self.data.push(value);
        debug_assert!(self.data.len() <= self.capacity);
        Ok(())
    }

    /// Swap the storage for one holding exactly `new_capacity` slots.
    fn reallocate(&mut self, new_capacity: usize) -> CoreResult<()> {
        debug_assert!(new_capacity > self.capacity);
        let additional = new_capacity - self.data.len();
        self.data
            .try_reserve_exact(additional)
            .map_err(|_| CoreError::AllocationFailed { requested: new_capacity })?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            old = self.capacity,
            new = new_capacity,
            count = self.data.len(),
            "grow"
        );

        self.capacity = new_capacity;
        Ok(())
    }
}

impl<T: Clone, P: GrowthPolicy> GrowableArray<T, P> {
    /// Append every element of `values`, growing at most once.
    ///
    /// The new capacity is the policy applied as many times as needed to fit
    /// the whole slice. An empty slice never allocates.
    ///
    /// # Errors
    /// Same as [`push`](Self::push); nothing is appended on error.
    pub fn extend_from_slice(&mut self, values: &[T]) -> CoreResult<()> {
        let count = self.data.len();
        let required = count
            .checked_add(values.len())
            .ok_or(CoreError::CapacityOverflow { count })?;
        if self.capacity < required {
            let next = required_capacity(&self.policy, self.capacity, required)
                .ok_or(CoreError::CapacityOverflow { count })?;
            self.reallocate(next)?;
        }
        self.data.extend_from_slice(values);
        debug_assert!(self.data.len() <= self.capacity);
        Ok(())
    }
}

/// The clone reserves the full logical capacity of the source.
impl<T: Clone, P: Clone> Clone for GrowableArray<T, P> {
    fn clone(&self) -> Self {
        let mut data = Vec::with_capacity(self.capacity);
        data.extend_from_slice(&self.data);
        Self { data, capacity: self.capacity, policy: self.policy.clone() }
    }
}

impl<'a, T, P> IntoIterator for &'a GrowableArray<T, P> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
