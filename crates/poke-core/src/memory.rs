//! Capacity growth policy shared by every growable buffer of the VM.
//!
//! The default rule is a doubling with a floor: below [`MIN_CAPACITY`] the
//! next capacity is the floor itself, otherwise it is the current capacity
//! times [`GROWTH_FACTOR`].

/// Smallest non-zero capacity handed out by the default policy.
pub const MIN_CAPACITY: usize = 8;

/// Multiplier applied once a buffer has reached [`MIN_CAPACITY`].
pub const GROWTH_FACTOR: usize = 2;

/// Next capacity for a full buffer holding `capacity` slots.
///
/// Saturates at `usize::MAX` rather than wrapping.
#[must_use]
pub const fn grow_capacity(capacity: usize) -> usize {
    if capacity < MIN_CAPACITY {
        return MIN_CAPACITY;
    }
    capacity.saturating_mul(GROWTH_FACTOR)
}

/// Decides how much room a full buffer gets next.
pub trait GrowthPolicy {
    /// Capacity to grow to from `current`.
    fn next_capacity(&self, current: usize) -> usize;
}

/// Geometric growth with a floor, parameterized.
///
/// `Doubling::default()` is the same rule as [`grow_capacity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Doubling {
    /// Floor returned while the current capacity is below it.
    pub minimum: usize,
    /// Multiplier applied at or above the floor.
    pub factor: usize,
}

impl Doubling {
    /// Policy with a custom floor and multiplier.
    ///
    /// No validation happens here: a policy that cannot make progress
    /// (`factor <= 1` with a floor already reached) is reported by the buffer
    /// as [`CoreError::CapacityOverflow`](crate::CoreError::CapacityOverflow)
    /// when it is asked to grow.
    #[must_use]
    pub const fn new(minimum: usize, factor: usize) -> Self {
        Self { minimum, factor }
    }
}

impl Default for Doubling {
    fn default() -> Self {
        Self::new(MIN_CAPACITY, GROWTH_FACTOR)
    }
}

impl GrowthPolicy for Doubling {
    fn next_capacity(&self, current: usize) -> usize {
        if current < self.minimum {
            return self.minimum;
        }
        current.saturating_mul(self.factor)
    }
}

impl<P: GrowthPolicy + ?Sized> GrowthPolicy for &P {
    fn next_capacity(&self, current: usize) -> usize {
        (**self).next_capacity(current)
    }
}

/// Capacity reached by applying `policy` repeatedly from `current` until it
/// holds at least `required` slots.
///
/// Returns `current` untouched when it is already large enough, and `None`
/// when the policy stops growing before `required` is reached. Bulk appends
/// go through this instead of a single policy step, so a request larger than
/// one step never under-allocates.
pub fn required_capacity<P: GrowthPolicy + ?Sized>(
    policy: &P,
    current: usize,
    required: usize,
) -> Option<usize> {
    let mut capacity = current;
    while capacity < required {
        let next = policy.next_capacity(capacity);
        if next <= capacity {
            return None;
        }
        capacity = next;
    }
    Some(capacity)
}
