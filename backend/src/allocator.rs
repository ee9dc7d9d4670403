//! Slot allocation for savings groups.
//!
//! A group has `max_slots` numbered seats (1-based). Deciding whether a join
//! request gets a seat, and which one, is a pure function of the group's
//! capacity and the slot numbers already taken. Persisting the result is the
//! caller's job.

use std::collections::BTreeSet;
use thiserror::Error;

/// Reasons a slot request is rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationError {
    /// The group already holds `capacity` memberships
    #[error("Group is full: all {capacity} slots are taken")]
    CapacityExceeded { capacity: i32 },

    /// The requested slot lies outside `[1, capacity]`
    #[error("Slot {requested} is out of range (1..={capacity})")]
    OutOfRange { requested: i32, capacity: i32 },

    /// The requested slot is already assigned
    #[error("Slot {requested} is already taken")]
    SlotTaken { requested: i32 },
}

/// Result type for slot allocation
pub type AllocationResult<T> = Result<T, AllocationError>;

/// Decide which slot a join request receives.
///
/// The capacity check runs first, so a full group reports
/// [`AllocationError::CapacityExceeded`] even when the requested slot is also
/// invalid. Without a requested slot the smallest free slot is returned.
///
/// # Arguments
/// * `capacity` - The group's `max_slots`
/// * `existing` - Slot numbers already assigned in the group
/// * `requested` - A specific slot asked for by the caller, if any
pub fn allocate_slot(
    capacity: i32,
    existing: &BTreeSet<i32>,
    requested: Option<i32>,
) -> AllocationResult<i32> {
    if existing.len() as i64 >= i64::from(capacity) {
        return Err(AllocationError::CapacityExceeded { capacity });
    }

    match requested {
        Some(slot) => {
            if slot < 1 || slot > capacity {
                return Err(AllocationError::OutOfRange {
                    requested: slot,
                    capacity,
                });
            }
            if existing.contains(&slot) {
                return Err(AllocationError::SlotTaken { requested: slot });
            }
            Ok(slot)
        }
        // Unreachable by pigeonhole once the count check passed
        None => free_slots(capacity, existing)
            .next()
            .ok_or(AllocationError::CapacityExceeded { capacity }),
    }
}

/// Free slots of a group in ascending order
pub fn free_slots(capacity: i32, existing: &BTreeSet<i32>) -> impl Iterator<Item = i32> + '_ {
    (1..=capacity.max(0)).filter(move |slot| !existing.contains(slot))
}
