//! Join flow: read assigned slots, allocate, persist.

use crate::allocator::{self, AllocationError};
use crate::error::{AppError, AppResult, RepositoryError};
use crate::models::{Group, Membership, NewMembership};
use crate::repositories::{GroupStore, MembershipStore, ProfileStore};
use crate::services::AuditTrailService;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Seat map of a group
#[derive(Debug, Clone, Serialize)]
pub struct GroupSeating {
    pub group: Group,
    pub taken_slots: Vec<i32>,
    pub free_slots: Vec<i32>,
}

/// Service for assigning users to group slots
pub struct MembershipService {
    groups: Arc<dyn GroupStore>,
    profiles: Arc<dyn ProfileStore>,
    memberships: Arc<dyn MembershipStore>,
    audit: Arc<AuditTrailService>,
}

impl MembershipService {
    pub fn new(
        groups: Arc<dyn GroupStore>,
        profiles: Arc<dyn ProfileStore>,
        memberships: Arc<dyn MembershipStore>,
        audit: Arc<AuditTrailService>,
    ) -> Self {
        Self {
            groups,
            profiles,
            memberships,
            audit,
        }
    }

    async fn load_group(&self, group_id: Uuid) -> AppResult<Group> {
        self.groups
            .find_group(group_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", group_id)))
    }

    async fn taken_slots(&self, group_id: Uuid) -> AppResult<BTreeSet<i32>> {
        let slots = self.memberships.assigned_slots(group_id).await?;
        Ok(slots.into_iter().collect())
    }

    /// Add a user to a group, either in `requested_slot` or the smallest free slot.
    ///
    /// Allocation failures come back as [`AppError::Allocation`]; storage
    /// failures keep their own variants. A concurrent join that wins the race
    /// for the same seat (or the last seat) is reported as `SlotTaken` /
    /// `CapacityExceeded` by the storage constraints.
    pub async fn join_group(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        requested_slot: Option<i32>,
    ) -> AppResult<Membership> {
        let group = self.load_group(group_id).await?;

        if !self.profiles.profile_exists(user_id).await? {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        let taken = self.taken_slots(group_id).await?;
        let slot_number = allocator::allocate_slot(group.max_slots, &taken, requested_slot)
            .map_err(|e| {
                info!(group_id = %group_id, user_id = %user_id, "Join rejected: {}", e);
                e
            })?;

        let new = NewMembership {
            group_id,
            user_id,
            slot_number,
        };

        let membership = self
            .memberships
            .insert_membership(&new)
            .await
            .map_err(|e| match e {
                RepositoryError::Duplicate(_) => {
                    warn!(group_id = %group_id, slot_number, "Slot claimed concurrently");
                    AppError::Allocation(AllocationError::SlotTaken {
                        requested: slot_number,
                    })
                }
                RepositoryError::GroupFull(_) => {
                    warn!(group_id = %group_id, "Group filled concurrently");
                    AppError::Allocation(AllocationError::CapacityExceeded {
                        capacity: group.max_slots,
                    })
                }
                other => other.into(),
            })?;

        info!(
            group_id = %group_id,
            user_id = %user_id,
            slot_number = membership.slot_number,
            "Member joined group"
        );
        self.audit.log_member_joined(&membership, requested_slot).await;

        Ok(membership)
    }

    /// Members of a group ordered by slot
    pub async fn members_of(&self, group_id: Uuid) -> AppResult<Vec<Membership>> {
        self.load_group(group_id).await?;
        Ok(self.memberships.group_memberships(group_id).await?)
    }

    /// Every slot a user holds, across groups
    pub async fn memberships_of(&self, user_id: Uuid) -> AppResult<Vec<Membership>> {
        Ok(self.memberships.user_memberships(user_id).await?)
    }

    pub async fn set_payment_verified(
        &self,
        membership_id: Uuid,
        verified: bool,
    ) -> AppResult<Membership> {
        let membership = self
            .memberships
            .mark_payment_verified(membership_id, verified)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Membership {} not found", membership_id))
            })?;

        info!(
            membership_id = %membership_id,
            verified,
            "Membership payment verification updated"
        );
        Ok(membership)
    }

    /// Taken and free slots of a group
    pub async fn seating(&self, group_id: Uuid) -> AppResult<GroupSeating> {
        let group = self.load_group(group_id).await?;
        let taken = self.taken_slots(group_id).await?;
        let free_slots = allocator::free_slots(group.max_slots, &taken).collect();

        Ok(GroupSeating {
            group,
            taken_slots: taken.into_iter().collect(),
            free_slots,
        })
    }
}
