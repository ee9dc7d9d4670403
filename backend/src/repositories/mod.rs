pub mod account_repository;
pub mod group_repository;
pub mod membership_repository;
pub mod payment_repository;
pub mod profile_repository;

// Re-export all repositories for convenient access
pub use account_repository::AccountRepository;
pub use group_repository::GroupRepository;
pub use membership_repository::MembershipRepository;
pub use payment_repository::PaymentRepository;
pub use profile_repository::ProfileRepository;

use crate::error::RepositoryResult;
use crate::models::{Group, Membership, NewMembership};
use async_trait::async_trait;
use uuid::Uuid;

/// Group lookup used by the join flow
#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn find_group(&self, id: Uuid) -> RepositoryResult<Option<Group>>;
}

/// Slot read and write operations the join flow needs from storage
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Slot numbers currently assigned in a group
    async fn assigned_slots(&self, group_id: Uuid) -> RepositoryResult<Vec<i32>>;

    /// Persist a membership for an allocated slot
    async fn insert_membership(&self, new: &NewMembership) -> RepositoryResult<Membership>;

    /// Memberships of a group, ordered by slot number
    async fn group_memberships(&self, group_id: Uuid) -> RepositoryResult<Vec<Membership>>;

    async fn user_memberships(&self, user_id: Uuid) -> RepositoryResult<Vec<Membership>>;

    async fn mark_payment_verified(
        &self,
        id: Uuid,
        verified: bool,
    ) -> RepositoryResult<Option<Membership>>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn profile_exists(&self, id: Uuid) -> RepositoryResult<bool>;
}
