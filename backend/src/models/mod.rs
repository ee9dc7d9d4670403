//! Domain models for the Osusu backend.
//!
//! Database-backed records for groups, their slot memberships, member
//! profiles, payout accounts and contributions.

pub mod account;
pub mod group;
pub mod membership;
pub mod payment;
pub mod profile;

// Re-export all models for convenient access
pub use account::{Account, AccountStatus};
pub use group::{DurationType, Group, NewGroup, ScheduleError, MAX_GROUP_SLOTS};
pub use membership::{Membership, NewMembership};
pub use payment::{Payment, PaymentStats, PaymentStatus};
pub use profile::{NewProfile, Profile};
