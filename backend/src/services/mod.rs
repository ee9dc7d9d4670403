pub mod audit;
pub mod group_service;
pub mod membership_service;
pub mod overview;
pub mod payment_service;
pub mod profile_service;

pub use audit::AuditTrailService;
pub use group_service::GroupService;
pub use membership_service::{GroupSeating, MembershipService};
pub use overview::{Overview, OverviewService};
pub use payment_service::{MemberPayments, PaymentService, PaymentSubmission, PaymentView};
pub use profile_service::{AccountUpdate, NewAccount, ProfileService};
