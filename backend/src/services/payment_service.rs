use crate::error::{AppError, AppResult};
use crate::models::{Membership, Payment, PaymentStats, PaymentStatus};
use crate::repositories::{MembershipRepository, PaymentRepository};
use crate::services::AuditTrailService;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Payment submitted by a member
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentSubmission {
    pub group_member_id: Uuid,
    pub amount: Decimal,
    pub screenshot_url: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl PaymentSubmission {
    pub fn validate(&self) -> AppResult<()> {
        if self.amount <= Decimal::ZERO {
            return Err(AppError::Validation("Payment amount must be greater than zero".into()));
        }
        if self.screenshot_url.trim().is_empty() {
            return Err(AppError::Validation("A payment screenshot is required".into()));
        }
        Ok(())
    }
}

/// Payment together with its derived review status
#[derive(Debug, Clone, Serialize)]
pub struct PaymentView {
    #[serde(flatten)]
    pub payment: Payment,
    pub status: PaymentStatus,
}

impl From<Payment> for PaymentView {
    fn from(payment: Payment) -> Self {
        let status = payment.status();
        Self { payment, status }
    }
}

/// A membership and the payments made against it
#[derive(Debug, Clone, Serialize)]
pub struct MemberPayments {
    #[serde(flatten)]
    pub membership: Membership,
    pub payments: Vec<PaymentView>,
}

/// Attach payments to their memberships, keeping both orderings
pub fn group_by_membership(memberships: Vec<Membership>, payments: Vec<Payment>) -> Vec<MemberPayments> {
    memberships
        .into_iter()
        .map(|membership| {
            let payments = payments
                .iter()
                .filter(|p| p.group_member_id == membership.id)
                .cloned()
                .map(PaymentView::from)
                .collect();
            MemberPayments {
                membership,
                payments,
            }
        })
        .collect()
}

/// Service for contribution payments
pub struct PaymentService {
    payment_repo: Arc<PaymentRepository>,
    membership_repo: Arc<MembershipRepository>,
    audit: Arc<AuditTrailService>,
}

impl PaymentService {
    pub fn new(
        payment_repo: Arc<PaymentRepository>,
        membership_repo: Arc<MembershipRepository>,
        audit: Arc<AuditTrailService>,
    ) -> Self {
        Self {
            payment_repo,
            membership_repo,
            audit,
        }
    }

    /// Record a payment awaiting admin approval
    pub async fn submit_payment(&self, submission: PaymentSubmission) -> AppResult<PaymentView> {
        submission.validate()?;

        self.membership_repo
            .find_by_id(submission.group_member_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Membership {} not found", submission.group_member_id))
            })?;

        let due_date = submission
            .due_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        let payment = self
            .payment_repo
            .create(
                submission.group_member_id,
                submission.amount,
                submission.screenshot_url.trim(),
                due_date,
            )
            .await?;

        info!(
            payment_id = %payment.id,
            group_member_id = %payment.group_member_id,
            amount = %payment.amount,
            "Payment submitted"
        );
        Ok(payment.into())
    }

    pub async fn approve(&self, payment_id: Uuid) -> AppResult<PaymentView> {
        self.review_payment(payment_id, true).await
    }

    pub async fn reject(&self, payment_id: Uuid) -> AppResult<PaymentView> {
        self.review_payment(payment_id, false).await
    }

    /// Approve or reject a payment
    async fn review_payment(&self, payment_id: Uuid, approved: bool) -> AppResult<PaymentView> {
        let payment = self
            .payment_repo
            .set_approved(payment_id, approved)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment {} not found", payment_id)))?;

        info!(payment_id = %payment.id, approved, "Payment reviewed");
        self.audit.log_payment_reviewed(&payment).await;
        Ok(payment.into())
    }

    /// Every membership of a group with its payments
    pub async fn group_payments(&self, group_id: Uuid) -> AppResult<Vec<MemberPayments>> {
        let memberships = self.membership_repo.find_by_group(group_id).await?;
        let ids: Vec<Uuid> = memberships.iter().map(|m| m.id).collect();
        let payments = self.payment_repo.find_by_memberships(&ids).await?;
        Ok(group_by_membership(memberships, payments))
    }

    /// Payments across all of a user's memberships, newest first
    pub async fn payments_of_user(&self, user_id: Uuid) -> AppResult<Vec<PaymentView>> {
        let memberships = self.membership_repo.find_by_user(user_id).await?;
        let ids: Vec<Uuid> = memberships.iter().map(|m| m.id).collect();
        let payments = self.payment_repo.find_by_memberships(&ids).await?;
        Ok(payments.into_iter().map(PaymentView::from).collect())
    }

    pub async fn stats(&self) -> AppResult<PaymentStats> {
        Ok(self.payment_repo.stats().await?)
    }
}
