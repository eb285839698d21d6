use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug)]
pub enum PaymentError {
    IntentNotFound,
    Provider(String),
}

impl std::error::Error for PaymentError {}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentError::IntentNotFound => write!(f, "Payment intent not found"),
            PaymentError::Provider(msg) => write!(f, "Payment provider error: {}", msg),
        }
    }
}

/// Provider-reported status of a charge attempt. Only `Succeeded` authorizes
/// order finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentStatus {
    RequiresPayment,
    Processing,
    Succeeded,
    Canceled,
    Other(String),
}

impl IntentStatus {
    pub fn from_provider(s: &str) -> Self {
        match s {
            "requires_payment_method" | "requires_confirmation" | "requires_action" => {
                IntentStatus::RequiresPayment
            }
            "processing" => IntentStatus::Processing,
            "succeeded" => IntentStatus::Succeeded,
            "canceled" => IntentStatus::Canceled,
            other => IntentStatus::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntent {
    pub intent_id: String,
    /// Opaque handle handed to the client so it can complete the charge.
    pub client_secret: String,
    pub amount_in_cents: i64,
    pub currency: String,
    pub status: IntentStatus,
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_intent(
        &self,
        amount_in_cents: i64,
        currency: &str,
        metadata: &[(String, String)],
    ) -> Result<PaymentIntent, PaymentError>;

    async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError>;
}

pub type PaymentProviderRef = Arc<dyn PaymentProvider>;
