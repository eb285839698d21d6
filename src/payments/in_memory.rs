use crate::payments::provider::{IntentStatus, PaymentError, PaymentIntent, PaymentProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory payment provider for tests and local runs.
/// Intents start as `RequiresPayment`; tests drive them to a terminal status
/// with `set_status`, standing in for the customer completing the charge.
#[derive(Default, Clone)]
pub struct InMemoryPaymentProvider {
    intents: Arc<RwLock<HashMap<String, PaymentIntent>>>,
    counter: Arc<AtomicU64>,
}

impl InMemoryPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_status(&self, intent_id: &str, status: IntentStatus) {
        let mut intents = self.intents.write().await;
        if let Some(intent) = intents.get_mut(intent_id) {
            intent.status = status;
        }
    }
}

#[async_trait]
impl PaymentProvider for InMemoryPaymentProvider {
    async fn create_intent(
        &self,
        amount_in_cents: i64,
        currency: &str,
        _metadata: &[(String, String)],
    ) -> Result<PaymentIntent, PaymentError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let intent = PaymentIntent {
            intent_id: format!("pi_test_{}", n),
            client_secret: format!("pi_test_{}_secret", n),
            amount_in_cents,
            currency: currency.to_string(),
            status: IntentStatus::RequiresPayment,
        };

        let mut intents = self.intents.write().await;
        intents.insert(intent.intent_id.clone(), intent.clone());

        Ok(intent)
    }

    async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        let intents = self.intents.read().await;
        intents
            .get(intent_id)
            .cloned()
            .ok_or(PaymentError::IntentNotFound)
    }
}
