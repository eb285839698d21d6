use crate::payments::provider::{IntentStatus, PaymentError, PaymentIntent, PaymentProvider};
use async_trait::async_trait;
use serde::Deserialize;

const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Stripe payment-intent client. Create is a form-encoded POST, retrieve a
/// GET; both authenticate with the secret key as a bearer token.
pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

#[derive(Deserialize)]
struct StripeIntent {
    id: String,
    client_secret: Option<String>,
    amount: i64,
    currency: String,
    status: String,
}

impl StripeGateway {
    pub fn new(secret_key: String) -> Self {
        StripeGateway {
            client: reqwest::Client::new(),
            secret_key,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(secret_key: String, api_base: String) -> Self {
        StripeGateway {
            client: reqwest::Client::new(),
            secret_key,
            api_base,
        }
    }

    fn into_intent(raw: StripeIntent) -> PaymentIntent {
        PaymentIntent {
            intent_id: raw.id,
            client_secret: raw.client_secret.unwrap_or_default(),
            amount_in_cents: raw.amount,
            currency: raw.currency,
            status: IntentStatus::from_provider(&raw.status),
        }
    }
}

#[async_trait]
impl PaymentProvider for StripeGateway {
    async fn create_intent(
        &self,
        amount_in_cents: i64,
        currency: &str,
        metadata: &[(String, String)],
    ) -> Result<PaymentIntent, PaymentError> {
        let mut params: Vec<(String, String)> = vec![
            ("amount".to_string(), amount_in_cents.to_string()),
            ("currency".to_string(), currency.to_string()),
        ];
        for (key, value) in metadata {
            params.push((format!("metadata[{}]", key), value.clone()));
        }

        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Intent creation failed: {} {}", status, body);
            return Err(PaymentError::Provider(format!("{}: {}", status, body)));
        }

        let raw: StripeIntent = response
            .json()
            .await
            .map_err(|e| PaymentError::Provider(e.to_string()))?;

        Ok(Self::into_intent(raw))
    }

    async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        let response = self
            .client
            .get(format!("{}/v1/payment_intents/{}", self.api_base, intent_id))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| PaymentError::Provider(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(PaymentError::IntentNotFound);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Intent retrieval failed: {} {}", status, body);
            return Err(PaymentError::Provider(format!("{}: {}", status, body)));
        }

        let raw: StripeIntent = response
            .json()
            .await
            .map_err(|e| PaymentError::Provider(e.to_string()))?;

        Ok(Self::into_intent(raw))
    }
}
