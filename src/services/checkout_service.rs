use crate::data::models::order::Order;
use crate::data::models::order_item::OrderItem;
use crate::data::repos::traits::store::{
    CatalogStoreRef, OrderDraft, OrderItemDraft, OrderStoreRef, StoreError,
};
use crate::payments::provider::{IntentStatus, PaymentProviderRef};
use crate::services::cart::{CartLine, ShippingAddress};
use crate::services::errors::CheckoutError;
use crate::services::pricing::{self, PricingConfig};
use crate::services::stock_service::StockService;
use bigdecimal::BigDecimal;

/// Returned by intent creation; the client secret goes back to the browser
/// so the customer can complete the charge. Nothing is persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentReceipt {
    pub payment_intent_id: String,
    pub client_secret: String,
    pub amount_in_cents: i64,
    pub total_amount: BigDecimal,
}

/// Orchestrates a checkout attempt: Cart -> IntentCreated ->
/// PaymentConfirmed -> OrderPersisted. PaymentConfirmed is only ever reached
/// by re-querying the provider; client-reported success is never trusted.
pub struct CheckoutService {
    catalog: CatalogStoreRef,
    orders: OrderStoreRef,
    payments: PaymentProviderRef,
    config: PricingConfig,
}

impl CheckoutService {
    pub fn new(
        catalog: CatalogStoreRef,
        orders: OrderStoreRef,
        payments: PaymentProviderRef,
        config: PricingConfig,
    ) -> Self {
        CheckoutService {
            catalog,
            orders,
            payments,
            config,
        }
    }

    /// Validates the cart, computes the total and asks the provider for a
    /// payment intent. No order row exists at this stage.
    pub async fn create_payment_intent(
        &self,
        lines: &[CartLine],
        guest_email: Option<&str>,
    ) -> Result<IntentReceipt, CheckoutError> {
        let stock = StockService::new(self.catalog.clone());
        let priced = stock.validate_cart(lines).await?;

        let total = pricing::total(&self.config, &priced);
        let cents = pricing::amount_in_cents(&total).ok_or(CheckoutError::AmountOverflow)?;

        let mut metadata = Vec::new();
        if let Some(email) = guest_email {
            metadata.push(("guest_email".to_string(), email.to_string()));
        }

        let intent = self
            .payments
            .create_intent(cents, &self.config.currency, &metadata)
            .await?;

        tracing::info!(
            "Payment intent {} created for {} cents",
            intent.intent_id,
            cents
        );

        Ok(IntentReceipt {
            payment_intent_id: intent.intent_id,
            client_secret: intent.client_secret,
            amount_in_cents: cents,
            total_amount: total,
        })
    }

    /// Persists the order for a captured payment. Re-verifies the intent
    /// status with the provider, recomputes the total from the catalog, then
    /// runs the atomic order-creation operation. A failure after capture is
    /// terminal and carries the intent id for manual reconciliation.
    pub async fn finalize_order(
        &self,
        payment_intent_id: &str,
        lines: &[CartLine],
        shipping_address: ShippingAddress,
        user_id: Option<i32>,
        guest_email: Option<&str>,
    ) -> Result<i32, CheckoutError> {
        // Every order must be reconcilable with a customer: a user id, a
        // guest email, or both.
        if user_id.is_none() && guest_email.is_none() {
            return Err(CheckoutError::MissingPurchaser);
        }

        // Replay of an already-finalized intent returns the existing order.
        if let Some(existing) = self.orders.get_by_payment_intent(payment_intent_id).await? {
            return Ok(existing.order_id);
        }

        let intent = self.payments.retrieve_intent(payment_intent_id).await?;
        if intent.status != IntentStatus::Succeeded {
            return Err(CheckoutError::PaymentNotConfirmed);
        }

        // Total recomputed server-side; stock enforcement happens at commit.
        let stock = StockService::new(self.catalog.clone());
        let priced = stock.price_cart(lines).await?;
        let total = pricing::total(&self.config, &priced);

        let items: Vec<OrderItemDraft> = priced
            .iter()
            .map(|line| OrderItemDraft {
                product_id: line.product_id,
                variant_id: line.variant_id,
                quantity: line.quantity,
                unit_price: line.unit_price.clone(),
            })
            .collect();

        let draft = OrderDraft {
            user_id,
            guest_email: guest_email.map(str::to_string),
            payment_intent_id: payment_intent_id.to_string(),
            total_amount: total,
            shipping_address,
        };

        match self.orders.create_order_and_items(draft, &items).await {
            Ok(order_id) => {
                tracing::info!(
                    "Order {} persisted for payment intent {}",
                    order_id,
                    payment_intent_id
                );
                Ok(order_id)
            }
            Err(StoreError::DuplicatePaymentIntent) => {
                // Lost a race with a concurrent finalize for the same intent.
                match self.orders.get_by_payment_intent(payment_intent_id).await {
                    Ok(Some(order)) => Ok(order.order_id),
                    _ => Err(CheckoutError::OrderPersistenceFailed {
                        payment_intent_id: payment_intent_id.to_string(),
                    }),
                }
            }
            Err(e) => {
                tracing::error!(
                    "Order persistence failed for payment intent {}: {}",
                    payment_intent_id,
                    e
                );
                Err(CheckoutError::OrderPersistenceFailed {
                    payment_intent_id: payment_intent_id.to_string(),
                })
            }
        }
    }

    pub async fn get_order(
        &self,
        order_id: i32,
    ) -> Result<Option<(Order, Vec<OrderItem>)>, CheckoutError> {
        self.orders.get_by_id(order_id).await.map_err(Into::into)
    }
}
