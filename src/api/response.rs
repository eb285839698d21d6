use crate::data::models::order::Order;
use crate::data::models::order_item::OrderItem;
use crate::services::cart::ShippingAddress;
use crate::services::checkout_service::IntentReceipt;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Serialize, Deserialize)]
pub struct ValidateCartResponse {
    pub valid: bool,
}

#[derive(Serialize, Deserialize)]
pub struct IntentResponse {
    pub payment_intent_id: String,
    pub client_secret: String,
    pub amount_in_cents: i64,
    pub total_amount: BigDecimal,
}

impl From<IntentReceipt> for IntentResponse {
    fn from(receipt: IntentReceipt) -> Self {
        Self {
            payment_intent_id: receipt.payment_intent_id,
            client_secret: receipt.client_secret,
            amount_in_cents: receipt.amount_in_cents,
            total_amount: receipt.total_amount,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct FinalizeResponse {
    pub success: bool,
    pub order_id: i32,
}

#[derive(Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub product_id: i32,
    pub variant_id: Option<i32>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product_id: item.product_id,
            variant_id: item.variant_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: i32,
    pub user_id: Option<i32>,
    pub guest_email: Option<String>,
    pub payment_intent_id: String,
    pub total_amount: BigDecimal,
    pub shipping_address: Option<ShippingAddress>,
    pub items: Vec<OrderItemResponse>,
    pub created_at: Option<String>,
}

impl From<(Order, Vec<OrderItem>)> for OrderResponse {
    fn from((order, items): (Order, Vec<OrderItem>)) -> Self {
        Self {
            order_id: order.order_id,
            user_id: order.user_id,
            guest_email: order.guest_email,
            payment_intent_id: order.payment_intent_id,
            total_amount: order.total_amount,
            shipping_address: serde_json::from_str(&order.shipping_address).ok(),
            items: items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at.map(|d| d.to_string()),
        }
    }
}
