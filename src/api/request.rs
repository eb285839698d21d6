use crate::services::cart::{CartLine, ShippingAddress};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CartItemRequest {
    pub product_id: i32,
    pub color: Option<String>,
    pub size: Option<String>,
    pub quantity: i32,
}

impl From<CartItemRequest> for CartLine {
    fn from(item: CartItemRequest) -> Self {
        CartLine {
            product_id: item.product_id,
            color: item.color,
            size: item.size,
            quantity: item.quantity,
        }
    }
}

#[derive(Deserialize)]
pub struct ValidateCartRequest {
    pub items: Vec<CartItemRequest>,
}

#[derive(Deserialize)]
pub struct CreateIntentRequest {
    pub items: Vec<CartItemRequest>,
    pub guest_email: Option<String>,
}

#[derive(Deserialize)]
pub struct FinalizeOrderRequest {
    pub payment_intent_id: String,
    pub items: Vec<CartItemRequest>,
    pub shipping_address: ShippingAddress,
    pub user_id: Option<i32>,
    pub guest_email: Option<String>,
}
