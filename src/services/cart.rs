use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// One line of a customer's cart as submitted by the client. Color and size
/// select a variant; both absent means the aggregate product stock applies.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CartLine {
    pub product_id: i32,
    pub color: Option<String>,
    pub size: Option<String>,
    pub quantity: i32,
}

/// A cart line after catalog resolution: the variant id (if any) and the
/// unit price looked up server-side. Client-supplied prices are never used.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub product_id: i32,
    pub variant_id: Option<i32>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ShippingAddress {
    pub recipient: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}
