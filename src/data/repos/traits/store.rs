use crate::data::models::order::Order;
use crate::data::models::order_item::OrderItem;
use crate::data::models::product::Product;
use crate::data::models::variant::ProductVariant;
use crate::services::cart::ShippingAddress;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
pub enum StoreError {
    ProductNotFound { product_id: i32 },
    InsufficientStock { product_name: String },
    DuplicatePaymentIntent,
    Backend(String),
}

impl std::error::Error for StoreError {}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::ProductNotFound { product_id } => {
                write!(f, "Product {} not found", product_id)
            }
            StoreError::InsufficientStock { product_name } => {
                write!(f, "Insufficient stock for {}", product_name)
            }
            StoreError::DuplicatePaymentIntent => {
                write!(f, "An order already exists for this payment intent")
            }
            StoreError::Backend(msg) => write!(f, "Store backend error: {}", msg),
        }
    }
}

/// Order row to be persisted; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub user_id: Option<i32>,
    pub guest_email: Option<String>,
    pub payment_intent_id: String,
    pub total_amount: BigDecimal,
    pub shipping_address: ShippingAddress,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemDraft {
    pub product_id: i32,
    pub variant_id: Option<i32>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

/// Read access to the product catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_product(&self, product_id: i32) -> Result<Option<Product>, StoreError>;

    /// Exact-match variant lookup: a `None` color or size only matches rows
    /// where that field is NULL.
    async fn get_variant(
        &self,
        product_id: i32,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Result<Option<ProductVariant>, StoreError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Atomic order creation: inserts the order row and its items and
    /// decrements product/variant stock in a single transaction. Stock is
    /// re-checked at commit time; `InsufficientStock` aborts the whole
    /// operation. `DuplicatePaymentIntent` signals an order already exists
    /// for `draft.payment_intent_id`.
    async fn create_order_and_items(
        &self,
        draft: OrderDraft,
        items: &[OrderItemDraft],
    ) -> Result<i32, StoreError>;

    async fn get_by_id(&self, order_id: i32)
        -> Result<Option<(Order, Vec<OrderItem>)>, StoreError>;

    async fn get_by_payment_intent(&self, intent_id: &str) -> Result<Option<Order>, StoreError>;
}

pub type CatalogStoreRef = Arc<dyn CatalogStore>;
pub type OrderStoreRef = Arc<dyn OrderStore>;
