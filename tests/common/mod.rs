use atelier_server_lib::data::models::product::Product;
use atelier_server_lib::data::models::variant::ProductVariant;
use atelier_server_lib::data::repos::implementors::in_memory::{
    InMemoryCatalogStore, InMemoryOrderStore,
};
use atelier_server_lib::payments::in_memory::InMemoryPaymentProvider;
use atelier_server_lib::services::cart::{CartLine, ShippingAddress};
use atelier_server_lib::services::checkout_service::CheckoutService;
use atelier_server_lib::services::pricing::PricingConfig;
use bigdecimal::BigDecimal;
use std::str::FromStr;
use std::sync::Arc;

pub struct TestHarness {
    pub catalog: InMemoryCatalogStore,
    pub orders: InMemoryOrderStore,
    pub payments: InMemoryPaymentProvider,
    pub service: CheckoutService,
}

/// Builds a checkout service wired to fresh in-memory stores and payment
/// provider, with the sample deployment config (fee 150, threshold 800).
pub fn harness() -> TestHarness {
    let catalog = InMemoryCatalogStore::new();
    let orders = InMemoryOrderStore::new(catalog.clone());
    let payments = InMemoryPaymentProvider::new();

    let service = CheckoutService::new(
        Arc::new(catalog.clone()),
        Arc::new(orders.clone()),
        Arc::new(payments.clone()),
        PricingConfig::default(),
    );

    TestHarness {
        catalog,
        orders,
        payments,
        service,
    }
}

pub async fn seed_product(
    catalog: &InMemoryCatalogStore,
    product_id: i32,
    name: &str,
    price: &str,
    stock: i32,
) {
    catalog
        .insert_product(Product {
            product_id,
            name: name.to_string(),
            description: None,
            price: BigDecimal::from_str(price).expect("invalid test price"),
            stock,
            product_image_uri: None,
            created_at: None,
            updated_at: None,
        })
        .await;
}

pub async fn seed_variant(
    catalog: &InMemoryCatalogStore,
    variant_id: i32,
    product_id: i32,
    color: Option<&str>,
    size: Option<&str>,
    stock: i32,
) {
    catalog
        .insert_variant(ProductVariant {
            variant_id,
            product_id,
            color: color.map(str::to_string),
            size: size.map(str::to_string),
            stock,
            created_at: None,
            updated_at: None,
        })
        .await;
}

pub fn line(product_id: i32, quantity: i32) -> CartLine {
    CartLine {
        product_id,
        color: None,
        size: None,
        quantity,
    }
}

pub fn variant_line(
    product_id: i32,
    color: Option<&str>,
    size: Option<&str>,
    quantity: i32,
) -> CartLine {
    CartLine {
        product_id,
        color: color.map(str::to_string),
        size: size.map(str::to_string),
        quantity,
    }
}

pub fn address() -> ShippingAddress {
    ShippingAddress {
        recipient: "Grace Hopper".to_string(),
        line1: "1 Harbor Lane".to_string(),
        line2: None,
        city: "Arlington".to_string(),
        postal_code: "22201".to_string(),
        country: "US".to_string(),
    }
}
