use crate::data::models::order::Order;
use crate::data::models::order_item::OrderItem;
use crate::data::models::product::Product;
use crate::data::models::variant::ProductVariant;
use crate::data::repos::traits::store::{
    CatalogStore, OrderDraft, OrderItemDraft, OrderStore, StoreError,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory catalog, for tests and local runs without MySQL.
#[derive(Default, Clone)]
pub struct InMemoryCatalogStore {
    products: Arc<RwLock<HashMap<i32, Product>>>,
    variants: Arc<RwLock<Vec<ProductVariant>>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_product(&self, product: Product) {
        let mut products = self.products.write().await;
        products.insert(product.product_id, product);
    }

    pub async fn insert_variant(&self, variant: ProductVariant) {
        let mut variants = self.variants.write().await;
        variants.push(variant);
    }

    pub async fn product_stock(&self, product_id: i32) -> Option<i32> {
        let products = self.products.read().await;
        products.get(&product_id).map(|p| p.stock)
    }

    pub async fn variant_stock(&self, variant_id: i32) -> Option<i32> {
        let variants = self.variants.read().await;
        variants
            .iter()
            .find(|v| v.variant_id == variant_id)
            .map(|v| v.stock)
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn get_product(&self, product_id: i32) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().await;
        Ok(products.get(&product_id).cloned())
    }

    async fn get_variant(
        &self,
        product_id: i32,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Result<Option<ProductVariant>, StoreError> {
        let variants = self.variants.read().await;
        Ok(variants
            .iter()
            .find(|v| {
                v.product_id == product_id
                    && v.color.as_deref() == color
                    && v.size.as_deref() == size
            })
            .cloned())
    }
}

/// In-memory order store sharing the catalog's stock so that order creation
/// decrements the same rows a checkout previously validated against. Applies
/// the same commit rules as the MySQL implementation: all-or-nothing, stock
/// re-checked at commit, one order per payment intent.
#[derive(Clone)]
pub struct InMemoryOrderStore {
    catalog: InMemoryCatalogStore,
    orders: Arc<RwLock<Vec<(Order, Vec<OrderItem>)>>>,
}

impl InMemoryOrderStore {
    pub fn new(catalog: InMemoryCatalogStore) -> Self {
        InMemoryOrderStore {
            catalog,
            orders: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn order_count(&self) -> usize {
        let orders = self.orders.read().await;
        orders.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create_order_and_items(
        &self,
        draft: OrderDraft,
        items: &[OrderItemDraft],
    ) -> Result<i32, StoreError> {
        let mut orders = self.orders.write().await;
        let mut products = self.catalog.products.write().await;
        let mut variants = self.catalog.variants.write().await;

        if orders
            .iter()
            .any(|(o, _)| o.payment_intent_id == draft.payment_intent_id)
        {
            return Err(StoreError::DuplicatePaymentIntent);
        }

        // Validate every line before mutating anything, so a failure leaves
        // no partial decrement behind.
        for it in items {
            let product = products
                .get(&it.product_id)
                .ok_or(StoreError::ProductNotFound {
                    product_id: it.product_id,
                })?;
            if product.stock < it.quantity {
                return Err(StoreError::InsufficientStock {
                    product_name: product.name.clone(),
                });
            }
            if let Some(vid) = it.variant_id {
                let variant = variants
                    .iter()
                    .find(|v| v.variant_id == vid)
                    .ok_or(StoreError::ProductNotFound {
                        product_id: it.product_id,
                    })?;
                if variant.stock < it.quantity {
                    return Err(StoreError::InsufficientStock {
                        product_name: product.name.clone(),
                    });
                }
            }
        }

        for it in items {
            if let Some(product) = products.get_mut(&it.product_id) {
                product.stock -= it.quantity;
            }
            if let Some(vid) = it.variant_id {
                if let Some(variant) = variants.iter_mut().find(|v| v.variant_id == vid) {
                    variant.stock -= it.quantity;
                }
            }
        }

        let order_id = orders.len() as i32 + 1;
        let address_json = serde_json::to_string(&draft.shipping_address)
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let order = Order {
            order_id,
            user_id: draft.user_id,
            guest_email: draft.guest_email,
            payment_intent_id: draft.payment_intent_id,
            total_amount: draft.total_amount,
            shipping_address: address_json,
            created_at: Some(chrono::Utc::now().naive_utc()),
        };

        let order_items = items
            .iter()
            .enumerate()
            .map(|(idx, it)| OrderItem {
                order_item_id: idx as i32 + 1,
                order_id,
                product_id: it.product_id,
                variant_id: it.variant_id,
                quantity: it.quantity,
                unit_price: it.unit_price.clone(),
                created_at: None,
            })
            .collect();

        orders.push((order, order_items));

        Ok(order_id)
    }

    async fn get_by_id(
        &self,
        order_id: i32,
    ) -> Result<Option<(Order, Vec<OrderItem>)>, StoreError> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .find(|(o, _)| o.order_id == order_id)
            .cloned())
    }

    async fn get_by_payment_intent(&self, intent_id: &str) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .find(|(o, _)| o.payment_intent_id == intent_id)
            .map(|(o, _)| o.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cart::ShippingAddress;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn test_product(id: i32, name: &str, price: &str, stock: i32) -> Product {
        Product {
            product_id: id,
            name: name.to_string(),
            description: None,
            price: BigDecimal::from_str(price).unwrap(),
            stock,
            product_image_uri: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn test_address() -> ShippingAddress {
        ShippingAddress {
            recipient: "Ada Byron".to_string(),
            line1: "12 Crescent Row".to_string(),
            line2: None,
            city: "London".to_string(),
            postal_code: "EC1Y 8SE".to_string(),
            country: "GB".to_string(),
        }
    }

    fn draft(intent_id: &str, total: &str) -> OrderDraft {
        OrderDraft {
            user_id: None,
            guest_email: Some("guest@example.com".to_string()),
            payment_intent_id: intent_id.to_string(),
            total_amount: BigDecimal::from_str(total).unwrap(),
            shipping_address: test_address(),
        }
    }

    #[tokio::test]
    async fn test_catalog_store_round_trip() {
        let catalog = InMemoryCatalogStore::new();
        catalog.insert_product(test_product(1, "Opal Ring", "500", 3)).await;

        let found = catalog.get_product(1).await.unwrap().unwrap();
        assert_eq!(found.name, "Opal Ring");
        assert!(catalog.get_product(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_variant_lookup_treats_none_as_distinct() {
        let catalog = InMemoryCatalogStore::new();
        catalog.insert_product(test_product(1, "Opal Ring", "500", 3)).await;
        catalog
            .insert_variant(ProductVariant {
                variant_id: 10,
                product_id: 1,
                color: Some("gold".to_string()),
                size: None,
                stock: 2,
                created_at: None,
                updated_at: None,
            })
            .await;

        let hit = catalog.get_variant(1, Some("gold"), None).await.unwrap();
        assert_eq!(hit.unwrap().variant_id, 10);

        // Absent color must not match the gold variant.
        assert!(catalog.get_variant(1, None, None).await.unwrap().is_none());
        assert!(catalog
            .get_variant(1, Some("gold"), Some("7"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_create_order_decrements_stock() {
        let catalog = InMemoryCatalogStore::new();
        catalog.insert_product(test_product(1, "Opal Ring", "500", 3)).await;
        let store = InMemoryOrderStore::new(catalog.clone());

        let items = vec![OrderItemDraft {
            product_id: 1,
            variant_id: None,
            quantity: 2,
            unit_price: BigDecimal::from_str("500").unwrap(),
        }];

        let order_id = store
            .create_order_and_items(draft("pi_1", "1150"), &items)
            .await
            .unwrap();

        assert_eq!(order_id, 1);
        assert_eq!(catalog.product_stock(1).await, Some(1));
    }

    #[tokio::test]
    async fn test_create_order_rejects_insufficient_stock_without_side_effects() {
        let catalog = InMemoryCatalogStore::new();
        catalog.insert_product(test_product(1, "Opal Ring", "500", 3)).await;
        catalog.insert_product(test_product(2, "Pearl Pin", "120", 1)).await;
        let store = InMemoryOrderStore::new(catalog.clone());

        let items = vec![
            OrderItemDraft {
                product_id: 1,
                variant_id: None,
                quantity: 1,
                unit_price: BigDecimal::from_str("500").unwrap(),
            },
            OrderItemDraft {
                product_id: 2,
                variant_id: None,
                quantity: 5,
                unit_price: BigDecimal::from_str("120").unwrap(),
            },
        ];

        let err = store
            .create_order_and_items(draft("pi_2", "1250"), &items)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            StoreError::InsufficientStock {
                product_name: "Pearl Pin".to_string()
            }
        );
        assert_eq!(catalog.product_stock(1).await, Some(3));
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_order_rejects_duplicate_payment_intent() {
        let catalog = InMemoryCatalogStore::new();
        catalog.insert_product(test_product(1, "Opal Ring", "500", 3)).await;
        let store = InMemoryOrderStore::new(catalog.clone());

        let items = vec![OrderItemDraft {
            product_id: 1,
            variant_id: None,
            quantity: 1,
            unit_price: BigDecimal::from_str("500").unwrap(),
        }];

        store
            .create_order_and_items(draft("pi_dup", "650"), &items)
            .await
            .unwrap();

        let err = store
            .create_order_and_items(draft("pi_dup", "650"), &items)
            .await
            .unwrap_err();

        assert_eq!(err, StoreError::DuplicatePaymentIntent);
        assert_eq!(store.order_count().await, 1);
        assert_eq!(catalog.product_stock(1).await, Some(2));
    }
}
