use atelier_server_lib::payments::provider::{IntentStatus, PaymentProvider};
use atelier_server_lib::services::errors::CheckoutError;
use bigdecimal::BigDecimal;
use std::str::FromStr;

mod common;
use common::{address, harness, line, seed_product, seed_variant, variant_line};

#[tokio::test]
async fn test_intent_created_for_sample_cart_without_persisting() {
    let h = harness();
    seed_product(&h.catalog, 1, "Opal Ring", "500", 5).await;

    let receipt = h
        .service
        .create_payment_intent(&[line(1, 1)], None)
        .await
        .expect("intent creation should succeed");

    // 500 subtotal < 800 threshold, so 150 shipping applies: 650.00 = 65000 cents.
    assert_eq!(receipt.amount_in_cents, 65000);
    assert_eq!(receipt.total_amount, BigDecimal::from(650));
    assert!(!receipt.client_secret.is_empty());

    let stored = h
        .payments
        .retrieve_intent(&receipt.payment_intent_id)
        .await
        .expect("provider should know the intent");
    assert_eq!(stored.amount_in_cents, 65000);
    assert_eq!(stored.status, IntentStatus::RequiresPayment);

    assert_eq!(h.orders.order_count().await, 0);
    assert_eq!(h.catalog.product_stock(1).await, Some(5));
}

#[tokio::test]
async fn test_intent_waives_shipping_at_threshold() {
    let h = harness();
    seed_product(&h.catalog, 1, "Gold Bangle", "400", 5).await;

    let receipt = h
        .service
        .create_payment_intent(&[line(1, 2)], None)
        .await
        .unwrap();

    assert_eq!(receipt.amount_in_cents, 80000);
}

#[tokio::test]
async fn test_intent_refused_for_insufficient_stock() {
    let h = harness();
    seed_product(&h.catalog, 1, "Opal Ring", "500", 1).await;

    let err = h
        .service
        .create_payment_intent(&[line(1, 2)], None)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        CheckoutError::InsufficientStock {
            product_name: "Opal Ring".to_string()
        }
    );
}

#[tokio::test]
async fn test_finalize_rejects_unconfirmed_payment() {
    let h = harness();
    seed_product(&h.catalog, 1, "Opal Ring", "500", 5).await;

    let receipt = h
        .service
        .create_payment_intent(&[line(1, 1)], None)
        .await
        .unwrap();

    // Client claims success, provider still says RequiresPayment.
    let err = h
        .service
        .finalize_order(
            &receipt.payment_intent_id,
            &[line(1, 1)],
            address(),
            Some(1),
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(err, CheckoutError::PaymentNotConfirmed);
    assert_eq!(h.orders.order_count().await, 0);
    assert_eq!(h.catalog.product_stock(1).await, Some(5));
}

#[tokio::test]
async fn test_finalize_persists_order_and_decrements_stock() {
    let h = harness();
    seed_product(&h.catalog, 1, "Opal Ring", "500", 5).await;

    let receipt = h
        .service
        .create_payment_intent(&[line(1, 1)], Some("guest@example.com"))
        .await
        .unwrap();
    h.payments
        .set_status(&receipt.payment_intent_id, IntentStatus::Succeeded)
        .await;

    let order_id = h
        .service
        .finalize_order(
            &receipt.payment_intent_id,
            &[line(1, 1)],
            address(),
            None,
            Some("guest@example.com"),
        )
        .await
        .expect("finalization should succeed");

    let (order, items) = h
        .service
        .get_order(order_id)
        .await
        .unwrap()
        .expect("order should be readable back");

    assert_eq!(order.total_amount, BigDecimal::from(650));
    assert_eq!(order.payment_intent_id, receipt.payment_intent_id);
    assert_eq!(order.guest_email.as_deref(), Some("guest@example.com"));
    assert_eq!(order.user_id, None);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 1);
    assert_eq!(items[0].unit_price, BigDecimal::from_str("500").unwrap());
    assert_eq!(h.catalog.product_stock(1).await, Some(4));
}

#[tokio::test]
async fn test_finalize_decrements_variant_stock() {
    let h = harness();
    seed_product(&h.catalog, 1, "Opal Ring", "500", 5).await;
    seed_variant(&h.catalog, 11, 1, Some("gold"), Some("7"), 2).await;

    let cart = [variant_line(1, Some("gold"), Some("7"), 1)];
    let receipt = h.service.create_payment_intent(&cart, None).await.unwrap();
    h.payments
        .set_status(&receipt.payment_intent_id, IntentStatus::Succeeded)
        .await;

    let order_id = h
        .service
        .finalize_order(&receipt.payment_intent_id, &cart, address(), Some(7), None)
        .await
        .unwrap();

    let (order, items) = h.service.get_order(order_id).await.unwrap().unwrap();
    assert_eq!(order.user_id, Some(7));
    assert_eq!(items[0].variant_id, Some(11));
    assert_eq!(h.catalog.product_stock(1).await, Some(4));
    assert_eq!(h.catalog.variant_stock(11).await, Some(1));
}

#[tokio::test]
async fn test_finalize_is_idempotent_per_payment_intent() {
    let h = harness();
    seed_product(&h.catalog, 1, "Opal Ring", "500", 5).await;

    let cart = [line(1, 1)];
    let receipt = h.service.create_payment_intent(&cart, None).await.unwrap();
    h.payments
        .set_status(&receipt.payment_intent_id, IntentStatus::Succeeded)
        .await;

    let first = h
        .service
        .finalize_order(&receipt.payment_intent_id, &cart, address(), Some(1), None)
        .await
        .unwrap();
    let second = h
        .service
        .finalize_order(&receipt.payment_intent_id, &cart, address(), Some(1), None)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(h.orders.order_count().await, 1);
    assert_eq!(h.catalog.product_stock(1).await, Some(4));
}

#[tokio::test]
async fn test_finalize_fails_terminally_when_commit_loses_stock_race() {
    let h = harness();
    seed_product(&h.catalog, 1, "Opal Ring", "500", 1).await;

    let cart = [line(1, 1)];
    let receipt = h.service.create_payment_intent(&cart, None).await.unwrap();
    h.payments
        .set_status(&receipt.payment_intent_id, IntentStatus::Succeeded)
        .await;

    // A competing checkout captures the last unit first.
    let rival = h.service.create_payment_intent(&cart, None).await.unwrap();
    h.payments
        .set_status(&rival.payment_intent_id, IntentStatus::Succeeded)
        .await;
    h.service
        .finalize_order(&rival.payment_intent_id, &cart, address(), Some(2), None)
        .await
        .unwrap();

    let err = h
        .service
        .finalize_order(&receipt.payment_intent_id, &cart, address(), Some(1), None)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        CheckoutError::OrderPersistenceFailed {
            payment_intent_id: receipt.payment_intent_id.clone()
        }
    );
    assert_eq!(h.orders.order_count().await, 1);
    assert_eq!(h.catalog.product_stock(1).await, Some(0));
}

#[tokio::test]
async fn test_finalize_with_unknown_intent_fails() {
    let h = harness();
    seed_product(&h.catalog, 1, "Opal Ring", "500", 5).await;

    let err = h
        .service
        .finalize_order("pi_missing", &[line(1, 1)], address(), Some(1), None)
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::PaymentProviderError(_)));
    assert_eq!(h.orders.order_count().await, 0);
}

#[tokio::test]
async fn test_finalize_requires_user_or_guest_email() {
    let h = harness();
    seed_product(&h.catalog, 1, "Opal Ring", "500", 5).await;

    let cart = [line(1, 1)];
    let receipt = h.service.create_payment_intent(&cart, None).await.unwrap();
    h.payments
        .set_status(&receipt.payment_intent_id, IntentStatus::Succeeded)
        .await;

    // Neither a user id nor a guest email: nothing to reconcile the order to.
    let err = h
        .service
        .finalize_order(&receipt.payment_intent_id, &cart, address(), None, None)
        .await
        .unwrap_err();

    assert_eq!(err, CheckoutError::MissingPurchaser);
    assert_eq!(h.orders.order_count().await, 0);
    assert_eq!(h.catalog.product_stock(1).await, Some(5));
}
