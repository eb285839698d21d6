use crate::api::config::Config;
use crate::api::request::{CreateIntentRequest, FinalizeOrderRequest, ValidateCartRequest};
use crate::api::response::{FinalizeResponse, IntentResponse, ValidateCartResponse};
use crate::data::repos::implementors::catalog_repo::CatalogRepo;
use crate::data::repos::implementors::order_repo::OrderRepo;
use crate::payments::stripe::StripeGateway;
use crate::services::cart::CartLine;
use crate::services::checkout_service::CheckoutService;
use crate::services::errors::CheckoutError;
use crate::services::stock_service::StockService;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

pub(crate) fn checkout_service() -> CheckoutService {
    let config = Config::new();

    let gateway = match &config.stripe_api_base {
        Some(base) => StripeGateway::with_api_base(config.stripe_secret_key.clone(), base.clone()),
        None => StripeGateway::new(config.stripe_secret_key.clone()),
    };

    CheckoutService::new(
        Arc::new(CatalogRepo::new()),
        Arc::new(OrderRepo::new()),
        Arc::new(gateway),
        config.pricing(),
    )
}

pub(crate) fn error_response(err: CheckoutError) -> Response {
    let status = match &err {
        CheckoutError::ProductNotFound { .. } => StatusCode::NOT_FOUND,
        CheckoutError::InsufficientStock { .. } => StatusCode::CONFLICT,
        CheckoutError::InvalidQuantity { .. }
        | CheckoutError::MissingPurchaser
        | CheckoutError::AmountOverflow => StatusCode::BAD_REQUEST,
        CheckoutError::PaymentNotConfirmed => StatusCode::PAYMENT_REQUIRED,
        CheckoutError::PaymentProviderError(_) => StatusCode::BAD_GATEWAY,
        CheckoutError::OrderPersistenceFailed { .. } | CheckoutError::DatabaseError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string()).into_response()
}

/// Pre-flight stock check for the cart page
pub async fn validate_cart(Json(payload): Json<ValidateCartRequest>) -> impl IntoResponse {
    let service = StockService::new(Arc::new(CatalogRepo::new()));
    let lines: Vec<CartLine> = payload.items.into_iter().map(CartLine::from).collect();

    match service.validate_cart(&lines).await {
        Ok(_) => (StatusCode::OK, Json(ValidateCartResponse { valid: true })).into_response(),
        Err(err) => error_response(err),
    }
}

/// Create a payment intent for the cart
pub async fn create_intent(Json(payload): Json<CreateIntentRequest>) -> impl IntoResponse {
    let service = checkout_service();
    let lines: Vec<CartLine> = payload.items.into_iter().map(CartLine::from).collect();

    match service
        .create_payment_intent(&lines, payload.guest_email.as_deref())
        .await
    {
        Ok(receipt) => (StatusCode::OK, Json(IntentResponse::from(receipt))).into_response(),
        Err(err) => error_response(err),
    }
}

/// Persist the order once the provider reports the payment as succeeded
pub async fn finalize_order(Json(payload): Json<FinalizeOrderRequest>) -> impl IntoResponse {
    let service = checkout_service();
    let lines: Vec<CartLine> = payload.items.into_iter().map(CartLine::from).collect();

    match service
        .finalize_order(
            &payload.payment_intent_id,
            &lines,
            payload.shipping_address,
            payload.user_id,
            payload.guest_email.as_deref(),
        )
        .await
    {
        Ok(order_id) => (
            StatusCode::CREATED,
            Json(FinalizeResponse {
                success: true,
                order_id,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
