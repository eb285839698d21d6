use crate::data::repos::traits::store::StoreError;
use crate::payments::provider::PaymentError;

#[derive(Debug, PartialEq)]
pub enum CheckoutError {
    ProductNotFound { product_id: i32 },
    InsufficientStock { product_name: String },
    InvalidQuantity { product_id: i32 },
    MissingPurchaser,
    AmountOverflow,
    PaymentNotConfirmed,
    OrderPersistenceFailed { payment_intent_id: String },
    PaymentProviderError(String),
    DatabaseError,
}

impl std::error::Error for CheckoutError {}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutError::ProductNotFound { product_id } => {
                write!(f, "Product {} not found", product_id)
            }
            CheckoutError::InsufficientStock { product_name } => {
                write!(f, "Insufficient stock for {}", product_name)
            }
            CheckoutError::InvalidQuantity { product_id } => {
                write!(f, "Invalid quantity for product {}", product_id)
            }
            CheckoutError::MissingPurchaser => {
                write!(f, "An order must belong to a user or carry a guest email")
            }
            CheckoutError::AmountOverflow => {
                write!(f, "Order total is too large to process")
            }
            CheckoutError::PaymentNotConfirmed => {
                write!(f, "Payment has not been confirmed by the payment provider")
            }
            CheckoutError::OrderPersistenceFailed { payment_intent_id } => {
                write!(
                    f,
                    "Your payment was received but the order could not be recorded. \
                     Please contact support and quote payment reference {}",
                    payment_intent_id
                )
            }
            CheckoutError::PaymentProviderError(msg) => {
                write!(f, "Payment provider error: {}", msg)
            }
            CheckoutError::DatabaseError => write!(f, "Database error"),
        }
    }
}

impl From<StoreError> for CheckoutError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ProductNotFound { product_id } => {
                CheckoutError::ProductNotFound { product_id }
            }
            StoreError::InsufficientStock { product_name } => {
                CheckoutError::InsufficientStock { product_name }
            }
            StoreError::DuplicatePaymentIntent | StoreError::Backend(_) => {
                CheckoutError::DatabaseError
            }
        }
    }
}

impl From<PaymentError> for CheckoutError {
    fn from(e: PaymentError) -> Self {
        CheckoutError::PaymentProviderError(e.to_string())
    }
}
