pub mod cart;
pub mod checkout_service;
pub mod errors;
pub mod pricing;
pub mod stock_service;
