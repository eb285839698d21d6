pub mod checkout_routes;
pub mod order_routes;
