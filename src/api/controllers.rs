pub mod checkout_controller;
pub mod order_controller;
