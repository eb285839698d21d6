pub mod api;
pub mod data;
pub mod payments;
pub mod services;
