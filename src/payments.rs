pub mod in_memory;
pub mod provider;
pub mod stripe;
