pub mod catalog_repo;
pub mod in_memory;
pub mod order_repo;
