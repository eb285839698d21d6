pub mod config;
pub mod controllers;
pub mod request;
pub mod response;
pub mod routes;
pub mod server;
