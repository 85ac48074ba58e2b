pub mod cart;
pub mod catalog;
pub mod identity;
pub mod kv;
pub mod models;
pub mod observability;
pub mod orders;
