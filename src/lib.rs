//! Storefront core: local cart state reconciled against a remote
//! product catalog, checkout into durable order documents, and
//! order history readback. The UI layer drives the components in
//! [`app::context::AppContext`]; rendering, navigation and the auth
//! provider's own flows live outside this crate.

pub mod app;
pub mod core;
