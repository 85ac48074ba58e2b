mod reconciler;
mod store;

pub use reconciler::CartReconciler;
pub use store::{AddOutcome, CART_KEY, CartStore};
