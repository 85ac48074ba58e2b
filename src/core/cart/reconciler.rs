use crate::core::cart::store::{AddOutcome, CartStore};
use crate::core::catalog::CatalogStore;
use crate::core::models::product::ProductId;
use crate::core::models::view::{CartLine, CartTotal};
use anyhow::Error;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Default)]
struct SessionState {
    /// Reconciled view, in cart insertion order.
    lines: Vec<CartLine>,
    /// Tracked quantity per resolved product. Every key here is in
    /// the cart and resolved; removal drops the entry with the line.
    quantities: HashMap<ProductId, u32>,
}

/// Joins the durable cart id sequence against live catalog records
/// to produce the display view, and owns the in-memory quantities.
///
/// All operations serialize through one session lock, so two
/// rapid-fire UI events mutate the cart one at a time instead of
/// racing on the persisted sequence.
pub struct CartReconciler {
    cart: Arc<CartStore>,
    catalog: Arc<dyn CatalogStore>,
    state: Mutex<SessionState>,
}

impl CartReconciler {
    pub fn new(cart: Arc<CartStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self {
            cart,
            catalog,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Rebuilds the view from the persisted cart. Ids that no longer
    /// resolve in the catalog are dropped from the view without
    /// touching the cart itself; a later explicit remove cleans them
    /// up. Quantities already tracked for a resolved id survive the
    /// rebuild, newly resolved ids start at 1.
    pub async fn refresh(&self) -> Result<Vec<CartLine>, Error> {
        let mut state = self.state.lock().await;

        let ids = self.cart.get().await?;
        let mut lines = Vec::with_capacity(ids.len());
        let mut quantities = HashMap::with_capacity(ids.len());

        for id in &ids {
            let product = match self.catalog.get(id).await? {
                Some(product) => product,
                None => {
                    debug!("Dropping stale cart reference {}", id);
                    continue;
                }
            };

            let quantity = state.quantities.get(id).copied().unwrap_or(1);
            quantities.insert(id.clone(), quantity);
            lines.push(CartLine { product, quantity });
        }

        state.lines = lines.clone();
        state.quantities = quantities;

        Ok(lines)
    }

    /// Current view as of the last refresh or mutation.
    pub async fn view(&self) -> Vec<CartLine> {
        self.state.lock().await.lines.clone()
    }

    pub async fn add(&self, id: &str) -> Result<AddOutcome, Error> {
        let _state = self.state.lock().await;
        self.cart.add(id).await
    }

    /// Removes the id from the cart and drops its line and tracked
    /// quantity, so a later re-add starts back at 1.
    pub async fn remove(&self, id: &str) -> Result<(), Error> {
        let mut state = self.state.lock().await;

        self.cart.remove(id).await?;
        state.lines.retain(|line| line.product.id != id);
        state.quantities.remove(id);

        Ok(())
    }

    /// Increments the tracked quantity. No upper bound is enforced
    /// against stock.
    pub async fn increase(&self, id: &str) {
        let mut state = self.state.lock().await;

        let updated = match state.quantities.get_mut(id) {
            Some(quantity) => {
                *quantity += 1;
                *quantity
            }
            None => return,
        };

        Self::sync_line(&mut state.lines, id, updated);
    }

    /// Decrements the tracked quantity, clamped at 1. Going to zero
    /// is not a removal path; removal is its own action.
    pub async fn decrease(&self, id: &str) {
        let mut state = self.state.lock().await;

        let updated = match state.quantities.get_mut(id) {
            Some(quantity) => {
                *quantity = quantity.saturating_sub(1).max(1);
                *quantity
            }
            None => return,
        };

        Self::sync_line(&mut state.lines, id, updated);
    }

    /// Sum of price x quantity over the view, rounded to 2 decimal
    /// places. `None` for an empty view; the currency label comes
    /// from the first line.
    pub async fn total(&self) -> Option<CartTotal> {
        let state = self.state.lock().await;
        let first = state.lines.first()?;

        let amount: f64 = state
            .lines
            .iter()
            .map(|line| line.product.price * f64::from(line.quantity))
            .sum();

        Some(CartTotal {
            amount: (amount * 100.0).round() / 100.0,
            currency: first.product.currency.clone(),
        })
    }

    fn sync_line(lines: &mut [CartLine], id: &str, quantity: u32) {
        if let Some(line) = lines.iter_mut().find(|line| line.product.id == id) {
            line.quantity = quantity;
        }
    }
}
