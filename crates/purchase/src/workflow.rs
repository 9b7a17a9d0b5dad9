//! Buy workflow: create then enable.

use domain::{DomainError, GoodsLookup, OrderLifecycle, OrderRepository};

use crate::command::BuyCommand;
use crate::result::BuyResult;

/// Orchestrates a buy through the order lifecycle.
pub struct BuyWorkflow<G, R> {
    lifecycle: OrderLifecycle<G, R>,
}

impl<G, R> BuyWorkflow<G, R>
where
    G: GoodsLookup,
    R: OrderRepository,
{
    /// Creates a workflow over an existing lifecycle.
    pub fn new(lifecycle: OrderLifecycle<G, R>) -> Self {
        Self { lifecycle }
    }

    /// Returns the underlying lifecycle.
    pub fn lifecycle(&self) -> &OrderLifecycle<G, R> {
        &self.lifecycle
    }

    /// Creates and enables an order for the command.
    ///
    /// Errors from either step are returned unchanged. If enable fails the
    /// order stays stored in `CREATED`.
    #[tracing::instrument(skip(self))]
    pub async fn do_buy(&self, command: &BuyCommand) -> Result<BuyResult, DomainError> {
        let mut order = self
            .lifecycle
            .create(command.buyer_id(), command.goods_id(), command.item_count())
            .await?;

        if let Err(err) = self.lifecycle.enable(&mut order).await {
            tracing::warn!(
                order_id = ?order.id(),
                error = %err,
                "order left in CREATED after failed enable"
            );
            return Err(err);
        }

        BuyResult::from_order(&order)
    }
}
