//! Request boundary for buying: validation, mapping and instrumentation.

use common::{BuyerId, GoodsId};
use domain::{DomainError, GoodsLookup, OrderRepository};
use serde::{Deserialize, Serialize};

use crate::command::{BuyCommand, ValidationError};
use crate::monitor::{CallMonitor, CallPolicy};
use crate::result::BuyResult;
use crate::workflow::BuyWorkflow;

/// Inbound buy request as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBuyRequest {
    pub buyer_id: i64,
    pub goods_id: i64,
    pub item_count: i64,
}

impl OrderBuyRequest {
    /// Checks every field and builds the command.
    pub fn validate(&self) -> Result<BuyCommand, ValidationError> {
        let item_count = u32::try_from(self.item_count)
            .map_err(|_| ValidationError::InvalidItemCount(self.item_count))?;

        BuyCommand::new(
            BuyerId::new(self.buyer_id),
            GoodsId::new(self.goods_id),
            item_count,
        )
    }
}

/// Payload of a successful buy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBuyDto {
    pub order_id: i64,
    pub buyer_id: i64,
    pub goods_id: i64,
    pub item_count: u32,
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
    pub status: String,
}

impl From<&BuyResult> for OrderBuyDto {
    fn from(result: &BuyResult) -> Self {
        Self {
            order_id: result.order_id().value(),
            buyer_id: result.buyer_id().value(),
            goods_id: result.goods_id().value(),
            item_count: result.item_count(),
            unit_price_cents: result.unit_price().cents(),
            total_price_cents: result.total_price().cents(),
            status: result.status().to_string(),
        }
    }
}

/// Outbound buy response: either empty (rejected request) or a success payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBuyResponse {
    pub success: bool,
    pub module: Option<OrderBuyDto>,
}

impl OrderBuyResponse {
    /// Response for a request that failed validation.
    pub fn empty() -> Self {
        Self {
            success: false,
            module: None,
        }
    }

    /// Response carrying the bought order.
    pub fn success(module: OrderBuyDto) -> Self {
        Self {
            success: true,
            module: Some(module),
        }
    }

    /// Returns true for the empty response.
    pub fn is_empty(&self) -> bool {
        self.module.is_none()
    }
}

/// Entry point for buy requests.
pub struct OrderBuyService<G, R> {
    workflow: BuyWorkflow<G, R>,
    monitor: CallMonitor,
}

impl<G, R> OrderBuyService<G, R>
where
    G: GoodsLookup,
    R: OrderRepository,
{
    /// Creates a service with the default call policy.
    pub fn new(workflow: BuyWorkflow<G, R>) -> Self {
        Self::with_policy(workflow, CallPolicy::default())
    }

    /// Creates a service with a custom call policy.
    pub fn with_policy(workflow: BuyWorkflow<G, R>, policy: CallPolicy) -> Self {
        Self {
            workflow,
            monitor: CallMonitor::new(policy),
        }
    }

    /// Returns the wrapped workflow.
    pub fn workflow(&self) -> &BuyWorkflow<G, R> {
        &self.workflow
    }

    /// Returns the call monitor.
    pub fn monitor(&self) -> &CallMonitor {
        &self.monitor
    }

    /// Handles a buy request.
    ///
    /// An invalid request yields [`OrderBuyResponse::empty`] without touching
    /// any collaborator. Lifecycle errors are returned unchanged.
    pub async fn buy(&self, request: OrderBuyRequest) -> Result<OrderBuyResponse, DomainError> {
        self.monitor.observe("order.buy", self.handle(request)).await
    }

    #[tracing::instrument(skip(self))]
    async fn handle(&self, request: OrderBuyRequest) -> Result<OrderBuyResponse, DomainError> {
        metrics::counter!("buy_requests_total").increment(1);

        let command = match request.validate() {
            Ok(command) => command,
            Err(err) => {
                metrics::counter!("buy_rejected_total").increment(1);
                tracing::warn!(error = %err, "buy request rejected");
                return Ok(OrderBuyResponse::empty());
            }
        };

        match self.workflow.do_buy(&command).await {
            Ok(result) => {
                tracing::info!(order_id = %result.order_id(), "buy completed");
                Ok(OrderBuyResponse::success(OrderBuyDto::from(&result)))
            }
            Err(err) => {
                metrics::counter!("buy_failed_total", "kind" => err.kind().as_str()).increment(1);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_maps_fields() {
        let request = OrderBuyRequest {
            buyer_id: 7,
            goods_id: 42,
            item_count: 3,
        };

        let cmd = request.validate().unwrap();
        assert_eq!(cmd.buyer_id(), BuyerId::new(7));
        assert_eq!(cmd.item_count(), 3);
    }

    #[test]
    fn test_validate_rejects_negative_and_oversized_counts() {
        for item_count in [-1, 0, i64::from(u32::MAX) + 1] {
            let request = OrderBuyRequest {
                buyer_id: 7,
                goods_id: 42,
                item_count,
            };
            assert_eq!(
                request.validate(),
                Err(ValidationError::InvalidItemCount(item_count))
            );
        }
    }

    #[test]
    fn test_empty_response_shape() {
        let json = serde_json::to_value(OrderBuyResponse::empty()).unwrap();
        assert_eq!(json, serde_json::json!({ "success": false, "module": null }));
    }
}
