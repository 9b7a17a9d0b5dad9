//! Buy command.

use common::{BuyerId, GoodsId};
use thiserror::Error;

/// Field-level problems found in a buy request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Buyer id must be positive.
    #[error("Invalid buyer id: {0}")]
    InvalidBuyerId(i64),

    /// Goods id must be positive.
    #[error("Invalid goods id: {0}")]
    InvalidGoodsId(i64),

    /// Item count must be a positive 32-bit value.
    #[error("Invalid item count: {0} (must be greater than 0)")]
    InvalidItemCount(i64),
}

/// Command to buy goods.
///
/// Can only be built through [`BuyCommand::new`], so every command that
/// exists has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyCommand {
    buyer_id: BuyerId,
    goods_id: GoodsId,
    item_count: u32,
}

impl BuyCommand {
    /// Creates a validated buy command.
    pub fn new(
        buyer_id: BuyerId,
        goods_id: GoodsId,
        item_count: u32,
    ) -> Result<Self, ValidationError> {
        if !buyer_id.is_valid() {
            return Err(ValidationError::InvalidBuyerId(buyer_id.value()));
        }
        if !goods_id.is_valid() {
            return Err(ValidationError::InvalidGoodsId(goods_id.value()));
        }
        if item_count == 0 {
            return Err(ValidationError::InvalidItemCount(0));
        }

        Ok(Self {
            buyer_id,
            goods_id,
            item_count,
        })
    }

    /// Returns the buyer.
    pub fn buyer_id(&self) -> BuyerId {
        self.buyer_id
    }

    /// Returns the goods to buy.
    pub fn goods_id(&self) -> GoodsId {
        self.goods_id
    }

    /// Returns how many items to buy.
    pub fn item_count(&self) -> u32 {
        self.item_count
    }
}
