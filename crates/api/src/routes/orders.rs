//! Buy and order inspection endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::OrderId;
use domain::{DomainError, GoodsLookup, Order, OrderRepository};
use purchase::{OrderBuyRequest, OrderBuyResponse, OrderBuyService};
use serde::Serialize;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<G, R> {
    pub buy_service: OrderBuyService<G, R>,
    /// Name of the storage backend, reported by `/health`.
    pub storage: &'static str,
}

impl<G, R> AppState<G, R>
where
    G: GoodsLookup,
    R: OrderRepository,
{
    /// Returns the order repository behind the buy service.
    pub fn repository(&self) -> &R {
        self.buy_service.workflow().lifecycle().repository()
    }
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub buyer_id: i64,
    pub goods_id: i64,
    pub item_count: u32,
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
    pub status: String,
    pub created_at: String,
}

impl OrderResponse {
    fn from_order(id: OrderId, order: &Order) -> Self {
        Self {
            id: id.value(),
            buyer_id: order.buyer_id().value(),
            goods_id: order.goods_id().value(),
            item_count: order.item_count(),
            unit_price_cents: order.unit_price().cents(),
            total_price_cents: order.total_price().cents(),
            status: order.status().to_string(),
            created_at: order.created_at().to_rfc3339(),
        }
    }
}

/// POST /orders/buy: create and enable an order.
///
/// A malformed or invalid request gets the empty response with 400.
#[tracing::instrument(skip(state, payload))]
pub async fn buy<G, R>(
    State(state): State<Arc<AppState<G, R>>>,
    payload: Result<Json<OrderBuyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderBuyResponse>), ApiError>
where
    G: GoodsLookup + 'static,
    R: OrderRepository + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "malformed buy request");
            return Ok((StatusCode::BAD_REQUEST, Json(OrderBuyResponse::empty())));
        }
    };

    let response = state.buy_service.buy(request).await?;

    let status = if response.is_empty() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(response)))
}

/// GET /orders/{id}: load a stored order in any status.
#[tracing::instrument(skip(state))]
pub async fn get<G, R>(
    State(state): State<Arc<AppState<G, R>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError>
where
    G: GoodsLookup + 'static,
    R: OrderRepository + 'static,
{
    let order_id = parse_order_id(&id)?;

    let order = state
        .repository()
        .find(order_id)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    Ok(Json(OrderResponse::from_order(order_id, &order)))
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    let order_id = id
        .parse::<i64>()
        .map(OrderId::new)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;

    if !order_id.is_valid() {
        return Err(ApiError::BadRequest(format!("Invalid ID: {id}")));
    }
    Ok(order_id)
}
