//! Order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use common::Outcome;
use domain::{ManufacturedOrder, Order, OrderRequest};
use rust_decimal::Decimal;
use saga::{ManufactureRepository, OrderPort};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub orders: Arc<dyn OrderPort>,
    pub ledger: Arc<dyn ManufactureRepository>,
}

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub components: Vec<String>,
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub order_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl From<Order> for OrderCreatedResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id.to_string(),
            total: order.price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ManufacturedOrderResponse {
    pub order_id: String,
    pub face: String,
    pub material: String,
    pub arms: String,
    pub mobility: String,
}

impl From<ManufacturedOrder> for ManufacturedOrderResponse {
    fn from(order: ManufacturedOrder) -> Self {
        let robot = order.robot;
        Self {
            order_id: order.id.to_string(),
            face: robot.face().code().to_string(),
            material: robot.material().code().to_string(),
            arms: robot.arms().code().to_string(),
            mobility: robot.mobility().code().to_string(),
        }
    }
}

// -- Handlers --

/// POST /orders: build, price and register a robot.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        metrics::counter!("http_orders_malformed_total").increment(1);
        ApiError::BadRequest(rejection.body_text())
    })?;

    match state.orders.create(OrderRequest::new(req.components)) {
        Outcome::Success(order) => {
            tracing::info!(order_id = %order.id, "order accepted");
            Ok((StatusCode::CREATED, Json(order.into())))
        }
        Outcome::Failure(err) => Err(ApiError::Domain(err)),
    }
}

/// GET /orders: list the orders held by the manufacturing ledger.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ManufacturedOrderResponse>>, ApiError> {
    let orders = state.ledger.fetch_orders().into_result()?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
