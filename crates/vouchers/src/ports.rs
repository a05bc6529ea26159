//! Ports to the outside world: the note store and the order service.
//!
//! The reconciler only ever talks to these traits, so the same pipeline runs
//! against an in-memory fixture in tests and a WooCommerce database in
//! production.

use std::sync::Arc;

use thiserror::Error;

use geniki_core::OrderId;

use crate::{NoteQuery, Order, OrderNote, PaymentMethod};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NoteStoreError {
    #[error("note storage error: {0}")]
    Storage(String),

    /// More matching notes than the configured cap. The run is aborted
    /// because the dropped rows would be the newest ones.
    #[error("more than {limit} voucher notes in range; narrow the date range")]
    TooManyNotes { limit: usize },
}

/// Failure to load a single order. Never fatal for an export run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderLookupError {
    #[error("order not found: {0}")]
    NotFound(OrderId),
    #[error("order storage error: {0}")]
    Storage(String),
}

/// The order's payment gateway could not be determined.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot resolve payment gateway for order {order_id}: {reason}")]
pub struct GatewayResolutionError {
    pub order_id: OrderId,
    pub reason: String,
}

/// Read-only source of order annotations.
#[async_trait::async_trait]
pub trait NoteStore: Send + Sync {
    /// Return notes matching `query`, ordered by `note_date` per `query.order`.
    ///
    /// An empty result is not an error.
    async fn query_notes(&self, query: &NoteQuery) -> Result<Vec<OrderNote>, NoteStoreError>;
}

/// Read-only order lookups.
#[async_trait::async_trait]
pub trait OrderService: Send + Sync {
    async fn get_order(&self, id: OrderId) -> Result<Order, OrderLookupError>;

    /// Resolve the payment capability of `order`.
    ///
    /// The default derives it from the stored gateway id; an order without one
    /// cannot be resolved.
    async fn payment_method(&self, order: &Order) -> Result<PaymentMethod, GatewayResolutionError> {
        let gateway = order.payment_method_id().trim();
        if gateway.is_empty() {
            return Err(GatewayResolutionError {
                order_id: order.id(),
                reason: "order has no payment gateway".to_string(),
            });
        }
        Ok(PaymentMethod::from_gateway_id(gateway))
    }
}

#[async_trait::async_trait]
impl<S> NoteStore for Arc<S>
where
    S: NoteStore + ?Sized,
{
    async fn query_notes(&self, query: &NoteQuery) -> Result<Vec<OrderNote>, NoteStoreError> {
        (**self).query_notes(query).await
    }
}

#[async_trait::async_trait]
impl<S> OrderService for Arc<S>
where
    S: OrderService + ?Sized,
{
    async fn get_order(&self, id: OrderId) -> Result<Order, OrderLookupError> {
        (**self).get_order(id).await
    }

    async fn payment_method(&self, order: &Order) -> Result<PaymentMethod, GatewayResolutionError> {
        (**self).payment_method(order).await
    }
}
