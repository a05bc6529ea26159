//! Hand-rolled port fakes for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use geniki_core::OrderId;

use crate::{
    GatewayResolutionError, NoteQuery, NoteStore, NoteStoreError, Order, OrderLookupError,
    OrderNote, OrderService, PaymentMethod,
};

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn amount(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Returns a canned note list regardless of the query, remembering the query.
#[derive(Default)]
pub struct FakeNotes {
    notes: Vec<OrderNote>,
    failure: Option<String>,
    last_query: Mutex<Option<NoteQuery>>,
}

impl FakeNotes {
    pub fn returning(notes: Vec<OrderNote>) -> Self {
        Self {
            notes,
            ..Self::default()
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            failure: Some(msg.to_string()),
            ..Self::default()
        }
    }

    pub fn last_query(&self) -> Option<NoteQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl NoteStore for FakeNotes {
    async fn query_notes(&self, query: &NoteQuery) -> Result<Vec<OrderNote>, NoteStoreError> {
        *self.last_query.lock().unwrap() = Some(query.clone());
        match &self.failure {
            Some(msg) => Err(NoteStoreError::Storage(msg.clone())),
            None => Ok(self.notes.clone()),
        }
    }
}

#[derive(Default)]
pub struct FakeOrders {
    orders: HashMap<OrderId, Order>,
    unresolvable: HashSet<OrderId>,
}

impl FakeOrders {
    pub fn with(mut self, id: u64, gateway: &str, total: &str) -> Self {
        let id = OrderId::new(id);
        self.orders.insert(id, Order::new(id, gateway, amount(total)));
        self
    }

    pub fn cod(self, id: u64, total: &str) -> Self {
        self.with(id, "cod", total)
    }

    /// Order exists but its gateway plugin is gone.
    pub fn unresolvable(mut self, id: u64, total: &str) -> Self {
        self = self.with(id, "geniki_cod_legacy", total);
        self.unresolvable.insert(OrderId::new(id));
        self
    }
}

#[async_trait]
impl OrderService for FakeOrders {
    async fn get_order(&self, id: OrderId) -> Result<Order, OrderLookupError> {
        self.orders
            .get(&id)
            .cloned()
            .ok_or(OrderLookupError::NotFound(id))
    }

    async fn payment_method(&self, order: &Order) -> Result<PaymentMethod, GatewayResolutionError> {
        if self.unresolvable.contains(&order.id()) {
            return Err(GatewayResolutionError {
                order_id: order.id(),
                reason: "gateway not registered".to_string(),
            });
        }
        Ok(PaymentMethod::from_gateway_id(order.payment_method_id()))
    }
}
