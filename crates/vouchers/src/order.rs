use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use geniki_core::OrderId;

/// Gateway id WooCommerce assigns to its built-in cash-on-delivery gateway.
pub const COD_GATEWAY_ID: &str = "cod";

/// Read-only view of a shop order, as far as voucher export cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    /// Raw payment gateway id stored on the order (e.g. `"cod"`, `"stripe"`).
    payment_method: String,
    total: Decimal,
}

impl Order {
    pub fn new(id: OrderId, payment_method: impl Into<String>, total: Decimal) -> Self {
        Self {
            id,
            payment_method: payment_method.into(),
            total,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn payment_method_id(&self) -> &str {
        &self.payment_method
    }

    pub fn total(&self) -> Decimal {
        self.total
    }
}

/// Resolved payment capability of an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CashOnDelivery,
    Other(String),
}

impl PaymentMethod {
    pub fn from_gateway_id(id: &str) -> Self {
        if id == COD_GATEWAY_ID {
            PaymentMethod::CashOnDelivery
        } else {
            PaymentMethod::Other(id.to_string())
        }
    }

    pub fn is_cash_on_delivery(&self) -> bool {
        matches!(self, PaymentMethod::CashOnDelivery)
    }
}
