use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use geniki_core::OrderId;

/// Category of an order annotation.
///
/// WooCommerce stores order notes as comments; only the `order_note` type is
/// relevant for voucher extraction. Everything else (reviews, webhooks
/// deliveries, plain comments) is carried as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    OrderNote,
    Other(String),
}

impl NoteKind {
    /// Storage representation (`comment_type` column).
    pub fn as_str(&self) -> &str {
        match self {
            NoteKind::OrderNote => "order_note",
            NoteKind::Other(s) => s.as_str(),
        }
    }
}

/// A free-text annotation attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNote {
    pub order_id: OrderId,
    /// Site-local timestamp of the note (WordPress `comment_date`).
    pub note_date: NaiveDateTime,
    pub text: String,
}

impl OrderNote {
    pub fn new(order_id: OrderId, note_date: NaiveDateTime, text: impl Into<String>) -> Self {
        Self {
            order_id,
            note_date,
            text: text.into(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Filter passed to a [`crate::NoteStore`].
///
/// `from` and `to` are both inclusive. `text_contains` is a case-sensitive
/// substring match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteQuery {
    pub kind: NoteKind,
    pub text_contains: String,
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    pub order: SortOrder,
    /// Upper bound on returned rows (`None` = unbounded).
    pub limit: Option<usize>,
}

impl NoteQuery {
    /// True if `kind`/`note` satisfy every filter of this query (ignores `limit`).
    pub fn matches(&self, kind: &NoteKind, note: &OrderNote) -> bool {
        *kind == self.kind
            && note.text.contains(self.text_contains.as_str())
            && note.note_date >= self.from
            && note.note_date <= self.to
    }
}
