//! In-memory adapters for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use geniki_core::OrderId;
use geniki_vouchers::{
    NoteKind, NoteQuery, NoteStore, NoteStoreError, Order, OrderLookupError, OrderNote,
    OrderService, SortOrder,
};

/// Note store backed by a `Vec`, honoring the full [`NoteQuery`] contract.
#[derive(Debug, Default)]
pub struct InMemoryNoteStore {
    inner: RwLock<Vec<(NoteKind, OrderNote)>>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, kind: NoteKind, note: OrderNote) {
        if let Ok(mut notes) = self.inner.write() {
            notes.push((kind, note));
        }
    }

    /// Shorthand for inserting a system order note.
    pub fn insert_order_note(&self, note: OrderNote) {
        self.insert(NoteKind::OrderNote, note);
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|n| n.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn query_notes(&self, query: &NoteQuery) -> Result<Vec<OrderNote>, NoteStoreError> {
        let notes = self
            .inner
            .read()
            .map_err(|_| NoteStoreError::Storage("note store lock poisoned".to_string()))?;

        let mut matched: Vec<OrderNote> = notes
            .iter()
            .filter(|(kind, note)| query.matches(kind, note))
            .map(|(_, note)| note.clone())
            .collect();

        match query.order {
            SortOrder::Ascending => matched.sort_by_key(|n| n.note_date),
            SortOrder::Descending => matched.sort_by(|a, b| b.note_date.cmp(&a.note_date)),
        }
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }

        Ok(matched)
    }
}

/// Order service backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryOrderService {
    inner: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, order: Order) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(order.id(), order);
        }
    }

    pub fn remove(&self, id: OrderId) -> Option<Order> {
        self.inner.write().ok()?.remove(&id)
    }
}

#[async_trait::async_trait]
impl OrderService for InMemoryOrderService {
    async fn get_order(&self, id: OrderId) -> Result<Order, OrderLookupError> {
        let map = self
            .inner
            .read()
            .map_err(|_| OrderLookupError::Storage("order store lock poisoned".to_string()))?;
        map.get(&id).cloned().ok_or(OrderLookupError::NotFound(id))
    }
}
