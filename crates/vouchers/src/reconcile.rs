//! Voucher reconciliation: notes in, unique cash-on-delivery voucher records out.

use std::collections::HashMap;

use geniki_core::OrderId;

use crate::{
    OrderNote, OrderService, PaymentMethod, VoucherNumber, VoucherRecord, extract_voucher_number,
};

/// Reconcile ascending-ordered notes into voucher records.
///
/// 1. Notes collapse per order; the last note for an order replaces earlier
///    ones while the order keeps its first position.
/// 2. Each order is looked up and must pay cash on delivery; its note must hold
///    a 10-digit voucher number. Any failure skips that order only.
/// 3. Records collapse per voucher number the same way: a later record with
///    the same number replaces the earlier one in place.
///
/// The function keeps no state between calls.
pub async fn reconcile<O>(notes: &[OrderNote], orders: &O) -> Vec<VoucherRecord>
where
    O: OrderService + ?Sized,
{
    let mut latest: Vec<&OrderNote> = Vec::new();
    let mut slot_by_order: HashMap<OrderId, usize> = HashMap::new();
    for note in notes {
        match slot_by_order.get(&note.order_id) {
            Some(&slot) => latest[slot] = note,
            None => {
                slot_by_order.insert(note.order_id, latest.len());
                latest.push(note);
            }
        }
    }

    let mut records: Vec<VoucherRecord> = Vec::new();
    let mut slot_by_voucher: HashMap<VoucherNumber, usize> = HashMap::new();
    for note in latest {
        let Some(record) = reconcile_note(note, orders).await else {
            continue;
        };

        match slot_by_voucher.get(&record.voucher_number) {
            Some(&slot) => {
                if records[slot].order_id != record.order_id {
                    tracing::warn!(
                        voucher = %record.voucher_number,
                        replaced_order_id = %records[slot].order_id,
                        order_id = %record.order_id,
                        "voucher number shared by two orders; keeping the later one"
                    );
                }
                records[slot] = record;
            }
            None => {
                slot_by_voucher.insert(record.voucher_number.clone(), records.len());
                records.push(record);
            }
        }
    }

    tracing::debug!(
        notes = notes.len(),
        orders = slot_by_order.len(),
        records = records.len(),
        "reconciled voucher notes"
    );

    records
}

async fn reconcile_note<O>(note: &OrderNote, orders: &O) -> Option<VoucherRecord>
where
    O: OrderService + ?Sized,
{
    let order = match orders.get_order(note.order_id).await {
        Ok(order) => order,
        Err(e) => {
            tracing::debug!(order_id = %note.order_id, reason = %e, "skipping order: lookup failed");
            return None;
        }
    };

    match orders.payment_method(&order).await {
        Ok(PaymentMethod::CashOnDelivery) => {}
        Ok(PaymentMethod::Other(gateway)) => {
            tracing::debug!(order_id = %note.order_id, gateway = %gateway, "skipping order: not cash on delivery");
            return None;
        }
        Err(e) => {
            tracing::debug!(order_id = %note.order_id, reason = %e, "skipping order: gateway unresolved");
            return None;
        }
    }

    let Some(voucher_number) = extract_voucher_number(&note.text) else {
        tracing::debug!(order_id = %note.order_id, "skipping order: note has no voucher number");
        return None;
    };

    Some(VoucherRecord {
        order_id: note.order_id,
        voucher_number,
        voucher_date: note.note_date,
        order_amount: order.total(),
    })
}
