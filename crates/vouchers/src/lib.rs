//! Geniki voucher domain module.
//!
//! Turns free-text order notes into a deduplicated list of cash-on-delivery
//! voucher records. Storage and order lookups are reached only through the
//! ports in [`ports`]; everything else here is deterministic logic.

pub mod fetcher;
pub mod note;
pub mod order;
pub mod ports;
pub mod range;
pub mod reconcile;
pub mod voucher;

pub use fetcher::{DEFAULT_NOTE_MARKER, FetchOptions, fetch_notes};
pub use note::{NoteKind, NoteQuery, OrderNote, SortOrder};
pub use order::{Order, PaymentMethod};
pub use ports::{GatewayResolutionError, NoteStore, NoteStoreError, OrderLookupError, OrderService};
pub use range::ExportRange;
pub use reconcile::reconcile;
pub use voucher::{VoucherNumber, VoucherRecord, extract_voucher_number};

#[cfg(test)]
mod test_support;
