//! Note store and order service adapters.

pub mod in_memory;
pub mod mysql;

pub use in_memory::{InMemoryNoteStore, InMemoryOrderService};
pub use mysql::{MySqlNoteStore, MySqlOrderService};
