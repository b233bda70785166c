//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.
//!
//! - **snapshot**: JSON snapshot of albums and sticker rows, read from disk
//!   through `cap-std`.

pub mod snapshot;
