//! Record stores for user accounts and the tiered gift inventory.
//! - Each store owns one JSON file and rewrites it whole on every mutation.
//! - Validation against the configured domains happens before anything is written.
//! - Record-level "not found" is a return value; `StoreError` is reserved for real failures.

pub mod errors;
pub mod validation;
pub mod storage;
pub mod file;

pub use errors::StoreError;
pub use file::gift_store::GiftStore;
pub use file::user_store::UserStore;
pub use file::RecordStores;
