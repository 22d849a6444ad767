//! Record types persisted by the user and gift stores.
//! - `user`: account records and the display view used for listings.
//! - `gift`: the three-level gift inventory and its entries.

pub mod gift;
pub mod user;

pub use gift::{GiftEntry, GiftInventory, GiftPool, GiftTier};
pub use user::{NewUser, Timestamp, UserRecord, UserView};
