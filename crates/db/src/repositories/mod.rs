//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-step mutations
//! (sending a message, recording a sale) are composite methods that run
//! inside a single database transaction.

pub mod conversation_repo;
pub mod listing_repo;
pub mod message_repo;
pub mod notification_repo;
pub mod session_repo;
pub mod transaction_repo;
pub mod user_repo;

pub use conversation_repo::ConversationRepo;
pub use listing_repo::{ListingRepo, WasteImageRepo};
pub use message_repo::MessageRepo;
pub use notification_repo::NotificationRepo;
pub use session_repo::SessionRepo;
pub use transaction_repo::TransactionRepo;
pub use user_repo::UserRepo;
