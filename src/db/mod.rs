pub mod client;
pub mod items;

pub use client::connect;
pub use items::{ItemRepository, MongoItemRepository, ITEMS_COLLECTION};
