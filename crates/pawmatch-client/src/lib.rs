pub mod api;
pub mod client;
pub mod cursor;
pub mod error;
pub mod types;

pub use api::CatalogApi;
pub use client::DogsClient;
pub use cursor::cursor_from_link;
pub use error::ApiError;
