pub mod memory;
pub mod ports;
pub mod postgres;
pub mod repositories;

pub use memory::InMemoryGalleryStore;
pub use ports::{ImageRepository, LikeRepository};
pub use postgres::PostgresDatabase;
