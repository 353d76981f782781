pub mod images;
pub mod likes;

pub use images::PostgresImageRepository;
pub use likes::PostgresLikeRepository;
