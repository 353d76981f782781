pub mod jwt;
pub mod middleware;

pub use middleware::{auth_middleware, optional_auth_middleware};
