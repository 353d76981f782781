pub mod service;
pub mod upload;

pub use service::{GalleryService, ImageForm};
pub use upload::FileUpload;
