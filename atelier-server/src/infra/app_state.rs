use std::{fmt, sync::Arc};

use atelier_core::GalleryService;

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gallery: Arc<GalleryService>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(config: Arc<Config>, gallery: Arc<GalleryService>) -> Self {
        Self { config, gallery }
    }
}
