//! Application state shared by all handlers.

use keepsake_core::Config;
use keepsake_storage::{LocalStorage, Uploader};

pub struct AppState {
    pub config: Config,
    /// Chooses remote or local storage for each upload.
    pub uploader: Uploader,
    /// Always receives the original upload; serves fallback assets.
    pub local_storage: LocalStorage,
}
