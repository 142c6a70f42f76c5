//! Shared state handed to every route handler.

use kernel::Kernel;

pub struct AppState {
    pub kernel: Kernel,
}

impl AppState {
    pub fn new(kernel: Kernel) -> Self {
        AppState { kernel }
    }
}
