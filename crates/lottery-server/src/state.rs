use lottery_core::Controller;
use std::path::Path;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Controller>,
}

impl AppState {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }

    /// Open the controller for `root` from its `.lottery` directory.
    pub fn open(root: &Path) -> lottery_core::Result<Self> {
        Ok(Self::new(Controller::open(root)?))
    }

    /// Run a blocking controller call off the async worker threads.
    pub async fn run<T, F>(&self, f: F) -> Result<T, crate::error::AppError>
    where
        T: Send + 'static,
        F: FnOnce(&Controller) -> lottery_core::Result<T> + Send + 'static,
    {
        let controller = self.controller.clone();
        let result = tokio::task::spawn_blocking(move || f(&controller))
            .await
            .map_err(|e| crate::error::AppError(anyhow::anyhow!("task join error: {e}")))??;
        Ok(result)
    }
}
