//! Request coordinator configuration

/// Configuration for the RequestCoordinator
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Command channel buffer size
    pub channel_buffer: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self { channel_buffer: 64 }
    }
}
