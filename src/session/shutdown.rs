use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

/// Stop request shared between a signal handler and a play loop.
///
/// Loops poll [`is_set`](ShutdownFlag::is_set) between rounds and leave
/// through their normal save path once it flips.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        ShutdownFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Create a flag raised by SIGINT, SIGTERM or SIGHUP.
    ///
    /// Only one handler can be installed per process.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let flag = Self::new();
        let handler_flag = flag.clone();
        ctrlc::set_handler(move || {
            info!("shutdown signal received");
            handler_flag.trigger();
        })?;
        Ok(flag)
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
