use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::Notify;
use tracing::info;

/// Lets a request ask the server to drain and stop.
///
/// `main` awaits [`ShutdownTrigger::requested`] alongside OS signals; the
/// restart endpoint fires it. Firing before anyone waits is not lost.
#[derive(Clone, Default, Debug)]
pub struct ShutdownTrigger {
    inner: Arc<Inner>,
}

#[derive(Default, Debug)]
struct Inner {
    notify: Notify,
    fired: AtomicBool,
}

impl ShutdownTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fire(&self) {
        if !self.inner.fired.swap(true, Ordering::AcqRel) {
            info!("shutdown requested");
        }
        self.inner.notify.notify_waiters();
    }

    pub fn is_fired(&self) -> bool {
        self.inner.fired.load(Ordering::Acquire)
    }

    pub async fn requested(&self) {
        let notified = self.inner.notify.notified();
        if self.is_fired() {
            return;
        }
        notified.await;
    }
}
