//! The busy state shown while a request is in flight.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Flag raised while at least one submission request is in flight.
///
/// Each guard counts as one holder; the flag clears when the last one drops.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    inner: Arc<BusyInner>,
}

#[derive(Debug, Default)]
struct BusyInner {
    holders: AtomicUsize,
    releases: AtomicUsize,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.inner.holders.load(Ordering::SeqCst) > 0
    }

    /// How many times the flag has been cleared.
    pub fn release_count(&self) -> usize {
        self.inner.releases.load(Ordering::SeqCst)
    }

    /// Raise the flag, joining any request already holding it.
    pub fn acquire(&self) -> BusyGuard {
        self.inner.holders.fetch_add(1, Ordering::SeqCst);
        BusyGuard {
            flag: self.clone(),
        }
    }

    /// Raise the flag only if nobody holds it.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.inner
            .holders
            .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard {
                flag: self.clone(),
            })
    }
}

/// Releases its hold on the busy flag exactly once when dropped.
#[derive(Debug)]
pub struct BusyGuard {
    flag: BusyFlag,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let remaining = self.flag.inner.holders.fetch_sub(1, Ordering::SeqCst) - 1;
        self.flag.inner.releases.fetch_add(1, Ordering::SeqCst);
        if remaining == 0 {
            log::debug!("busy state cleared");
        }
    }
}
