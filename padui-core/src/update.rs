//! Render-update flags and the redraw invalidation handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

bitflags::bitflags! {
    /// Flags describing what a render pass wants from its caller.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Update: u8 {
        /// State changed during the pass; run one follow-up pass.
        const DRAW = 1 << 0;
        /// Layout was deferred waiting for an asset.
        const DEFER = 1 << 1;
    }
}

/// A redraw request slot shared between a menu and asynchronous completions.
///
/// Asset loads and retry timers finish outside any render pass, possibly on
/// another thread and possibly after the menu that asked for them is gone.
/// They only ever touch this handle: set the dirty flag and poke the host's
/// hook so it can schedule a render on its own loop.
#[derive(Default)]
pub struct Invalidator {
    dirty: AtomicBool,
    hook: Mutex<Option<Box<dyn Fn() + Send + Sync>>>,
}

impl Invalidator {
    /// Create a new, clean invalidator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the frame dirty and notify the host hook, if any.
    pub fn invalidate(&self) {
        self.dirty.store(true, Ordering::SeqCst);

        if let Ok(hook) = self.hook.lock() {
            if let Some(hook) = hook.as_ref() {
                hook();
            }
        }
    }

    /// Whether a redraw has been requested since the last [Self::take].
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Consume the dirty flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    /// Install the host callback invoked whenever the frame goes dirty.
    pub fn set_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut slot) = self.hook.lock() {
            *slot = Some(Box::new(hook));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_take_clears_dirty() {
        let inv = Invalidator::new();
        assert!(!inv.is_dirty());

        inv.invalidate();
        assert!(inv.is_dirty());
        assert!(inv.take());
        assert!(!inv.is_dirty());
        assert!(!inv.take());
    }

    #[test]
    fn test_hook_fires_on_invalidate() {
        let inv = Invalidator::new();
        let count = Arc::new(AtomicUsize::new(0));
        let hooked = count.clone();
        inv.set_hook(move || {
            hooked.fetch_add(1, Ordering::SeqCst);
        });

        inv.invalidate();
        inv.invalidate();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
