//! Process-wide switch between serial and data-parallel tree construction.
//!
//! Parallel construction is an execution strategy, not a semantic change:
//! tree digests must be bit-identical either way. The switch exists so
//! equivalence tests can force the serial path while the `parallel` feature
//! is compiled in. Without the feature every query answers `false` and the
//! guard is a no-op.

#[cfg(feature = "parallel")]
mod toggle {
    use std::sync::atomic::{AtomicBool, Ordering};

    static ENABLED: AtomicBool = AtomicBool::new(true);

    pub(super) fn load() -> bool {
        ENABLED.load(Ordering::SeqCst)
    }

    pub(super) fn swap(enabled: bool) -> bool {
        ENABLED.swap(enabled, Ordering::SeqCst)
    }

    pub(super) fn store(enabled: bool) {
        ENABLED.store(enabled, Ordering::SeqCst)
    }
}

/// Whether tree builders should use the parallel strategy.
pub fn parallelism_enabled() -> bool {
    #[cfg(feature = "parallel")]
    {
        toggle::load()
    }
    #[cfg(not(feature = "parallel"))]
    {
        false
    }
}

/// Override the parallelism switch; the previous value is restored when the
/// returned guard drops.
pub fn set_parallelism(enabled: bool) -> ParallelismGuard {
    #[cfg(feature = "parallel")]
    {
        ParallelismGuard {
            previous: toggle::swap(enabled),
        }
    }
    #[cfg(not(feature = "parallel"))]
    {
        let _ = enabled;
        ParallelismGuard {}
    }
}

/// RAII guard restoring the previous parallelism setting on drop.
pub struct ParallelismGuard {
    #[cfg(feature = "parallel")]
    previous: bool,
}

impl Drop for ParallelismGuard {
    fn drop(&mut self) {
        #[cfg(feature = "parallel")]
        toggle::store(self.previous);
    }
}
