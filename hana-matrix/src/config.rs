use core::sync::atomic::{AtomicBool, Ordering};

static MULTITHREAD_ENABLED: AtomicBool = AtomicBool::new(true);

/// Whether data-parallel loops may run on the `rayon` pool. 
/// Always `false` unless the `multithread` feature is compiled in.
pub fn is_multithread_enabled() -> bool {
    cfg!(feature = "multithread") && MULTITHREAD_ENABLED.load(Ordering::Relaxed)
}

pub fn set_multithread_enabled(val: bool) {
    MULTITHREAD_ENABLED.store(val, Ordering::Relaxed)
}
