use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Liveness flag for a view controller.
///
/// Clones share the flag, so whoever owns the view can tear it down while an
/// operation is still awaiting the backend. Controllers check
/// [`ViewLifetime::is_alive`] before applying any completed result.
#[derive(Debug, Clone)]
pub struct ViewLifetime {
    alive: Arc<AtomicBool>,
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub fn teardown(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teardown_is_shared_between_clones() {
        let lifetime = ViewLifetime::new();
        let handle = lifetime.clone();
        assert!(lifetime.is_alive());

        handle.teardown();

        assert!(!lifetime.is_alive());
        assert!(!handle.is_alive());
    }
}
