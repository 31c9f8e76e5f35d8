use std::sync::atomic::{AtomicU64, Ordering};

/// Returns a process-unique identifier for correlating a renderer connection's logs.
pub fn next_conn_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_called_repeatedly_then_ids_never_repeat() {
        let a = next_conn_id();
        let b = next_conn_id();

        assert!(b > a);
    }
}
