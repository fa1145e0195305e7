//! Module identifier allocation.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Alphabet of the random id suffix.
const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w',
    'x', 'y', 'z',
];
/// Length of the random id suffix.
const ID_SUFFIX_LEN: usize = 6;

/// Mints module ids of the form `<prefix>_<suffix>`.
pub trait IdAllocator: Send + Sync {
    fn allocate(
        &self,
        prefix: &str,
    ) -> String;
}

/// Random suffixes from `nanoid`. Unique enough for one scenario, not
/// meant to be unguessable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NanoIds;

impl IdAllocator for NanoIds {
    fn allocate(
        &self,
        prefix: &str,
    ) -> String {
        format!("{}_{}", prefix, nanoid::nanoid!(ID_SUFFIX_LEN, &ID_ALPHABET))
    }
}

/// Deterministic counter-based ids (`<prefix>_1`, `<prefix>_2`, ...).
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicUsize,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdAllocator for SequentialIds {
    fn allocate(
        &self,
        prefix: &str,
    ) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}_{}", prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_nano_ids_shape() {
        let id = NanoIds.allocate("sheets");
        let (prefix, suffix) = id.split_once('_').unwrap();
        assert_eq!(prefix, "sheets");
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| ID_ALPHABET.contains(&c)));
    }

    #[test]
    fn test_nano_ids_do_not_collide_in_a_run() {
        let ids: HashSet<String> = (0..200).map(|_| NanoIds.allocate("map")).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::new();
        assert_eq!(ids.allocate("ai"), "ai_1");
        assert_eq!(ids.allocate("error"), "error_2");
    }
}
