//! Hash collections used across the workspace.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert(7u64, "tile");
        assert_eq!(map.get(&7), Some(&"tile"));
        assert_eq!(map.remove(&7), Some("tile"));
        assert!(map.is_empty());
    }
}
