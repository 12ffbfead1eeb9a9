use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use crate::*;

/// Storage key of the preferred sliding puzzle side.
pub const GRID_SIZE_KEY: &str = "puzzleDifficulty";

pub const DEFAULT_PUZZLE_SIZE: Coord = 4;

/// String key-value persistence supplied by the embedding front end, such
/// as browser local storage.
pub trait KeyValueStore {
    type Error: core::fmt::Display;

    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> core::result::Result<(), Self::Error>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    type Error = core::convert::Infallible;

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> core::result::Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Preferred puzzle side, falling back to the default when nothing usable
/// is stored.
pub fn load_grid_size(store: &impl KeyValueStore) -> Coord {
    let Some(raw) = store.get(GRID_SIZE_KEY) else {
        return DEFAULT_PUZZLE_SIZE;
    };

    match serde_json::from_str::<Coord>(&raw) {
        Ok(size) if size >= 2 => size,
        Ok(size) => {
            log::warn!("Ignoring stored puzzle size {}, too small", size);
            DEFAULT_PUZZLE_SIZE
        }
        Err(err) => {
            log::warn!("Ignoring unreadable puzzle size {:?}: {}", raw, err);
            DEFAULT_PUZZLE_SIZE
        }
    }
}

pub fn save_grid_size(store: &mut impl KeyValueStore, size: Coord) {
    let value = match serde_json::to_string(&size) {
        Ok(value) => value,
        Err(err) => {
            log::error!("Could not encode puzzle size: {}", err);
            return;
        }
    };
    if let Err(err) = store.set(GRID_SIZE_KEY, value) {
        log::error!("Could not save puzzle size: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_uses_default() {
        assert_eq!(load_grid_size(&MemoryStore::default()), 4);
    }

    #[test]
    fn saved_size_is_read_back() {
        let mut store = MemoryStore::default();
        save_grid_size(&mut store, 5);

        assert_eq!(store.get(GRID_SIZE_KEY).as_deref(), Some("5"));
        assert_eq!(load_grid_size(&store), 5);
    }

    #[test]
    fn garbage_is_ignored() {
        let mut store = MemoryStore::default();
        store.set(GRID_SIZE_KEY, "\"large\"".to_string()).unwrap();
        assert_eq!(load_grid_size(&store), DEFAULT_PUZZLE_SIZE);

        store.set(GRID_SIZE_KEY, "1".to_string()).unwrap();
        assert_eq!(load_grid_size(&store), DEFAULT_PUZZLE_SIZE);

        store.set(GRID_SIZE_KEY, "999".to_string()).unwrap();
        assert_eq!(load_grid_size(&store), DEFAULT_PUZZLE_SIZE);
    }
}
