use std::collections::HashMap;

use super::storage::Storage;

/// Keeps slots in memory only, nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
  slots: HashMap<String, String>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    return Self::default();
  }

  pub fn with_slot(key: &str, raw: &str) -> Self {
    let mut storage = Self::new();
    storage.slots.insert(key.to_owned(), raw.to_owned());
    return storage;
  }
}

impl Storage for MemoryStorage {
  fn read(&self, key: &str) -> Option<String> {
    self.slots.get(key).cloned()
  }

  fn write(&mut self, key: &str, raw: &str) -> std::io::Result<()> {
    self.slots.insert(key.to_owned(), raw.to_owned());
    Ok(())
  }
}
