use std::io::{Read, Seek, Write};

use log::debug;

use super::storage::Storage;

/// Stores every slot as `<folder>/<key>.json`.
pub struct FileStorage {
  folder: std::path::PathBuf,
}

impl FileStorage {
  pub fn new(database_folder: &str) -> std::io::Result<Self> {
    std::fs::create_dir_all(database_folder)?;
    debug!("storage folder: {}", database_folder);

    Ok(Self {
      folder: std::path::Path::new(database_folder).to_path_buf(),
    })
  }

  pub fn slot_path(&self, key: &str) -> std::path::PathBuf {
    self.folder.join(format!("{}.json", key))
  }
}

impl Storage for FileStorage {
  fn read(&self, key: &str) -> Option<String> {
    let path = self.slot_path(key);
    let mut file = match std::fs::File::open(&path) {
      Ok(file) => file,
      Err(err) => {
        debug!("slot {} not readable: {}", path.display(), err);
        return None;
      }
    };

    let mut raw = String::new();
    if let Err(err) = file.read_to_string(&mut raw) {
      debug!("slot {} read err: {}", path.display(), err);
      return None;
    }
    return Some(raw);
  }

  fn write(&mut self, key: &str, raw: &str) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new()
      .create(true)
      .write(true)
      .open(self.slot_path(key))?;

    file.set_len(0)?;
    file.rewind()?;
    file.write_all(raw.as_bytes())?;
    file.flush()?;

    debug!("wrote {} bytes to slot {}", raw.len(), key);
    Ok(())
  }
}
