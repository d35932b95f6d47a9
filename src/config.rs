use log::debug;

use crate::store::DEFAULT_STORAGE_KEY;

const TASKLIST_DEFAULT_STORAGE_DIR: &str = ".tasklist";
const TASKLIST_DEFAULT_CONFIG_NAME: &str = ".tasklist.json";

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Config {
  pub storage_dir_path: String,
  #[serde(default = "default_storage_key")]
  pub storage_key: String,
}

fn default_storage_key() -> String {
  DEFAULT_STORAGE_KEY.to_owned()
}

impl Config {
  pub fn with_storage_dir(storage_dir_path: &str) -> Self {
    Self {
      storage_dir_path: storage_dir_path.to_owned(),
      storage_key: default_storage_key(),
    }
  }

  /// Loads `$TASKLIST_CONFIG` (or `~/.tasklist.json`), writing the defaults
  /// there first if the file doesn't exist. `$TASKLIST_DIR` overrides the data
  /// folder for this run only.
  pub fn new() -> std::io::Result<Self> {
    let home_env = std::env::var("HOME")
      .map_err(|err| std::io::Error::new(std::io::ErrorKind::NotFound, format!("HOME: {}", err)))?;
    let home = std::path::Path::new(home_env.as_str());

    let config_file_path = match std::env::var("TASKLIST_CONFIG") {
      Ok(file_path) => std::path::Path::new(&file_path).to_path_buf(),
      Err(_) => home.join(TASKLIST_DEFAULT_CONFIG_NAME),
    };

    let mut config = Self::load_or_create(&config_file_path, || {
      Self::with_storage_dir(&home.join(TASKLIST_DEFAULT_STORAGE_DIR).to_string_lossy())
    })?;

    if let Ok(dir) = std::env::var("TASKLIST_DIR") {
      debug!("data folder overridden by TASKLIST_DIR: {}", dir);
      config.storage_dir_path = dir;
    }
    return Ok(config);
  }

  pub fn load_or_create<F>(config_file_path: &std::path::Path, defaults: F) -> std::io::Result<Self>
  where
    F: FnOnce() -> Self,
  {
    if !config_file_path.exists() {
      let config = defaults();
      if let Some(parent) = config_file_path.parent() {
        std::fs::create_dir_all(parent)?;
      }
      let file = std::fs::File::create(config_file_path)?;
      serde_json::to_writer_pretty(file, &config)?;
      debug!("wrote default config to {}", config_file_path.display());
      return Ok(config);
    }

    let file = std::fs::File::open(config_file_path)?;
    let config = serde_json::from_reader(std::io::BufReader::new(file))?;
    return Ok(config);
  }
}

#[cfg(test)]
mod tests {
  use super::Config;

  #[test]
  fn creates_defaults_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf").join("tasklist.json");

    let config = Config::load_or_create(&path, || Config::with_storage_dir("/tmp/data")).unwrap();
    assert_eq!(config.storage_key, "tasks");
    assert!(path.exists());

    let again = Config::load_or_create(&path, || Config::with_storage_dir("/elsewhere")).unwrap();
    assert_eq!(again, config);
  }

  #[test]
  fn storage_key_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasklist.json");
    std::fs::write(&path, r#"{"storage_dir_path":"/data"}"#).unwrap();

    let config = Config::load_or_create(&path, || unreachable!()).unwrap();
    assert_eq!(config.storage_dir_path, "/data");
    assert_eq!(config.storage_key, "tasks");
  }

  #[test]
  fn broken_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasklist.json");
    std::fs::write(&path, "nope").unwrap();

    assert!(Config::load_or_create(&path, || unreachable!()).is_err());
  }
}
