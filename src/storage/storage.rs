/// A durable key-value slot store.
///
/// `read` returns `None` when nothing was ever written under `key` or when the
/// slot can't be read. `write` replaces the whole value.
pub trait Storage {
  fn read(&self, key: &str) -> Option<String>;
  fn write(&mut self, key: &str, raw: &str) -> std::io::Result<()>;
}
