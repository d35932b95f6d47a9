mod storage;
mod storage_file;
mod storage_memory;

pub use storage::Storage;
pub use storage_file::FileStorage;
pub use storage_memory::MemoryStorage;
