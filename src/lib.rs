extern crate chrono;
extern crate colored;
extern crate serde;
extern crate serde_json;

mod config;
mod session;

pub mod projector;
pub mod storage;
pub mod store;
pub mod task;
pub mod traits;
pub mod viewer;

pub use config::Config;
pub use session::Session;
