mod backend;
mod api_client;
mod watch_store;

#[cfg(test)]
pub mod testing;

pub use backend::Backend;
pub use api_client::ApiClient;
pub use watch_store::{RedisWatchStore, WatchStore};
