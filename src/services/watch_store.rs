use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use std::sync::Arc;
use crate::training::{WatchProgress, VIDEO_COUNT};

/// Per-user, per-video playback state between player events.
#[async_trait]
pub trait WatchStore: Send + Sync {
    async fn get(&self, user_id: &str, video_id: u32) -> Result<Option<WatchProgress>, redis::RedisError>;
    async fn put(&self, user_id: &str, video_id: u32, progress: &WatchProgress) -> Result<(), redis::RedisError>;
    async fn clear(&self, user_id: &str) -> Result<(), redis::RedisError>;
}

pub struct RedisWatchStore {
    client: Arc<Client>,
}

impl RedisWatchStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

fn watch_key(user_id: &str, video_id: u32) -> String {
    format!("watch:{}:{}", user_id, video_id)
}

fn parse_error(e: serde_json::Error) -> redis::RedisError {
    redis::RedisError::from((redis::ErrorKind::TypeError, "Failed to parse watch progress", e.to_string()))
}

#[async_trait]
impl WatchStore for RedisWatchStore {
    async fn get(&self, user_id: &str, video_id: u32) -> Result<Option<WatchProgress>, redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        let data: Option<String> = conn.get(watch_key(user_id, video_id)).await?;
        data.map(|data| serde_json::from_str(&data).map_err(parse_error))
            .transpose()
    }

    async fn put(&self, user_id: &str, video_id: u32, progress: &WatchProgress) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        let data = serde_json::to_string(progress).map_err(parse_error)?;
        conn.set(watch_key(user_id, video_id), data).await
    }

    async fn clear(&self, user_id: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_async_connection().await?;
        let keys: Vec<String> = (1..=VIDEO_COUNT).map(|id| watch_key(user_id, id)).collect();
        conn.del(keys).await
    }
}

impl Clone for RedisWatchStore {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone()
        }
    }
}
