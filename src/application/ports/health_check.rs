use async_trait::async_trait;

#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Round-trips the backing store.
    async fn ping(&self) -> anyhow::Result<()>;
}
