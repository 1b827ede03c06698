use async_trait::async_trait;
use tracing::info;

/// Outbound mail. Delivery is best-effort: callers log failures and move on.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// Writes mail to the log instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        info!(%to, %subject, %body, "mock email");
        Ok(())
    }
}

pub fn welcome_message(name: &str) -> (String, String) {
    (
        "Welcome to the store".to_string(),
        format!("Hi {name}, your account is ready. Happy shopping!"),
    )
}
