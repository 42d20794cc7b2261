use async_trait::async_trait;

/// Outbound mail delivery seam. The default implementation only logs;
/// a real transport can be swapped in without touching the handlers.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        tracing::info!("Sending mail to {}: {}\n{}", to, subject, body);
        Ok(())
    }
}

pub fn default_mailer() -> Box<dyn Mailer> {
    Box::new(LogMailer)
}
