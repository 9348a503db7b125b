use async_trait::async_trait;
use std::path::Path;
use tokio::sync::mpsc;

use crate::error::DownloadError;
use crate::types::{InstallPhase, InstallProgress, ReleaseEntry};

/// Transport to a Node.js distribution server.
#[async_trait]
pub trait Distribution: Send + Sync {
    /// Stream `url` into a newly created file at `dest`, returning the number
    /// of bytes written.
    async fn download(
        &self,
        url: &str,
        file_name: &str,
        dest: &Path,
        progress: &ProgressSink,
    ) -> Result<u64, DownloadError>;

    /// Fetch and parse the release listing at `url`.
    async fn release_index(&self, url: &str) -> Result<Vec<ReleaseEntry>, DownloadError>;
}

/// Optional receiver of install progress. Sends never fail the install.
#[derive(Debug, Clone, Default)]
pub struct ProgressSink {
    sender: Option<mpsc::Sender<InstallProgress>>,
}

impl ProgressSink {
    #[must_use]
    pub fn new(sender: mpsc::Sender<InstallProgress>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    pub async fn send(&self, progress: InstallProgress) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(progress).await;
        }
    }

    pub async fn phase(&self, phase: InstallPhase) {
        self.send(InstallProgress::Phase(phase)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn progress_sink_forwards_events() {
        let (tx, mut rx) = mpsc::channel(4);
        let sink = ProgressSink::new(tx);

        sink.phase(InstallPhase::Extracting).await;
        sink.send(InstallProgress::Downloading {
            downloaded: 10,
            total: Some(20),
        })
        .await;

        assert_eq!(
            rx.recv().await,
            Some(InstallProgress::Phase(InstallPhase::Extracting))
        );
        assert_eq!(
            rx.recv().await,
            Some(InstallProgress::Downloading {
                downloaded: 10,
                total: Some(20)
            })
        );
    }

    #[tokio::test]
    async fn progress_sink_ignores_closed_receiver() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sink = ProgressSink::new(tx);

        sink.phase(InstallPhase::Done).await;
        ProgressSink::disabled().phase(InstallPhase::Done).await;
    }
}
