use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use nvmg_model::{Distribution, DownloadError, InstallProgress, ProgressSink, ReleaseEntry};
use tokio::io::AsyncWriteExt;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const INDEX_FILE_NAME: &str = "index.json";

/// [`Distribution`] over HTTP(S). One GET per call, no retries; redirects
/// follow reqwest's default policy.
#[derive(Debug, Clone)]
pub struct HttpDistribution {
    client: reqwest::Client,
}

impl HttpDistribution {
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(format!("nvmg/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str, file_name: &str) -> Result<reqwest::Response, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|error| DownloadError::request(file_name, url, error.to_string()))?;

        if !response.status().is_success() {
            return Err(DownloadError::Status {
                file_name: file_name.to_string(),
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Distribution for HttpDistribution {
    async fn download(
        &self,
        url: &str,
        file_name: &str,
        dest: &Path,
        progress: &ProgressSink,
    ) -> Result<u64, DownloadError> {
        use futures_util::StreamExt;

        info!("Downloading {url}");
        let response = self.get(url, file_name).await?;
        let total = response.content_length();

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|error| DownloadError::write(file_name, dest, &error))?;

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|error| DownloadError::request(file_name, url, error.to_string()))?;
            file.write_all(&chunk)
                .await
                .map_err(|error| DownloadError::write(file_name, dest, &error))?;
            downloaded += chunk.len() as u64;
            progress
                .send(InstallProgress::Downloading { downloaded, total })
                .await;
        }

        file.flush()
            .await
            .map_err(|error| DownloadError::write(file_name, dest, &error))?;

        debug!("Download complete: {downloaded} bytes to {}", dest.display());
        Ok(downloaded)
    }

    async fn release_index(&self, url: &str) -> Result<Vec<ReleaseEntry>, DownloadError> {
        debug!("Fetching release index from {url}");
        let response = self.get(url, INDEX_FILE_NAME).await?;

        response
            .json()
            .await
            .map_err(|error| DownloadError::IndexParse {
                url: url.to_string(),
                details: error.to_string(),
            })
    }
}
