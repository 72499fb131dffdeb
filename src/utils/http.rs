use crate::error::{PrepError, Result};
use futures::stream::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Get standard user agent string
pub fn get_user_agent() -> &'static str {
    "ISICPrep"
}

/// Something that can copy a remote resource to a local file.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// Download `url` into `destination`, returning the number of bytes written.
    async fn fetch(&self, url: &str, destination: &Path) -> Result<u64>;
}

/// Plain HTTP GET with a byte progress bar. No timeout is set.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<u64> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", get_user_agent())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PrepError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let pb = download_progress(response.content_length());
        let partial = partial_path(destination);

        let written = match stream_to_file(response, &partial, &pb).await {
            Ok(written) => written,
            Err(e) => {
                pb.abandon();
                if let Err(cleanup_err) = tokio::fs::remove_file(&partial).await {
                    log::debug!(
                        "could not remove {}: {}",
                        partial.display(),
                        cleanup_err
                    );
                }
                return Err(e);
            }
        };

        tokio::fs::rename(&partial, destination).await?;
        pb.finish_and_clear();
        Ok(written)
    }
}

async fn stream_to_file(
    response: reqwest::Response,
    path: &Path,
    pb: &ProgressBar,
) -> Result<u64> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
        pb.set_position(written);
    }

    file.flush().await?;
    Ok(written)
}

fn download_progress(total: Option<u64>) -> ProgressBar {
    match total {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        }
        None => ProgressBar::new_spinner(),
    }
}

/// `<destination>.part`, where bytes land until the download completes.
pub fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
