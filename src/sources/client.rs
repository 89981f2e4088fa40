use log::info;
use reqwest::Client;

use super::url_utils::to_raw_url;
use super::Source;
use crate::error::{Result, SpcError};

pub struct SourceClient {
    client: Client,
}

impl SourceClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("spcdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SpcError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Reads the whole source as text, from disk or over HTTP.
    pub async fn fetch_text(&self, source: &Source) -> Result<String> {
        match source {
            Source::Path(path) => {
                info!("Reading {}", path.display());
                Ok(tokio::fs::read_to_string(path).await?)
            }
            Source::Url(url) => {
                let url = to_raw_url(url);
                info!("Downloading {url}");

                let response = self.client.get(url.clone()).send().await?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(SpcError::Source(format!(
                        "Failed to download {url}: {status} - {body}"
                    )));
                }

                Ok(response.text().await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetches_over_http() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/schedule.csv")
            .with_status(200)
            .with_body("ID,Site\n1,North\n")
            .create_async()
            .await;

        let source = Source::parse(&format!("{}/schedule.csv", server.url())).unwrap();
        let text = SourceClient::new().unwrap().fetch_text(&source).await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "ID,Site\n1,North\n");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing.csv")
            .with_status(404)
            .with_body("not found")
            .create_async()
            .await;

        let source = Source::parse(&format!("{}/missing.csv", server.url())).unwrap();
        let err = SourceClient::new()
            .unwrap()
            .fetch_text(&source)
            .await
            .unwrap_err();

        match err {
            SpcError::Source(message) => {
                assert!(message.contains("404"));
                assert!(message.contains("not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = Source::parse("definitely/not/here/schedule.csv").unwrap();

        let err = SourceClient::new()
            .unwrap()
            .fetch_text(&source)
            .await
            .unwrap_err();

        assert!(matches!(err, SpcError::Io(_)));
    }
}
