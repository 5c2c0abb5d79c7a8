use crate::asos::error::AsosDataError;
use crate::asos::source::AsosSource;
use futures_util::TryStreamExt;
use log::{info, warn};
use polars::frame::DataFrame;
use polars::prelude::*;
use reqwest::Client;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::io::AsyncReadExt;
use tokio::{fs, task};
use tokio_util::io::StreamReader;

/// Fetches raw ASOS CSV data and parses it into an untyped [`DataFrame`].
///
/// Every column is read as a string; typing happens in the extractor where the
/// service's missing-value markers can be handled per field.
#[derive(Debug, Clone, Default)]
pub struct AsosDataLoader {
    download_client: Client,
}

impl AsosDataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(download_client: Client) -> Self {
        Self { download_client }
    }

    /// Loads the CSV behind `source`, downloading it when it is a URL.
    pub async fn get_frame(&self, source: &AsosSource) -> Result<DataFrame, AsosDataError> {
        let raw_bytes = match source {
            AsosSource::Url(url) => self.download(url).await?,
            AsosSource::Path(path) => Self::read_local(path).await?,
        };
        let df = Self::csv_to_dataframe(raw_bytes, source.to_string()).await?;
        if df.height() == 0 {
            warn!("No observation rows in {}", source);
            return Err(AsosDataError::NoObservations(source.to_string()));
        }
        info!("Loaded {} observation rows from {}", df.height(), source);
        Ok(df)
    }

    async fn read_local(path: &Path) -> Result<Vec<u8>, AsosDataError> {
        info!("Reading observations from {}", path.display());
        fs::read(path)
            .await
            .map_err(|e| AsosDataError::SourceRead(path.to_path_buf(), e))
    }

    /// Downloads the response body of `url` into memory.
    async fn download(&self, url: &str) -> Result<Vec<u8>, AsosDataError> {
        info!("Downloading data from {}", url);

        let response = self
            .download_client
            .get(url)
            .send()
            .await
            .map_err(|e| AsosDataError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    AsosDataError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    AsosDataError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let stream = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
        let mut reader = StreamReader::new(stream);
        let mut body = Vec::new();
        reader
            .read_to_end(&mut body)
            .await
            .map_err(AsosDataError::DownloadIo)?;
        info!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }

    /// Parses CSV bytes with a header row, every column as a string, on a blocking task.
    async fn csv_to_dataframe(
        bytes: Vec<u8>,
        source_name: String,
    ) -> Result<DataFrame, AsosDataError> {
        task::spawn_blocking(move || {
            let mut temp_file = NamedTempFile::new().map_err(|e| AsosDataError::CsvReadIo {
                source_name: source_name.clone(),
                source: e,
            })?;
            temp_file
                .write_all(&bytes)
                .map_err(|e| AsosDataError::CsvReadIo {
                    source_name: source_name.clone(),
                    source: e,
                })?;
            temp_file.flush().map_err(|e| AsosDataError::CsvReadIo {
                source_name: source_name.clone(),
                source: e,
            })?;

            CsvReadOptions::default()
                .with_has_header(true)
                .with_infer_schema_length(Some(0))
                .try_into_reader_with_file_path(Some(temp_file.path().to_path_buf()))
                .map_err(|e| AsosDataError::CsvReadPolars {
                    source_name: source_name.clone(),
                    source: e,
                })?
                .finish()
                .map_err(|e| AsosDataError::CsvReadPolars {
                    source_name,
                    source: e,
                })
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::example_data_path;

    #[tokio::test]
    async fn test_local_file_is_read_as_strings() -> Result<(), AsosDataError> {
        let loader = AsosDataLoader::new();
        let df = loader
            .get_frame(&AsosSource::from(example_data_path()))
            .await?;

        assert!(df.height() > 0);
        for name in ["station", "valid(UTC)", "tmpf", "dwpf", "sknt", "drct"] {
            let column = df.column(name)?;
            assert_eq!(column.dtype(), &DataType::String, "column {name}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let loader = AsosDataLoader::new();
        let result = loader
            .get_frame(&AsosSource::from("does/not/exist.csv"))
            .await;
        assert!(matches!(result, Err(AsosDataError::SourceRead(path, _)) if path.ends_with("exist.csv")));
    }

    #[tokio::test]
    async fn test_header_only_file_has_no_observations() -> Result<(), Box<dyn std::error::Error>>
    {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "station,station_name,lat,lon,valid(UTC),tmpf,dwpf,sknt,drct")?;
        file.flush()?;

        let result = AsosDataLoader::new()
            .get_frame(&AsosSource::from(file.path()))
            .await;
        assert!(matches!(result, Err(AsosDataError::NoObservations(_))));
        Ok(())
    }
}
