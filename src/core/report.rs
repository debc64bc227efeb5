//! Report loading: turns a metareport JSON document into grid rows.

use crate::core::grid::Row;
use crate::error::{AppError, DataError, StorageError};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Where a report document comes from. A load replaces the row set
/// wholesale; there is no incremental update.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportSource {
    File(PathBuf),
    Url(String),
}

impl ReportSource {
    /// A `http://` or `https://` prefix selects a remote source, anything
    /// else is a local path.
    pub fn parse(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            ReportSource::Url(input.to_string())
        } else {
            ReportSource::File(PathBuf::from(input))
        }
    }

    pub fn name(&self) -> String {
        match self {
            ReportSource::File(path) => path.to_string_lossy().to_string(),
            ReportSource::Url(url) => url.clone(),
        }
    }

    pub async fn load(&self) -> Result<Vec<Row>, AppError> {
        let document = match self {
            ReportSource::File(path) => {
                fs::read_to_string(path).map_err(|source| StorageError::FileIo {
                    path: path.to_string_lossy().to_string(),
                    source,
                })?
            }
            ReportSource::Url(url) => {
                let response =
                    reqwest::get(url)
                        .await
                        .map_err(|e| DataError::Parse {
                            source_name: url.clone(),
                            message: format!("Request failed: {}", e),
                        })?;
                response.text().await.map_err(|e| DataError::Parse {
                    source_name: url.clone(),
                    message: format!("Failed to read response body: {}", e),
                })?
            }
        };

        let value: Value =
            serde_json::from_str(&document).map_err(|e| DataError::Parse {
                source_name: self.name(),
                message: e.to_string(),
            })?;

        rows_from_value(value, &self.name()).map_err(AppError::from)
    }
}

fn rows_from_value(value: Value, source_name: &str) -> Result<Vec<Row>, DataError> {
    let Value::Array(elements) = value else {
        return Err(DataError::NotAnArray {
            source_name: source_name.to_string(),
        });
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| match element {
            Value::Object(map) => Ok(map),
            other => Err(DataError::Parse {
                source_name: source_name.to_string(),
                message: format!("element {} is not an object: {}", index, other),
            }),
        })
        .collect()
}
