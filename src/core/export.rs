use crate::core::Storage;
use crate::domain::model::VoteResource;
use crate::utils::error::{ExplorerError, Result};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;
use zip::write::{FileOptions, ZipWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub const ALL: [&'static str; 3] = ["csv", "tsv", "json"];

    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "votes.csv",
            OutputFormat::Tsv => "votes.tsv",
            OutputFormat::Json => "votes.json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            other => Err(ExplorerError::InvalidConfigValueError {
                field: "export.output_formats".to_string(),
                value: other.to_string(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    OutputFormat::ALL.join(", ")
                ),
            }),
        }
    }
}

/// CSV / TSV 的單列，只保留平面欄位
#[derive(Serialize)]
struct CatalogueRow<'a> {
    date: &'a str,
    description: &'a str,
    download_url: &'a str,
    format: &'a str,
    last_modified: &'a str,
}

impl<'a> From<&'a VoteResource> for CatalogueRow<'a> {
    fn from(resource: &'a VoteResource) -> Self {
        Self {
            date: resource.date.as_deref().unwrap_or_default(),
            description: resource.description.as_deref().unwrap_or_default(),
            download_url: resource.download_url.as_deref().unwrap_or_default(),
            format: resource.format.as_deref().unwrap_or_default(),
            last_modified: resource.last_modified.as_deref().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub archive_path: String,
    pub files: Vec<String>,
    pub records: usize,
}

pub struct CatalogueExporter<S: Storage> {
    storage: S,
    formats: Vec<OutputFormat>,
    archive_name: String,
}

impl<S: Storage> CatalogueExporter<S> {
    pub fn new(storage: S, formats: Vec<OutputFormat>, archive_name: impl Into<String>) -> Self {
        Self {
            storage,
            formats,
            archive_name: archive_name.into(),
        }
    }

    pub async fn export(&self, resources: &[VoteResource]) -> Result<ExportReport> {
        if self.formats.is_empty() {
            return Err(ExplorerError::ValidationError {
                message: "At least one output format is required".to_string(),
            });
        }

        let mut files = Vec::new();
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            for format in &self.formats {
                let content = match format {
                    OutputFormat::Csv => delimited(resources, b',')?,
                    OutputFormat::Tsv => delimited(resources, b'\t')?,
                    OutputFormat::Json => serde_json::to_vec_pretty(resources)?,
                };

                zip.start_file::<_, ()>(format.file_name(), FileOptions::default())?;
                zip.write_all(&content)?;
                files.push(format.file_name().to_string());
            }

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!(
            "Writing {} ({} bytes, {} files) to storage",
            self.archive_name,
            zip_data.len(),
            files.len()
        );
        self.storage.write_file(&self.archive_name, &zip_data).await?;

        Ok(ExportReport {
            archive_path: self.storage.location(&self.archive_name),
            files,
            records: resources.len(),
        })
    }
}

fn delimited(resources: &[VoteResource], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    if resources.is_empty() {
        writer.write_record([
            "date",
            "description",
            "download_url",
            "format",
            "last_modified",
        ])?;
    }
    for resource in resources {
        writer.serialize(CatalogueRow::from(resource))?;
    }

    writer.into_inner().map_err(|e| ExplorerError::IoError(e.into_error()))
}
