//! Space manifest: the YAML front matter at the top of `README.md` that the
//! hosting platform reads to provision the runtime and find the entry point.

use crate::utils::error::{ExplorerError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_relative_path, validate_required_field,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const FRONT_MATTER_DELIMITER: &str = "---";

pub const ALLOWED_COLORS: [&str; 8] = [
    "red", "yellow", "green", "blue", "indigo", "purple", "pink", "gray",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sdk {
    Gradio,
    Streamlit,
    Docker,
    Static,
}

impl Sdk {
    /// gradio 與 streamlit 需要 app_file 才能啟動
    pub fn requires_app_file(&self) -> bool {
        matches!(self, Sdk::Gradio | Sdk::Streamlit)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sdk::Gradio => "gradio",
            Sdk::Streamlit => "streamlit",
            Sdk::Docker => "docker",
            Sdk::Static => "static",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceManifest {
    pub title: String,
    pub emoji: Option<String>,
    #[serde(rename = "colorFrom")]
    pub color_from: Option<String>,
    #[serde(rename = "colorTo")]
    pub color_to: Option<String>,
    pub sdk: Sdk,
    pub sdk_version: Option<String>,
    pub app_file: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub license: Option<String>,
    pub short_description: Option<String>,
    /// 其他平台欄位原樣保留
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    pub manifest: SpaceManifest,
    pub body: String,
}

impl SpaceManifest {
    /// 從 README 檔案載入
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ManifestDocument> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_readme_str(&content)
    }

    /// 拆出 front matter 並解析
    pub fn from_readme_str(content: &str) -> Result<ManifestDocument> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut lines = content.split_inclusive('\n');

        match lines.next() {
            Some(first) if first.trim_end() == FRONT_MATTER_DELIMITER => {}
            _ => {
                return Err(ExplorerError::ManifestError {
                    message: "Document does not start with a '---' front matter delimiter"
                        .to_string(),
                })
            }
        }

        let mut front_matter = String::new();
        let mut closed = false;
        for line in lines.by_ref() {
            if line.trim_end() == FRONT_MATTER_DELIMITER {
                closed = true;
                break;
            }
            front_matter.push_str(line);
        }

        if !closed {
            return Err(ExplorerError::ManifestError {
                message: "Front matter is not closed by a '---' line".to_string(),
            });
        }

        let body: String = lines.collect();
        let manifest: SpaceManifest = serde_yaml::from_str(&front_matter)?;

        Ok(ManifestDocument {
            manifest,
            body: body.trim_start_matches(['\r', '\n']).to_string(),
        })
    }

    /// 確認 app_file 指向存在的進入點
    pub fn check_entry_point<P: AsRef<Path>>(&self, base_dir: P) -> Result<PathBuf> {
        let app_file = validate_required_field("app_file", &self.app_file)?;
        validate_relative_path("app_file", app_file)?;

        let full_path = base_dir.as_ref().join(app_file);
        if !full_path.is_file() {
            return Err(ExplorerError::ManifestError {
                message: format!("Entry point '{}' does not exist", full_path.display()),
            });
        }
        Ok(full_path)
    }
}

fn validate_sdk_version(version: &str) -> Result<()> {
    let well_formed = !version.is_empty()
        && version
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));

    if !well_formed {
        return Err(ExplorerError::InvalidConfigValueError {
            field: "sdk_version".to_string(),
            value: version.to_string(),
            reason: "Expected a dotted numeric version such as 5.15.0".to_string(),
        });
    }
    Ok(())
}

impl Validate for SpaceManifest {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("title", &self.title)?;

        if let Some(color) = &self.color_from {
            validate_one_of("colorFrom", color, &ALLOWED_COLORS)?;
        }
        if let Some(color) = &self.color_to {
            validate_one_of("colorTo", color, &ALLOWED_COLORS)?;
        }

        if let Some(version) = &self.sdk_version {
            validate_sdk_version(version)?;
        }

        if self.sdk.requires_app_file() {
            let app_file = validate_required_field("app_file", &self.app_file)?;
            validate_relative_path("app_file", app_file)?;
        } else if let Some(app_file) = &self.app_file {
            validate_relative_path("app_file", app_file)?;
        }

        for tag in &self.tags {
            validate_non_empty_string("tags", tag)?;
        }

        Ok(())
    }
}
