use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Error making API request: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API request to {url} returned status {status}")]
    HttpStatusError { status: u16, url: String },

    #[error("API request was not successful: {message}")]
    ApiUnsuccessfulError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error parsing JSON response: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Manifest parsing error: {0}")]
    ManifestParseError(#[from] serde_yaml::Error),

    #[error("Manifest error: {message}")]
    ManifestError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("No voting data found for proposal: {proposal}")]
    ProposalNotFoundError { proposal: String },

    #[error("Could not find voting results in the data: {message}")]
    ResultsMissingError { message: String },

    #[error("Voting results are not final yet: {message}")]
    ResultsPendingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    NotFound,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 程序結束代碼
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Critical => 3,
        }
    }
}

impl ExplorerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::HttpStatusError { .. } | Self::ApiUnsuccessfulError { .. } => {
                ErrorCategory::Network
            }
            Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::ResultsMissingError { .. }
            | Self::ResultsPendingError { .. }
            | Self::ValidationError { .. } => ErrorCategory::Data,
            Self::ManifestParseError(_)
            | Self::ManifestError { .. }
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ProposalNotFoundError { .. } => ErrorCategory::NotFound,
            Self::ZipError(_) | Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路問題通常重試即可
            Self::ApiError(_) | Self::ApiUnsuccessfulError { .. } | Self::ResultsPendingError { .. } => {
                ErrorSeverity::Medium
            }
            Self::HttpStatusError { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            Self::ZipError(_) | Self::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ApiError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::HttpStatusError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) | Self::HttpStatusError { .. } | Self::ApiUnsuccessfulError { .. } => {
                "Check your network connection and that opendata.swiss is reachable, then try again"
            }
            Self::SerializationError(_) | Self::ResultsMissingError { .. } => {
                "The published data may have changed format; run with --verbose and inspect the download URL"
            }
            Self::ResultsPendingError { .. } => {
                "Counting is still in progress; try again once the results are final"
            }
            Self::ProposalNotFoundError { .. } => {
                "Run the 'list' command to see available proposals and use a shorter part of the name"
            }
            Self::ManifestParseError(_) | Self::ManifestError { .. } => {
                "Make sure README.md starts with a '---' delimited YAML front matter block"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Check the configuration file and command line arguments"
            }
            Self::ValidationError { .. } => "Check the input values and try again",
            Self::CsvError(_) | Self::ZipError(_) | Self::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the voting data service. {}", self),
            ErrorCategory::Data => format!("The voting data could not be processed. {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration. {}", self),
            ErrorCategory::NotFound => self.to_string(),
            ErrorCategory::System => format!("A system error occurred. {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
