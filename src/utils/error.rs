use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Unsupported file format '{extension}' for {path}")]
    UnsupportedFileFormat { path: String, extension: String },

    #[error("Text extraction failed for {path}: {message}")]
    TextExtractionFailure { path: String, message: String },

    #[error("Section '{section}' not found")]
    MissingSection { section: String },

    #[error("No match found for field '{field}'")]
    NoMatchFound { field: String },

    #[error("Worker failed: {message}")]
    WorkerError { message: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Extraction,
    Processing,
    Storage,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EtlError::UnsupportedFileFormat { .. } => ErrorCategory::Input,
            EtlError::TextExtractionFailure { .. }
            | EtlError::MissingSection { .. }
            | EtlError::NoMatchFound { .. } => ErrorCategory::Extraction,
            EtlError::ProcessingError { .. } | EtlError::SerializationError(_) => {
                ErrorCategory::Processing
            }
            EtlError::ZipError(_) | EtlError::CsvError(_) | EtlError::IoError(_) => {
                ErrorCategory::Storage
            }
            EtlError::WorkerError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::MissingSection { .. } | EtlError::NoMatchFound { .. } => ErrorSeverity::Low,
            EtlError::UnsupportedFileFormat { .. } | EtlError::TextExtractionFailure { .. } => {
                ErrorSeverity::Medium
            }
            EtlError::WorkerError { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// Recoverable errors downgrade a field to its empty default instead of
    /// failing the document.
    pub fn is_recoverable(&self) -> bool {
        self.severity() == ErrorSeverity::Low
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::UnsupportedFileFormat { .. } => {
                "Convert the document to PDF, DOCX or plain text"
            }
            EtlError::TextExtractionFailure { .. } => {
                "Check that the file is not encrypted, scanned or corrupted"
            }
            EtlError::MissingSection { .. } => {
                "Add an 'Experience' heading on its own line to enable sentence classification"
            }
            EtlError::NoMatchFound { .. } => "No action needed; the field is left empty",
            EtlError::WorkerError { .. } => "Re-run with --verbose and report the failing document",
            EtlError::ZipError(_) | EtlError::IoError(_) => {
                "Check file permissions and available disk space for the output path"
            }
            EtlError::CsvError(_) => "Check the skills CSV file for malformed rows",
            EtlError::SerializationError(_) => "Report the failing document with --verbose logs",
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
            EtlError::ProcessingError { .. } => "Re-run with --verbose to inspect the failing step",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => format!("Input rejected: {}", self),
            ErrorCategory::Extraction => format!("Could not read document: {}", self),
            ErrorCategory::Processing => format!("Processing failed: {}", self),
            ErrorCategory::Storage => format!("Could not write output: {}", self),
            ErrorCategory::System => format!("Internal failure: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
