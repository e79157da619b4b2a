use photo_export::ExportError;

/// Central error types for the snapshare app
#[derive(Debug)]
pub enum AppError {
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Export pipeline error (acquisition, encoding, host surfaces)
    Export(ExportError),
    /// Image processing error (previews)
    ImageProcessing(String),
    /// General error
    #[allow(dead_code)]
    Other(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::Export(e) => write!(f, "Export error: {}", e),
            AppError::ImageProcessing(msg) => write!(f, "Image processing error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        AppError::Export(e)
    }
}

/// User-friendly error messages for the alert dialog
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Filesystem(_) => {
                "Error accessing files. Please check app permissions.".to_string()
            }
            AppError::Export(ExportError::NoPhoto) => "No photo selected.".to_string(),
            AppError::Export(ExportError::CapabilityUnavailable(surface)) => {
                format!("{} is not available on this device", surface)
            }
            AppError::Export(ExportError::Encode(_)) => {
                "Error preparing the photo attachment.".to_string()
            }
            AppError::Export(ExportError::Presenter(e)) => format!("{}", e),
            AppError::ImageProcessing(_) => "Error processing image.".to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }
}
