use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SummaryError {
    /// The document lacks the scan tool's version marker.
    #[error("Not valid ScanCode data: missing content.scancode_version")]
    InvalidScanData,

    #[error("Invalid coordinates '{0}': expected type/provider/namespace/name[/revision]")]
    InvalidCoordinates(String),
}

pub type Result<T> = std::result::Result<T, SummaryError>;
