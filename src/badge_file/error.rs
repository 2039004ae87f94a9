use thiserror::Error;

#[derive(Debug, Error)]
pub enum BadgeFileError {
    #[error("No file selected")]
    NoFileSelected,
    #[error("Can't open badge file")]
    CantOpenBadgeFile(#[source] std::io::Error),
    #[error("Can't read badge file")]
    CantReadBadgeFile(#[source] csv::Error),
    #[error("No valid data")]
    NoValidData,
    #[error("Invalid headline format")]
    InvalidHeadline,
    #[error("Can't create badge file folder")]
    BadgeFileFolderCreationFailed(#[source] std::io::Error),
    #[error("Can't write badge file")]
    CantWriteBadgeFile(#[source] csv::Error),
    #[error("Can't flush badge file")]
    CantFlushBadgeFile(#[source] std::io::Error),
}
