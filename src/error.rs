use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("no weekly menu PDF linked from {0}")]
    NoMenuLink(String),

    #[error("could not extract text from PDF: {0}")]
    Pdf(#[from] pdf_extract::OutputError),

    #[error("PDF extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl MenuError {
    /// True when the menu could not be obtained at all, as opposed to being
    /// obtained and turning out empty.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            MenuError::Http(_)
                | MenuError::Url(_)
                | MenuError::NoMenuLink(_)
                | MenuError::Pdf(_)
                | MenuError::Task(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;
