/// Failure talking to one of the remote services
#[derive(thiserror::Error, Debug)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error response: {0} {1}")]
    Status(u16, String),

    #[error("Deserialize error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Remote service error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Parameter error: {0}")]
    Parameter(String),

    #[error("Got {measurements} measurements for {stops} stops")]
    MeasurementMismatch { stops: usize, measurements: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Remote(RemoteError::Http(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Remote(RemoteError::Deserialize(e))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
