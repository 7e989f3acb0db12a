use derive_more::Display;

#[derive(Debug, Display)]
pub enum ItemError {
    #[display(fmt = "Http request failed: {}", _0)]
    Http(String),

    #[display(fmt = "Server responded with status {}", _0)]
    Status(u16),

    #[display(fmt = "{} Not Found", _0)]
    NotFound(String),

    #[display(fmt = "Invalid response body: {}", _0)]
    Decode(String),

    #[display(fmt = "Io error: {}", _0)]
    Io(std::io::Error),
}

impl std::error::Error for ItemError {}

impl From<reqwest::Error> for ItemError {
    fn from(e: reqwest::Error) -> Self {
        ItemError::Http(e.to_string())
    }
}

impl From<serde_json::Error> for ItemError {
    fn from(e: serde_json::Error) -> Self {
        ItemError::Decode(e.to_string())
    }
}

impl From<std::io::Error> for ItemError {
    fn from(e: std::io::Error) -> Self {
        ItemError::Io(e)
    }
}
