use thiserror::Error;

/// Rejected plan request. Raised before the catalog is consulted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Market name is required")]
    EmptyMarket,

    #[error("Dealer name is required to generate a plan")]
    EmptyDealer,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Outlet file is missing required column '{0}'")]
    MissingColumn(&'static str),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum FormatterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Text service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Prompt was blocked by the text service: {0}")]
    Blocked(String),

    #[error("Text service returned an empty response")]
    EmptyResponse,

    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),
}
