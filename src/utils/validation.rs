use crate::utils::error::{Result, WatchError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(WatchError::ConfigError {
            message: format!("{field_name}: URL cannot be empty"),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(WatchError::ConfigError {
                message: format!("{field_name}: unsupported URL scheme: {scheme}"),
            }),
        },
        Err(e) => Err(WatchError::ConfigError {
            message: format!("{field_name}: invalid URL '{url_str}': {e}"),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WatchError::ConfigError {
            message: format!("{field_name}: value cannot be empty or whitespace-only"),
        });
    }
    Ok(())
}
