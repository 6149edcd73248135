use super::FetchError;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf};
use tracing::{debug, instrument};

/// Location of the results document
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "lowercase")]
pub enum Source {
    /// fetched over HTTP(S), any non-success status is an error
    Remote {
        #[serde(with = "http_serde::uri")]
        url: http::Uri,
    },
    /// read from the local file system, e.g. a statically served `data.json`
    File { path: PathBuf },
}

impl Source {
    /// Interpret a user supplied location, anything with an http(s) scheme is remote
    pub fn parse(location: &str) -> Result<Self, http::uri::InvalidUri> {
        if location.starts_with("http://") || location.starts_with("https://") {
            Ok(Self::Remote {
                url: location.parse()?,
            })
        } else {
            Ok(Self::File {
                path: PathBuf::from(location),
            })
        }
    }

    /// retrieve the raw document body
    #[instrument(level = "debug")]
    pub fn fetch(&self) -> Result<String, FetchError> {
        match self {
            Self::Remote { url } => {
                let response = reqwest::blocking::get(url.to_string())?;
                let status = response.status();

                debug!(status = %status, "Received response");

                if !status.is_success() {
                    return Err(FetchError::Status(status.as_u16()));
                }

                Ok(response.text()?)
            }
            Self::File { path } => fs::read_to_string(path).map_err(|error| FetchError::Io {
                path: path.clone(),
                error,
            }),
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::File {
            path: PathBuf::from("data.json"),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote { url } => write!(f, "{url}"),
            Self::File { path } => write!(f, "{}", path.display()),
        }
    }
}
