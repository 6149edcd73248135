#[cfg(test)]
mod config_test;

use cpbench_ingest::Source;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fs::File, io, path::Path, path::PathBuf};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ConfigErrors {
    #[error("Failed to open config {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
    #[error("Config is not valid YAML or contains unknown fields")]
    Parse(#[from] serde_yaml::Error),
    #[error("Data location is not a valid URI")]
    InvalidSource(#[from] http::uri::InvalidUri),
    #[error("Config failed the preflight checks, see the log for details")]
    Preflight,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    // where the results document lives, a local data.json unless configured otherwise
    #[serde(default, alias = "data")]
    pub source: Source,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    // without a path the session only lives as long as the process
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// entries per overview category
    #[serde(default = "default_top")]
    pub top: usize,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// base the overview drill-down links are resolved against
    #[serde(default = "default_link_base")]
    pub link_base: String,
    /// terminal columns of a full (100%) overview bar
    #[serde(default = "default_bar_columns")]
    pub bar_columns: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top: default_top(),
            placeholder: default_placeholder(),
            link_base: default_link_base(),
            bar_columns: default_bar_columns(),
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigErrors> {
        let file = File::open(path).map_err(|error| ConfigErrors::Read {
            path: path.to_path_buf(),
            error,
        })?;

        Ok(serde_yaml::from_reader(file)?)
    }

    /// Apply command line flags on top of the file
    pub fn with_overrides(
        mut self,
        data: Option<&str>,
        session_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigErrors> {
        if let Some(location) = data {
            self.source = Source::parse(location)?;
        }

        if session_dir.is_some() {
            self.session.path = session_dir;
        }

        Ok(self)
    }

    pub fn preflight_checks(&mut self) -> bool {
        // report every problem at once instead of failing on the first one
        let mut contains_error = false;

        match &self.source {
            Source::Remote { url } => {
                if !matches!(url.scheme_str(), Some("http" | "https")) || url.host().is_none() {
                    error!("source.remote.url ({url}) must be an absolute http(s) URL");
                    contains_error = true;
                }
            }
            Source::File { path } => {
                if !path.is_file() {
                    warn!(
                        "source.file.path ({}) was not found, only a previous session or an import can provide results",
                        path.to_string_lossy()
                    );
                }
            }
        }

        if let Some(ref path) = self.session.path {
            if path.exists() && !path.is_dir() {
                error!(
                    "session.path ({}) exists but is not a directory",
                    path.to_string_lossy()
                );
                contains_error = true;
            }
        }

        if self.display.top == 0 {
            error!("display.top cannot be 0, every overview category would be empty");
            contains_error = true;
        }

        if self.display.placeholder.is_empty() {
            warn!(
                "display.placeholder is empty. Falling back to '{}'",
                default_placeholder()
            );
            self.display.placeholder = default_placeholder();
        }

        match Url::parse(&self.display.link_base) {
            Ok(base) if base.cannot_be_a_base() => {
                error!(
                    "display.link_base ({}) cannot be used as a base for links",
                    self.display.link_base
                );
                contains_error = true;
            }
            Ok(_) => {}
            Err(e) => {
                error!(
                    "display.link_base ({}) is not a valid URL: {e}",
                    self.display.link_base
                );
                contains_error = true;
            }
        }

        if self.display.bar_columns == 0 {
            error!("display.bar_columns cannot be 0");
            contains_error = true;
        }

        contains_error
    }
}

fn default_top() -> usize {
    cpbench_analysis::DEFAULT_TOP
}

fn default_placeholder() -> String {
    "-".to_owned()
}

fn default_link_base() -> String {
    "http://localhost:8000/".to_owned()
}

fn default_bar_columns() -> usize {
    40
}
