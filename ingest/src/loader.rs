pub mod session;
pub mod source;


use crate::record::BenchmarkRecord;
use session::{RecordSet, SessionStore, DATA_KEY};
use source::Source;
use std::{fs, io, path::Path, path::PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed")]
    Transport(#[from] reqwest::Error),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Results document is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("Results document must be an array of records")]
    NotAnArray,
    #[error("Record {index} is invalid: {error}")]
    Record {
        index: usize,
        #[source]
        error: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to fetch results")]
    Fetch(#[from] FetchError),
    #[error("Failed to parse results")]
    Parse(#[from] ParseError),
}

/// Parse a results document and normalize every record in it
///
/// The document is rejected as a whole if any entry fails validation, the error names
/// the offending index.
pub fn parse_document(body: &str) -> Result<Vec<BenchmarkRecord>, ParseError> {
    let document: serde_json::Value = serde_json::from_str(body)?;

    let serde_json::Value::Array(entries) = document else {
        return Err(ParseError::NotAnArray);
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value::<BenchmarkRecord>(entry)
                .map(|mut record| {
                    record.normalize();
                    record
                })
                .map_err(|error| ParseError::Record { index, error })
        })
        .collect()
}

/// Retrieves the result set once per session and serves it from the session store after
#[derive(Debug)]
pub struct Loader<'a> {
    source: Source,
    session: &'a SessionStore,
}

impl<'a> Loader<'a> {
    pub fn new(source: Source, session: &'a SessionStore) -> Self {
        Self { source, session }
    }

    #[instrument(level = "debug", skip(self), fields(source = %self.source))]
    pub fn load(&self) -> Result<RecordSet, LoadError> {
        if let Some(records) = self.session.get(DATA_KEY) {
            debug!(records = records.len(), "Serving results from session");

            return Ok(records);
        }

        let body = self.source.fetch()?;
        let records = parse_document(&body)?;

        info!(records = records.len(), "Fetched results");

        Ok(self.session.set(DATA_KEY, records))
    }

    /// Read a user supplied results file straight into the session
    ///
    /// An unreadable or malformed file leaves the current session untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn import(&self, path: &Path) -> Result<RecordSet, LoadError> {
        let body = fs::read_to_string(path).map_err(|error| FetchError::Io {
            path: path.to_path_buf(),
            error,
        })?;

        let records = parse_document(&body)?;

        info!(path = ?path, records = records.len(), "Imported results");

        Ok(self.session.set(DATA_KEY, records))
    }
}
