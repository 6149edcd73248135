//! Drill-down links between the overview and the results view
//!
//! A link carries the pre-selection as `workload` and `consistency` query parameters,
//! e.g. `result.html?workload=workloada&consistency=Linearizability`.

#[cfg(test)]
mod link_test;

use reqwest::Url;
use thiserror::Error;

pub const RESULT_PAGE: &str = "result.html";
pub const WORKLOAD_PARAM: &str = "workload";
pub const CONSISTENCY_PARAM: &str = "consistency";

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid link '{link}': {reason}")]
pub struct LinkError {
    pub link: String,
    pub reason: String,
}

/// Values pre-selected by arriving through a link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preselection {
    pub workload: Option<String>,
    pub consistency: Option<String>,
}

impl Preselection {
    /// Read the pre-selection from an absolute link or one relative to `base`
    ///
    /// Unknown parameters are ignored, the last occurrence of a repeated one wins.
    pub fn from_link(base: &Url, link: &str) -> Result<Self, LinkError> {
        let url = base.join(link).map_err(|error| LinkError {
            link: link.to_owned(),
            reason: error.to_string(),
        })?;

        Ok(url
            .query_pairs()
            .fold(Self::default(), |selection, (key, value)| {
                match key.as_ref() {
                    WORKLOAD_PARAM => Self {
                        workload: Some(value.into_owned()),
                        ..selection
                    },
                    CONSISTENCY_PARAM => Self {
                        consistency: Some(value.into_owned()),
                        ..selection
                    },
                    _ => selection,
                }
            }))
    }

    /// Flags win over values taken from a link
    pub fn or(self, other: Self) -> Self {
        Self {
            workload: self.workload.or(other.workload),
            consistency: self.consistency.or(other.consistency),
        }
    }
}

pub fn parse_base(base: &str) -> Result<Url, LinkError> {
    Url::parse(base).map_err(|error| LinkError {
        link: base.to_owned(),
        reason: error.to_string(),
    })
}

/// Link to the results view of `workload` with `consistency` pre-selected
pub fn result_link(base: &Url, workload: &str, consistency: &str) -> Result<Url, LinkError> {
    let mut url = base.join(RESULT_PAGE).map_err(|error| LinkError {
        link: base.to_string(),
        reason: error.to_string(),
    })?;

    url.query_pairs_mut()
        .clear()
        .append_pair(WORKLOAD_PARAM, workload)
        .append_pair(CONSISTENCY_PARAM, consistency);

    Ok(url)
}
