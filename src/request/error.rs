use thiserror::Error;

use crate::data::Asset;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("unexpected response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("price {0:?} is not a finite number")]
    InvalidPrice(String),

    #[error("{}", describe_failures(.failures))]
    Incomplete { failures: Vec<(Asset, FetchError)> },
}

fn describe_failures(failures: &[(Asset, FetchError)]) -> String {
    failures
        .iter()
        .map(|(asset, err)| format!("{asset}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}
