use banksync_core::NormalizedTransaction;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::dedup;
use crate::wire::{NewSplit, StoreRequest, TransactionList};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
    #[error("Unexpected status code: {status} {body}")]
    Status { status: u16, body: String },
}

/// The ledger side of a sync run.
pub trait LedgerSync {
    /// Id of an already stored booking equal to `tx`, if any.
    ///
    /// Only the first page of entries the ledger lists for the booking date
    /// is searched; a duplicate on a later page of a busy day is missed.
    fn find_existing(
        &self,
        tx: &NormalizedTransaction,
        external_id: Option<&str>,
    ) -> impl Future<Output = Result<Option<i64>, LedgerError>> + Send;

    fn push(
        &self,
        tx: &NormalizedTransaction,
        external_id: Option<&str>,
    ) -> impl Future<Output = Result<(), LedgerError>> + Send;
}

/// HTTP client for a Firefly III style `/api/v1` ledger.
pub struct LedgerClient {
    base_url: String,
    http: reqwest::Client,
}

impl LedgerClient {
    /// `token` is sent verbatim as a bearer credential on every request.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, LedgerError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.api+json"));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=UTF-8"),
        );
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn transactions_url(&self) -> String {
        format!("{}/api/v1/transactions", self.base_url)
    }
}

/// Turns a non-2xx response into [`LedgerError::Status`] carrying the body.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, LedgerError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(LedgerError::Status {
        status: status.as_u16(),
        body,
    })
}

impl LedgerSync for LedgerClient {
    async fn find_existing(
        &self,
        tx: &NormalizedTransaction,
        external_id: Option<&str>,
    ) -> Result<Option<i64>, LedgerError> {
        let day = tx.date.format("%Y-%m-%d").to_string();
        let resp = self
            .http
            .get(self.transactions_url())
            .query(&[("start", day.as_str()), ("end", day.as_str())])
            .send()
            .await?;
        let list: TransactionList = check_status(resp).await?.json().await?;
        debug!(date = %day, groups = list.data.len(), "fetched ledger entries");
        Ok(dedup::find_duplicate(&list.data, tx, external_id))
    }

    async fn push(
        &self,
        tx: &NormalizedTransaction,
        external_id: Option<&str>,
    ) -> Result<(), LedgerError> {
        let body = StoreRequest::single(NewSplit::new(tx, external_id));
        let resp = self
            .http
            .post(self.transactions_url())
            .json(&body)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        info!(
            status = resp.status().as_u16(),
            date = %tx.date,
            amount = %tx.amount,
            "posted transaction"
        );
        Ok(())
    }
}
