//! Fetch-then-render flow for the query builder.
//!
//! A [`QuerySession`] owns the output display. Each [`QuerySession::get`]
//! takes a ticket, shows `Loading...`, performs one request and then shows
//! either the indented JSON or the static `Error` message. When requests
//! overlap, only the most recently started one may update the display.

use crate::client::JsonFetcher;
use crate::export::JsonExport;
use crate::models::ScrapeResult;
use jetapi_core::query::QueryParameters;
use serde::Deserialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};
use tracing::{debug, error, warn};

/// Text shown while a request is in flight.
pub const LOADING_MESSAGE: &str = "Loading...";

/// Text shown when a request fails.
pub const ERROR_MESSAGE: &str = "Error";

/// A successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedRecord {
    /// Query URL that produced the data.
    pub query_url: String,
    /// Parsed response body.
    pub data: Value,
    /// Copy/download form of `data`, named after the queried registration.
    pub export: JsonExport,
}

impl FetchedRecord {
    /// Typed view of `data`.
    pub fn scrape_result(&self) -> crate::Result<ScrapeResult> {
        Ok(ScrapeResult::deserialize(&self.data)?)
    }
}

/// What the output area currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DisplayState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Waiting on the response for `query_url`.
    Loading {
        /// URL being fetched.
        query_url: String,
    },
    /// The last request failed.
    Failed,
    /// The last request succeeded.
    Loaded(FetchedRecord),
}

/// How a single [`QuerySession::get`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was rendered.
    Loaded,
    /// The error message was rendered.
    Failed,
    /// A newer request started first; the response was dropped.
    Superseded,
}

/// Output display plus the fetcher that feeds it.
pub struct QuerySession<F> {
    fetcher: F,
    latest_ticket: AtomicU64,
    state: RwLock<DisplayState>,
}

impl<F: JsonFetcher> QuerySession<F> {
    /// Create an idle session.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            latest_ticket: AtomicU64::new(0),
            state: RwLock::new(DisplayState::Idle),
        }
    }

    /// Access the underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch the query for `params` and update the display.
    ///
    /// Failures never escape: they are logged and rendered as
    /// [`ERROR_MESSAGE`], leaving nothing to export.
    pub async fn get(&self, params: &QueryParameters) -> FetchOutcome {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let query_url = params.build();

        self.apply(
            ticket,
            DisplayState::Loading {
                query_url: query_url.clone(),
            },
        );

        let next = match self.fetcher.fetch_json(&query_url).await {
            Ok(data) => match JsonExport::new(params.registration.as_str(), &data) {
                Ok(export) => DisplayState::Loaded(FetchedRecord {
                    query_url,
                    data,
                    export,
                }),
                Err(err) => {
                    warn!(error = %err, "Failed to render JetAPI response");
                    DisplayState::Failed
                }
            },
            Err(err) => {
                if err.should_log() {
                    error!(error = %err, code = err.error_code(), "JetAPI request failed");
                } else {
                    warn!(error = %err, code = err.error_code(), "JetAPI request failed");
                }
                DisplayState::Failed
            }
        };

        let failed = matches!(next, DisplayState::Failed);
        if !self.apply(ticket, next) {
            return FetchOutcome::Superseded;
        }
        if failed {
            FetchOutcome::Failed
        } else {
            FetchOutcome::Loaded
        }
    }

    /// Snapshot of the display.
    pub fn state(&self) -> DisplayState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Text for the output area.
    pub fn render(&self) -> String {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            DisplayState::Idle => String::new(),
            DisplayState::Loading { .. } => LOADING_MESSAGE.to_string(),
            DisplayState::Failed => ERROR_MESSAGE.to_string(),
            DisplayState::Loaded(record) => record.export.contents().to_string(),
        }
    }

    /// Copy/download affordance, present only after a successful fetch.
    pub fn export(&self) -> Option<JsonExport> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            DisplayState::Loaded(record) => Some(record.export.clone()),
            _ => None,
        }
    }

    fn apply(&self, ticket: u64, next: DisplayState) -> bool {
        let mut state = self.write_state();
        let latest = self.latest_ticket.load(Ordering::SeqCst);
        if ticket != latest {
            debug!(ticket, latest, "Dropping stale JetAPI response");
            return false;
        }
        *state = next;
        true
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, DisplayState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockJsonFetcher;
    use jetapi_core::Error;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;

    const BASE: &str = "http://localhost:4000/api?reg=";

    #[tokio::test]
    async fn successful_fetch_renders_and_exports() {
        let mut fetcher = MockJsonFetcher::new();
        fetcher
            .expect_fetch_json()
            .withf(|url: &str| url == "http://localhost:4000/api?reg=G-ABCD&photos=5")
            .times(1)
            .returning(|_| Ok(json!({ "JetPhotos": { "Reg": "G-ABCD", "Images": [] } })));

        let session = QuerySession::new(fetcher);
        assert_eq!(session.render(), "");
        assert!(session.export().is_none());

        let params = QueryParameters::new(BASE, "G-ABCD").with_photos(5);
        assert_eq!(session.get(&params).await, FetchOutcome::Loaded);

        let export = session.export().unwrap();
        assert_eq!(export.file_name(), "G-ABCD.json");
        assert_eq!(session.render(), export.contents());
        assert!(session.render().starts_with("{\n  \"JetPhotos\""));
    }

    #[tokio::test]
    async fn failed_fetch_shows_error_and_clears_export() {
        let mut fetcher = MockJsonFetcher::new();
        let mut seq = mockall::Sequence::new();
        fetcher
            .expect_fetch_json()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(json!({ "FlightRadar": null })));
        fetcher
            .expect_fetch_json()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(Error::NotFound("no such aircraft".into())));

        let session = QuerySession::new(fetcher);
        let params = QueryParameters::new(BASE, "N1");

        assert_eq!(session.get(&params).await, FetchOutcome::Loaded);
        assert!(session.export().is_some());

        assert_eq!(session.get(&params).await, FetchOutcome::Failed);
        assert_eq!(session.render(), ERROR_MESSAGE);
        assert_eq!(session.state(), DisplayState::Failed);
        assert!(session.export().is_none());
    }

    #[tokio::test]
    async fn export_named_after_queried_registration() {
        let mut fetcher = MockJsonFetcher::new();
        fetcher
            .expect_fetch_json()
            .returning(|_| Ok(json!({ "JetPhotos": { "Reg": "N12345" } })));

        let session = QuerySession::new(fetcher);
        session.get(&QueryParameters::new(BASE, "n12345")).await;

        assert_eq!(session.export().unwrap().file_name(), "n12345.json");
    }

    #[tokio::test]
    async fn loaded_record_summarizes_lookup() {
        let mut fetcher = MockJsonFetcher::new();
        fetcher.expect_fetch_json().returning(|_| {
            Ok(json!({
                "JetPhotos": { "Reg": "G-ABCD", "Images": [{ "Serial": "1" }, { "Serial": "2" }] },
                "FlightRadar": { "Aircraft": "Airbus A320", "Flights": null }
            }))
        });

        let session = QuerySession::new(fetcher);
        session.get(&QueryParameters::new(BASE, "G-ABCD")).await;

        let DisplayState::Loaded(record) = session.state() else {
            panic!("expected loaded state");
        };
        let summary = record.scrape_result().unwrap();
        assert_eq!(summary.registration(), Some("G-ABCD"));
        assert_eq!(summary.image_count(), 2);
        assert_eq!(summary.flight_count(), 0);
    }

    #[test]
    fn unexpected_shape_is_a_parse_error() {
        let record = FetchedRecord {
            query_url: format!("{BASE}N1"),
            data: json!({ "JetPhotos": "not an object" }),
            export: JsonExport::new("N1", &json!({})).unwrap(),
        };
        assert!(matches!(record.scrape_result(), Err(Error::ParseError(_))));
    }

    /// Fetcher whose first request blocks until released.
    struct GatedFetcher {
        gate: Arc<Notify>,
        calls: AtomicU64,
    }

    #[async_trait::async_trait]
    impl JsonFetcher for GatedFetcher {
        async fn fetch_json(&self, url: &str) -> crate::Result<Value> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.gate.notified().await;
            }
            Ok(json!({ "url": url }))
        }
    }

    #[tokio::test]
    async fn last_request_wins() {
        let gate = Arc::new(Notify::new());
        let session = Arc::new(QuerySession::new(GatedFetcher {
            gate: Arc::clone(&gate),
            calls: AtomicU64::new(0),
        }));

        let first = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.get(&QueryParameters::new(BASE, "OLD")).await })
        };

        // Wait until the first request is in flight.
        while session.fetcher().calls.load(Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(session.render(), LOADING_MESSAGE);

        let second = session.get(&QueryParameters::new(BASE, "NEW")).await;
        assert_eq!(second, FetchOutcome::Loaded);

        gate.notify_one();
        assert_eq!(first.await.unwrap(), FetchOutcome::Superseded);

        let export = session.export().unwrap();
        assert_eq!(export.registration(), "NEW");
        match session.state() {
            DisplayState::Loaded(record) => {
                assert_eq!(record.query_url, format!("{BASE}NEW"));
                assert_eq!(record.data["url"], format!("{BASE}NEW"));
            }
            other => panic!("unexpected state {other:?}"),
        }
    }
}
