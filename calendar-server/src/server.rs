use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use calendar_layout::{build_month_view, group_by_date, layout_day_events, EventsByDate};
use chrono::{NaiveDate, Utc};
use log::{error, info, warn};
use serde::Deserialize;
use tokio::time::Duration;

use crate::cache::Cache;
use crate::source::EventSource;

pub const MONTH_PATH: &str = "/month";
pub const DAY_PATH: &str = "/day";

pub struct AppState {
    source: EventSource,
    cache: Arc<Cache<EventSource, EventsByDate>>,
}

impl AppState {
    pub fn new(source: EventSource, cache_ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            source,
            cache: Cache::new(cache_ttl),
        })
    }

    async fn events(&self) -> Result<Arc<EventsByDate>> {
        if let Some(events) = self.cache.get(&self.source).await {
            return Ok(events);
        }

        let events = self.source.fetch().await?;
        info!("Loaded {} events from {}", events.len(), self.source);

        Ok(self
            .cache
            .insert(self.source.clone(), group_by_date(events))
            .await)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(MONTH_PATH, get(handle_month))
        .route(DAY_PATH, get(handle_day))
        .fallback(|| async { Redirect::permanent(MONTH_PATH) })
        .with_state(state)
}

fn source_unavailable(err: anyhow::Error) -> Response {
    error!("Failed to load events: {err:#}");
    (StatusCode::BAD_GATEWAY, "Failed to load events").into_response()
}

#[derive(Deserialize)]
struct MonthQuery {
    date: Option<NaiveDate>,
    #[serde(default)]
    ics: bool,
}

async fn handle_month(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let events = match state.events().await {
        Ok(events) => events,
        Err(err) => return source_unavailable(err),
    };

    let today = Utc::now().date_naive();
    let view = build_month_view(query.date.unwrap_or(today), today, &events);

    for rejected in &view.rejected {
        warn!("Skipping event on {}: {}", rejected.event.date, rejected.reason);
    }

    if query.ics {
        return (
            [("content-type", "text/calendar")],
            view.to_ics(&view.title).to_string(),
        )
            .into_response();
    }

    Json(&view).into_response()
}

#[derive(Deserialize)]
struct DayQuery {
    date: NaiveDate,
}

async fn handle_day(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DayQuery>,
) -> Response {
    let events = match state.events().await {
        Ok(events) => events,
        Err(err) => return source_unavailable(err),
    };

    let day_events = events.get(&query.date).map_or(&[][..], Vec::as_slice);

    match layout_day_events(day_events) {
        Ok(layout) => Json(&layout).into_response(),
        Err(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()).into_response(),
    }
}
