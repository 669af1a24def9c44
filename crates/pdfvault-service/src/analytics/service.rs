//! Analytics fetch and the derived dashboard highlights.

use serde::Serialize;
use tracing::debug;

use pdfvault_client::api::AnalyticsApi;
use pdfvault_core::AppResult;
use pdfvault_entity::analytics::{Analytics, GroupCount};

/// Figures derived from the raw analytics for the dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlights {
    /// Share of PDFs that are active, in percent.
    pub active_share: f64,
    /// Mean views per active PDF.
    pub average_views: f64,
    /// Department with the most PDFs.
    pub top_department: Option<String>,
    /// Study year with the most PDFs.
    pub top_year: Option<String>,
}

/// Derive the highlights. Empty collections yield zeros and `None`.
pub fn summarize(analytics: &Analytics) -> Highlights {
    let overview = &analytics.overview;
    let active_share = ratio(overview.active_pdfs, overview.total_pdfs) * 100.0;
    let average_views = ratio(overview.total_views, overview.active_pdfs);

    Highlights {
        active_share: (active_share * 10.0).round() / 10.0,
        average_views: (average_views * 10.0).round() / 10.0,
        top_department: largest(&analytics.distribution.by_department),
        top_year: largest(&analytics.distribution.by_year),
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Label of the biggest bucket; the first one wins a tie.
fn largest(buckets: &[GroupCount]) -> Option<String> {
    buckets
        .iter()
        .filter(|b| b.count > 0)
        .fold(None::<&GroupCount>, |best, b| match best {
            Some(best) if best.count >= b.count => Some(best),
            _ => Some(b),
        })
        .map(GroupCount::label)
}

/// Reads the dashboard analytics.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    api: AnalyticsApi,
}

impl AnalyticsService {
    /// Create the service.
    pub fn new(api: AnalyticsApi) -> Self {
        Self { api }
    }

    /// The raw analytics and their highlights.
    pub async fn fetch(&self) -> AppResult<(Analytics, Highlights)> {
        let analytics = self.api.fetch().await?;
        let highlights = summarize(&analytics);
        debug!(
            total_pdfs = analytics.overview.total_pdfs,
            total_users = analytics.overview.total_users,
            "Analytics loaded"
        );
        Ok((analytics, highlights))
    }
}
