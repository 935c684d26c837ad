//! Profit/loss reporting and dashboard figures

use shared::models::{
    BreakdownRow, ChartPoint, DashboardStats, DateRange, FinancialSummary, GroupBy,
    group_breakdown,
};

use crate::ClientResult;
use crate::client::HttpClient;
use crate::query::{QueryKey, QueryOptions, keys};

/// Summary plus chart for one date range
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialOverview {
    pub range: DateRange,
    pub group_by: GroupBy,
    pub summary: FinancialSummary,
    pub chart: Vec<ChartPoint>,
}

service!(
    /// Analytics API (`/analytics`)
    AnalyticsService
);

impl<C: HttpClient> AnalyticsService<C> {
    pub async fn summary(&self, range: DateRange) -> ClientResult<FinancialSummary> {
        range.validate()?;
        let qs = range.to_query_string();
        let path = format!("/analytics/summary?{qs}");
        let key = QueryKey::new(keys::ANALYTICS).with("summary").with(&qs);
        self.ctx
            .cache
            .fetch(&key, || self.ctx.http.get::<FinancialSummary>(&path))
            .await
    }

    /// Breakdown rows as aggregated by the backend
    pub async fn breakdown(
        &self,
        range: DateRange,
        group_by: GroupBy,
    ) -> ClientResult<Vec<BreakdownRow>> {
        range.validate()?;
        let qs = format!("{}&groupBy={}", range.to_query_string(), group_by);
        let path = format!("/analytics/breakdown?{qs}");
        let key = QueryKey::new(keys::ANALYTICS).with("breakdown").with(&qs);
        self.ctx
            .cache
            .fetch(&key, || self.ctx.http.get::<Vec<BreakdownRow>>(&path))
            .await
    }

    /// Breakdown regrouped into chart buckets, oldest first
    pub async fn chart(&self, range: DateRange, group_by: GroupBy) -> ClientResult<Vec<ChartPoint>> {
        let rows = self.breakdown(range, group_by).await?;
        Ok(group_breakdown(&rows, group_by))
    }

    /// Headline numbers; always fetched fresh
    pub async fn dashboard(&self) -> ClientResult<DashboardStats> {
        let key = QueryKey::new(keys::ANALYTICS).with("dashboard");
        self.ctx
            .cache
            .fetch_with(&key, QueryOptions::always_refetch(), || {
                self.ctx.http.get::<DashboardStats>("/analytics/dashboard")
            })
            .await
    }

    /// Summary and chart fetched concurrently; fails if either fails
    pub async fn overview(
        &self,
        range: DateRange,
        group_by: GroupBy,
    ) -> ClientResult<FinancialOverview> {
        let (summary, chart) = tokio::try_join!(self.summary(range), self.chart(range, group_by))?;
        Ok(FinancialOverview {
            range,
            group_by,
            summary,
            chart,
        })
    }
}
