//! Financial reporting models
//!
//! Revenue, expense and profit figures are aggregated by the backend.
//! The client only picks the date range and regroups rows for charts.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Inclusive date range for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    /// `today` and the six days before it
    pub fn last_7_days(today: NaiveDate) -> Self {
        Self::new(today - Days::new(6), today)
    }

    pub fn last_30_days(today: NaiveDate) -> Self {
        Self::new(today - Days::new(29), today)
    }

    /// First day of `today`'s month through `today`
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self::new(today.with_day(1).unwrap_or(today), today)
    }

    /// Number of days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.from && day <= self.to
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.from > self.to {
            return Err(ValidationError::new(
                "from",
                "start date must not be after end date",
            ));
        }
        Ok(())
    }

    pub fn to_query_string(&self) -> String {
        format!(
            "from={}&to={}",
            self.from.format("%Y-%m-%d"),
            self.to.format("%Y-%m-%d")
        )
    }
}

/// Chart bucket size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Day,
    Week,
    Month,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Day => "day",
            GroupBy::Week => "week",
            GroupBy::Month => "month",
        }
    }

    /// First day of the bucket containing `date` (weeks start on Monday)
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            GroupBy::Day => date,
            GroupBy::Week => {
                date - Days::new(date.weekday().num_days_from_monday() as u64)
            }
            GroupBy::Month => date.with_day(1).unwrap_or(date),
        }
    }

    pub fn label(&self, bucket_start: NaiveDate) -> String {
        match self {
            GroupBy::Day => bucket_start.format("%Y-%m-%d").to_string(),
            GroupBy::Week => {
                let week = bucket_start.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            GroupBy::Month => bucket_start.format("%Y-%m").to_string(),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(GroupBy::Day),
            "week" => Ok(GroupBy::Week),
            "month" => Ok(GroupBy::Month),
            other => Err(format!("unknown grouping: {other}")),
        }
    }
}

/// Profit/loss summary over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
    #[serde(default)]
    pub order_count: u64,
    #[serde(default)]
    pub reservation_count: u64,
}

impl FinancialSummary {
    /// Profit as a percentage of revenue
    pub fn margin_percent(&self) -> Option<f64> {
        if self.revenue == 0.0 {
            None
        } else {
            Some(self.profit / self.revenue * 100.0)
        }
    }

    pub fn is_loss(&self) -> bool {
        self.profit < 0.0
    }
}

/// One row of the backend breakdown (per day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
    pub date: NaiveDate,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}

/// One point of a revenue/expense/profit chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub label: String,
    pub start: NaiveDate,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}

#[derive(Default)]
struct Bucket {
    revenue: Decimal,
    expenses: Decimal,
    profit: Decimal,
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Regroup breakdown rows into chart buckets, oldest first.
///
/// Amounts are summed as decimals and rounded to cents.
pub fn group_breakdown(rows: &[BreakdownRow], group_by: GroupBy) -> Vec<ChartPoint> {
    let mut buckets: BTreeMap<NaiveDate, Bucket> = BTreeMap::new();
    for row in rows {
        let bucket = buckets.entry(group_by.bucket_start(row.date)).or_default();
        bucket.revenue += to_decimal(row.revenue);
        bucket.expenses += to_decimal(row.expenses);
        bucket.profit += to_decimal(row.profit);
    }

    buckets
        .into_iter()
        .map(|(start, b)| ChartPoint {
            label: group_by.label(start),
            start,
            revenue: b.revenue.round_dp(2).to_f64().unwrap_or_default(),
            expenses: b.expenses.round_dp(2).to_f64().unwrap_or_default(),
            profit: b.profit.round_dp(2).to_f64().unwrap_or_default(),
        })
        .collect()
}

/// Headline numbers for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub today_reservations: u32,
    pub pending_reservations: u32,
    pub today_revenue: f64,
    #[serde(default)]
    pub active_branches: u32,
    #[serde(default)]
    pub generated_at: Option<String>,
}
