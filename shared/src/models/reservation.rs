//! Reservation Model
//!
//! Status transitions are enforced by the backend. The client only
//! offers the actions that make sense for the current status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::PaymentMethod;
use crate::query::ListQuery;

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
    Completed,
    #[serde(alias = "no-show")]
    NoShow,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Rejected => "rejected",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
            ReservationStatus::NoShow => "no_show",
        }
    }

    /// Actions the dashboard offers for this status
    pub fn available_actions(&self) -> &'static [ReservationAction] {
        match self {
            ReservationStatus::Pending => &[
                ReservationAction::Confirm,
                ReservationAction::Reject,
                ReservationAction::Cancel,
            ],
            ReservationStatus::Confirmed => &[
                ReservationAction::Complete,
                ReservationAction::NoShow,
                ReservationAction::Cancel,
            ],
            _ => &[],
        }
    }

    pub fn allows(&self, action: ReservationAction) -> bool {
        self.available_actions().contains(&action)
    }

    pub fn is_terminal(&self) -> bool {
        self.available_actions().is_empty()
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "rejected" => Ok(ReservationStatus::Rejected),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            "completed" => Ok(ReservationStatus::Completed),
            "no_show" => Ok(ReservationStatus::NoShow),
            other => Err(format!("unknown reservation status: {other}")),
        }
    }
}

/// Status change requested from the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationAction {
    Confirm,
    Reject,
    Cancel,
    Complete,
    NoShow,
}

impl ReservationAction {
    /// Path segment of `PATCH /reservations/{id}/{action}`
    pub fn path_segment(&self) -> &'static str {
        match self {
            ReservationAction::Confirm => "confirm",
            ReservationAction::Reject => "reject",
            ReservationAction::Cancel => "cancel",
            ReservationAction::Complete => "complete",
            ReservationAction::NoShow => "no-show",
        }
    }

    /// Status the reservation lands in after the action
    pub fn target_status(&self) -> ReservationStatus {
        match self {
            ReservationAction::Confirm => ReservationStatus::Confirmed,
            ReservationAction::Reject => ReservationStatus::Rejected,
            ReservationAction::Cancel => ReservationStatus::Cancelled,
            ReservationAction::Complete => ReservationStatus::Completed,
            ReservationAction::NoShow => ReservationStatus::NoShow,
        }
    }
}

impl fmt::Display for ReservationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for ReservationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "confirm" => Ok(ReservationAction::Confirm),
            "reject" => Ok(ReservationAction::Reject),
            "cancel" => Ok(ReservationAction::Cancel),
            "complete" => Ok(ReservationAction::Complete),
            "no-show" => Ok(ReservationAction::NoShow),
            other => Err(format!("unknown reservation action: {other}")),
        }
    }
}

/// Reservation entity - a table booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    #[serde(default)]
    pub branch_id: Option<i64>,
    pub customer_name: String,
    pub customer_phone: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub party_size: u32,
    pub table_number: Option<u32>,
    pub status: ReservationStatus,
    #[serde(default)]
    pub cart_id: Option<i64>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create reservation payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
    pub customer_name: String,
    pub customer_phone: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub party_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Availability check parameters (`GET /reservations/availability`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub party_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
}

impl AvailabilityQuery {
    pub fn from_create(create: &ReservationCreate) -> Self {
        Self {
            date: create.date.clone(),
            start_time: create.start_time.clone(),
            end_time: create.end_time.clone(),
            party_size: create.party_size,
            branch_id: create.branch_id,
        }
    }

    pub fn to_query_string(&self) -> String {
        let mut parts = vec![
            format!("date={}", urlencoding::encode(&self.date)),
            format!("startTime={}", urlencoding::encode(&self.start_time)),
            format!("endTime={}", urlencoding::encode(&self.end_time)),
            format!("partySize={}", self.party_size),
        ];
        if let Some(branch_id) = self.branch_id {
            parts.push(format!("branchId={branch_id}"));
        }
        parts.join("&")
    }
}

/// Table that can seat the requested party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTable {
    pub table_number: u32,
    pub capacity: u32,
}

/// Alternative slot proposed when the requested one is full
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_time: String,
    pub end_time: String,
}

/// Availability answer computed by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available: bool,
    #[serde(default)]
    pub tables: Vec<AvailableTable>,
    #[serde(default)]
    pub suggested_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Reservation list filters (`GET /reservations`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationQuery {
    pub list: ListQuery,
    pub status: Option<ReservationStatus>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
}

impl ReservationQuery {
    pub fn new(list: ListQuery) -> Self {
        Self {
            list,
            ..Self::default()
        }
    }

    pub fn status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn to_query_string(&self) -> String {
        let mut query = self.list.clone();
        if let Some(status) = self.status {
            query = query.filter("status", status);
        }
        if let Some(date) = &self.date {
            query = query.filter("date", date);
        }
        query.to_query_string()
    }
}
