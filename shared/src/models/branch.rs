//! Branch Model

use chrono::{Datelike, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Opening/closing times use `HH:MM` on the wire
pub const TIME_FORMAT: &str = "%H:%M";

/// Day of week as the backend spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn from_chrono(day: chrono::Weekday) -> Self {
        Self::ALL[day.num_days_from_monday() as usize]
    }

    pub fn pred(self) -> Self {
        Self::from_chrono(self.to_chrono().pred())
    }

    pub fn to_chrono(self) -> chrono::Weekday {
        match self {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}

/// Opening window for one weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    pub day: Weekday,
    /// `HH:MM`
    pub opens_at: String,
    /// `HH:MM`; earlier than `opens_at` when the window crosses midnight
    pub closes_at: String,
    #[serde(default)]
    pub is_closed: bool,
}

impl OpeningHours {
    pub fn new(day: Weekday, opens_at: &str, closes_at: &str) -> Self {
        Self {
            day,
            opens_at: opens_at.to_string(),
            closes_at: closes_at.to_string(),
            is_closed: false,
        }
    }

    /// Parsed window, `None` when either time is malformed
    pub fn window(&self) -> Option<(NaiveTime, NaiveTime)> {
        let opens = NaiveTime::parse_from_str(&self.opens_at, TIME_FORMAT).ok()?;
        let closes = NaiveTime::parse_from_str(&self.closes_at, TIME_FORMAT).ok()?;
        Some((opens, closes))
    }

    pub fn crosses_midnight(&self) -> bool {
        matches!(self.window(), Some((opens, closes)) if closes <= opens)
    }
}

/// Branch entity - a physical restaurant location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: String,
    pub is_active: bool,
    #[serde(default)]
    pub opening_hours: Vec<OpeningHours>,
    /// Free-form metadata managed by the dashboard
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Branch {
    /// Opening window configured for `day`
    pub fn hours_for(&self, day: Weekday) -> Option<&OpeningHours> {
        self.opening_hours
            .iter()
            .find(|h| h.day == day && !h.is_closed)
    }

    /// Whether the branch is open at a local date-time.
    ///
    /// A window that crosses midnight keeps the branch open into the
    /// early hours of the following day.
    pub fn is_open_at(&self, at: NaiveDateTime) -> bool {
        if !self.is_active {
            return false;
        }
        let day = Weekday::from_chrono(at.weekday());
        let time = at.time();

        if let Some((opens, closes)) = self.hours_for(day).and_then(OpeningHours::window) {
            let open_today = if opens < closes {
                time >= opens && time < closes
            } else {
                time >= opens
            };
            if open_today {
                return true;
            }
        }

        // Spill-over from yesterday's overnight window
        match self.hours_for(day.pred()).and_then(OpeningHours::window) {
            Some((opens, closes)) if closes <= opens => time < closes,
            _ => false,
        }
    }
}

/// Create branch payload
///
/// One payload for every place that creates a branch; optional fields are
/// omitted from the request body when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchCreate {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opening_hours: Vec<OpeningHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Update branch payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<Vec<OpeningHours>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Status toggle payload (`PATCH /branches/{id}/status`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchStatusUpdate {
    pub is_active: bool,
}
