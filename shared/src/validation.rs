//! Client-side input validation
//!
//! Superficial checks run before any request is sent: required fields,
//! numeric parsing and simple formats. The backend stays authoritative.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::models::{
    BranchCreate, BranchUpdate, CartItemAdd, CheckoutRequest, MealCreate, MealUpdate,
    OpeningHours, PageCreate, PageUpdate, ReservationCreate, Review, TagCreate, TagUpdate,
};

// ── Limits ──────────────────────────────────────────────────────────

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_ADDRESS_LEN: usize = 255;
pub const MAX_TEXT_LEN: usize = 5000;
pub const MAX_NOTE_LEN: usize = 500;
pub const MAX_PARTY_SIZE: u32 = 50;
pub const MAX_CART_QUANTITY: u32 = 99;
pub const MAX_PRICE: f64 = 1_000_000.0;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Validation failure for a single field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn required(field: &str) -> Self {
        Self::new(field, format!("{field} is required"))
    }
}

/// Payloads that can be checked before submission
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

// ── Field helpers ───────────────────────────────────────────────────

/// Validate that a required string is non-blank and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    validate_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => validate_len(v, field, max_len),
        None => Ok(()),
    }
}

fn validate_len(value: &str, field: &str, max_len: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(ValidationError::new(
            field,
            format!("{field} is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(())
}

/// Phone numbers: optional leading `+`, then 6 to 20 digits, spaces or
/// hyphens.
pub fn validate_phone(value: &str, field: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required(field));
    }
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let invalid = || ValidationError::new(field, format!("{field} is not a valid phone number"));
    if !body.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '-') {
        return Err(invalid());
    }
    if !(6..=20).contains(&body.chars().count()) {
        return Err(invalid());
    }
    Ok(())
}

/// `#RGB` or `#RRGGBB`
pub fn validate_hex_color(value: &str, field: &str) -> Result<(), ValidationError> {
    let hex = value
        .strip_prefix('#')
        .ok_or_else(|| ValidationError::new(field, format!("{field} must start with '#'")))?;
    if !matches!(hex.len(), 3 | 6) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::new(
            field,
            format!("{field} must be a hex color like #1A2B3C"),
        ));
    }
    Ok(())
}

/// Lowercase letters, digits and single hyphens, no leading/trailing hyphen.
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::required("slug"));
    }
    let valid_chars = value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid_chars || value.starts_with('-') || value.ends_with('-') || value.contains("--") {
        return Err(ValidationError::new(
            "slug",
            "slug may only contain lowercase letters, digits and single hyphens",
        ));
    }
    validate_len(value, "slug", MAX_NAME_LEN)
}

pub fn validate_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(lat) = latitude
        && !(lat.is_finite() && (-90.0..=90.0).contains(&lat))
    {
        return Err(ValidationError::new(
            "latitude",
            "latitude must be between -90 and 90",
        ));
    }
    if let Some(lng) = longitude
        && !(lng.is_finite() && (-180.0..=180.0).contains(&lng))
    {
        return Err(ValidationError::new(
            "longitude",
            "longitude must be between -180 and 180",
        ));
    }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::new(
            "price",
            "price must be a non-negative number",
        ));
    }
    if price > MAX_PRICE {
        return Err(ValidationError::new(
            "price",
            format!("price exceeds maximum allowed ({MAX_PRICE})"),
        ));
    }
    Ok(())
}

/// Parse a price typed into a form field (`"45"`, `"45.50"`, `"45,50"`)
pub fn parse_price(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required("price"));
    }
    let price: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| ValidationError::new("price", "price must be a number"))?;
    validate_price(price)?;
    Ok(price)
}

pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::new(field, format!("{field} must be a date (YYYY-MM-DD)")))
}

pub fn parse_time(value: &str, field: &str) -> Result<NaiveTime, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| ValidationError::new(field, format!("{field} must be a time (HH:MM)")))
}

fn validate_opening_hours(hours: &[OpeningHours]) -> Result<(), ValidationError> {
    for h in hours.iter().filter(|h| !h.is_closed) {
        let opens = parse_time(&h.opens_at, "opensAt")?;
        let closes = parse_time(&h.closes_at, "closesAt")?;
        if opens == closes {
            return Err(ValidationError::new(
                "openingHours",
                "opening and closing time must differ",
            ));
        }
    }
    for (i, h) in hours.iter().enumerate() {
        if hours[..i].iter().any(|other| other.day == h.day) {
            return Err(ValidationError::new(
                "openingHours",
                "each weekday may only appear once",
            ));
        }
    }
    Ok(())
}

fn validate_review(review: &Review) -> Result<(), ValidationError> {
    validate_required_text(&review.author, "author", MAX_NAME_LEN)?;
    if !(1..=5).contains(&review.rating) {
        return Err(ValidationError::new(
            "rating",
            "rating must be between 1 and 5",
        ));
    }
    validate_len(&review.text, "text", MAX_NOTE_LEN)
}

// ── Branch ──────────────────────────────────────────────────────────

impl Validate for BranchCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&self.address, "address", MAX_ADDRESS_LEN)?;
        validate_phone(&self.phone, "phone")?;
        validate_required_text(&self.city, "city", MAX_NAME_LEN)?;
        validate_optional_text(&self.state, "state", MAX_NAME_LEN)?;
        validate_optional_text(&self.country, "country", MAX_NAME_LEN)?;
        validate_coordinates(self.latitude, self.longitude)?;
        validate_opening_hours(&self.opening_hours)
    }
}

impl Validate for BranchUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(address) = &self.address {
            validate_required_text(address, "address", MAX_ADDRESS_LEN)?;
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone, "phone")?;
        }
        if let Some(city) = &self.city {
            validate_required_text(city, "city", MAX_NAME_LEN)?;
        }
        validate_coordinates(self.latitude, self.longitude)?;
        if let Some(hours) = &self.opening_hours {
            validate_opening_hours(hours)?;
        }
        Ok(())
    }
}

// ── Meal / Tag ──────────────────────────────────────────────────────

impl Validate for MealCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_required_text(&self.title, "title", MAX_NAME_LEN)?;
        validate_optional_text(&self.description, "description", MAX_TEXT_LEN)?;
        validate_price(self.price)
    }
}

impl Validate for MealUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_required_text(title, "title", MAX_NAME_LEN)?;
        }
        validate_optional_text(&self.description, "description", MAX_TEXT_LEN)?;
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

impl Validate for TagCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_required_text(&self.title, "title", MAX_NAME_LEN)?;
        if let Some(color) = &self.text_color {
            validate_hex_color(color, "textColor")?;
        }
        if let Some(color) = &self.background_color {
            validate_hex_color(color, "backgroundColor")?;
        }
        Ok(())
    }
}

impl Validate for TagUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_required_text(title, "title", MAX_NAME_LEN)?;
        }
        if let Some(color) = &self.text_color {
            validate_hex_color(color, "textColor")?;
        }
        if let Some(color) = &self.background_color {
            validate_hex_color(color, "backgroundColor")?;
        }
        Ok(())
    }
}

// ── Cart ────────────────────────────────────────────────────────────

impl Validate for CartItemAdd {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.quantity == 0 || self.quantity > MAX_CART_QUANTITY {
            return Err(ValidationError::new(
                "quantity",
                format!("quantity must be between 1 and {MAX_CART_QUANTITY}"),
            ));
        }
        Ok(())
    }
}

// ── Reservation ─────────────────────────────────────────────────────

impl ReservationCreate {
    /// Validate against an explicit "today" (the booking may not be in the past)
    pub fn validate_on(&self, today: NaiveDate) -> Result<(), ValidationError> {
        validate_required_text(&self.customer_name, "customerName", MAX_NAME_LEN)?;
        validate_phone(&self.customer_phone, "customerPhone")?;
        let date = parse_date(&self.date, "date")?;
        if date < today {
            return Err(ValidationError::new("date", "date must not be in the past"));
        }
        let start = parse_time(&self.start_time, "startTime")?;
        let end = parse_time(&self.end_time, "endTime")?;
        if start >= end {
            return Err(ValidationError::new(
                "endTime",
                "end time must be after start time",
            ));
        }
        if self.party_size == 0 || self.party_size > MAX_PARTY_SIZE {
            return Err(ValidationError::new(
                "partySize",
                format!("party size must be between 1 and {MAX_PARTY_SIZE}"),
            ));
        }
        validate_optional_text(&self.notes, "notes", MAX_NOTE_LEN)
    }
}

impl Validate for ReservationCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        self.validate_on(crate::util::today())
    }
}

// ── Page ────────────────────────────────────────────────────────────

impl Validate for PageCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_slug(&self.slug)?;
        validate_required_text(&self.title, "title", MAX_NAME_LEN * 2)?;
        validate_len(&self.content, "content", MAX_TEXT_LEN * 10)?;
        for review in &self.reviews {
            validate_review(review)?;
        }
        for chef in &self.chefs {
            validate_required_text(&chef.name, "chefName", MAX_NAME_LEN)?;
        }
        Ok(())
    }
}

impl Validate for PageUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(slug) = &self.slug {
            validate_slug(slug)?;
        }
        if let Some(title) = &self.title {
            validate_required_text(title, "title", MAX_NAME_LEN * 2)?;
        }
        if let Some(reviews) = &self.reviews {
            for review in reviews {
                validate_review(review)?;
            }
        }
        Ok(())
    }
}

// ── Checkout ────────────────────────────────────────────────────────

impl Validate for CheckoutRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.cart_id.is_none() && self.reservation_id.is_none() {
            return Err(ValidationError::new(
                "cartId",
                "a cart or a reservation is required for checkout",
            ));
        }
        Ok(())
    }
}
