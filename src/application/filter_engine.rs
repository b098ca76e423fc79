// Filter engine - Search, category and time-window predicates over record lists
use crate::domain::analytics::Activity;
use crate::domain::revenue::RevenueLine;
use crate::domain::user::UserRecord;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Category value that disables the category predicate
pub const ALL_CATEGORIES: &str = "all";

/// Source of "now" for time-window bounds
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

type TextField<T> = fn(&T) -> Option<&str>;
type CategoryField<T> = fn(&T) -> &str;
type TimeField<T> = fn(&T) -> Option<DateTime<Utc>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Today,
    Week,
    Month,
}

impl TimeWindow {
    pub fn duration(&self) -> Duration {
        match self {
            TimeWindow::Today => Duration::days(1),
            TimeWindow::Week => Duration::days(7),
            TimeWindow::Month => Duration::days(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub type_filter: String,
    /// `None` applies no time bound
    pub time_filter: Option<TimeWindow>,
}

fn all_categories() -> String {
    ALL_CATEGORIES.to_string()
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            type_filter: all_categories(),
            time_filter: None,
        }
    }
}

impl FilterState {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_type(mut self, category: impl Into<String>) -> Self {
        self.type_filter = category.into();
        self
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.time_filter = Some(window);
        self
    }
}

const LOCAL_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO-8601 timestamp. Forms without an offset, with or without
/// seconds, are read as UTC, and a bare `YYYY-MM-DD` date as midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    let local = raw.strip_suffix('Z').unwrap_or(raw);
    if let Some(dt) = LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(local, format).ok())
    {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Stable filter over one record kind, declared by its searchable text
/// fields, its category field and (optionally) its timestamp field.
///
/// All active predicates are ANDed. Output is always a subsequence of the
/// input in the original order.
#[derive(Clone)]
pub struct FilterEngine<T> {
    search_fields: Vec<TextField<T>>,
    category: CategoryField<T>,
    timestamp: Option<TimeField<T>>,
    clock: Clock,
}

impl<T> FilterEngine<T> {
    pub fn new(category: CategoryField<T>) -> Self {
        Self {
            search_fields: Vec::new(),
            category,
            timestamp: None,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn search_field(mut self, field: TextField<T>) -> Self {
        self.search_fields.push(field);
        self
    }

    pub fn timestamp_field(mut self, field: TimeField<T>) -> Self {
        self.timestamp = Some(field);
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn filter<'a, I>(&self, records: I, state: &FilterState) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let term = state.search_term.to_lowercase();
        let window = state.time_filter.map(|w| {
            let now = (self.clock)();
            (now - w.duration(), now)
        });

        records
            .into_iter()
            .filter(|record| self.matches_search(record, &term))
            .filter(|record| self.matches_category(record, &state.type_filter))
            .filter(|record| match window {
                Some((start, end)) => self.within(record, start, end),
                None => true,
            })
            .collect()
    }

    /// `"all"` followed by each distinct category in first-seen order
    pub fn categories<'a, I>(&self, records: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut categories = vec![all_categories()];
        for record in records {
            let category = (self.category)(record);
            if !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }
        categories
    }

    fn matches_search(&self, record: &T, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }

        self.search_fields
            .iter()
            .filter_map(|field| field(record))
            .any(|value| value.to_lowercase().contains(term))
    }

    fn matches_category(&self, record: &T, type_filter: &str) -> bool {
        type_filter == ALL_CATEGORIES || (self.category)(record) == type_filter
    }

    fn within(&self, record: &T, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        // Record kinds without a time dimension are never bounded
        let Some(timestamp) = self.timestamp else {
            return true;
        };

        match timestamp(record) {
            Some(ts) => ts >= start && ts <= end,
            None => false,
        }
    }
}

impl FilterEngine<Activity> {
    /// Description and user name are searchable; category is the activity type
    pub fn activities() -> Self {
        Self::new(|a: &Activity| a.activity_type.as_str())
            .search_field(|a: &Activity| Some(a.description.as_str()))
            .search_field(|a: &Activity| a.user.as_deref())
            .timestamp_field(|a: &Activity| parse_timestamp(&a.timestamp))
    }
}

impl FilterEngine<UserRecord> {
    pub fn users_by_status() -> Self {
        Self::user_fields(Self::new(|u: &UserRecord| u.status.as_str()))
    }

    pub fn users_by_plan() -> Self {
        Self::user_fields(Self::new(|u: &UserRecord| u.plan.as_str()))
    }

    fn user_fields(engine: Self) -> Self {
        engine
            .search_field(|u: &UserRecord| Some(u.name.as_str()))
            .search_field(|u: &UserRecord| Some(u.email.as_str()))
            .timestamp_field(|u: &UserRecord| u.join_date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()))
    }
}

impl FilterEngine<RevenueLine> {
    /// Revenue lines carry no time dimension
    pub fn revenue_by_plan() -> Self {
        Self::new(|l: &RevenueLine| l.plan.as_str())
            .search_field(|l: &RevenueLine| Some(l.plan.as_str()))
    }
}
