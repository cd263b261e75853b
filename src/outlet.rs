//! Outlet records: raw loader rows and their normalized form.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Timestamp formats seen in spreadsheet exports, tried in order. Ambiguous
/// numeric dates read month-first; the day-first form only matches when the
/// month-first reading is impossible (`25/12/2023`).
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m-%d-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y", "%d-%m-%Y", "%m.%d.%Y", "%d.%m.%Y",
];

/// One outlet row as supplied by a loader. Every field may be missing or
/// malformed; nothing is validated here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOutletRow {
    pub market: Option<String>,
    pub dealer: Option<String>,
    pub name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub salesperson_latitude: Option<String>,
    pub salesperson_longitude: Option<String>,
    pub last_visited: Option<String>,
}

/// A normalized outlet. Read-only once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outlet {
    pub name: String,
    pub market: String,
    pub dealer: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub last_visited: Option<NaiveDateTime>,
    /// Last-visited value as it appeared in the source, for display.
    pub last_visited_label: Option<String>,
    pub salesperson_latitude: Option<f64>,
    pub salesperson_longitude: Option<f64>,
}

impl Outlet {
    /// Normalize a raw row. Returns `None` when the row has no outlet name.
    pub fn from_raw(row: RawOutletRow) -> Option<Self> {
        let name = row.name.as_deref().map(str::trim).filter(|name| !name.is_empty())?;
        let last_visited_label = row
            .last_visited
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Some(Self {
            name: name.to_string(),
            market: normalize_text(row.market.as_deref().unwrap_or_default()),
            dealer: normalize_text(row.dealer.as_deref().unwrap_or_default()),
            latitude: parse_coordinate(row.latitude.as_deref()),
            longitude: parse_coordinate(row.longitude.as_deref()),
            last_visited: last_visited_label.as_deref().and_then(parse_visit_date),
            last_visited_label,
            salesperson_latitude: parse_coordinate(row.salesperson_latitude.as_deref()),
            salesperson_longitude: parse_coordinate(row.salesperson_longitude.as_deref()),
        })
    }

    /// Routing location, if both coordinates are usable.
    pub fn location(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Salesperson's last-known location recorded against this outlet.
    pub fn salesperson_location(&self) -> Option<(f64, f64)> {
        Some((self.salesperson_latitude?, self.salesperson_longitude?))
    }

    pub fn last_visit_display(&self) -> &str {
        self.last_visited_label.as_deref().unwrap_or("Never")
    }
}

/// Collapse internal whitespace runs, trim, lowercase.
pub fn normalize_text(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Parse a coordinate field. Blank, non-numeric and non-finite values are absent.
pub fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    value?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

/// Parse a last-visited value. Date-only values are midnight; unrecognized
/// formats are absent.
pub fn parse_visit_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
