//! Immutable outlet catalog: loading, filtering and prioritization.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::CatalogError;
use crate::outlet::{Outlet, RawOutletRow, normalize_text};

/// Normalized outlet records, built once and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct OutletCatalog {
    outlets: Vec<Outlet>,
}

impl OutletCatalog {
    /// Build a catalog from raw rows. Rows without an outlet name are dropped.
    pub fn from_rows(rows: impl IntoIterator<Item = RawOutletRow>) -> Self {
        let mut dropped = 0usize;
        let outlets = rows
            .into_iter()
            .filter_map(|row| {
                let outlet = Outlet::from_raw(row);
                if outlet.is_none() {
                    dropped += 1;
                }
                outlet
            })
            .collect::<Vec<_>>();

        if dropped > 0 {
            debug!(dropped, "Dropped outlet rows without a name");
        }
        Self { outlets }
    }

    pub fn from_outlets(outlets: Vec<Outlet>) -> Self {
        Self { outlets }
    }

    /// Load outlets from a CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_csv_reader(file)?;
        info!(path = %path.display(), outlets = catalog.len(), "Loaded outlet catalog");
        Ok(catalog)
    }

    /// Load outlets from CSV. Header names are sanitized before lookup, so
    /// `"Outlet Name*"` and `outletname` refer to the same column.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .byte_headers()?
            .iter()
            .map(|header| sanitize_column(&String::from_utf8_lossy(header)))
            .collect::<Vec<_>>();
        debug!(columns = ?headers, "Sanitized column names");

        let columns = ColumnMap::resolve(&headers)?;

        let mut rows = Vec::new();
        // Byte records: a field that is not UTF-8 is decoded lossily instead
        // of failing the whole load.
        for record in reader.byte_records() {
            let record = record?;
            rows.push(columns.row(&record));
        }

        Ok(Self::from_rows(rows))
    }

    pub fn outlets(&self) -> &[Outlet] {
        &self.outlets
    }

    pub fn len(&self) -> usize {
        self.outlets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlets.is_empty()
    }

    /// Whether any outlet's market contains `market` (case-insensitive).
    pub fn matches_market(&self, market: &str) -> bool {
        let market = normalize_text(market);
        self.outlets.iter().any(|outlet| outlet.market.contains(&market))
    }

    /// Outlets whose market contains `market` and whose dealer contains the
    /// dealer search term. Order follows the catalog.
    pub fn filter(&self, market: &str, dealer: &str) -> Vec<&Outlet> {
        let market = normalize_text(market);
        let term = normalize_text(&dealer_search_term(dealer));
        debug!(%market, dealer_term = %term, "Filtering outlets");

        self.outlets
            .iter()
            .filter(|outlet| outlet.market.contains(&market) && outlet.dealer.contains(&term))
            .collect()
    }
}

/// Dealer text up to the first `(` or `-`, trimmed.
///
/// `"Saleem Brothers(CBE)-rush order"` searches for `"Saleem Brothers"`.
pub fn dealer_search_term(dealer: &str) -> String {
    dealer
        .split(['(', '-'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Oldest visit first, never-visited and undated outlets ahead of all dated
/// ones, then one entry per outlet name.
pub fn prioritize<'a>(outlets: impl IntoIterator<Item = &'a Outlet>) -> Vec<&'a Outlet> {
    let mut sorted = outlets.into_iter().collect::<Vec<_>>();
    // Stable: equal dates keep their input order. `None` orders before `Some`.
    sorted.sort_by_key(|outlet| outlet.last_visited);

    let mut seen = HashSet::new();
    sorted.retain(|&outlet| seen.insert(outlet.name.as_str()));
    sorted
}

/// Lowercase, strip everything but ASCII alphanumerics and spaces, trim,
/// spaces to underscores.
pub fn sanitize_column(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .trim()
        .replace(char::is_whitespace, "_")
}

/// Column positions for the fields a raw row carries.
struct ColumnMap {
    market: usize,
    dealer: usize,
    name: usize,
    latitude: Option<usize>,
    longitude: Option<usize>,
    salesperson_latitude: Option<usize>,
    salesperson_longitude: Option<usize>,
    last_visited: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &[String]) -> Result<Self, CatalogError> {
        let find = |aliases: &[&str]| {
            headers
                .iter()
                .position(|header| aliases.contains(&header.as_str()))
        };

        Ok(Self {
            market: find(&["market"]).ok_or(CatalogError::MissingColumn("market"))?,
            dealer: find(&["distributorname", "distributor_name", "dealer", "dealer_name"])
                .ok_or(CatalogError::MissingColumn("distributorname"))?,
            name: find(&["outletname", "outlet_name", "name"])
                .ok_or(CatalogError::MissingColumn("outletname"))?,
            latitude: find(&["latitude", "lat"]),
            longitude: find(&["longitude", "lon", "lng"]),
            salesperson_latitude: find(&["salesperson_latitude"]),
            salesperson_longitude: find(&["salesperson_longitude"]),
            last_visited: find(&["last_visited_date", "last_visited"]),
        })
    }

    fn row(&self, record: &csv::ByteRecord) -> RawOutletRow {
        let field = |index: Option<usize>| {
            index
                .and_then(|index| record.get(index))
                .map(String::from_utf8_lossy)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        RawOutletRow {
            market: field(Some(self.market)),
            dealer: field(Some(self.dealer)),
            name: field(Some(self.name)),
            latitude: field(self.latitude),
            longitude: field(self.longitude),
            salesperson_latitude: field(self.salesperson_latitude),
            salesperson_longitude: field(self.salesperson_longitude),
            last_visited: field(self.last_visited),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn midnight(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
    }

    fn outlet(name: &str, market: &str, dealer: &str, last_visited: Option<&str>) -> Outlet {
        Outlet::from_raw(RawOutletRow {
            name: Some(name.to_string()),
            market: Some(market.to_string()),
            dealer: Some(dealer.to_string()),
            last_visited: last_visited.map(str::to_string),
            ..Default::default()
        })
        .unwrap()
    }

    fn names<'a>(outlets: &[&'a Outlet]) -> Vec<&'a str> {
        outlets.iter().map(|outlet| outlet.name.as_str()).collect()
    }

    #[test]
    fn test_dealer_term_strips_suffixes() {
        assert_eq!(dealer_search_term("Saleem Brothers(CBE)-rush order"), "Saleem Brothers");
        assert_eq!(dealer_search_term("Ravi Traders - east"), "Ravi Traders");
        assert_eq!(dealer_search_term("  Plain Dealer  "), "Plain Dealer");
        assert_eq!(dealer_search_term("(CBE)"), "");
    }

    #[test]
    fn test_filter_matches_market_and_dealer_substrings() {
        let catalog = OutletCatalog::from_outlets(vec![
            outlet("A", "North Zone", "Saleem Brothers (CBE)", None),
            outlet("B", "North Zone", "Ravi Traders", None),
            outlet("C", "South", "Saleem Brothers", None),
        ]);

        let matched = catalog.filter("NORTH", "saleem brothers(cbe)-rush order");
        assert_eq!(names(&matched), vec!["A"]);
    }

    #[test]
    fn test_filter_collapses_request_whitespace() {
        let catalog = OutletCatalog::from_outlets(vec![outlet("A", "north zone", "saleem brothers", None)]);
        let matched = catalog.filter("  north \n zone ", "Saleem\tBrothers");
        assert_eq!(names(&matched), vec!["A"]);
    }

    #[test]
    fn test_filter_empty_result_is_not_an_error() {
        let catalog = OutletCatalog::from_outlets(vec![outlet("A", "north", "ravi", None)]);
        assert!(catalog.filter("west", "ravi").is_empty());
        assert!(catalog.matches_market("nor"));
        assert!(!catalog.matches_market("west"));
    }

    #[test]
    fn test_prioritize_puts_missing_dates_first() {
        let outlets = vec![
            outlet("May", "m", "d", Some("2023-05-01")),
            outlet("Missing", "m", "d", None),
            outlet("Jan", "m", "d", Some("2022-01-01")),
        ];
        let prioritized = prioritize(&outlets);
        assert_eq!(names(&prioritized), vec!["Missing", "Jan", "May"]);
    }

    #[test]
    fn test_prioritize_treats_invalid_dates_as_earliest() {
        let outlets = vec![
            outlet("Dated", "m", "d", Some("2020-01-01")),
            outlet("Garbage", "m", "d", Some("not a date")),
        ];
        let prioritized = prioritize(&outlets);
        assert_eq!(names(&prioritized), vec!["Garbage", "Dated"]);
    }

    #[test]
    fn test_prioritize_is_stable_for_ties() {
        let outlets = vec![
            outlet("First", "m", "d", Some("2022-01-01")),
            outlet("Second", "m", "d", Some("2022-01-01")),
            outlet("Third", "m", "d", None),
            outlet("Fourth", "m", "d", None),
        ];
        let prioritized = prioritize(&outlets);
        assert_eq!(names(&prioritized), vec!["Third", "Fourth", "First", "Second"]);
    }

    #[test]
    fn test_prioritize_keeps_oldest_duplicate() {
        let outlets = vec![
            outlet("Shop A", "m", "d", Some("2023-01-01")),
            outlet("Shop B", "m", "d", Some("2022-06-01")),
            outlet("Shop A", "m", "d", Some("2021-01-01")),
        ];
        let prioritized = prioritize(&outlets);

        let shop_a = prioritized
            .iter()
            .filter(|outlet| outlet.name == "Shop A")
            .collect::<Vec<_>>();
        assert_eq!(shop_a.len(), 1);
        assert_eq!(shop_a[0].last_visited, midnight(2021, 1, 1));
        assert_eq!(names(&prioritized), vec!["Shop A", "Shop B"]);
    }

    #[test]
    fn test_sanitizes_column_names() {
        assert_eq!(sanitize_column("Outlet Name*"), "outlet_name");
        assert_eq!(sanitize_column(" DistributorName "), "distributorname");
        assert_eq!(sanitize_column("Salesperson Latitude"), "salesperson_latitude");
        assert_eq!(sanitize_column("LAST VISITED DATE"), "last_visited_date");
    }

    #[test]
    fn test_loads_csv_with_messy_headers() {
        let data = "\
Market*,DistributorName,OutletName,Latitude,Longitude,Salesperson Latitude,Salesperson Longitude,LAST VISITED DATE
North ,Saleem Brothers,Shop 1,11.01,76.95,11.0,76.9,2023-01-01
north,saleem brothers,Shop 2,abc,76.96,,,
north,saleem brothers,,11.02,76.97,,,
";
        let catalog = OutletCatalog::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);

        let first = &catalog.outlets()[0];
        assert_eq!(first.market, "north");
        assert_eq!(first.dealer, "saleem brothers");
        assert_eq!(first.location(), Some((11.01, 76.95)));
        assert_eq!(first.salesperson_location(), Some((11.0, 76.9)));
        assert_eq!(first.last_visited, midnight(2023, 1, 1));

        let second = &catalog.outlets()[1];
        assert_eq!(second.location(), None);
        assert_eq!(second.last_visited_label, None);
    }

    #[test]
    fn test_prioritize_orders_same_day_visits_by_time() {
        let outlets = vec![
            outlet("Evening", "m", "d", Some("2023-05-01 18:30:00")),
            outlet("Morning", "m", "d", Some("2023-05-01 09:00:00")),
        ];
        let prioritized = prioritize(&outlets);
        assert_eq!(names(&prioritized), vec!["Morning", "Evening"]);
    }

    #[test]
    fn test_csv_with_non_utf8_field_keeps_other_rows() {
        let mut data = b"market,dealer,name,latitude,longitude\n".to_vec();
        data.extend_from_slice(b"north,ravi,Caf\xe9 Corner,11.01,76.95\n");
        data.extend_from_slice(b"north,ravi,Good Shop,11.02,76.96\n");

        let catalog = OutletCatalog::from_csv_reader(data.as_slice()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.outlets()[0].name, "Caf\u{FFFD} Corner");
        assert_eq!(catalog.outlets()[0].location(), Some((11.01, 76.95)));
        assert_eq!(catalog.outlets()[1].name, "Good Shop");
    }

    #[test]
    fn test_csv_without_required_column_fails() {
        let data = "Market,OutletName\nnorth,Shop 1\n";
        let err = OutletCatalog::from_csv_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn("distributorname")));
    }

    #[test]
    fn test_csv_without_optional_columns_loads() {
        let data = "market,dealer,name\nnorth,ravi,Shop 1\n";
        let catalog = OutletCatalog::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.outlets()[0].location(), None);
    }
}
