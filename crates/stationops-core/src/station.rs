//! # Station Directory
//!
//! The static directory of managed stations and the [`StationScope`]
//! addressing primitive. A station is identified by a short code and a
//! human-readable display name; the remote store is inconsistent about
//! which of the two it returns, so both lookup directions are provided.
//!
//! The directory is the single source of truth for the name↔code mapping.
//! When a lookup fails, callers must leave the derived field unset rather
//! than guess.

use serde::{Deserialize, Serialize};

/// One entry in the station directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Station {
    /// Short station code (e.g., `"ZX"`).
    pub code: &'static str,
    /// Display name (e.g., `"忠孝站"`).
    pub name: &'static str,
}

/// All managed stations.
pub const STATIONS: &[Station] = &[
    Station { code: "ZX", name: "忠孝站" },
    Station { code: "XM", name: "西門站" },
    Station { code: "SL", name: "士林站" },
    Station { code: "BQ", name: "板橋站" },
    Station { code: "NG", name: "南港站" },
    Station { code: "DA", name: "大安站" },
];

/// Wire value of the "all stations" sentinel in user records.
pub const ALL_STATIONS: &str = "ALL";

/// Station filter value the remote `getTasks` action understands as
/// "every station".
pub const ALL_STATIONS_FILTER: &str = "全部";

/// Look up a station code by its display name.
pub fn code_for_name(name: &str) -> Option<&'static str> {
    STATIONS.iter().find(|s| s.name == name).map(|s| s.code)
}

/// Look up a station display name by its code.
pub fn name_for_code(code: &str) -> Option<&'static str> {
    STATIONS.iter().find(|s| s.code == code).map(|s| s.name)
}

/// A session's station assignment: either a specific station code or the
/// reserved sentinel meaning no station-scoping restriction applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StationScope {
    /// No station restriction (wire value `"ALL"`).
    All,
    /// Restricted to one station, identified by code.
    Station(String),
}

impl StationScope {
    /// Whether this scope admits the given station code.
    pub fn admits(&self, station_code: &str) -> bool {
        match self {
            StationScope::All => true,
            StationScope::Station(code) => code == station_code,
        }
    }

    /// The station-name filter value to pass to the remote `getTasks`
    /// action. The remote matches on display names, so a scoped code is
    /// translated through the directory; a code the directory does not
    /// know degrades to the unrestricted filter.
    pub fn task_filter(&self) -> &'static str {
        match self {
            StationScope::All => ALL_STATIONS_FILTER,
            StationScope::Station(code) => {
                name_for_code(code).unwrap_or(ALL_STATIONS_FILTER)
            }
        }
    }
}

impl From<String> for StationScope {
    fn from(value: String) -> Self {
        if value == ALL_STATIONS {
            StationScope::All
        } else {
            StationScope::Station(value)
        }
    }
}

impl From<StationScope> for String {
    fn from(scope: StationScope) -> Self {
        match scope {
            StationScope::All => ALL_STATIONS.to_string(),
            StationScope::Station(code) => code,
        }
    }
}
