//! Supported cities and their QWeather location ids.

use std::collections::HashMap;
use std::fmt;

/// QWeather location identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CityId(pub u32);

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// (display name, local name, id)
const CITIES: &[(&str, &str, u32)] = &[
    ("Nanjing", "南京", 101190101),
    ("Beijing", "北京", 101010100),
    ("Shanghai", "上海", 101020100),
    ("Guangzhou", "广州", 101280101),
    ("Shenzhen", "深圳", 101280601),
];

/// Immutable city name to id table.
///
/// Accepts either the display name or the local name; anything else is a
/// miss, reported as `None`.
#[derive(Debug, Clone)]
pub struct CityLookup {
    index: HashMap<&'static str, CityId>,
}

impl CityLookup {
    pub fn new() -> Self {
        let mut index = HashMap::with_capacity(CITIES.len() * 2);
        for &(name, local, id) in CITIES {
            index.insert(name, CityId(id));
            index.insert(local, CityId(id));
        }
        Self { index }
    }

    pub fn resolve(&self, city: &str) -> Option<CityId> {
        self.index.get(city.trim()).copied()
    }

    pub fn contains(&self, city: &str) -> bool {
        self.resolve(city).is_some()
    }

    /// Display names in the order the settings panel lists them
    pub fn display_names() -> impl Iterator<Item = &'static str> {
        CITIES.iter().map(|&(name, _, _)| name)
    }
}

impl Default for CityLookup {
    fn default() -> Self {
        Self::new()
    }
}
