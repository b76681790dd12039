use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{Result, ZillowError};

const MAX_ZOOM: u32 = 22;

/// Which listing population a map search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SearchKind {
    ForSale,
    ForRent,
    Sold,
}

impl SearchKind {
    /// Filter entries every search of this kind starts from.
    pub fn base_filters(self) -> Map<String, Value> {
        let entries: Vec<(&str, Value)> = match self {
            Self::ForSale => vec![
                ("sortSelection", json!("globalrelevanceex")),
                ("isAllHomes", json!(true)),
            ],
            Self::ForRent => vec![
                ("sortSelection", json!("priorityscore")),
                ("isNewConstruction", json!(false)),
                ("isForSaleForeclosure", json!(false)),
                ("isForSaleByOwner", json!(false)),
                ("isForSaleByAgent", json!(false)),
                ("isForRent", json!(true)),
                ("isComingSoon", json!(false)),
                ("isAuction", json!(false)),
                ("isAllHomes", json!(true)),
            ],
            Self::Sold => vec![
                ("sortSelection", json!("globalrelevanceex")),
                ("isNewConstruction", json!(false)),
                ("isForSaleForeclosure", json!(false)),
                ("isForSaleByOwner", json!(false)),
                ("isForSaleByAgent", json!(false)),
                ("isForRent", json!(false)),
                ("isComingSoon", json!(false)),
                ("isAuction", json!(false)),
                ("isAllHomes", json!(true)),
                ("isRecentlySold", json!(true)),
            ],
        };
        entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), filter_value(value)))
            .collect()
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ForSale => "for-sale",
            Self::ForRent => "for-rent",
            Self::Sold => "sold",
        };
        f.write_str(name)
    }
}

/// Inclusive bounds where either side may be left open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericRange<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> NumericRange<T>
where
    T: Copy + PartialOrd + fmt::Display + Into<Value>,
{
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    pub fn is_void(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// `{min, max}` with only the bounds that are set.
    pub fn to_json(&self) -> Value {
        let mut range = Map::new();
        if let Some(min) = self.min {
            range.insert("min".into(), min.into());
        }
        if let Some(max) = self.max {
            range.insert("max".into(), max.into());
        }
        Value::Object(range)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if let Some(min) = self.min
            && let Some(max) = self.max
            && min > max
        {
            return Err(ZillowError::InvalidParams {
                reason: format!("min_{name} ({min}) cannot be greater than max_{name} ({max})"),
            });
        }
        Ok(())
    }
}

/// Visible map area, given by its north-east and south-west corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub north: f64,
    pub east: f64,
    pub south: f64,
    pub west: f64,
}

impl MapBounds {
    pub fn new(ne_lat: f64, ne_long: f64, sw_lat: f64, sw_long: f64) -> Self {
        Self {
            north: ne_lat,
            east: ne_long,
            south: sw_lat,
            west: sw_long,
        }
    }

    fn validate(&self) -> Result<()> {
        for (label, lat) in [("north", self.north), ("south", self.south)] {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(ZillowError::InvalidParams {
                    reason: format!("{label} latitude {lat} is outside [-90, 90]"),
                });
            }
        }
        for (label, long) in [("east", self.east), ("west", self.west)] {
            if !(-180.0..=180.0).contains(&long) {
                return Err(ZillowError::InvalidParams {
                    reason: format!("{label} longitude {long} is outside [-180, 180]"),
                });
            }
        }
        if self.north < self.south {
            return Err(ZillowError::InvalidParams {
                reason: "north latitude must not be below south latitude".into(),
            });
        }
        Ok(())
    }

    fn to_json(self) -> Value {
        json!({
            "north": self.north,
            "east": self.east,
            "south": self.south,
            "west": self.west,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SearchParams {
    pub kind: SearchKind,
    /// 1-based page index.
    pub pagination: u32,
    pub search_term: Option<String>,
    pub beds: NumericRange<u32>,
    pub baths: NumericRange<u32>,
    pub price: NumericRange<u64>,
    pub map_bounds: MapBounds,
    pub zoom: u32,
    /// Rentals only.
    pub is_room: Option<bool>,
    /// Rentals only.
    pub is_entire_place: Option<bool>,
    /// Raw filter entries merged last, replacing anything composed before them.
    pub filter_overrides: Map<String, Value>,
}

impl SearchParams {
    pub fn new(kind: SearchKind, map_bounds: MapBounds, zoom: u32) -> Self {
        Self {
            kind,
            pagination: 1,
            search_term: None,
            beds: NumericRange::default(),
            baths: NumericRange::default(),
            price: NumericRange::default(),
            map_bounds,
            zoom,
            is_room: None,
            is_entire_place: None,
            filter_overrides: Map::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pagination == 0 {
            return Err(ZillowError::InvalidParams {
                reason: "pagination starts at 1".into(),
            });
        }
        if self.zoom > MAX_ZOOM {
            return Err(ZillowError::InvalidParams {
                reason: format!("zoom {} exceeds maximum of {MAX_ZOOM}", self.zoom),
            });
        }
        self.beds.validate("beds")?;
        self.baths.validate("bathrooms")?;
        self.price.validate("price")?;
        self.map_bounds.validate()?;

        if self.kind != SearchKind::ForRent
            && (self.is_room.is_some() || self.is_entire_place.is_some())
        {
            return Err(ZillowError::InvalidParams {
                reason: format!(
                    "is_room / is_entire_place only apply to for-rent searches, not {}",
                    self.kind
                ),
            });
        }

        Ok(())
    }

    pub fn filter_state(&self) -> Map<String, Value> {
        let mut filters = self.kind.base_filters();

        for (name, range) in [("beds", &self.beds), ("baths", &self.baths)] {
            if !range.is_void() {
                filters.insert(name.into(), range.to_json());
            }
        }
        if !self.price.is_void() {
            filters.insert("price".into(), self.price.to_json());
        }

        if let Some(is_room) = self.is_room {
            filters.insert("isRoomForRent".into(), filter_value(json!(is_room)));
        }
        if let Some(is_entire_place) = self.is_entire_place {
            filters.insert(
                "isEntirePlaceForRent".into(),
                filter_value(json!(is_entire_place)),
            );
        }

        for (name, value) in &self.filter_overrides {
            filters.insert(name.clone(), value.clone());
        }

        filters
    }

    /// Body for the `async-create-search-page-state` PUT.
    pub fn to_request_body(&self) -> Value {
        let mut query_state = json!({
            "isMapVisible": true,
            "isListVisible": true,
            "mapBounds": self.map_bounds.to_json(),
            "filterState": self.filter_state(),
            "mapZoom": self.zoom,
            "pagination": { "currentPage": self.pagination },
        });
        if let Some(ref term) = self.search_term
            && let Some(state) = query_state.as_object_mut()
        {
            state.insert("usersSearchTerm".into(), json!(term));
        }

        json!({
            "searchQueryState": query_state,
            "wants": {
                "cat1": ["listResults", "mapResults"],
                "cat2": ["total"],
            },
            "requestId": 10,
            "isDebugRequest": false,
        })
    }
}

fn filter_value(value: Value) -> Value {
    json!({ "value": value })
}
