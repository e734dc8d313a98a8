//! Read-only description of a room and the furniture it must hold.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Stable identifier of a furniture kind (e.g. `bed_twin_xl`).
pub type FurnitureId = String;

/// Error type for catalog and room ingestion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate furniture kind: {0}")]
    DuplicateKind(FurnitureId),
    #[error("furniture kind '{0}' must have positive width and depth")]
    DegenerateKind(FurnitureId),
    #[error("room '{0}' must have positive, finite width and depth")]
    DegenerateRoom(String),
    #[error("forbidden zone '{0}' must satisfy x_min < x_max and y_min < y_max")]
    DegenerateZone(String),
    #[error("required furniture '{0}' is not in the catalog")]
    UnknownRequirement(FurnitureId),
}

/// Catalog entry for one kind of furniture. Dimensions are in feet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureKind {
    pub id: FurnitureId,
    #[serde(alias = "name")]
    pub display_name: String,
    pub width: f64,
    pub depth: f64,
    #[serde(default, alias = "isMovable")]
    pub movable: bool,
}

impl FurnitureKind {
    /// Footprint of this kind placed with its lower-left corner at `(x, y)`.
    pub fn footprint_at(&self, x: f64, y: f64) -> Rect {
        Rect::from_origin(x, y, self.width, self.depth)
    }
}

/// All known furniture kinds, keyed by id in load order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FurnitureKind>", into = "Vec<FurnitureKind>")]
pub struct FurnitureCatalog {
    kinds: IndexMap<FurnitureId, FurnitureKind>,
}

impl FurnitureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a kind, rejecting duplicate ids and non-positive dimensions.
    pub fn insert(&mut self, kind: FurnitureKind) -> Result<(), CatalogError> {
        if !(kind.width > 0.0 && kind.depth > 0.0) {
            return Err(CatalogError::DegenerateKind(kind.id));
        }
        if self.kinds.contains_key(&kind.id) {
            return Err(CatalogError::DuplicateKind(kind.id));
        }
        self.kinds.insert(kind.id.clone(), kind);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&FurnitureKind> {
        self.kinds.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.kinds.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FurnitureKind> {
        self.kinds.values()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl TryFrom<Vec<FurnitureKind>> for FurnitureCatalog {
    type Error = CatalogError;

    fn try_from(kinds: Vec<FurnitureKind>) -> Result<Self, Self::Error> {
        let mut catalog = FurnitureCatalog::new();
        for kind in kinds {
            catalog.insert(kind)?;
        }
        Ok(catalog)
    }
}

impl From<FurnitureCatalog> for Vec<FurnitureKind> {
    fn from(catalog: FurnitureCatalog) -> Self {
        catalog.kinds.into_values().collect()
    }
}

/// A sub-rectangle of the room that must stay clear (door swing, radiator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForbiddenZone {
    pub id: String,
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl ForbiddenZone {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x_min, self.y_min, self.x_max, self.y_max)
    }
}

/// Fixed room dimensions, forbidden zones and the exact furniture multiset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSpec {
    pub id: String,
    pub width: f64,
    pub depth: f64,
    /// Required quantity per kind; iteration order is the reporting order.
    #[serde(alias = "requiredFurniture")]
    pub required_counts: IndexMap<FurnitureId, u32>,
    #[serde(default, alias = "noGoZones")]
    pub forbidden_zones: Vec<ForbiddenZone>,
}

impl RoomSpec {
    /// The room boundary `[0, width] × [0, depth]`.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.depth)
    }

    /// Total number of pieces a valid layout places.
    pub fn total_required(&self) -> u32 {
        self.required_counts.values().sum()
    }

    /// Checks that the room is well formed against `catalog`.
    pub fn check(&self, catalog: &FurnitureCatalog) -> Result<(), CatalogError> {
        let finite_positive = |v: f64| v.is_finite() && v > 0.0;
        if !(finite_positive(self.width) && finite_positive(self.depth)) {
            return Err(CatalogError::DegenerateRoom(self.id.clone()));
        }
        for zone in &self.forbidden_zones {
            if !(zone.x_min < zone.x_max && zone.y_min < zone.y_max) {
                return Err(CatalogError::DegenerateZone(zone.id.clone()));
            }
        }
        for id in self.required_counts.keys() {
            if !catalog.contains(id) {
                return Err(CatalogError::UnknownRequirement(id.clone()));
            }
        }
        Ok(())
    }
}
