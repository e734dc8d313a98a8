//! Geometric and inventory checks that gate every layout admitted to a board.
//!
//! Three independent checks run in a fixed order:
//! 1. forbidden zones,
//! 2. per placement, room bounds then collisions with later placements,
//! 3. inventory (unknown or uncatalogued ids, then per-kind counts).
//!
//! [`LayoutValidator::validate`] stops at the first violation. Each check
//! walks placements (and zones, pairs, ids) in a deterministic order, so the
//! reported violation is reproducible. [`LayoutValidator::violations`] walks
//! the same order without stopping.

use std::ops::{ControlFlow, Deref};

use indexmap::IndexMap;

use crate::catalog::{FurnitureCatalog, FurnitureId, RoomSpec};
use crate::geometry::Rect;
use crate::layout::{LayoutCandidate, Placement};

/// Why a candidate layout was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("placement #{placement_index} intrudes on forbidden zone '{zone_id}'")]
    ForbiddenZone {
        placement_index: usize,
        zone_id: String,
    },
    #[error("placement #{placement_index} lies outside the room boundary")]
    OutOfBounds { placement_index: usize },
    #[error("placements #{first} and #{second} overlap")]
    Collision { first: usize, second: usize },
    #[error("layout contains furniture '{furniture_id}' that the room does not require")]
    UnknownItem { furniture_id: FurnitureId },
    #[error("layout must contain exactly {required} of '{furniture_id}', found {found}")]
    QuantityMismatch {
        furniture_id: FurnitureId,
        required: u32,
        found: u32,
    },
}

/// A candidate that passed every check.
///
/// Only [`LayoutValidator::admit`] constructs one, so anything holding a
/// `ValidatedLayout` satisfies the room's invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLayout(LayoutCandidate);

impl ValidatedLayout {
    pub fn into_inner(self) -> LayoutCandidate {
        self.0
    }
}

impl Deref for ValidatedLayout {
    type Target = LayoutCandidate;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Checks candidates against one room and furniture catalog.
#[derive(Debug, Clone, Copy)]
pub struct LayoutValidator<'a> {
    room: &'a RoomSpec,
    catalog: &'a FurnitureCatalog,
}

impl<'a> LayoutValidator<'a> {
    pub fn new(room: &'a RoomSpec, catalog: &'a FurnitureCatalog) -> Self {
        Self { room, catalog }
    }

    /// Runs all checks and reports the first violation.
    pub fn validate(&self, candidate: &LayoutCandidate) -> Result<(), Violation> {
        self.check_forbidden_zones(candidate)?;
        self.check_bounds_and_collisions(candidate)?;
        self.check_inventory(candidate)
    }

    /// Validates and wraps the candidate for registration.
    pub fn admit(&self, candidate: LayoutCandidate) -> Result<ValidatedLayout, Violation> {
        self.validate(&candidate)?;
        Ok(ValidatedLayout(candidate))
    }

    /// Every violation, in the order `validate` would encounter them.
    pub fn violations(&self, candidate: &LayoutCandidate) -> Vec<Violation> {
        let mut found = Vec::new();
        let mut collect = |v: Violation| {
            found.push(v);
            ControlFlow::<()>::Continue(())
        };
        let placements = &candidate.placements;
        let _ = self.scan_forbidden_zones(placements, &mut collect);
        let _ = self.scan_bounds_and_collisions(placements, &mut collect);
        let _ = self.scan_inventory(placements, &mut collect);
        found
    }

    pub fn check_forbidden_zones(&self, candidate: &LayoutCandidate) -> Result<(), Violation> {
        first_violation(|sink| self.scan_forbidden_zones(&candidate.placements, sink))
    }

    pub fn check_bounds_and_collisions(
        &self,
        candidate: &LayoutCandidate,
    ) -> Result<(), Violation> {
        first_violation(|sink| self.scan_bounds_and_collisions(&candidate.placements, sink))
    }

    pub fn check_inventory(&self, candidate: &LayoutCandidate) -> Result<(), Violation> {
        first_violation(|sink| self.scan_inventory(&candidate.placements, sink))
    }

    /// Footprint of a placement, or `None` when its kind is not catalogued.
    /// Uncatalogued ids are reported by the inventory check.
    fn footprint(&self, placement: &Placement) -> Option<Rect> {
        self.catalog
            .get(&placement.furniture_id)
            .map(|kind| kind.footprint_at(placement.x, placement.y))
    }

    fn footprints(&self, placements: &[Placement]) -> Vec<(usize, Rect)> {
        placements
            .iter()
            .enumerate()
            .filter_map(|(i, p)| self.footprint(p).map(|r| (i, r)))
            .collect()
    }

    fn scan_forbidden_zones(
        &self,
        placements: &[Placement],
        sink: &mut dyn FnMut(Violation) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        for (placement_index, footprint) in self.footprints(placements) {
            for zone in &self.room.forbidden_zones {
                if footprint.overlaps(&zone.rect()) {
                    sink(Violation::ForbiddenZone {
                        placement_index,
                        zone_id: zone.id.clone(),
                    })?;
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn scan_bounds_and_collisions(
        &self,
        placements: &[Placement],
        sink: &mut dyn FnMut(Violation) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let room = self.room.bounds();
        let footprints = self.footprints(placements);

        // Per placement: its bounds, then its pairs with every later placement.
        // O(n²), n is bounded by the room's required counts
        for (a, &(first, rect_a)) in footprints.iter().enumerate() {
            if !room.contains(&rect_a) {
                sink(Violation::OutOfBounds {
                    placement_index: first,
                })?;
            }
            for &(second, rect_b) in &footprints[a + 1..] {
                if rect_a.overlaps(&rect_b) {
                    sink(Violation::Collision { first, second })?;
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn scan_inventory(
        &self,
        placements: &[Placement],
        sink: &mut dyn FnMut(Violation) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let mut placed: IndexMap<&str, u32> = IndexMap::new();
        for placement in placements {
            *placed.entry(placement.furniture_id.as_str()).or_insert(0) += 1;
        }

        // A required kind missing from the catalog has no footprint, so its
        // placements never reached the geometric checks.
        for &furniture_id in placed.keys() {
            if !(self.room.required_counts.contains_key(furniture_id)
                && self.catalog.contains(furniture_id))
            {
                sink(Violation::UnknownItem {
                    furniture_id: furniture_id.to_string(),
                })?;
            }
        }

        for (furniture_id, &required) in &self.room.required_counts {
            let found = placed.get(furniture_id.as_str()).copied().unwrap_or(0);
            if found != required {
                sink(Violation::QuantityMismatch {
                    furniture_id: furniture_id.clone(),
                    required,
                    found,
                })?;
            }
        }
        ControlFlow::Continue(())
    }
}

fn first_violation(
    scan: impl FnOnce(&mut dyn FnMut(Violation) -> ControlFlow<()>) -> ControlFlow<()>,
) -> Result<(), Violation> {
    let mut first = None;
    let _ = scan(&mut |v: Violation| {
        first = Some(v);
        ControlFlow::Break(())
    });
    match first {
        Some(v) => Err(v),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ForbiddenZone, FurnitureKind};

    fn catalog() -> FurnitureCatalog {
        FurnitureCatalog::try_from(vec![
            FurnitureKind {
                id: "desk".to_string(),
                display_name: "Desk".to_string(),
                width: 2.0,
                depth: 4.0,
                movable: true,
            },
            FurnitureKind {
                id: "lamp".to_string(),
                display_name: "Lamp".to_string(),
                width: 1.0,
                depth: 1.0,
                movable: true,
            },
        ])
        .unwrap()
    }

    fn room(required_desks: u32) -> RoomSpec {
        RoomSpec {
            id: "test".to_string(),
            width: 10.0,
            depth: 10.0,
            required_counts: IndexMap::from([("desk".to_string(), required_desks)]),
            forbidden_zones: vec![
                ForbiddenZone {
                    id: "door".to_string(),
                    x_min: 0.0,
                    y_min: 0.0,
                    x_max: 3.0,
                    y_max: 3.0,
                },
                ForbiddenZone {
                    id: "radiator".to_string(),
                    x_min: 0.0,
                    y_min: 9.5,
                    x_max: 10.0,
                    y_max: 10.0,
                },
            ],
        }
    }

    fn layout(placements: Vec<Placement>) -> LayoutCandidate {
        LayoutCandidate::new("tester", placements)
    }

    #[test]
    fn accepts_valid_layout() {
        let (room, catalog) = (room(2), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        let candidate = layout(vec![Placement::new("desk", 3.0, 0.0), Placement::new("desk", 5.0, 0.0)]);
        assert_eq!(validator.validate(&candidate), Ok(()));
        assert!(validator.violations(&candidate).is_empty());
    }

    #[test]
    fn zone_reported_in_placement_then_zone_order() {
        let (room, catalog) = (room(2), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        // Only the second desk reaches into a zone
        let candidate = layout(vec![Placement::new("desk", 5.0, 3.0), Placement::new("desk", 2.0, 2.0)]);
        assert_eq!(
            validator.check_forbidden_zones(&candidate),
            Err(Violation::ForbiddenZone {
                placement_index: 1,
                zone_id: "door".to_string()
            })
        );
    }

    #[test]
    fn flush_against_zone_is_allowed() {
        let (room, catalog) = (room(1), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        let candidate = layout(vec![Placement::new("desk", 3.0, 0.0)]);
        assert_eq!(validator.check_forbidden_zones(&candidate), Ok(()));
    }

    #[test]
    fn bounds_and_collisions_interleave_per_placement() {
        let (room, catalog) = (room(3), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        // Desks 0 and 1 overlap; desk 2 hangs off the right wall
        let candidate = layout(vec![
            Placement::new("desk", 1.0, 4.0),
            Placement::new("desk", 2.0, 4.0),
            Placement::new("desk", 9.0, 4.0),
        ]);
        assert_eq!(
            validator.check_bounds_and_collisions(&candidate),
            Err(Violation::Collision { first: 0, second: 1 })
        );
        assert_eq!(
            validator.violations(&candidate),
            vec![
                Violation::Collision { first: 0, second: 1 },
                Violation::OutOfBounds { placement_index: 2 },
            ]
        );
    }

    #[test]
    fn earlier_placement_bounds_precede_its_collisions() {
        let (room, catalog) = (room(2), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        let candidate = layout(vec![Placement::new("desk", 9.0, 4.0), Placement::new("desk", 8.5, 4.0)]);
        assert_eq!(
            validator.check_bounds_and_collisions(&candidate),
            Err(Violation::OutOfBounds { placement_index: 0 })
        );
    }

    #[test]
    fn negative_origin_is_out_of_bounds() {
        let (room, catalog) = (room(1), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        let candidate = layout(vec![Placement::new("desk", 5.0, -0.1)]);
        assert_eq!(
            validator.check_bounds_and_collisions(&candidate),
            Err(Violation::OutOfBounds { placement_index: 0 })
        );
    }

    #[test]
    fn first_colliding_pair_by_ascending_indices() {
        let (room, catalog) = (room(4), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        let candidate = layout(vec![
            Placement::new("desk", 3.0, 3.0),
            Placement::new("desk", 6.0, 3.0),
            Placement::new("desk", 6.5, 4.0),
            Placement::new("desk", 3.5, 4.0),
        ]);
        assert_eq!(
            validator.check_bounds_and_collisions(&candidate),
            Err(Violation::Collision { first: 0, second: 3 })
        );
    }

    #[test]
    fn shared_edge_is_not_a_collision() {
        let (room, catalog) = (room(2), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        let candidate = layout(vec![Placement::new("desk", 3.0, 3.0), Placement::new("desk", 5.0, 3.0)]);
        assert_eq!(validator.check_bounds_and_collisions(&candidate), Ok(()));
    }

    #[test]
    fn unknown_item_reported_before_counts() {
        let (room, catalog) = (room(2), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        let candidate = layout(vec![Placement::new("desk", 3.0, 3.0), Placement::new("lamp", 8.0, 3.0)]);
        assert_eq!(
            validator.check_inventory(&candidate),
            Err(Violation::UnknownItem {
                furniture_id: "lamp".to_string()
            })
        );
    }

    #[test]
    fn uncatalogued_item_skips_geometry_and_fails_inventory() {
        let (room, catalog) = (room(1), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        let candidate = layout(vec![Placement::new("desk", 3.0, 3.0), Placement::new("sofa", 0.0, 0.0)]);
        assert_eq!(validator.check_forbidden_zones(&candidate), Ok(()));
        assert_eq!(
            validator.validate(&candidate),
            Err(Violation::UnknownItem {
                furniture_id: "sofa".to_string()
            })
        );
    }

    #[test]
    fn required_kind_missing_from_catalog_is_rejected() {
        let catalog = catalog();
        let mut room = room(1);
        room.required_counts.insert("sofa".to_string(), 1);
        let validator = LayoutValidator::new(&room, &catalog);
        let candidate = layout(vec![
            Placement::new("desk", 4.0, 4.0),
            Placement::new("sofa", -500.0, 9000.0),
        ]);
        assert_eq!(
            validator.validate(&candidate),
            Err(Violation::UnknownItem {
                furniture_id: "sofa".to_string()
            })
        );
    }

    #[test]
    fn over_supply_is_a_mismatch() {
        let (room, catalog) = (room(1), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        let candidate = layout(vec![Placement::new("desk", 3.0, 3.0), Placement::new("desk", 6.0, 3.0)]);
        assert_eq!(
            validator.check_inventory(&candidate),
            Err(Violation::QuantityMismatch {
                furniture_id: "desk".to_string(),
                required: 1,
                found: 2
            })
        );
    }

    #[test]
    fn missing_kind_counts_as_zero() {
        let (room, catalog) = (room(2), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        assert_eq!(
            validator.check_inventory(&layout(vec![])),
            Err(Violation::QuantityMismatch {
                furniture_id: "desk".to_string(),
                required: 2,
                found: 0
            })
        );
    }

    #[test]
    fn zones_take_precedence_over_bounds() {
        let (room, catalog) = (room(1), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        // Inside the door zone and hanging off the left wall
        let candidate = layout(vec![Placement::new("desk", -1.0, 0.5)]);
        assert!(matches!(
            validator.validate(&candidate),
            Err(Violation::ForbiddenZone { .. })
        ));
    }

    #[test]
    fn violations_lists_everything_in_check_order() {
        let (room, catalog) = (room(1), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        let candidate = layout(vec![
            Placement::new("desk", 1.0, 1.0),
            Placement::new("desk", 2.0, 2.0),
            Placement::new("lamp", 9.5, 5.0),
        ]);
        let all = validator.violations(&candidate);
        assert_eq!(
            all,
            vec![
                Violation::ForbiddenZone {
                    placement_index: 0,
                    zone_id: "door".to_string()
                },
                Violation::ForbiddenZone {
                    placement_index: 1,
                    zone_id: "door".to_string()
                },
                Violation::Collision { first: 0, second: 1 },
                Violation::OutOfBounds { placement_index: 2 },
                Violation::UnknownItem {
                    furniture_id: "lamp".to_string()
                },
                Violation::QuantityMismatch {
                    furniture_id: "desk".to_string(),
                    required: 1,
                    found: 2
                },
            ]
        );
        assert_eq!(validator.validate(&candidate), Err(all[0].clone()));
    }

    #[test]
    fn validate_is_repeatable() {
        let (room, catalog) = (room(2), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        let candidate = layout(vec![Placement::new("desk", 3.0, 3.0), Placement::new("desk", 4.0, 3.0)]);
        let first = validator.validate(&candidate);
        for _ in 0..3 {
            assert_eq!(validator.validate(&candidate), first);
        }
    }

    #[test]
    fn admit_wraps_valid_candidate() {
        let (room, catalog) = (room(1), catalog());
        let validator = LayoutValidator::new(&room, &catalog);
        let candidate = layout(vec![Placement::new("desk", 3.0, 3.0)]);
        let admitted = validator.admit(candidate.clone()).unwrap();
        assert_eq!(admitted.creator, "tester");
        assert_eq!(admitted.into_inner(), candidate);
    }
}
