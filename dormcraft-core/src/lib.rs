//! DormCraft layout engine.
//!
//! Users propose furniture layouts for a fixed room; a generative model may
//! be asked to synthesize a compromise. Nothing, from either origin, joins a
//! board unless it passes the validation engine.
//!
//! Core concepts:
//! - **RoomSpec / FurnitureCatalog**: room dimensions, forbidden zones and the
//!   exact furniture multiset a layout must place
//! - **LayoutValidator**: forbidden-zone, bounds/collision and inventory
//!   checks, composed into one all-or-nothing gate
//! - **Board**: accepted layouts, comments and members; only accepts
//!   [`ValidatedLayout`]s
//! - **SuggestionPipeline**: asks a [`SuggestionSource`] for a layout, decodes
//!   it and runs it through the same validator
//!
//! # Example
//!
//! ```
//! use dormcraft_core::{
//!     Board, FurnitureCatalog, FurnitureKind, LayoutCandidate, Placement, RoomSpec, Violation,
//! };
//! use indexmap::IndexMap;
//!
//! let catalog = FurnitureCatalog::try_from(vec![FurnitureKind {
//!     id: "desk".to_string(),
//!     display_name: "Desk".to_string(),
//!     width: 2.0,
//!     depth: 4.0,
//!     movable: true,
//! }])
//! .unwrap();
//! let room = RoomSpec {
//!     id: "single".to_string(),
//!     width: 8.0,
//!     depth: 10.0,
//!     required_counts: IndexMap::from([("desk".to_string(), 1)]),
//!     forbidden_zones: vec![],
//! };
//! let mut board = Board::new("B1", room, catalog).unwrap();
//!
//! let id = board
//!     .add_layout(LayoutCandidate::new("Selena", vec![Placement::new("desk", 0.0, 0.0)]))
//!     .unwrap();
//! assert_eq!(id.to_string(), "L1");
//!
//! let err = board
//!     .add_layout(LayoutCandidate::new("Alex", vec![Placement::new("desk", 7.0, 0.0)]))
//!     .unwrap_err();
//! assert_eq!(err, Violation::OutOfBounds { placement_index: 0 });
//! ```
//!
//! # Rotation
//!
//! Placements carry a rotation in degrees, but footprints are always the
//! unrotated `width × depth` box. Rotation is cosmetic until rotated
//! bounding boxes are supported.

mod board;
mod catalog;
mod context;
mod decode;
mod geometry;
mod layout;
mod suggest;
mod validate;

pub use board::{layouts_by_creator, Board, LayoutRegistry};
pub use catalog::{CatalogError, ForbiddenZone, FurnitureCatalog, FurnitureId, FurnitureKind, RoomSpec};
pub use context::{CatalogLine, SuggestionContext};
pub use decode::{decode_suggestion, extract_json_object, DecodeError, SuggestionResult};
pub use geometry::Rect;
pub use layout::{Comment, Layout, LayoutCandidate, LayoutFingerprint, LayoutId, Placement, User};
pub use suggest::{
    AcceptedSuggestion, PipelineState, SuggestionError, SuggestionPipeline, SuggestionSource,
    AI_CREATOR,
};
pub use validate::{LayoutValidator, ValidatedLayout, Violation};
