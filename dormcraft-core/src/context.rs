//! The context payload handed to a suggestion source.

use serde_json::json;

use crate::board::{duplicate_claims, LayoutRegistry};
use crate::catalog::{ForbiddenZone, RoomSpec};
use crate::layout::{Comment, Layout, LayoutId};

/// One catalog line: a kind and how many of it the room needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogLine {
    pub id: String,
    pub display_name: String,
    pub width: f64,
    pub depth: f64,
    pub required: u32,
}

/// Snapshot of everything a source needs to propose a compromise layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionContext {
    pub room_id: String,
    pub width: f64,
    pub depth: f64,
    pub forbidden_zones: Vec<ForbiddenZone>,
    /// Total pieces a valid layout places.
    pub pieces: u32,
    pub catalog: Vec<CatalogLine>,
    pub comments: Vec<Comment>,
    pub layouts: Vec<Layout>,
    pub duplicate_claims: Vec<Vec<LayoutId>>,
}

impl SuggestionContext {
    pub fn from_registry(registry: &impl LayoutRegistry) -> Self {
        let room: &RoomSpec = registry.room();
        let catalog = registry
            .catalog()
            .iter()
            .map(|kind| CatalogLine {
                id: kind.id.clone(),
                display_name: kind.display_name.clone(),
                width: kind.width,
                depth: kind.depth,
                required: room.required_counts.get(&kind.id).copied().unwrap_or(0),
            })
            .collect();
        let layouts = registry.current_layouts();

        SuggestionContext {
            room_id: room.id.clone(),
            width: room.width,
            depth: room.depth,
            forbidden_zones: room.forbidden_zones.clone(),
            pieces: room.total_required(),
            catalog,
            comments: registry.current_comments().to_vec(),
            duplicate_claims: duplicate_claims(layouts.iter().copied()),
            layouts: layouts.into_iter().cloned().collect(),
        }
    }

    /// Renders the payload as prompt text.
    pub fn render(&self) -> String {
        let mut out = String::from(
            "You are a layout optimizer for shared dorm rooms. Analyze the proposals and \
             comments below and produce a single new compromise layout that is physically \
             sound and resolves the conflicts.\n\n",
        );

        out.push_str("ROOM:\n");
        out.push_str(&format!(
            "- Room {}: {}x{} ft, origin at the lower-left corner; x runs along the width, y along the depth.\n",
            self.room_id, self.width, self.depth
        ));
        out.push_str(&format!(
            "- Forbidden zones (no furniture may overlap them): {}\n",
            json!(self.forbidden_zones)
        ));

        out.push_str(&format!(
            "\nFURNITURE ({} pieces in total; use exactly these quantities, no other ids):\n",
            self.pieces
        ));
        for line in self.catalog.iter().filter(|l| l.required > 0) {
            out.push_str(&format!(
                "- {} x {} ({}): {}x{} ft\n",
                line.required, line.display_name, line.id, line.width, line.depth
            ));
        }

        out.push_str("\nCOMMENTS:\n");
        if self.comments.is_empty() {
            out.push_str("(none)\n");
        }
        for comment in &self.comments {
            out.push_str(&format!("{}: {}\n", comment.author, comment.text));
        }

        out.push_str("\nPROPOSED LAYOUTS:\n");
        out.push_str(&format!("{}\n", json!(self.layouts)));
        for group in &self.duplicate_claims {
            let ids: Vec<String> = group.iter().map(ToString::to_string).collect();
            out.push_str(&format!(
                "Layouts {} place furniture identically; their creators are claiming the same spots.\n",
                ids.join(", ")
            ));
        }

        out.push_str(
            "\nREQUIREMENTS:\n\
             1. Place every required piece exactly once per required unit.\n\
             2. No piece may overlap another, leave the room, or touch a forbidden zone's interior.\n\
             3. Balance the priorities stated in the comments; respect any stated veto.\n\n\
             Respond with a single JSON object and nothing else:\n\
             {\"placements\": [{\"furnitureId\": \"<id>\", \"x\": 0.5, \"y\": 8.0, \"rotation\": 0}], \
             \"rationale\": \"<how this layout resolves the conflict>\"}\n",
        );
        out
    }
}
