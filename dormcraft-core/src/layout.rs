use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::FurnitureId;

/// One piece of furniture positioned in the room.
///
/// `x`/`y` are the lower-left corner in room coordinates.
/// `rotation_degrees` is carried through untouched: footprints are always
/// computed unrotated, so the value is cosmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Placement {
    pub furniture_id: FurnitureId,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "rotation")]
    pub rotation_degrees: f64,
}

impl Placement {
    pub fn new(furniture_id: impl Into<FurnitureId>, x: f64, y: f64) -> Self {
        Self {
            furniture_id: furniture_id.into(),
            x,
            y,
            rotation_degrees: 0.0,
        }
    }
}

/// Board-assigned identifier of an accepted layout, rendered as `L<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct LayoutId(u64);

impl LayoutId {
    pub fn new(sequence: u64) -> Self {
        LayoutId(sequence)
    }

    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl From<LayoutId> for String {
    fn from(id: LayoutId) -> Self {
        id.to_string()
    }
}

/// A proposed arrangement that has not been admitted to a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutCandidate {
    pub creator: String,
    pub placements: Vec<Placement>,
}

impl LayoutCandidate {
    pub fn new(creator: impl Into<String>, placements: Vec<Placement>) -> Self {
        Self {
            creator: creator.into(),
            placements,
        }
    }

    pub fn fingerprint(&self) -> LayoutFingerprint {
        LayoutFingerprint::of(&self.placements)
    }
}

/// An accepted layout. Never mutated after registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub layout_id: LayoutId,
    pub creator: String,
    pub placements: Vec<Placement>,
}

impl Layout {
    pub fn fingerprint(&self) -> LayoutFingerprint {
        LayoutFingerprint::of(&self.placements)
    }
}

/// Blake3 hash of a layout's geometry, independent of placement order and
/// creator. Two layouts with equal fingerprints claim the same spots.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutFingerprint([u8; 32]);

impl LayoutFingerprint {
    pub fn of(placements: &[Placement]) -> Self {
        let mut entries: Vec<Vec<u8>> = placements
            .iter()
            .map(|p| {
                let mut bytes = Vec::with_capacity(p.furniture_id.len() + 33);
                bytes.extend_from_slice(p.furniture_id.as_bytes());
                bytes.push(0);
                for v in [p.x, p.y, p.rotation_degrees] {
                    // -0.0 and 0.0 are the same position
                    bytes.extend_from_slice(&(v + 0.0).to_bits().to_le_bytes());
                }
                bytes
            })
            .collect();
        entries.sort();

        let mut hasher = blake3::Hasher::new();
        for entry in &entries {
            hasher.update(&(entry.len() as u64).to_le_bytes());
            hasher.update(entry);
        }
        LayoutFingerprint(*hasher.finalize().as_bytes())
    }
}

impl fmt::Display for LayoutFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for LayoutFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayoutFingerprint({})", self)
    }
}

/// A board member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A free-text remark left on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub timestamp_ms: u64,
}
