use std::time::{SystemTime, UNIX_EPOCH};

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, warn};

use crate::catalog::{CatalogError, FurnitureCatalog, RoomSpec};
use crate::layout::{Comment, Layout, LayoutCandidate, LayoutFingerprint, LayoutId, User};
use crate::validate::{LayoutValidator, ValidatedLayout, Violation};

/// Shared board state as seen by the suggestion pipeline.
///
/// Registration only accepts a [`ValidatedLayout`], so implementations never
/// need to re-check invariants.
pub trait LayoutRegistry {
    fn room(&self) -> &RoomSpec;

    fn catalog(&self) -> &FurnitureCatalog;

    /// Accepted layouts in registration order.
    fn current_layouts(&self) -> Vec<&Layout>;

    fn current_comments(&self) -> &[Comment];

    /// Assigns the next id and stores the layout.
    fn register(&mut self, layout: ValidatedLayout) -> LayoutId;

    fn validator(&self) -> LayoutValidator<'_> {
        LayoutValidator::new(self.room(), self.catalog())
    }
}

/// An in-memory collaboration board for one room.
#[derive(Debug, Clone)]
pub struct Board {
    board_id: String,
    room: RoomSpec,
    catalog: FurnitureCatalog,
    members: IndexSet<User>,
    layouts: IndexMap<LayoutId, Layout>,
    comments: Vec<Comment>,
    last_layout: u64,
}

impl Board {
    /// Opens an empty board. Fails when the room is degenerate or requires a
    /// kind the catalog does not describe.
    pub fn new(
        board_id: impl Into<String>,
        room: RoomSpec,
        catalog: FurnitureCatalog,
    ) -> Result<Self, CatalogError> {
        room.check(&catalog)?;
        Ok(Board {
            board_id: board_id.into(),
            room,
            catalog,
            members: IndexSet::new(),
            layouts: IndexMap::new(),
            comments: Vec::new(),
            last_layout: 0,
        })
    }

    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    /// Adds a member. Returns false if they were already on the board.
    pub fn join(&mut self, user: User) -> bool {
        self.members.insert(user)
    }

    pub fn members(&self) -> impl Iterator<Item = &User> {
        self.members.iter()
    }

    pub fn comment(&mut self, user: &User, text: impl Into<String>) {
        let comment = Comment {
            author: user.name.clone(),
            text: text.into(),
            timestamp_ms: now_ms(),
        };
        debug!(author = %comment.author, "comment added");
        self.comments.push(comment);
    }

    /// Link other users can open to reach this board.
    pub fn share_link(&self, base_url: &str) -> String {
        format!("{}/board/{}", base_url.trim_end_matches('/'), self.board_id)
    }

    /// Validates a human-submitted candidate and registers it on success.
    /// The board is left untouched when validation fails.
    pub fn add_layout(&mut self, candidate: LayoutCandidate) -> Result<LayoutId, Violation> {
        let creator = candidate.creator.clone();
        match self.validator().admit(candidate) {
            Ok(validated) => Ok(self.register(validated)),
            Err(violation) => {
                warn!(%creator, %violation, "layout rejected");
                Err(violation)
            }
        }
    }

    pub fn layout(&self, id: LayoutId) -> Option<&Layout> {
        self.layouts.get(&id)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Groups of layouts that place furniture identically, in registration
    /// order. Each group has at least two members.
    pub fn duplicate_claims(&self) -> Vec<Vec<LayoutId>> {
        duplicate_claims(self.layouts.values())
    }
}

impl LayoutRegistry for Board {
    fn room(&self) -> &RoomSpec {
        &self.room
    }

    fn catalog(&self) -> &FurnitureCatalog {
        &self.catalog
    }

    fn current_layouts(&self) -> Vec<&Layout> {
        self.layouts.values().collect()
    }

    fn current_comments(&self) -> &[Comment] {
        &self.comments
    }

    fn register(&mut self, layout: ValidatedLayout) -> LayoutId {
        self.last_layout += 1;
        let layout_id = LayoutId::new(self.last_layout);
        let LayoutCandidate {
            creator,
            placements,
        } = layout.into_inner();
        info!(%layout_id, %creator, "layout added");
        self.layouts.insert(
            layout_id,
            Layout {
                layout_id,
                creator,
                placements,
            },
        );
        layout_id
    }
}

pub(crate) fn duplicate_claims<'a>(layouts: impl IntoIterator<Item = &'a Layout>) -> Vec<Vec<LayoutId>> {
    let mut groups: IndexMap<LayoutFingerprint, Vec<LayoutId>> = IndexMap::new();
    for layout in layouts {
        groups
            .entry(layout.fingerprint())
            .or_default()
            .push(layout.layout_id);
    }
    groups.into_values().filter(|ids| ids.len() > 1).collect()
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Layout counts per creator, in order of each creator's first layout.
pub fn layouts_by_creator<'a>(
    layouts: impl IntoIterator<Item = &'a Layout>,
) -> IndexMap<&'a str, usize> {
    let mut counts = IndexMap::new();
    for layout in layouts {
        *counts.entry(layout.creator.as_str()).or_insert(0) += 1;
    }
    counts
}
