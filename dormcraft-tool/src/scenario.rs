use std::path::Path;

use dormcraft_core::{
    Board, FurnitureCatalog, LayoutCandidate, LayoutId, RoomSpec, User, Violation,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{read_file, ToolError};

/// A board snapshot on disk: the room, its catalog, members, the proposals
/// they submitted and their comments.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub board_id: String,
    pub room: RoomSpec,
    pub furniture: FurnitureCatalog,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub layouts: Vec<LayoutCandidate>,
    #[serde(default)]
    pub comments: Vec<ScenarioComment>,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioComment {
    pub author: String,
    pub text: String,
}

/// Outcome of replaying one proposal onto the board.
#[derive(Debug, PartialEq)]
pub enum Submission {
    Accepted { creator: String, layout_id: LayoutId },
    Rejected { creator: String, violation: Violation },
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ToolError> {
        let scenario = Self::parse(&read_file(path)?)?;
        debug!(path = %path.display(), board = %scenario.board_id, "scenario loaded");
        Ok(scenario)
    }

    pub fn parse(text: &str) -> Result<Self, ToolError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds the board, submitting every proposal through the validator in
    /// file order. Comment authors who are not listed as users join first.
    pub fn into_board(self) -> Result<(Board, Vec<Submission>), ToolError> {
        let mut board = Board::new(self.board_id, self.room, self.furniture)?;
        for user in self.users {
            board.join(user);
        }

        let submissions: Vec<Submission> = self
            .layouts
            .into_iter()
            .map(|candidate| {
                let creator = candidate.creator.clone();
                match board.add_layout(candidate) {
                    Ok(layout_id) => Submission::Accepted { creator, layout_id },
                    Err(violation) => Submission::Rejected { creator, violation },
                }
            })
            .collect();

        for comment in self.comments {
            let author = User::new(comment.author);
            board.join(author.clone());
            board.comment(&author, comment.text);
        }

        info!(
            board = %board.board_id(),
            layouts = board.len(),
            rejected = submissions.len() - board.len(),
            "board ready"
        );
        Ok((board, submissions))
    }
}

pub fn load_candidate(path: &Path) -> Result<LayoutCandidate, ToolError> {
    Ok(serde_json::from_str(&read_file(path)?)?)
}
