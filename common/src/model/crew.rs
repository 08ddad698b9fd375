use serde::{Deserialize, Serialize};

/// A crew member as derived from the uploaded crew list.
///
/// The display `name` is the source of truth; `username` and `password` are
/// derived from it when the crew list is replaced and are stored alongside it
/// in `data/users.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    /// Display name exactly as it appears in the crew list.
    pub name: String,
    /// Lowercased name with all whitespace removed.
    pub username: String,
    /// Username followed by the fixed brigade suffix.
    pub password: String,
}
