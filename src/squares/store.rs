use crate::squares::engine::SquaresGame;
use log::{debug, warn};
use std::fmt;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "nfltui";
const FILE_NAME: &str = "squares.json";

#[derive(Debug)]
pub enum StoreError {
    Io(String),
    Serialize(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "squares file error: {e}"),
            StoreError::Serialize(e) => write!(f, "could not serialize squares game: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The single saved squares game, one JSON file. Last write wins.
#[derive(Debug, Clone)]
pub struct SquaresStore {
    path: PathBuf,
}

impl Default for SquaresStore {
    fn default() -> Self {
        Self::at(default_path())
    }
}

impl SquaresStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved game, if any. Unreadable or corrupt files count as no game.
    pub fn load(&self) -> Option<SquaresGame> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("ignoring unreadable {}: {e}", self.path.display());
                return None;
            }
        };
        match serde_json::from_str::<SquaresGame>(&content) {
            Ok(game) if !game.is_valid() => {
                warn!("ignoring inconsistent squares game in {}", self.path.display());
                None
            }
            Ok(game) => {
                debug!("restored squares game {} from {}", game.id, self.path.display());
                Some(game)
            }
            Err(e) => {
                warn!("ignoring corrupt {}: {e}", self.path.display());
                None
            }
        }
    }

    pub fn save(&self, game: &SquaresGame) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(format!("create dir failed: {e}")))?;
        }
        let payload =
            serde_json::to_string_pretty(game).map_err(|e| StoreError::Serialize(e.to_string()))?;
        std::fs::write(&self.path, payload).map_err(|e| StoreError::Io(format!("write failed: {e}")))?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(format!("remove failed: {e}"))),
        }
    }
}

fn default_path() -> PathBuf {
    if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join(APP_DIR).join(FILE_NAME);
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home).join(".config").join(APP_DIR).join(FILE_NAME);
    }
    PathBuf::from(FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::squares::engine::{GRID_SIZE, PeriodLabel};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scratch(name: &str) -> SquaresStore {
        let dir = std::env::temp_dir().join(format!("nfltui-store-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        SquaresStore::at(dir.join("nested").join(FILE_NAME))
    }

    fn game() -> SquaresGame {
        let mut rng = StdRng::seed_from_u64(99);
        let mut game = SquaresGame::with_rng("Chiefs", "Eagles", 5.0, &mut rng).unwrap();
        game.assign_cell(3, 4, "Pat").unwrap();
        let winner = game.find_winner(10, 7, PeriodLabel::Quarter(1));
        game.record_winner(winner);
        game.event_id = Some("401671889".to_string());
        game
    }

    #[test]
    fn missing_file_means_no_game() {
        let store = scratch("missing");
        assert!(store.load().is_none());
        assert!(store.clear().is_ok());
    }

    #[test]
    fn saved_game_is_restored_and_cleared() {
        let store = scratch("restore");
        let original = game();
        store.save(&original).unwrap();
        assert_eq!(store.load(), Some(original));

        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn corrupt_file_is_treated_as_absent() {
        let store = scratch("corrupt");
        let parent = store.path().parent().unwrap();
        std::fs::create_dir_all(parent).unwrap();
        std::fs::write(store.path(), "{\"team_a\": 42").unwrap();
        assert!(store.load().is_none());

        std::fs::write(store.path(), "{\"winners\": []}").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn inconsistent_game_is_treated_as_absent() {
        let store = scratch("inconsistent");
        let mut broken = game();
        broken.row_digits = [0; GRID_SIZE];
        broken.col_digits = [9; GRID_SIZE];
        store.save(&broken).unwrap();
        assert!(store.load().is_none());

        let mut doubled = game();
        let repeat = doubled.winners[0].clone();
        doubled.winners.push(repeat);
        store.save(&doubled).unwrap();
        assert!(store.load().is_none());

        let mut cheap = game();
        cheap.wager = 0.0;
        store.save(&cheap).unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn labels_are_stored_as_text() {
        let store = scratch("labels");
        store.save(&game()).unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"label\": \"Q1\""));
    }
}
