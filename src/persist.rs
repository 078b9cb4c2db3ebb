//! Saving and loading a match as JSON

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Settings;
use crate::game::Game;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed saved match in {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything needed to resume a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMatch {
    pub game: Game,
    #[serde(default)]
    pub settings: Settings,
}

pub fn save(path: impl AsRef<Path>, saved: &SavedMatch) -> Result<(), PersistError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(saved).map_err(|source| PersistError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("saved match to {}", path.display());
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> Result<SavedMatch, PersistError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let saved = serde_json::from_str(&text).map_err(|source| PersistError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    info!("loaded match from {}", path.display());
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Move, Piece};
    use crate::config::{Difficulty, SearchAlgorithm};
    use crate::game::PlayerSlot;

    #[test]
    fn test_roundtrip_restores_turn_counts_and_logs() {
        let mut game = Game::with_first_piece(Piece::White);
        assert!(game.apply_move(Move::new(2, 4).unwrap(), PlayerSlot::First));
        game.change_turn();
        assert!(game.apply_move(Move::new(2, 3).unwrap(), PlayerSlot::Second));

        let settings = Settings {
            algorithm: SearchAlgorithm::Negamax,
            difficulty: Difficulty::Extreme,
            ..Settings::default()
        };
        let saved = SavedMatch { game, settings };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.json");
        save(&path, &saved).unwrap();
        let restored = load(&path).unwrap();

        assert_eq!(restored, saved);
        assert_eq!(restored.game.current_slot(), PlayerSlot::Second);
        assert_eq!(restored.game.second_player().moves(), &[Move::new(2, 3).unwrap()]);
        assert_eq!(
            restored.game.first_player().count(),
            saved.game.first_player().count()
        );
        assert_eq!(restored.game.board().history(), saved.game.board().history());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"game\": 42}").unwrap();
        assert!(matches!(load(&path), Err(PersistError::Format { .. })));
    }

    #[test]
    fn test_overflowing_board_shape_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.json");
        save(&path, &SavedMatch {
            game: Game::new(),
            settings: Settings::default(),
        })
        .unwrap();

        // rows * columns wraps to 64 when multiplied unchecked
        let text = fs::read_to_string(&path).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
        value["game"]["board"]["rows"] = serde_json::json!(9_223_372_036_854_775_840u64);
        value["game"]["board"]["columns"] = serde_json::json!(2);
        fs::write(&path, value.to_string()).unwrap();

        assert!(matches!(load(&path), Err(PersistError::Format { .. })));
    }
}
