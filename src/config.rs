//! Match settings: mode, search algorithm, difficulty and heuristic toggles
//!
//! Settings load from a TOML file. Missing keys take their defaults.
//!
//! ```toml
//! mode = "PlayerVsMachine"
//! algorithm = "AlphaBeta"
//! difficulty = "Hard"
//! capture_rule = "FirstDirection"
//! first_piece = "Black"
//!
//! [heuristics]
//! material = true
//! mobility = true
//! positional = false
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Piece;
use crate::rules::CaptureRule;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Who controls the second player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    PlayerVsPlayer,
    #[default]
    PlayerVsMachine,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::PlayerVsPlayer => "Player vs Player",
            GameMode::PlayerVsMachine => "Player vs Machine",
        }
    }
}

/// Tree search run on the machine's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchAlgorithm {
    #[default]
    Minimax,
    AlphaBeta,
    Negamax,
}

impl SearchAlgorithm {
    pub const ALL: [SearchAlgorithm; 3] = [
        SearchAlgorithm::Minimax,
        SearchAlgorithm::AlphaBeta,
        SearchAlgorithm::Negamax,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SearchAlgorithm::Minimax => "Minimax",
            SearchAlgorithm::AlphaBeta => "Alpha-Beta",
            SearchAlgorithm::Negamax => "Negamax",
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Search depth presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    /// Tree depth in plies
    pub fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Extreme => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }

    /// Case-insensitive lookup by display name
    pub fn find_by_name(name: &str) -> Option<Difficulty> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which evaluation terms are summed. All off means material alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    pub material: bool,
    pub mobility: bool,
    pub positional: bool,
}

impl HeuristicConfig {
    pub const MATERIAL: HeuristicConfig = HeuristicConfig {
        material: true,
        mobility: false,
        positional: false,
    };

    pub const ALL: HeuristicConfig = HeuristicConfig {
        material: true,
        mobility: true,
        positional: true,
    };

    pub fn is_empty(&self) -> bool {
        !(self.material || self.mobility || self.positional)
    }
}

impl fmt::Display for HeuristicConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms = Vec::new();
        if self.material {
            terms.push("material");
        }
        if self.mobility {
            terms.push("mobility");
        }
        if self.positional {
            terms.push("positional");
        }
        if terms.is_empty() {
            f.write_str("material (default)")
        } else {
            f.write_str(&terms.join(" + "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: GameMode,
    pub algorithm: SearchAlgorithm,
    pub difficulty: Difficulty,
    pub heuristics: HeuristicConfig,
    pub capture_rule: CaptureRule,
    pub first_piece: Piece,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            algorithm: SearchAlgorithm::default(),
            difficulty: Difficulty::default(),
            heuristics: HeuristicConfig::default(),
            capture_rule: CaptureRule::default(),
            first_piece: Piece::Black,
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Settings, toml::de::Error> {
        toml::from_str(text)
    }

    /// Search depth for the configured difficulty
    pub fn depth(&self) -> u32 {
        self.difficulty.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_difficulty_depths() {
        let depths: Vec<u32> = Difficulty::ALL.iter().map(|d| d.depth()).collect();
        assert_eq!(depths, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_difficulty_find_by_name() {
        assert_eq!(Difficulty::find_by_name("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::find_by_name(" Extreme "), Some(Difficulty::Extreme));
        assert_eq!(Difficulty::find_by_name("impossible"), None);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.mode, GameMode::PlayerVsMachine);
        assert_eq!(settings.algorithm, SearchAlgorithm::Minimax);
        assert_eq!(settings.depth(), 1);
        assert!(settings.heuristics.is_empty());
        assert_eq!(settings.capture_rule, CaptureRule::FirstDirection);
        assert_eq!(settings.first_piece, Piece::Black);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings = Settings::from_toml(
            r#"
            algorithm = "AlphaBeta"
            difficulty = "Hard"

            [heuristics]
            mobility = true
            "#,
        )
        .unwrap();
        assert_eq!(settings.algorithm, SearchAlgorithm::AlphaBeta);
        assert_eq!(settings.depth(), 3);
        assert!(settings.heuristics.mobility);
        assert!(!settings.heuristics.material);
        assert_eq!(settings.mode, GameMode::PlayerVsMachine);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "mode = \"PlayerVsPlayer\"\ncapture_rule = \"AllDirections\"\nfirst_piece = \"White\""
        )
        .unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.mode, GameMode::PlayerVsPlayer);
        assert_eq!(settings.capture_rule, CaptureRule::AllDirections);
        assert_eq!(settings.first_piece, Piece::White);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Settings::load(&missing), Err(ConfigError::Read { .. })));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "difficulty = \"Impossible\"").unwrap();
        assert!(matches!(Settings::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_heuristic_display() {
        assert_eq!(HeuristicConfig::default().to_string(), "material (default)");
        assert_eq!(HeuristicConfig::ALL.to_string(), "material + mobility + positional");
    }
}
