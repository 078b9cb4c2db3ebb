//! Game state management for the Othello GUI

use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::board::Move;
use crate::config::{GameMode, Settings};
use crate::game::{ChangeEvent, Game, GameSession, PlayerSlot};
use crate::persist::{self, SavedMatch};
use crate::{AIEngine, MoveResult};

/// What a background search was started for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPurpose {
    /// The machine's reply, played as soon as it arrives
    Reply,
    /// A suggestion for the human side to move
    Hint,
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
        purpose: SearchPurpose,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub session: GameSession,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub hint: Option<Move>,
    pub message: Option<String>,
    pub save_path: String,
    /// Games before each played move, newest last
    undo_stack: Vec<Game>,
    /// Raised by the session subscriber on every change
    changed: Rc<Cell<bool>>,
}

impl GameState {
    pub fn new(settings: Settings) -> Self {
        let mut session = GameSession::new(settings);
        let changed = Rc::new(Cell::new(true));
        let flag = Rc::clone(&changed);
        session.subscribe(Box::new(move |_: &ChangeEvent| flag.set(true)));

        Self {
            session,
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            hint: None,
            message: None,
            save_path: "othello-save.json".to_string(),
            undo_stack: Vec::new(),
            changed,
        }
    }

    pub fn game(&self) -> &Game {
        self.session.game()
    }

    pub fn settings(&self) -> &Settings {
        self.session.settings()
    }

    /// Whether anything changed since the last call
    pub fn take_changed(&self) -> bool {
        self.changed.replace(false)
    }

    /// New match with the current settings
    pub fn reset(&mut self) {
        self.session.reset();
        self.undo_stack.clear();
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        self.hint = None;
        self.message = None;
    }

    /// New match in another mode
    pub fn new_game(&mut self, mode: GameMode) {
        self.session.set_mode(mode);
        self.reset();
    }

    pub fn is_over(&self) -> bool {
        self.game().is_over()
    }

    /// In PvM the machine holds the second seat
    pub fn is_ai_turn(&self) -> bool {
        self.settings().mode == GameMode::PlayerVsMachine
            && self.game().current_slot() == PlayerSlot::Second
    }

    pub fn is_human_turn(&self) -> bool {
        !self.is_ai_turn()
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Legal moves of the side to move
    pub fn legal_moves(&self) -> Vec<Move> {
        self.game().valid_moves(self.game().current_slot())
    }

    /// Attempt a human move
    pub fn try_play(&mut self, mv: Move) -> Result<(), String> {
        if self.is_over() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        if !self.game().is_valid_move(mv, self.game().current_slot()) {
            return Err(format!("{} is not a legal move", mv));
        }

        self.execute_move(mv);
        Ok(())
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, mv: Move) {
        let before = self.game().snapshot();
        if self.session.play(mv) {
            self.undo_stack.push(before);
            self.hint = None;
            self.message = None;
            self.move_timer.start();
        }
    }

    /// Pass for a side to move that has no legal move
    pub fn pass_if_stuck(&mut self) -> bool {
        if self.is_over() || self.is_ai_thinking() {
            return false;
        }
        let name = self.game().current_player().name().to_string();
        if self.session.pass_turn() {
            info!("{} has no legal move and passes", name);
            self.message = Some(format!("{} has no legal move and passes", name));
            self.move_timer.start();
            return true;
        }
        false
    }

    /// Start AI thinking
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.is_over() {
            return;
        }
        self.spawn_search(SearchPurpose::Reply);
    }

    /// Search the current position on a worker thread
    fn spawn_search(&mut self, purpose: SearchPurpose) {
        let game = self.game().snapshot();
        let settings = self.settings().clone();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let mut engine = AIEngine::new(settings);
            let result = engine.choose_move(&game);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
            purpose,
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
                purpose,
            } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed(), *purpose)),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    warn!("AI worker exited without a result");
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        let Some((move_result, elapsed, purpose)) = result else {
            return;
        };
        self.ai_state = AiState::Idle;
        let best_move = move_result.best_move;
        self.last_ai_result = Some(move_result);

        match purpose {
            SearchPurpose::Hint => self.hint = best_move,
            SearchPurpose::Reply => {
                self.move_timer.set_ai_time(elapsed);
                match best_move {
                    Some(mv) => self.execute_move(mv),
                    None => {
                        self.pass_if_stuck();
                    }
                }
            }
        }
    }

    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Search for the side to move in the background; the choice is marked
    /// on the board once `check_ai_result` picks it up.
    pub fn request_hint(&mut self) {
        if self.is_over() || self.is_ai_thinking() || self.is_ai_turn() {
            return;
        }
        self.hint = None;
        self.spawn_search(SearchPurpose::Hint);
    }

    /// Undo the last move; in PvM also undo the machine's reply
    pub fn undo(&mut self) {
        if self.is_ai_thinking() {
            return;
        }
        let Some(mut game) = self.undo_stack.pop() else {
            return;
        };
        if self.settings().mode == GameMode::PlayerVsMachine
            && game.current_slot() == PlayerSlot::Second
        {
            if let Some(earlier) = self.undo_stack.pop() {
                game = earlier;
            }
        }
        self.session.replace_game(game);
        self.hint = None;
        self.message = None;
        self.move_timer.start();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn save(&mut self) {
        let saved = SavedMatch {
            game: self.game().clone(),
            settings: self.settings().clone(),
        };
        self.message = Some(match persist::save(&self.save_path, &saved) {
            Ok(()) => format!("Saved to {}", self.save_path),
            Err(err) => err.to_string(),
        });
    }

    pub fn load(&mut self) {
        if self.is_ai_thinking() {
            return;
        }
        match persist::load(&self.save_path) {
            Ok(saved) => {
                self.session.restore(saved.game, saved.settings);
                self.undo_stack.clear();
                self.last_ai_result = None;
                self.hint = None;
                self.move_timer = MoveTimer::default();
                self.message = Some(format!("Loaded {}", self.save_path));
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;

    fn wait_for_search(state: &mut GameState) {
        let deadline = Instant::now() + Duration::from_secs(30);
        while state.is_ai_thinking() {
            assert!(Instant::now() < deadline, "search did not finish");
            thread::sleep(Duration::from_millis(5));
            state.check_ai_result();
        }
    }

    fn pvp() -> GameState {
        GameState::new(Settings {
            mode: GameMode::PlayerVsPlayer,
            ..Settings::default()
        })
    }

    #[test]
    fn test_human_move_and_undo() {
        let mut state = pvp();
        assert!(state.take_changed());
        assert!(state.try_play(Move::new(2, 3).unwrap()).is_ok());
        assert!(state.take_changed());
        assert!(!state.take_changed());
        assert_eq!(state.game().current_slot(), PlayerSlot::Second);

        state.undo();
        assert_eq!(state.game(), &Game::new());
        assert!(!state.can_undo());
    }

    #[test]
    fn test_rejects_illegal_move() {
        let mut state = pvp();
        assert!(state.try_play(Move::new(0, 0).unwrap()).is_err());
        assert!(!state.can_undo());
    }

    #[test]
    fn test_pvm_turns() {
        let mut state = GameState::new(Settings::default());
        assert!(state.is_human_turn());
        state.try_play(Move::new(2, 3).unwrap()).unwrap();
        assert!(state.is_ai_turn());
        assert_eq!(state.try_play(Move::new(2, 2).unwrap()), Err("Not your turn".to_string()));
    }

    #[test]
    fn test_pvm_undo_skips_machine_reply() {
        let mut state = GameState::new(Settings::default());
        state.try_play(Move::new(2, 3).unwrap()).unwrap();
        state.execute_move(Move::new(2, 2).unwrap());
        assert!(state.is_human_turn());
        state.undo();
        assert_eq!(state.game(), &Game::new());
    }

    #[test]
    fn test_hint_is_legal() {
        let mut state = GameState::new(Settings {
            mode: GameMode::PlayerVsPlayer,
            difficulty: Difficulty::Medium,
            ..Settings::default()
        });
        state.request_hint();
        assert!(state.is_ai_thinking());
        assert!(state.hint.is_none());
        wait_for_search(&mut state);

        let hint = state.hint.unwrap();
        assert!(state.legal_moves().contains(&hint));
        assert_eq!(state.game(), &Game::new());
        assert!(!state.can_undo());
    }

    #[test]
    fn test_machine_reply_runs_in_background() {
        let mut state = GameState::new(Settings {
            difficulty: Difficulty::Easy,
            ..Settings::default()
        });
        state.try_play(Move::new(2, 3).unwrap()).unwrap();
        state.start_ai_thinking();
        assert!(state.is_ai_thinking());
        wait_for_search(&mut state);

        assert!(state.is_human_turn());
        assert!(state.hint.is_none());
        assert_eq!(state.game().second_player().moves().len(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = pvp();
        state.save_path = dir.path().join("s.json").display().to_string();
        state.try_play(Move::new(2, 3).unwrap()).unwrap();
        state.save();
        let saved = state.game().clone();

        state.reset();
        state.load();
        assert_eq!(state.game(), &saved);
        assert_eq!(state.settings().mode, GameMode::PlayerVsPlayer);
    }
}
