//! Observable wrapper around a [`Game`] and its [`Settings`]
//!
//! Every mutating call notifies subscribers synchronously, in subscription
//! order, after the change has been applied.

use log::debug;

use super::{Game, PlayerSlot};
use crate::board::{Board, Move, Piece};
use crate::config::{Difficulty, GameMode, HeuristicConfig, SearchAlgorithm, Settings};

/// What changed in a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    BoardSet,
    PiecePlaced { mv: Move, piece: Piece },
    MovePlayed { slot: PlayerSlot, mv: Move },
    PlayerChanged { current: PlayerSlot },
    DifficultyChanged(Difficulty),
    AlgorithmChanged(SearchAlgorithm),
    HeuristicsChanged(HeuristicConfig),
    ModeChanged(GameMode),
    GameReplaced,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Listener = Box<dyn FnMut(&ChangeEvent)>;

pub struct GameSession {
    game: Game,
    settings: Settings,
    listeners: Vec<(SubscriberId, Listener)>,
    next_id: u64,
}

impl GameSession {
    /// Fresh game built from the settings' first piece and capture rule
    pub fn new(settings: Settings) -> Self {
        let game = Game::with_first_piece(settings.first_piece).with_capture_rule(settings.capture_rule);
        Self::with_game(game, settings)
    }

    pub fn with_game(game: Game, settings: Settings) -> Self {
        Self {
            game,
            settings,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn subscribe(&mut self, listener: Box<dyn FnMut(&ChangeEvent)>) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: ChangeEvent) {
        debug!("session change: {:?}", event);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    pub fn set_board(&mut self, board: Board) {
        self.game.set_board(board);
        self.notify(ChangeEvent::BoardSet);
    }

    /// Raw placement; off-board moves are rejected without notifying.
    pub fn place_piece(&mut self, mv: Move, piece: Piece) -> bool {
        if !self.game.place_piece(mv, piece) {
            return false;
        }
        self.notify(ChangeEvent::PiecePlaced { mv, piece });
        true
    }

    /// Apply `mv` for the current player without passing the turn.
    pub fn apply_move(&mut self, mv: Move) -> bool {
        let slot = self.game.current_slot();
        if !self.game.apply_move(mv, slot) {
            return false;
        }
        self.notify(ChangeEvent::MovePlayed { slot, mv });
        true
    }

    /// Apply `mv` for the current player and hand the turn over.
    pub fn play(&mut self, mv: Move) -> bool {
        if !self.apply_move(mv) {
            return false;
        }
        self.change_turn();
        true
    }

    pub fn change_turn(&mut self) {
        self.game.change_turn();
        let current = self.game.current_slot();
        self.notify(ChangeEvent::PlayerChanged { current });
    }

    /// Pass when the current player has no legal move. Returns false otherwise.
    pub fn pass_turn(&mut self) -> bool {
        if !self.game.valid_moves(self.game.current_slot()).is_empty() {
            return false;
        }
        self.change_turn();
        true
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
        self.notify(ChangeEvent::DifficultyChanged(difficulty));
    }

    pub fn set_algorithm(&mut self, algorithm: SearchAlgorithm) {
        self.settings.algorithm = algorithm;
        self.notify(ChangeEvent::AlgorithmChanged(algorithm));
    }

    pub fn set_heuristics(&mut self, heuristics: HeuristicConfig) {
        self.settings.heuristics = heuristics;
        self.notify(ChangeEvent::HeuristicsChanged(heuristics));
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.settings.mode = mode;
        self.notify(ChangeEvent::ModeChanged(mode));
    }

    /// Swap in another game, e.g. after loading or undo
    pub fn replace_game(&mut self, game: Game) {
        self.game = game;
        self.notify(ChangeEvent::GameReplaced);
    }

    /// Replace both game and settings, e.g. after loading a saved match
    pub fn restore(&mut self, game: Game, settings: Settings) {
        self.settings = settings;
        self.replace_game(game);
    }

    /// New opening; mode, algorithm, difficulty and pieces are kept.
    pub fn reset(&mut self) {
        self.game.reset();
        self.notify(ChangeEvent::Reset);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(session: &mut GameSession) -> (SubscriberId, Rc<RefCell<Vec<ChangeEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let id = session.subscribe(Box::new(move |event: &ChangeEvent| sink.borrow_mut().push(event.clone())));
        (id, events)
    }

    #[test]
    fn test_play_notifies_move_then_turn() {
        let mut session = GameSession::default();
        let (_, events) = recording(&mut session);
        let mv = Move::new(2, 3).unwrap();
        assert!(session.play(mv));
        assert_eq!(
            *events.borrow(),
            vec![
                ChangeEvent::MovePlayed {
                    slot: PlayerSlot::First,
                    mv
                },
                ChangeEvent::PlayerChanged {
                    current: PlayerSlot::Second
                },
            ]
        );
    }

    #[test]
    fn test_illegal_play_is_silent() {
        let mut session = GameSession::default();
        let (_, events) = recording(&mut session);
        assert!(!session.play(Move::new(0, 0).unwrap()));
        assert!(events.borrow().is_empty());
        assert!(session.game().is_first_player_current());
    }

    #[test]
    fn test_listener_sees_state_after_mutation() {
        let mut session = GameSession::default();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        session.subscribe(Box::new(move |event: &ChangeEvent| {
            if let ChangeEvent::DifficultyChanged(d) = event {
                *sink.borrow_mut() = Some(*d);
            }
        }));
        session.set_difficulty(Difficulty::Hard);
        assert_eq!(*seen.borrow(), Some(Difficulty::Hard));
        assert_eq!(session.settings().difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut session = GameSession::default();
        let (id, events) = recording(&mut session);
        let (_, other) = recording(&mut session);
        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.set_algorithm(SearchAlgorithm::AlphaBeta);
        assert!(events.borrow().is_empty());
        assert_eq!(
            *other.borrow(),
            vec![ChangeEvent::AlgorithmChanged(SearchAlgorithm::AlphaBeta)]
        );
    }

    #[test]
    fn test_board_edits_notify_and_recount() {
        let mut session = GameSession::default();
        let (_, events) = recording(&mut session);
        let corner = Move::new(0, 0).unwrap();
        assert!(session.place_piece(corner, Piece::Black));
        assert_eq!(session.game().first_player().count(), 3);

        let mut board = Board::new();
        board.set(corner, Piece::White);
        session.set_board(board);
        assert_eq!(session.game().second_player().count(), 3);
        assert_eq!(
            *events.borrow(),
            vec![
                ChangeEvent::PiecePlaced {
                    mv: corner,
                    piece: Piece::Black
                },
                ChangeEvent::BoardSet,
            ]
        );
    }

    #[test]
    fn test_place_piece_outside_board_is_ignored() {
        let board = Board::with_dimensions(4, 16).unwrap();
        let game = Game::with_board(board, Piece::Black);
        let mut session = GameSession::with_game(game.clone(), Settings::default());
        let (_, events) = recording(&mut session);

        assert!(!session.place_piece(Move::new(7, 7).unwrap(), Piece::Black));
        assert_eq!(session.game(), &game);
        assert_eq!(session.game().first_player().count(), 2);
        assert!(events.borrow().is_empty());

        let inside = Move::within(3, 15, session.game().board().dimensions()).unwrap();
        assert!(session.place_piece(inside, Piece::Black));
        assert_eq!(session.game().board().get(inside), Piece::Black);
    }

    #[test]
    fn test_pass_only_without_moves() {
        let mut session = GameSession::default();
        assert!(!session.pass_turn());
        assert!(session.game().is_first_player_current());
    }

    #[test]
    fn test_reset_keeps_settings() {
        let mut settings = Settings::default();
        settings.first_piece = Piece::White;
        settings.difficulty = Difficulty::Medium;
        let mut session = GameSession::new(settings.clone());
        let (_, events) = recording(&mut session);
        assert!(session.play(Move::new(2, 4).unwrap()));
        session.reset();
        assert_eq!(session.settings(), &settings);
        assert_eq!(session.game(), &Game::with_first_piece(Piece::White));
        assert_eq!(events.borrow().last(), Some(&ChangeEvent::Reset));
    }
}
