//! Property tests over random playouts

use othello::board::Piece;
use othello::eval::{material, mobility, positional_strength};
use othello::rules::CaptureRule;
use othello::search::{alpha_beta, minimax, TreeBuilder, INF};
use othello::{Game, HeuristicConfig, PlayerSlot};
use proptest::prelude::*;

/// Play up to `choices.len()` plies, each picking a legal move by index.
fn playout(choices: &[usize], rule: CaptureRule) -> Game {
    let mut game = Game::new().with_capture_rule(rule);
    for &choice in choices {
        if game.is_over() {
            break;
        }
        let slot = game.current_slot();
        let moves = game.valid_moves(slot);
        if !moves.is_empty() {
            let applied = game.apply_move(moves[choice % moves.len()], slot);
            assert!(applied);
        }
        game.change_turn();
    }
    game
}

fn arb_rule() -> impl Strategy<Value = CaptureRule> {
    prop::sample::select(vec![CaptureRule::FirstDirection, CaptureRule::AllDirections])
}

fn arb_heuristics() -> impl Strategy<Value = HeuristicConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(material, mobility, positional)| {
        HeuristicConfig {
            material,
            mobility,
            positional,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_piece_counts_cover_board(
        choices in prop::collection::vec(0usize..64, 0..60),
        rule in arb_rule()
    ) {
        let game = playout(&choices, rule);
        let board = game.board();
        prop_assert_eq!(
            board.count_pieces(Piece::Black)
                + board.count_pieces(Piece::White)
                + board.count_pieces(Piece::Empty),
            board.rows() * board.columns()
        );
        prop_assert_eq!(game.first_player().count(), board.count_pieces(Piece::Black));
        prop_assert_eq!(game.second_player().count(), board.count_pieces(Piece::White));
    }

    #[test]
    fn prop_game_over_iff_both_stuck(
        choices in prop::collection::vec(0usize..64, 0..70),
        rule in arb_rule()
    ) {
        let game = playout(&choices, rule);
        let both_stuck = game.valid_moves(PlayerSlot::First).is_empty()
            && game.valid_moves(PlayerSlot::Second).is_empty();
        prop_assert_eq!(game.is_over(), both_stuck);
    }

    #[test]
    fn prop_color_swap_negates_heuristics(choices in prop::collection::vec(0usize..64, 0..40)) {
        let game = playout(&choices, CaptureRule::FirstDirection);
        let mut swapped = Game::with_board(game.board().inverted(), Piece::Black);
        swapped.set_current(game.current_slot());
        prop_assert_eq!(material(&swapped), -material(&game));
        prop_assert_eq!(positional_strength(&swapped), -positional_strength(&game));
        prop_assert_eq!(mobility(&swapped), -mobility(&game));
    }

    #[test]
    fn prop_snapshot_isolation(
        choices in prop::collection::vec(0usize..64, 0..30),
        extra in prop::collection::vec(0usize..64, 1..10)
    ) {
        let game = playout(&choices, CaptureRule::FirstDirection);
        let before = game.clone();
        let mut branch = game.snapshot();
        for &choice in &extra {
            let slot = branch.current_slot();
            let moves = branch.valid_moves(slot);
            if let Some(&mv) = moves.get(choice % moves.len().max(1)) {
                branch.apply_move(mv, slot);
            }
            branch.change_turn();
        }
        prop_assert_eq!(&game, &before);
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 24, .. ProptestConfig::default() })]

    #[test]
    fn prop_alpha_beta_equals_minimax(
        choices in prop::collection::vec(0usize..64, 0..30),
        depth in 1u32..=3,
        heuristics in arb_heuristics()
    ) {
        let game = playout(&choices, CaptureRule::FirstDirection);
        let mut plain = TreeBuilder::new().build(&game, depth);
        let mut pruned = plain.clone();
        let expected = minimax(&mut plain, depth, &heuristics);
        let actual = alpha_beta(&mut pruned, depth, -INF, INF, &heuristics);
        prop_assert_eq!(actual, expected);
    }
}
