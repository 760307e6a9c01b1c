use riverhold_engine::deck::Deck;
use riverhold_engine::engine::{Blinds, HandState, Street};
use riverhold_engine::errors::GameError;
use riverhold_engine::player::{Player, PlayerAction as A, PlayerId, PlayerStatus};

const BLINDS: Blinds = Blinds { small: 10, big: 20 };

fn start(stacks: &[u32]) -> HandState {
    let players = stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| Player::ai(i as u32, format!("p{i}"), s))
        .collect();
    HandState::start_with_deck("bet", players, 0, BLINDS, Deck::new_with_seed(5)).expect("start")
}

fn run_out(mut state: HandState) -> HandState {
    while !state.is_resolved() {
        assert_eq!(state.to_act(), None, "betting should be closed");
        state = state.advance_if_complete().unwrap();
    }
    state
}

fn total_stacks(state: &HandState) -> u32 {
    state.players().iter().map(|p| p.stack()).sum()
}

#[test]
fn heads_up_dealer_posts_small_blind_and_acts_first() {
    let hand = start(&[1000, 1000]);
    assert_eq!(hand.small_blind_seat(), 0);
    assert_eq!(hand.big_blind_seat(), 1);
    assert_eq!(hand.to_act(), Some(PlayerId(0)));
    assert_eq!(hand.pot(), 30);
    assert_eq!(hand.highest_bet(), 20);
    assert!(hand.players().iter().all(|p| p.hole_cards().is_some()));
}

#[test]
fn big_blind_gets_the_option_then_flop_is_dealt() {
    let hand = start(&[1000, 1000]);
    let hand = hand.submit_action(PlayerId(0), A::Call).unwrap();
    assert_eq!(hand.to_act(), Some(PlayerId(1)));
    let hand = hand.submit_action(PlayerId(1), A::Check).unwrap();
    assert_eq!(hand.to_act(), None);
    assert_eq!(hand.street(), Street::Preflop);

    let flop = hand.advance_if_complete().unwrap();
    assert_eq!(flop.street(), Street::Flop);
    assert_eq!(flop.board().len(), 3);
    // 4 hole cards, 1 burn, 3 flop
    assert_eq!(flop.deck().remaining(), 44);
    // first live seat left of the dealer
    assert_eq!(flop.to_act(), Some(PlayerId(1)));
}

#[test]
fn short_stack_call_goes_all_in_and_hand_still_resolves() {
    let hand = start(&[1000, 60]);
    let hand = hand.submit_action(PlayerId(0), A::Raise(100)).unwrap();
    assert_eq!(hand.highest_bet(), 120);

    let hand = hand.submit_action(PlayerId(1), A::Call).unwrap();
    let short = hand.player(PlayerId(1)).unwrap();
    assert_eq!(short.status(), PlayerStatus::AllIn);
    assert_eq!(short.stack(), 0);
    assert_eq!(short.total_invested(), 60);
    assert_eq!(hand.pot(), 180);

    let done = run_out(hand);
    assert_eq!(done.street(), Street::Showdown);
    assert_eq!(total_stacks(&done), 1060);
    let outcome = done.outcome().unwrap();
    assert_eq!(outcome.pots.len(), 2);
    assert_eq!(outcome.pots[0].amount, 120);
    assert_eq!(outcome.pots[1].amount, 60);
    assert_eq!(outcome.pots[1].winners, vec![PlayerId(0)]);
}

#[test]
fn min_raise_resets_every_street() {
    let hand = start(&[1000, 1000]);
    let hand = hand.submit_action(PlayerId(0), A::Raise(100)).unwrap();
    assert_eq!(hand.min_raise(), 100);
    let hand = hand.submit_action(PlayerId(1), A::Call).unwrap();

    let flop = hand.advance_if_complete().unwrap();
    assert_eq!(flop.min_raise(), 20);
    assert_eq!(flop.highest_bet(), 0);
    assert_eq!(
        flop.submit_action(PlayerId(1), A::Raise(10)).unwrap_err(),
        GameError::InvalidRaiseAmount {
            amount: 10,
            minimum: 20,
            maximum: 880
        }
    );
    let bet = flop.submit_action(PlayerId(1), A::Raise(20)).unwrap();
    assert_eq!(bet.highest_bet(), 20);
}

#[test]
fn raise_beyond_stack_is_rejected_and_state_untouched() {
    let hand = start(&[1000, 1000]);
    let before = hand.clone();
    let err = hand.submit_action(PlayerId(0), A::Raise(5000)).unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidRaiseAmount {
            amount: 5000,
            minimum: 20,
            maximum: 980
        }
    );
    assert!(err.is_rejection());
    assert_eq!(hand, before);
    assert_eq!(hand.pot(), 30);
}

#[test]
fn acting_out_of_turn_is_rejected() {
    let hand = start(&[1000, 1000]);
    assert_eq!(
        hand.submit_action(PlayerId(1), A::Call).unwrap_err(),
        GameError::OutOfTurn {
            expected: Some(PlayerId(0)),
            actual: PlayerId(1)
        }
    );
    assert!(matches!(
        hand.submit_action(PlayerId(7), A::Fold),
        Err(GameError::OutOfTurn { .. })
    ));
}

#[test]
fn checking_into_a_bet_is_illegal() {
    let hand = start(&[1000, 1000]);
    assert!(matches!(
        hand.submit_action(PlayerId(0), A::Check),
        Err(GameError::IllegalAction { action: "check", .. })
    ));
}

#[test]
fn short_all_in_raise_does_not_reopen_action() {
    // seat 0 dealer, 1 small blind, 2 big blind with 150 behind in total
    let hand = start(&[1000, 1000, 150]);
    assert_eq!(hand.to_act(), Some(PlayerId(0)));
    let hand = hand.submit_action(PlayerId(0), A::Raise(80)).unwrap();
    assert_eq!(hand.min_raise(), 80);
    let hand = hand.submit_action(PlayerId(1), A::Call).unwrap();
    // 50 over the 100 bet, below the 80 minimum
    let hand = hand.submit_action(PlayerId(2), A::AllIn).unwrap();
    assert_eq!(hand.highest_bet(), 150);
    assert_eq!(hand.min_raise(), 80);

    assert_eq!(hand.to_act(), Some(PlayerId(0)));
    assert!(matches!(
        hand.submit_action(PlayerId(0), A::Raise(100)),
        Err(GameError::IllegalAction { .. })
    ));
    assert!(matches!(
        hand.submit_action(PlayerId(0), A::AllIn),
        Err(GameError::IllegalAction { .. })
    ));
    let hand = hand.submit_action(PlayerId(0), A::Call).unwrap();
    let hand = hand.submit_action(PlayerId(1), A::Call).unwrap();
    assert_eq!(hand.to_act(), None);
    assert_eq!(hand.pot(), 450);
}

#[test]
fn full_all_in_raise_reopens_action() {
    let hand = start(&[1000, 1000, 300]);
    let hand = hand.submit_action(PlayerId(0), A::Raise(80)).unwrap();
    let hand = hand.submit_action(PlayerId(1), A::Call).unwrap();
    let hand = hand.submit_action(PlayerId(2), A::AllIn).unwrap();
    assert_eq!(hand.highest_bet(), 300);
    assert_eq!(hand.min_raise(), 200);
    assert_eq!(hand.last_aggressor(), Some(PlayerId(2)));
    let hand = hand.submit_action(PlayerId(0), A::Raise(200)).unwrap();
    assert_eq!(hand.highest_bet(), 500);
}

#[test]
fn actions_after_resolution_are_rejected() {
    let hand = start(&[1000, 1000]);
    let done = hand.submit_action(PlayerId(0), A::Fold).unwrap();
    assert!(done.is_resolved());
    assert_eq!(
        done.submit_action(PlayerId(1), A::Check).unwrap_err(),
        GameError::HandAlreadyResolved
    );
    assert_eq!(done.advance_if_complete().unwrap_err(), GameError::HandAlreadyResolved);
    assert_eq!(done.resolve_showdown().unwrap_err(), GameError::HandAlreadyResolved);
}

#[test]
fn showdown_cannot_be_forced_while_betting_is_open() {
    let hand = start(&[1000, 1000]);
    assert!(matches!(
        hand.resolve_showdown(),
        Err(GameError::IllegalAction { .. })
    ));
}

#[test]
fn bad_setups_are_rejected() {
    let players = || vec![Player::ai(0, "a", 100), Player::ai(1, "b", 100)];
    assert!(matches!(
        HandState::start_with_deck("x", players(), 0, Blinds { small: 30, big: 20 }, Deck::new()),
        Err(GameError::InvalidSetup(_))
    ));
    assert!(matches!(
        HandState::start_with_deck("x", players(), 5, BLINDS, Deck::new()),
        Err(GameError::InvalidSetup(_))
    ));
    let lonely = vec![Player::ai(0, "a", 100), Player::ai(1, "b", 0)];
    assert_eq!(
        HandState::start_with_deck("x", lonely, 0, BLINDS, Deck::new()).unwrap_err(),
        GameError::InsufficientPlayers { available: 1 }
    );
}

#[test]
fn short_stack_raise_is_an_all_in_call() {
    let hand = start(&[1000, 60]);
    let hand = hand.submit_action(PlayerId(0), A::Raise(100)).unwrap();
    let hand = hand.submit_action(PlayerId(1), A::Raise(500)).unwrap();
    let short = hand.player(PlayerId(1)).unwrap();
    assert_eq!(short.status(), PlayerStatus::AllIn);
    assert_eq!(short.total_invested(), 60);
    assert_eq!(hand.highest_bet(), 120);
    assert_eq!(hand.pot(), 180);
}

fn all_in_to_the_river() -> HandState {
    let hand = start(&[1000, 1000]);
    let hand = hand.submit_action(PlayerId(0), A::AllIn).unwrap();
    let mut hand = hand.submit_action(PlayerId(1), A::Call).unwrap();
    while hand.street() != Street::River {
        assert_eq!(hand.to_act(), None);
        hand = hand.advance_if_complete().unwrap();
    }
    hand
}

#[test]
fn showdown_resolves_once_river_betting_is_closed() {
    let river = all_in_to_the_river();
    assert_eq!(river.board().len(), 5);
    let done = river.resolve_showdown().unwrap();
    assert_eq!(done.street(), Street::Showdown);
    let outcome = done.outcome().unwrap();
    assert!(!outcome.uncontested);
    assert_eq!(outcome.shown_hands.len(), 2);
    assert_eq!(total_stacks(&done), 2000);
}

#[test]
fn advancing_from_the_river_leaves_showdown_pending() {
    let pending = all_in_to_the_river().advance_if_complete().unwrap();
    assert_eq!(pending.street(), Street::Showdown);
    assert!(!pending.is_resolved());
    assert!(matches!(
        pending.submit_action(PlayerId(0), A::Check),
        Err(GameError::OutOfTurn { expected: None, .. })
    ));

    let done = pending.resolve_showdown().unwrap();
    assert!(done.is_resolved());
    assert_eq!(pending.advance_if_complete().unwrap(), done);
}

#[test]
fn showdown_waits_for_the_full_board() {
    let hand = start(&[1000, 1000]);
    let hand = hand.submit_action(PlayerId(0), A::AllIn).unwrap();
    let hand = hand.submit_action(PlayerId(1), A::Call).unwrap();
    let flop = hand.advance_if_complete().unwrap();
    assert_eq!(flop.to_act(), None);
    match flop.resolve_showdown() {
        Err(GameError::IllegalAction { reason, .. }) => assert!(reason.contains("board is incomplete")),
        other => panic!("expected IllegalAction, got {other:?}"),
    }
}

#[test]
fn tables_too_large_for_the_pot_are_rejected() {
    let big = u32::MAX / 2 + 10;
    let players = vec![Player::ai(0, "a", big), Player::ai(1, "b", big)];
    assert!(matches!(
        HandState::start_with_deck("big", players, 0, BLINDS, Deck::new_with_seed(1)),
        Err(GameError::InvalidSetup(_))
    ));
}
