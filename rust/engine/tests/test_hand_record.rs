use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use riverhold_engine::engine::{start_hand, Blinds, HandState, Street};
use riverhold_engine::errors::{GameError, InvariantViolation};
use riverhold_engine::history::{ActionKind, HandRecord};
use riverhold_engine::player::{Player, PlayerAction as A, PlayerId};

fn started() -> HandState {
    let mut rng = ChaCha20Rng::seed_from_u64(77);
    let players = vec![
        Player::human(0, "you", 2000),
        Player::ai(1, "a", 2000),
        Player::ai(2, "b", 2000),
    ];
    start_hand("20250102-000001", players, 0, Blinds { small: 25, big: 50 }, &mut rng).unwrap()
}

#[test]
fn snapshot_round_trip_continues_identically() {
    let hand = started()
        .submit_action(PlayerId(0), A::Raise(100))
        .unwrap()
        .submit_action(PlayerId(1), A::Call)
        .unwrap();

    let json = hand.to_json().unwrap();
    let restored = HandState::from_json(&json).unwrap();
    assert_eq!(restored, hand);

    let script = [
        (PlayerId(2), A::Call),
        (PlayerId(1), A::Check),
        (PlayerId(2), A::Raise(50)),
        (PlayerId(0), A::Call),
        (PlayerId(1), A::Fold),
    ];
    let play = |mut state: HandState| {
        for (id, action) in script {
            if state.to_act().is_none() {
                state = state.advance_if_complete().unwrap();
            }
            state = state.submit_action(id, action).unwrap();
        }
        state
    };
    let a = play(hand);
    let b = play(restored);
    assert_eq!(a, b);
    assert_eq!(a.street(), Street::Flop);
}

#[test]
fn tampered_pot_is_rejected_on_restore() {
    let mut json: serde_json::Value = serde_json::from_str(&started().to_json().unwrap()).unwrap();
    json["pot"] = serde_json::json!(9999);
    let err = HandState::from_json(&json.to_string()).unwrap_err();
    assert!(matches!(
        err,
        GameError::Invariant(InvariantViolation::PotMismatch { pot: 9999, invested: 75 })
    ));
    assert!(matches!(
        HandState::from_json("{not json"),
        Err(GameError::Serialization(_))
    ));
}

#[test]
fn action_history_tracks_investment_and_pot() {
    let hand = started().submit_action(PlayerId(0), A::Raise(100)).unwrap();
    let kinds: Vec<ActionKind> = hand.actions().iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![ActionKind::PostSmallBlind, ActionKind::PostBigBlind, ActionKind::Raise]
    );
    let raise = &hand.actions()[2];
    assert_eq!(raise.chips, 150);
    assert_eq!(raise.raise_to, Some(150));
    assert_eq!(raise.invested_after, 150);
    assert_eq!(raise.pot_after, 225);
}

#[test]
fn hand_record_summarises_a_finished_hand() {
    let done = started()
        .submit_action(PlayerId(0), A::Fold)
        .unwrap()
        .submit_action(PlayerId(1), A::Fold)
        .unwrap();
    let rec = HandRecord::from_state(&done);
    assert_eq!(rec.hand_id, "20250102-000001");
    assert_eq!(rec.pot, 75);
    assert!(rec.ts.is_some());
    let showdown = rec.showdown.as_ref().unwrap();
    assert_eq!(showdown.winners, vec![PlayerId(2)]);
    assert_eq!(showdown.notes.as_deref(), Some("uncontested"));

    let line = rec.to_jsonl().unwrap();
    let back: HandRecord = serde_json::from_str(line.trim_end()).unwrap();
    assert_eq!(back, rec);
}
