use riverhold_engine::deck::Deck;
use riverhold_engine::engine::{Blinds, HandState};
use riverhold_engine::logging::TestLogSubscriber;
use riverhold_engine::player::{Player, PlayerAction, PlayerId};
use tracing::Level;

fn players() -> Vec<Player> {
    vec![Player::human(0, "you", 500), Player::ai(1, "bot", 500)]
}

#[test]
fn hand_lifecycle_is_logged_with_structured_fields() {
    let logs = TestLogSubscriber::new();
    logs.capture(|| {
        let hand = HandState::start_with_deck(
            "20250301-000004",
            players(),
            0,
            Blinds { small: 5, big: 10 },
            Deck::new_with_seed(4),
        )
        .unwrap();
        let hand = hand.submit_action(PlayerId(0), PlayerAction::Call).unwrap();
        let _ = hand.submit_action(PlayerId(1), PlayerAction::Fold).unwrap();
    });

    let started = logs.find(Level::INFO, "hand started");
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].field("hand_id"), Some("20250301-000004"));
    assert_eq!(started[0].field("big_blind"), Some("10"));
    assert_eq!(logs.find(Level::DEBUG, "action applied").len(), 2);
    let won = logs.find(Level::INFO, "hand won uncontested");
    assert_eq!(won[0].field("winner"), Some("p0"));
}

#[test]
fn rejections_are_logged_at_warn() {
    let logs = TestLogSubscriber::new();
    logs.capture(|| {
        let hand = HandState::start_with_deck(
            "warn",
            players(),
            0,
            Blinds { small: 5, big: 10 },
            Deck::new(),
        )
        .unwrap();
        assert!(hand.submit_action(PlayerId(1), PlayerAction::Call).is_err());
        assert!(hand.submit_action(PlayerId(0), PlayerAction::Raise(1)).is_err());
    });

    assert_eq!(logs.find(Level::WARN, "out of turn").len(), 1);
    let rejected = logs.find(Level::WARN, "action rejected");
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].field("player"), Some("p0"));
    assert!(logs.find(Level::ERROR, "").is_empty());
}
