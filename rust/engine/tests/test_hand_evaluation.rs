use riverhold_engine::cards::{parse_cards, Card};
use riverhold_engine::hand::{best_five_card_hand, compare_hands, evaluate_hand, Category, WORST_SCORE};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

#[test]
fn detects_royal_flush() {
    let hs = evaluate_hand(&cards("Th Jh Qh Kh Ah 2c 3d"));
    assert_eq!(hs.category, Category::StraightFlush);
}

#[test]
fn category_ordering_is_correct() {
    let ladder = [
        "As Ad Ah Ac Kc Qd 2h", // quads
        "Kc Kd Kh Qc Qd 2h 3s", // full house
        "2h 7h Jh Qh 9h Ac Kd", // flush
        "5c 6h 7c 8h 9d 2s 3c", // straight
        "Qc Qh Qd 2s 3c 4h 6d", // trips
        "Ac Ah 2s 2d 4c 8d 9h", // two pair
        "Ac Ah 2s 3d 4c 8d 9h", // pair
        "Ac Kh 9s 8d 7c 3d 2h", // high card
    ];
    let strengths: Vec<_> = ladder.iter().map(|h| evaluate_hand(&cards(h))).collect();
    for pair in strengths.windows(2) {
        assert!(compare_hands(&pair[0], &pair[1]).is_gt(), "{:?} should beat {:?}", pair[0], pair[1]);
        assert!(pair[0].score() < pair[1].score(), "lower score must be stronger");
    }
}

#[test]
fn wheel_is_the_lowest_straight() {
    let wheel = evaluate_hand(&cards("Ah 2c 3d 4s 5h 9c Kd"));
    let six_high = evaluate_hand(&cards("2c 3d 4s 5h 6h 9c Kd"));
    assert_eq!(wheel.category, Category::Straight);
    assert!(compare_hands(&six_high, &wheel).is_gt());
}

#[test]
fn kickers_break_ties_and_board_plays_split() {
    let ak = evaluate_hand(&cards("Ah Kd 7c 7d 2s 3h 9c"));
    let aq = evaluate_hand(&cards("As Qd 7c 7d 2s 3h 9c"));
    assert!(compare_hands(&ak, &aq).is_gt());

    let a = evaluate_hand(&cards("2c 3d Ts Js Qs Ks As"));
    let b = evaluate_hand(&cards("4h 5h Ts Js Qs Ks As"));
    assert!(compare_hands(&a, &b).is_eq());
}

#[test]
fn partial_hands_rank_what_is_present() {
    let pocket_pair = evaluate_hand(&cards("9s 9c"));
    let ace_king = evaluate_hand(&cards("As Kc"));
    assert_eq!(pocket_pair.category, Category::OnePair);
    assert!(compare_hands(&pocket_pair, &ace_king).is_gt());
    assert!(evaluate_hand(&[]).score() <= WORST_SCORE);
}

#[test]
fn best_five_picks_the_winning_cards() {
    let hole = cards("Ah Kh");
    let hole = [hole[0], hole[1]];
    let board = cards("Qh Jh Th 2c 2d");
    let best = best_five_card_hand(&hole, &board).unwrap();
    assert_eq!(best.to_vec(), cards("Ah Kh Qh Jh Th"));
    assert!(best_five_card_hand(&hole, &board[..2]).is_none());
}
