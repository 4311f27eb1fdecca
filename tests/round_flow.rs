//! End-to-end rounds driven through scripted decision callbacks over
//! rigged walls.

use riichi_engine::common::tile::{tiles_from_str, Tile};
use riichi_engine::common::wall::Wall;
use riichi_engine::engine::round::{run_round, DrawOutcome, RoundState};
use riichi_engine::model::action::{Action, AvailableActions};
use riichi_engine::model::event::{AbortKind, Event, EventBus};
use riichi_engine::rules::Ruleset;
use riichi_engine::yaku::Yaku;

fn t(s: &str) -> Tile {
    s.parse().unwrap()
}

/// Interleave per-seat 13-tile hands the way the deal draws them, then
/// append scripted draws, padding, and a fixed dead wall.
fn rigged_wall(hands: &[&str], draws: &str, padding: usize, three_player: bool) -> Wall {
    let hands: Vec<Vec<Tile>> = hands.iter().map(|s| tiles_from_str(s)).collect();
    for hand in &hands {
        assert_eq!(hand.len(), 13, "rigged hands must have 13 tiles");
    }
    let mut tiles = vec![];
    for i in 0..13 {
        for hand in &hands {
            tiles.push(hand[i]);
        }
    }
    tiles.extend(tiles_from_str(draws));
    tiles.extend(std::iter::repeat(t("1s")).take(padding));
    // Dead wall of west winds: the indicated dora (north) stays out of
    // every scripted hand.
    tiles.extend(std::iter::repeat(t("3z")).take(14));
    Wall::from_tiles(tiles, three_player)
}

fn new_round(rules: Ruleset, wall: Wall) -> RoundState {
    let scores = vec![rules.starting_score; rules.num_players as usize];
    RoundState::new(rules, &scores, wall, 0, 0, 0, 0)
}

/// Scripted decider: plays back actions in order, recording every menu it
/// was offered for later assertions.
struct Script {
    steps: Vec<Action>,
    cursor: usize,
    seen: Vec<(u8, AvailableActions)>,
}

impl Script {
    fn new(steps: Vec<Action>) -> Self {
        Self { steps, cursor: 0, seen: vec![] }
    }

    fn next(&mut self, seat: u8, available: &AvailableActions) -> Action {
        self.seen.push((seat, available.clone()));
        let action = self
            .steps
            .get(self.cursor)
            .unwrap_or_else(|| panic!("script exhausted at step {} (seat {})", self.cursor, seat))
            .clone();
        self.cursor += 1;
        action
    }
}

#[test]
fn dealer_tsumo_with_double_east() {
    // Scenario: dealer holds 123m 456p 789s EEE S and self-draws the S on
    // the second go-around (the first would be a blessing-of-heaven).
    let wall = rigged_wall(
        &[
            "123m456p789s1112z",
            "147m258p369s1234z",
            "147m258p369s1234z",
            "147m258p369s1234z",
        ],
        "5z6z7z5z2z",
        5,
        false,
    );
    let mut state = new_round(Ruleset::default(), wall);
    let mut events = EventBus::new();
    let mut script = Script::new(vec![
        Action::Discard(t("5z")),
        Action::Discard(t("6z")),
        Action::Discard(t("7z")),
        Action::Discard(t("5z")),
        Action::Win,
    ]);

    let result = run_round(&mut state, &mut events, &mut |s, a| script.next(s, a)).unwrap();

    assert_eq!(result.winners.len(), 1);
    let (winner, score) = &result.winners[0];
    assert_eq!(*winner, 0);
    assert!(score.yaku.contains(&(Yaku::SeatWind, 1)));
    assert!(score.yaku.contains(&(Yaku::PrevalentWind, 1)));
    assert!(score.yaku.contains(&(Yaku::MenzenTsumo, 1)));
    assert_eq!(score.han, 3);
    assert_eq!(score.fu, 40);
    // base 40 * 2^5 = 1280; dealer tsumo: 2600 from each non-dealer
    assert_eq!(score.non_dealer_payment, 2600);
    assert_eq!(result.score_changes, vec![7800, -2600, -2600, -2600]);
    assert!(result.dealer_retains);
}

#[test]
fn permanent_furiten_blocks_ron_but_not_tenpai_payment() {
    // Seat 1 waits on 3m/6m and has discarded a 6m itself; seat 0's later
    // 3m must not be offered as a ron, only as a sequence call.
    let wall = rigged_wall(
        &[
            "147m258p369s1234z",
            "45m456p789s11122z",
            "158m369p147s2345z",
            "158m369p147s2345z",
        ],
        "7z6m7z7z3m7z7z7z",
        0,
        false,
    );
    let mut state = new_round(Ruleset::default(), wall);
    let mut events = EventBus::new();
    let mut script = Script::new(vec![
        Action::Discard(t("7z")), // seat 0
        Action::Discard(t("6m")), // seat 1: furiten from here on
        Action::Discard(t("7z")), // seat 2
        Action::Discard(t("7z")), // seat 3
        Action::Discard(t("3m")), // seat 0 deals the waited tile
        Action::Skip,             // seat 1 may only call a sequence on it
        Action::Discard(t("7z")), // seat 1
        Action::Discard(t("7z")), // seat 2
        Action::Discard(t("7z")), // seat 3
    ]);

    let result = run_round(&mut state, &mut events, &mut |s, a| script.next(s, a)).unwrap();

    // The claim menu offered to seat 1 for the 3m had no ron in it.
    let claim_menu = script
        .seen
        .iter()
        .find(|(seat, menu)| *seat == 1 && !menu.sequences.is_empty())
        .expect("seat 1 should have been offered a sequence call on 3m");
    assert!(!claim_menu.1.can_ron);

    // Wall runs dry; only seat 1 is tenpai.
    assert_eq!(result.draw, Some(DrawOutcome::Exhaustive));
    assert_eq!(result.tenpai_seats, vec![1]);
    assert_eq!(result.score_changes, vec![-1000, 3000, -1000, -1000]);
    assert!(!result.dealer_retains);
}

#[test]
fn riichi_stick_ippatsu_and_pot_transfer() {
    // Dealer declares riichi on the second go-around (the first would be
    // a double riichi); the next discard deals in. The stick is committed
    // after the declaring discard survives, then returns with the pot on
    // the win.
    let wall = rigged_wall(
        &[
            "45m456p789s11122z",
            "147m258p369s1234z",
            "158m369p147s2345z",
            "158m369p147s2345z",
        ],
        "7z7z7z7z7z3m",
        10,
        false,
    );
    let mut state = new_round(Ruleset::default(), wall);
    let mut events = EventBus::new();
    let mut script = Script::new(vec![
        Action::Discard(t("7z")), // seat 0
        Action::Discard(t("7z")), // seat 1
        Action::Discard(t("7z")), // seat 2
        Action::Discard(t("7z")), // seat 3
        Action::Riichi(t("7z")), // seat 0 declares on the drawn tile
        Action::Discard(t("3m")), // seat 1 deals in
        Action::Win,             // seat 0 rons with riichi + ippatsu
    ]);

    let result = run_round(&mut state, &mut events, &mut |s, a| script.next(s, a)).unwrap();

    let (winner, score) = &result.winners[0];
    assert_eq!(*winner, 0);
    assert!(score.yaku.contains(&(Yaku::Riichi, 1)));
    assert!(score.yaku.contains(&(Yaku::Ippatsu, 1)));
    assert_eq!(score.han, 2);
    assert_eq!(score.fu, 40);
    // dealer ron: ceil100(6 * 640) = 3900
    assert_eq!(score.ron_payment, 3900);
    // -1000 stick, +3900 ron, +1000 pot back
    assert_eq!(result.score_changes, vec![3900, -3900, 0, 0]);
    assert_eq!(result.loser, Some(1));
    assert_eq!(result.riichi_sticks_remaining, 0);
    // Every round's deltas cover exactly the net stick flow.
    assert_eq!(result.score_changes.iter().sum::<i64>(), 0);
}

#[test]
fn riichi_furiten_locks_for_the_round() {
    // Seat 1 riichis, then lets a winning 3m pass: the lock persists
    // through the next draw, so the later 6m is not offered either.
    let wall = rigged_wall(
        &[
            "147m258p369s1234z",
            "45m456p789s11122z",
            "158m369p147s2345z",
            "158m369p147s2345z",
        ],
        "7z7z7z7z3m7z7z7z6m7z7z7z",
        0,
        false,
    );
    let mut state = new_round(Ruleset::default(), wall);
    let mut events = EventBus::new();
    let mut script = Script::new(vec![
        Action::Discard(t("7z")), // seat 0
        Action::Riichi(t("7z")),  // seat 1 declares
        Action::Discard(t("7z")), // seat 2
        Action::Discard(t("7z")), // seat 3
        Action::Discard(t("3m")), // seat 0: a winning tile
        Action::Skip,             // seat 1 declines the ron
        Action::Discard(t("7z")), // seat 1 (tsumogiri under riichi)
        Action::Discard(t("7z")), // seat 2
        Action::Discard(t("7z")), // seat 3
        Action::Discard(t("6m")), // seat 0: the other winning tile
        Action::Discard(t("7z")), // seat 1 (no ron offered: locked)
        Action::Discard(t("7z")), // seat 2
        Action::Discard(t("7z")), // seat 3
    ]);

    let result = run_round(&mut state, &mut events, &mut |s, a| script.next(s, a)).unwrap();

    // Seat 1 was offered the first ron and skipped it.
    let first_offer = script
        .seen
        .iter()
        .filter(|(seat, menu)| *seat == 1 && menu.can_ron)
        .count();
    assert_eq!(first_offer, 1, "only the first 3m should offer a ron");

    assert_eq!(result.draw, Some(DrawOutcome::Exhaustive));
    assert!(result.tenpai_seats.contains(&1));
}

#[test]
fn four_wind_discards_abort_the_round() {
    let wall = rigged_wall(
        &[
            "147m258p369s2345z",
            "147m258p369s2345z",
            "158m369p147s2345z",
            "158m369p147s2345z",
        ],
        "1z1z1z1z",
        4,
        false,
    );
    let mut state = new_round(Ruleset::default(), wall);
    let mut events = EventBus::new();
    let mut script = Script::new(vec![
        Action::Discard(t("1z")),
        Action::Discard(t("1z")),
        Action::Discard(t("1z")),
        Action::Discard(t("1z")),
    ]);

    let result = run_round(&mut state, &mut events, &mut |s, a| script.next(s, a)).unwrap();

    assert_eq!(result.draw, Some(DrawOutcome::Abortive(AbortKind::FourWinds)));
    assert!(result.dealer_retains);
    assert_eq!(result.score_changes, vec![0, 0, 0, 0]);
}

#[test]
fn triple_ron_aborts_in_four_player() {
    let wall = rigged_wall(
        &[
            "147m258p369s1234z",
            "45m456p789s11122z",
            "45m456p789s11122z",
            "45m456p789s11122z",
        ],
        "3m",
        8,
        false,
    );
    let mut state = new_round(Ruleset::default(), wall);
    let mut events = EventBus::new();
    let mut script = Script::new(vec![
        Action::Discard(t("3m")), // seat 0 deals into everyone
        Action::Win,
        Action::Win,
        Action::Win,
    ]);

    let result = run_round(&mut state, &mut events, &mut |s, a| script.next(s, a)).unwrap();

    assert_eq!(result.draw, Some(DrawOutcome::Abortive(AbortKind::TripleRon)));
    assert!(result.winners.is_empty());
    assert!(result.dealer_retains);
}

#[test]
fn robbing_an_added_kan() {
    // Seat 0 pons 5m, later promotes it with the fourth copy; seat 2 is
    // waiting on 5m and robs the kan.
    let wall = rigged_wall(
        &[
            "55m123p456s789s12z",
            "147m258p369s1234z",
            "46m111p999p567s22z",
            "158m369p147s2345z",
        ],
        "7z5m7z7z7z5m",
        6,
        false,
    );
    let mut state = new_round(Ruleset::default(), wall);
    let mut events = EventBus::new();

    let mut step = 0usize;
    let mut seen_ron_menu = false;
    let result = run_round(&mut state, &mut events, &mut |seat, available| {
        step += 1;
        match step {
            1 => Action::Discard(t("7z")), // seat 0
            2 => Action::Discard(t("5m")), // seat 1 feeds the pon
            3 => {
                // seat 2 waits on 5m but a plain ron carries no yaku, so
                // only seat 0's pon is on offer
                assert_eq!(seat, 0);
                Action::Triplet(available.triplets[0].clone())
            }
            4 => Action::Discard(t("1z")), // forced discard after the pon
            5 => Action::Discard(t("7z")), // seat 1
            6 => Action::Discard(t("7z")), // seat 2 (draw clears its miss)
            7 => Action::Discard(t("7z")), // seat 3
            8 => {
                assert_eq!(seat, 0);
                assert_eq!(available.added_kans, vec![t("5m")]);
                Action::AddedKan(t("5m"))
            }
            9 => {
                // robbing the kan supplies the missing yaku
                assert_eq!(seat, 2);
                assert!(available.can_ron);
                seen_ron_menu = true;
                Action::Win
            }
            _ => panic!("unexpected decision point {}", step),
        }
    })
    .unwrap();

    assert!(seen_ron_menu);
    let (winner, score) = &result.winners[0];
    assert_eq!(*winner, 2);
    assert!(score.yaku.contains(&(Yaku::Chankan, 1)));
    assert_eq!(result.loser, Some(0));
    assert_eq!(result.score_changes[0], -score.ron_payment);
    assert_eq!(result.score_changes[2], score.ron_payment);
}

#[test]
fn north_declare_draws_a_replacement() {
    let sanma = Ruleset { num_players: 3, ..Ruleset::default() };
    let wall = rigged_wall(
        &[
            "19m19p19s1234z556z",
            "1199m99p11s66655z",
            "19m19p19s23566z11z",
        ],
        "7z7z7z",
        0,
        true,
    );
    let mut state = new_round(sanma, wall);
    let mut events = EventBus::new();
    let replacement_draws;
    {
        // count dead-wall draws as they stream past
        let counter = std::rc::Rc::new(std::cell::RefCell::new(0));
        let sink = counter.clone();
        events.subscribe(move |event| {
            if let Event::Draw { from_dead_wall: true, .. } = event {
                *sink.borrow_mut() += 1;
            }
        });
        let mut script = Script::new(vec![
            Action::NorthDeclare,     // seat 0
            Action::Discard(t("7z")), // then discards
            Action::Discard(t("7z")), // seat 1
            Action::Discard(t("7z")), // seat 2
        ]);
        let result = run_round(&mut state, &mut events, &mut |s, a| script.next(s, a)).unwrap();
        replacement_draws = *counter.borrow();
        assert_eq!(result.draw, Some(DrawOutcome::Exhaustive));
    }
    assert_eq!(replacement_draws, 1);
    assert_eq!(state.players[0].north_pile.len(), 1);
}

#[test]
fn open_kan_reveals_dora_and_draws_replacement() {
    let wall = rigged_wall(
        &[
            "147m258p369s1234z",
            "999s12m345p678p55z",
            "158m369p147s2345z",
            "158m369p147s2345z",
        ],
        "9s7z7z7z7z7z7z7z",
        2,
        false,
    );
    let mut state = new_round(Ruleset::default(), wall);
    let mut events = EventBus::new();
    let kan_events;
    {
        let counter = std::rc::Rc::new(std::cell::RefCell::new(0));
        let sink = counter.clone();
        events.subscribe(move |event| {
            if let Event::Kan { .. } = event {
                *sink.borrow_mut() += 1;
            }
        });
        let mut step = 0usize;
        let result = run_round(&mut state, &mut events, &mut |seat, available| {
            step += 1;
            match step {
                1 => Action::Discard(t("9s")),
                2 => {
                    assert_eq!(seat, 1);
                    assert!(!available.open_kans.is_empty());
                    Action::OpenKan(available.open_kans[0].clone())
                }
                3 => {
                    // after the replacement draw the claimant discards it
                    assert_eq!(seat, 1);
                    Action::Discard(t("3z"))
                }
                _ => match available.discards.first() {
                    Some(&tile) => Action::Discard(tile),
                    None => Action::Skip,
                },
            }
        });
        let result = result.unwrap();
        kan_events = *counter.borrow();
        assert_eq!(result.draw, Some(DrawOutcome::Exhaustive));
    }
    assert_eq!(kan_events, 1);
    assert_eq!(state.wall.num_dora_indicators(), 2);
    assert!(state.players[1].hand.melds[0].is_kan());
}
