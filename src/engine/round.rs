//! The round controller: a single-threaded, cooperative state machine over
//! seats.
//!
//! One round runs Deal → Draw → PostDraw → Discard → Claim-window →
//! Advance until a win, an exhaustive draw, or an abortive draw. Every
//! external decision is a synchronous call-out to the consumer-supplied
//! decision function; the controller validates each returned action
//! against the enumerated legal moves and treats anything else as fatal.

use itertools::Itertools;
use log::{debug, info};

use crate::common::meld::Meld;
use crate::common::player::{other_seats_after, seat_succ, Seat, Wind};
use crate::common::tile::Tile;
use crate::common::tile_set::TileMask34;
use crate::common::typedefs::GamePoints;
use crate::common::wall::Wall;
use crate::model::action::{Action, AvailableActions};
use crate::model::event::{AbortKind, Event, EventBus};
use crate::model::hand::Hand;
use crate::model::score::ScoreResult;
use crate::model::view::{GameView, OpponentView};
use crate::rules::Ruleset;

use super::actions::{draw_actions, response_actions, RIICHI_STAKE};
use super::errors::EngineError;
use super::furiten::waiting_mask;
use super::scoring::{calculate_score, ScoreInput, WinFlags};

/// The consumer's decision function: pick one of the enumerated moves.
pub type DecideFn<'a> = dyn FnMut(Seat, &AvailableActions) -> Action + 'a;

/// Per-seat state owned by the round.
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub seat: Seat,
    pub score: GamePoints,
    pub hand: Hand,
    pub seat_wind: Wind,
    pub is_dealer: bool,
    /// Declared north tiles (three-player).
    pub north_pile: Vec<Tile>,
}

impl PlayerState {
    pub fn new(seat: Seat, score: GamePoints, seat_wind: Wind, is_dealer: bool) -> Self {
        Self { seat, score, hand: Hand::default(), seat_wind, is_dealer, north_pile: vec![] }
    }
}

/// How a round ended without a winner.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DrawOutcome {
    Exhaustive,
    Abortive(AbortKind),
}

/// The outcome of one finished round.
#[derive(Clone, Debug)]
pub struct RoundResult {
    /// Winners with their score results; empty on a draw. Multi-ron keeps
    /// them in turn order from the discarder.
    pub winners: Vec<(Seat, ScoreResult)>,
    /// The seat that dealt into a ron.
    pub loser: Option<Seat>,
    /// Net point delta per seat over the whole round, riichi sticks
    /// included.
    pub score_changes: Vec<GamePoints>,
    pub draw: Option<DrawOutcome>,
    /// Seats in tenpai at an exhaustive draw.
    pub tenpai_seats: Vec<Seat>,
    pub dealer_retains: bool,
    /// Sticks left on the table for the next round.
    pub riichi_sticks_remaining: u8,
}

impl RoundResult {
    fn new(num_players: usize) -> Self {
        Self {
            winners: vec![],
            loser: None,
            score_changes: vec![0; num_players],
            draw: None,
            tenpai_seats: vec![],
            dealer_retains: false,
            riichi_sticks_remaining: 0,
        }
    }
}

/// All state of one round in play.
pub struct RoundState {
    pub rules: Ruleset,
    pub players: Vec<PlayerState>,
    pub wall: Wall,
    pub round_wind: Wind,
    pub honba: u8,
    /// Sticks on the table (each worth 1000), carried over plus newly
    /// committed ones.
    pub riichi_sticks: u8,

    current: Seat,
    turn_count: u32,
    first_draw: Vec<bool>,
    kan_count: u8,
    is_rinshan: bool,
    is_haitei: bool,
    temp_furiten: Vec<TileMask34>,
    riichi_furiten: Vec<TileMask34>,
    /// First-go-around discard kinds for the four-winds abort; dead once
    /// any call interrupts the round.
    first_discard_winds: Vec<u8>,
    four_wind_check_live: bool,
    riichi_declared: u8,
    /// Riichi declared this discard, stick not yet committed.
    riichi_pending: Option<Seat>,
    /// Stick payments already applied to player scores mid-round, so the
    /// final settlement does not apply them twice.
    stick_deltas: Vec<GamePoints>,

    pub result: Option<RoundResult>,
}

impl RoundState {
    /// `dealer` is the seat holding east this round. Scores and carried
    /// honba/sticks come from the game wrapper.
    pub fn new(
        rules: Ruleset,
        scores: &[GamePoints],
        wall: Wall,
        dealer: Seat,
        round_wind: Wind,
        honba: u8,
        riichi_sticks: u8,
    ) -> Self {
        let n = rules.num_players;
        let players = (0..n)
            .map(|seat| {
                let wind = (seat + n - dealer) % n;
                PlayerState::new(seat, scores[seat as usize], wind, wind == 0)
            })
            .collect();
        Self {
            rules,
            players,
            wall,
            round_wind,
            honba,
            riichi_sticks,
            current: dealer,
            turn_count: 0,
            first_draw: vec![true; n as usize],
            kan_count: 0,
            is_rinshan: false,
            is_haitei: false,
            temp_furiten: vec![TileMask34::default(); n as usize],
            riichi_furiten: vec![TileMask34::default(); n as usize],
            first_discard_winds: vec![],
            four_wind_check_live: true,
            riichi_declared: 0,
            riichi_pending: None,
            stick_deltas: vec![0; n as usize],
            result: None,
        }
    }

    pub fn num_players(&self) -> u8 {
        self.rules.num_players
    }

    /// Number of live-wall draws taken so far this round.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    fn no_calls_made(&self) -> bool {
        self.players.iter().all(|p| p.hand.melds.is_empty())
    }

    /// Read-only projection for one seat.
    pub fn view_for(&self, seat: Seat) -> GameView {
        let me = &self.players[seat as usize];
        let opponents = other_seats_after(seat, self.num_players())
            .map(|other| {
                let p = &self.players[other as usize];
                OpponentView {
                    seat: other,
                    score: p.score,
                    melds: p.hand.melds.clone(),
                    discards: p.hand.discards.clone(),
                    is_riichi: p.hand.is_riichi,
                    closed_tile_count: p.hand.closed.len() as u8,
                }
            })
            .collect();
        GameView {
            seat,
            hand: me.hand.clone(),
            score: me.score,
            seat_wind: me.seat_wind,
            round_wind: self.round_wind,
            honba: self.honba,
            riichi_sticks: self.riichi_sticks,
            dora_indicators: self.wall.dora_indicators(),
            wall_remaining: self.wall.remaining(),
            opponents,
        }
    }

    // ---- deal ----

    fn deal_tiles(&mut self, events: &mut EventBus) -> Result<(), EngineError> {
        for _ in 0..13 {
            for seat in 0..self.num_players() {
                let tile = self.wall.draw().ok_or_else(|| {
                    EngineError::InvariantViolation("wall exhausted during deal".into())
                })?;
                self.players[seat as usize].hand.closed.push(tile);
            }
        }
        for player in &mut self.players {
            player.hand.sort_closed();
        }
        events.emit(Event::RoundStart {
            round_wind: self.round_wind,
            honba: self.honba,
            dora_indicators: self.wall.dora_indicators(),
        });
        Ok(())
    }

    // ---- scoring helpers ----

    fn win_flags_for(&self, seat: Seat, is_tsumo: bool, is_chankan: bool) -> WinFlags {
        let hand = &self.players[seat as usize].hand;
        let first_turn = self.first_draw[seat as usize] && self.no_calls_made();
        let is_dealer = self.players[seat as usize].is_dealer;
        WinFlags {
            is_tsumo,
            is_riichi: hand.is_riichi && !hand.is_double_riichi,
            is_double_riichi: hand.is_double_riichi,
            is_ippatsu: hand.is_ippatsu,
            is_haitei: is_tsumo && self.is_haitei && !self.is_rinshan,
            is_houtei: !is_tsumo && !is_chankan && self.wall.is_empty(),
            is_rinshan: is_tsumo && self.is_rinshan,
            is_chankan,
            is_tenhou: is_tsumo && is_dealer && first_turn,
            is_chiihou: is_tsumo && !is_dealer && first_turn,
        }
    }

    fn score_input<'a>(
        &self,
        seat: Seat,
        dora: &'a [u8],
        ura: &'a [u8],
        flags: WinFlags,
    ) -> ScoreInput<'a> {
        let player = &self.players[seat as usize];
        ScoreInput {
            seat_wind: player.seat_wind,
            round_wind: self.round_wind,
            is_dealer: player.is_dealer,
            dora_kinds: dora,
            ura_dora_kinds: ura,
            honba: self.honba,
            flags,
        }
    }

    fn score_tsumo(&self, seat: Seat) -> Option<ScoreResult> {
        let player = &self.players[seat as usize];
        let win_tile = player.hand.drawn?;
        let flags = self.win_flags_for(seat, true, false);
        let dora = self.wall.dora_kinds();
        let ura = self.wall.ura_dora_kinds();
        let input = self.score_input(seat, &dora, &ura, flags);
        calculate_score(&self.rules, &player.hand, win_tile, &input)
    }

    fn score_ron(&self, seat: Seat, win_tile: Tile, is_chankan: bool) -> Option<ScoreResult> {
        let player = &self.players[seat as usize];
        let mut hand = player.hand.clone();
        hand.closed.push(win_tile);
        hand.sort_closed();
        let flags = self.win_flags_for(seat, false, is_chankan);
        let dora = self.wall.dora_kinds();
        let ura = self.wall.ura_dora_kinds();
        let input = self.score_input(seat, &dora, &ura, flags);
        calculate_score(&self.rules, &hand, win_tile, &input)
    }

    // ---- state transitions ----

    fn process_draw(&mut self, seat: Seat, events: &mut EventBus) -> Option<Tile> {
        self.is_haitei = self.wall.remaining() == 1;
        let tile = self.wall.draw()?;
        self.players[seat as usize].hand.draw(tile);
        if !self.players[seat as usize].hand.is_riichi {
            self.temp_furiten[seat as usize] = TileMask34::default();
        }
        self.turn_count += 1;
        events.emit(Event::Draw { seat, tile, from_dead_wall: false });
        Some(tile)
    }

    fn process_replacement_draw(&mut self, seat: Seat, events: &mut EventBus) -> Option<Tile> {
        let tile = self.wall.draw_replacement()?;
        self.players[seat as usize].hand.draw(tile);
        self.is_rinshan = true;
        events.emit(Event::Draw { seat, tile, from_dead_wall: true });
        Some(tile)
    }

    fn cancel_all_ippatsu(&mut self, events: &mut EventBus) {
        for seat in 0..self.num_players() {
            let hand = &mut self.players[seat as usize].hand;
            if hand.is_ippatsu {
                hand.is_ippatsu = false;
                events.emit(Event::IppatsuCancelled { seat });
            }
        }
    }

    fn process_discard(&mut self, seat: Seat, tile: Tile, events: &mut EventBus)
        -> Result<(), EngineError> {
        let declaring_riichi = self.riichi_pending == Some(seat);
        let hand = &mut self.players[seat as usize].hand;
        let was_riichi = hand.is_riichi && !declaring_riichi;
        let is_tsumogiri = hand.drawn == Some(tile);
        if !hand.discard(tile, is_tsumogiri) {
            return Err(EngineError::InvariantViolation(format!(
                "seat {} discarding {} not in hand", seat, tile
            )));
        }
        self.is_rinshan = false;

        // Ippatsu expires with the seat's next discard after the riichi
        // one; the declaring discard itself keeps it alive.
        if was_riichi {
            let hand = &mut self.players[seat as usize].hand;
            if hand.is_ippatsu {
                hand.is_ippatsu = false;
                events.emit(Event::IppatsuCancelled { seat });
            }
        }

        // First-go-around discard bookkeeping for the four-winds abort.
        if self.four_wind_check_live
            && self.players[seat as usize].hand.discards.len() == 1
            && self.no_calls_made()
        {
            self.first_discard_winds.push(tile.kind());
        }
        self.first_draw[seat as usize] = false;

        events.emit(Event::Discard { seat, tile, is_tsumogiri });
        Ok(())
    }

    fn declare_riichi(&mut self, seat: Seat, events: &mut EventBus) {
        let double = self.first_draw[seat as usize] && self.no_calls_made();
        let hand = &mut self.players[seat as usize].hand;
        hand.is_riichi = true;
        hand.is_double_riichi = double;
        hand.is_ippatsu = true;
        hand.riichi_discard_index = Some(hand.discards.len());
        self.riichi_declared += 1;
        self.riichi_pending = Some(seat);
        events.emit(Event::RiichiDeclared { seat, double });
    }

    /// The 1000-point stick changes hands only once the declaring discard
    /// has survived the claim window.
    fn commit_pending_riichi(&mut self, result_changes: &mut [GamePoints]) {
        if let Some(seat) = self.riichi_pending.take() {
            self.players[seat as usize].score -= RIICHI_STAKE;
            self.stick_deltas[seat as usize] -= RIICHI_STAKE;
            result_changes[seat as usize] -= RIICHI_STAKE;
            self.riichi_sticks += 1;
            debug!("seat {} riichi stick committed", seat);
        }
    }

    fn take_for_call(&mut self, seat: Seat, count: usize, kind: u8) -> Result<(), EngineError> {
        self.players[seat as usize]
            .hand
            .take_kind(kind, count)
            .map(|_| ())
            .ok_or_else(|| {
                EngineError::InvariantViolation(format!(
                    "seat {} lacks {} copies of kind {} for a call", seat, count, kind
                ))
            })
    }

    /// Claim a discard as a pon or chii.
    fn apply_meld(&mut self, seat: Seat, meld: Meld, events: &mut EventBus)
        -> Result<(), EngineError> {
        let kind = meld.base_kind();
        match &meld {
            Meld::Pon { .. } => self.take_for_call(seat, 2, kind)?,
            Meld::Chii { tiles, called, .. } => {
                for tile in *tiles {
                    if tile.kind() != called.kind() {
                        self.take_for_call(seat, 1, tile.kind())?;
                    }
                }
            }
            _ => {
                return Err(EngineError::InvariantViolation(
                    "apply_meld only claims pon/chii".into(),
                ))
            }
        }
        self.players[seat as usize].hand.add_meld(meld.clone());
        self.four_wind_check_live = false;
        events.emit(Event::Call { seat, meld });
        Ok(())
    }

    /// Claim a discard as an open kan: new dora is revealed immediately.
    fn process_open_kan(&mut self, seat: Seat, meld: Meld, events: &mut EventBus)
        -> Result<(), EngineError> {
        self.take_for_call(seat, 3, meld.base_kind())?;
        self.players[seat as usize].hand.add_meld(meld.clone());
        self.four_wind_check_live = false;
        self.kan_count += 1;
        self.wall.reveal_dora();
        let indicator = *self.wall.dora_indicators().last().unwrap();
        events.emit(Event::Kan { seat, meld, new_dora_indicator: indicator });
        Ok(())
    }

    fn process_closed_kan(&mut self, seat: Seat, kind: u8, events: &mut EventBus)
        -> Result<(), EngineError> {
        let hand = &mut self.players[seat as usize].hand;
        let tiles = hand.take_kind(kind, 4).ok_or_else(|| {
            EngineError::InvariantViolation(format!(
                "seat {} closed kan on kind {} without four copies", seat, kind
            ))
        })?;
        let meld = Meld::Ankan { tiles: [tiles[0], tiles[1], tiles[2], tiles[3]] };
        hand.add_meld(meld.clone());
        self.kan_count += 1;
        self.wall.reveal_dora();
        self.cancel_all_ippatsu(events);
        let indicator = *self.wall.dora_indicators().last().unwrap();
        events.emit(Event::Kan { seat, meld, new_dora_indicator: indicator });
        Ok(())
    }

    fn process_added_kan(&mut self, seat: Seat, tile: Tile, events: &mut EventBus)
        -> Result<(), EngineError> {
        let hand = &mut self.players[seat as usize].hand;
        let pos = hand.closed.iter().position(|&t| t == tile).ok_or_else(|| {
            EngineError::InvariantViolation(format!(
                "seat {} added kan on {} not in hand", seat, tile
            ))
        })?;
        hand.closed.remove(pos);
        hand.drawn = None;
        let slot = hand
            .melds
            .iter_mut()
            .find(|m| matches!(m, Meld::Pon { tiles, .. } if tiles[0].kind() == tile.kind()))
            .ok_or_else(|| {
                EngineError::InvariantViolation(format!(
                    "seat {} added kan on {} without a pon", seat, tile
                ))
            })?;
        let Meld::Pon { tiles, called, from } = slot.clone() else { unreachable!() };
        let meld = Meld::Kakan { tiles: [tiles[0], tiles[1], tiles[2], tile], called, from };
        *slot = meld.clone();
        self.kan_count += 1;
        self.wall.reveal_dora();
        self.cancel_all_ippatsu(events);
        let indicator = *self.wall.dora_indicators().last().unwrap();
        events.emit(Event::Kan { seat, meld, new_dora_indicator: indicator });
        Ok(())
    }

    fn process_north_declare(&mut self, seat: Seat, events: &mut EventBus)
        -> Result<(), EngineError> {
        let hand = &mut self.players[seat as usize].hand;
        let tiles = hand.take_kind(30, 1).ok_or_else(|| {
            EngineError::InvariantViolation(format!("seat {} has no north tile", seat))
        })?;
        hand.drawn = None;
        self.players[seat as usize].north_pile.push(tiles[0]);
        events.emit(Event::NorthDeclare { seat });
        Ok(())
    }

    /// Missed-win bookkeeping after an unclaimed discard: a seat whose
    /// waiting set contains the tile enters temporary furiten, promoted to
    /// the riichi lock when the seat is under riichi.
    fn record_missed_waits(&mut self, discarder: Seat, tile: Tile) {
        for seat in other_seats_after(discarder, self.num_players()) {
            let hand = &self.players[seat as usize].hand;
            let waits = waiting_mask(&hand.counts_without_drawn());
            if waits.has(tile.kind()) {
                self.temp_furiten[seat as usize].set(tile.kind());
                if hand.is_riichi {
                    self.riichi_furiten[seat as usize].set(tile.kind());
                }
            }
        }
    }

    // ---- terminal assembly ----

    fn tenpai_seats(&self) -> Vec<Seat> {
        (0..self.num_players())
            .filter(|&seat| {
                let h = self.players[seat as usize].hand.counts_without_drawn();
                !crate::analysis::decomp::waiting_kinds(&h).is_empty()
            })
            .collect()
    }

    fn finish_exhaustive(&mut self, mut result: RoundResult, events: &mut EventBus) {
        let tenpai = self.tenpai_seats();
        let noten: Vec<Seat> = (0..self.num_players())
            .filter(|s| !tenpai.contains(s))
            .collect();

        if !tenpai.is_empty() && !noten.is_empty() {
            let pay = 3000 / noten.len() as GamePoints;
            let receive = 3000 / tenpai.len() as GamePoints;
            for &seat in &noten {
                result.score_changes[seat as usize] -= pay;
            }
            for &seat in &tenpai {
                result.score_changes[seat as usize] += receive;
            }
        }

        result.draw = Some(DrawOutcome::Exhaustive);
        result.dealer_retains = tenpai
            .iter()
            .any(|&s| self.players[s as usize].is_dealer);
        result.tenpai_seats = tenpai.clone();
        events.emit(Event::ExhaustiveDraw { tenpai_seats: tenpai });
        self.finish(result, events);
    }

    fn finish_abortive(&mut self, mut result: RoundResult, kind: AbortKind, events: &mut EventBus) {
        result.draw = Some(DrawOutcome::Abortive(kind));
        result.dealer_retains = true;
        events.emit(Event::AbortiveDraw { kind });
        self.finish(result, events);
    }

    fn finish_tsumo(
        &mut self,
        seat: Seat,
        score: ScoreResult,
        mut result: RoundResult,
        events: &mut EventBus,
    ) {
        for other in other_seats_after(seat, self.num_players()) {
            let payment = if self.players[other as usize].is_dealer {
                score.dealer_payment
            } else {
                score.non_dealer_payment
            };
            result.score_changes[other as usize] -= payment;
            result.score_changes[seat as usize] += payment;
        }
        result.score_changes[seat as usize] += self.riichi_sticks as GamePoints * 1000;
        self.riichi_sticks = 0;
        result.dealer_retains = self.players[seat as usize].is_dealer;
        events.emit(Event::Win { seat, from: seat, score: Box::new(score.clone()) });
        result.winners.push((seat, score));
        self.finish(result, events);
    }

    fn finish_ron(
        &mut self,
        winners: Vec<(Seat, ScoreResult)>,
        discarder: Seat,
        mut result: RoundResult,
        events: &mut EventBus,
    ) {
        for (seat, score) in &winners {
            result.score_changes[*seat as usize] += score.ron_payment;
            result.score_changes[discarder as usize] -= score.ron_payment;
            events.emit(Event::Win {
                seat: *seat,
                from: discarder,
                score: Box::new(score.clone()),
            });
        }
        // Head bump: the pot goes to the winner nearest the discarder in
        // turn order.
        let head = other_seats_after(discarder, self.num_players())
            .find(|s| winners.iter().any(|(w, _)| w == s))
            .unwrap_or(winners[0].0);
        result.score_changes[head as usize] += self.riichi_sticks as GamePoints * 1000;
        self.riichi_sticks = 0;
        result.dealer_retains = winners
            .iter()
            .any(|(s, _)| self.players[*s as usize].is_dealer);
        result.loser = Some(discarder);
        result.winners = winners;
        self.finish(result, events);
    }

    fn finish(&mut self, mut result: RoundResult, events: &mut EventBus) {
        // Stick payments already hit the scores mid-round; apply only the
        // remainder of each seat's reported delta.
        for seat in 0..self.num_players() as usize {
            self.players[seat].score += result.score_changes[seat] - self.stick_deltas[seat];
        }
        result.riichi_sticks_remaining = self.riichi_sticks;
        events.emit(Event::RoundEnd { score_changes: result.score_changes.clone() });
        info!("round over: {:?}", result.draw);
        self.result = Some(result);
    }
}

// ---- claim gathering ----

enum Claim {
    Ron(ScoreResult),
    Meld(Action),
}

/// Drive one full round. `decide` is consulted at every decision point and
/// must return an action from the offered menu.
pub fn run_round(
    state: &mut RoundState,
    events: &mut EventBus,
    decide: &mut DecideFn<'_>,
) -> Result<RoundResult, EngineError> {
    state.deal_tiles(events)?;
    let mut result = RoundResult::new(state.num_players() as usize);

    let mut need_draw = true;
    // After a sequence/triplet call the claimant discards with no draw.
    let mut forced_discard = false;

    loop {
        if state.is_finished() {
            break;
        }
        let seat = state.current;

        if need_draw {
            if state.wall.is_empty() {
                state.finish_exhaustive(result, events);
                break;
            }
            if state.process_draw(seat, events).is_none() {
                state.finish_exhaustive(result, events);
                break;
            }
        }
        need_draw = true;

        // ---- PostDraw ----
        let available = if forced_discard {
            let mut menu = AvailableActions::new(seat);
            menu.discards = state.players[seat as usize]
                .hand
                .closed
                .iter()
                .copied()
                .sorted()
                .dedup_by(|a, b| a.kind() == b.kind() && a.is_red() == b.is_red())
                .collect();
            menu
        } else {
            let player = &state.players[seat as usize];
            draw_actions(
                &state.rules,
                seat,
                &player.hand,
                player.score,
                state.wall.remaining(),
                state.first_draw[seat as usize] && state.no_calls_made(),
            )
        };
        forced_discard = false;

        let action = decide(seat, &available);
        if !available.allows(&action) {
            return Err(EngineError::illegal(seat, action, available));
        }

        let discard_tile = match action {
            Action::Win => {
                let Some(score) = state.score_tsumo(seat) else {
                    return Err(EngineError::illegal(seat, Action::Win, available));
                };
                state.finish_tsumo(seat, score, result, events);
                break;
            }
            Action::NineTerminalsAbort => {
                state.finish_abortive(result, AbortKind::NineTerminals, events);
                break;
            }
            Action::ClosedKan(kind) => {
                state.process_closed_kan(seat, kind, events)?;
                if state.process_replacement_draw(seat, events).is_none() {
                    state.finish_exhaustive(result, events);
                    break;
                }
                if let Some(kind) = four_kan_abort(state) {
                    state.finish_abortive(result, kind, events);
                    break;
                }
                need_draw = false;
                continue;
            }
            Action::AddedKan(tile) => {
                // Robbing-the-kan window, before the tiles move.
                let robbers = gather_chankan(state, seat, tile, decide)?;
                if !robbers.is_empty() {
                    state.finish_ron(robbers, seat, result, events);
                    break;
                }
                state.process_added_kan(seat, tile, events)?;
                if state.process_replacement_draw(seat, events).is_none() {
                    state.finish_exhaustive(result, events);
                    break;
                }
                if let Some(kind) = four_kan_abort(state) {
                    state.finish_abortive(result, kind, events);
                    break;
                }
                need_draw = false;
                continue;
            }
            Action::NorthDeclare => {
                state.process_north_declare(seat, events)?;
                if state.process_replacement_draw(seat, events).is_none() {
                    state.finish_exhaustive(result, events);
                    break;
                }
                need_draw = false;
                continue;
            }
            Action::Riichi(tile) => {
                state.declare_riichi(seat, events);
                tile
            }
            Action::Discard(tile) => tile,
            other => {
                return Err(EngineError::illegal(seat, other, available));
            }
        };

        // ---- Discard ----
        state.process_discard(seat, discard_tile, events)?;

        // ---- Claim window: gather every seat's intent, then resolve ----
        let claims = gather_claims(state, seat, discard_tile, decide)?;

        let rons: Vec<(Seat, ScoreResult)> = claims
            .iter()
            .filter_map(|(s, c)| match c {
                Claim::Ron(score) => Some((*s, score.clone())),
                _ => None,
            })
            .collect();

        if !rons.is_empty() {
            state.players[seat as usize].hand.mark_last_discard_claimed();
            if rons.len() >= 3 && !state.rules.three_player() {
                state.finish_abortive(result, AbortKind::TripleRon, events);
            } else {
                state.finish_ron(rons, seat, result, events);
            }
            break;
        }

        // The declaring discard survived: the stick is paid now, so a
        // later multi-ron can never double-charge it.
        state.commit_pending_riichi(&mut result.score_changes);

        // Seats that let a waiting tile pass are furiten until their next
        // draw (or for good, under riichi).
        state.record_missed_waits(seat, discard_tile);

        let meld_claim = resolve_meld_claim(claims);
        if let Some((claimant, action)) = meld_claim {
            state.cancel_all_ippatsu(events);
            state.players[seat as usize].hand.mark_last_discard_claimed();

            match action {
                Action::OpenKan(meld) => {
                    state.process_open_kan(claimant, meld, events)?;
                    if state.process_replacement_draw(claimant, events).is_none() {
                        state.finish_exhaustive(result, events);
                        break;
                    }
                    if let Some(kind) = four_kan_abort(state) {
                        state.finish_abortive(result, kind, events);
                        break;
                    }
                    state.current = claimant;
                    need_draw = false;
                }
                Action::Triplet(meld) | Action::Sequence(meld) => {
                    state.apply_meld(claimant, meld, events)?;
                    state.current = claimant;
                    need_draw = false;
                    forced_discard = true;
                }
                _ => unreachable!(),
            }
            continue;
        }

        // ---- Advance ----
        if let Some(kind) = no_claim_abort(state) {
            state.finish_abortive(result, kind, events);
            break;
        }
        state.current = seat_succ(seat, state.num_players());
        need_draw = true;
    }

    state
        .result
        .clone()
        .ok_or_else(|| EngineError::InvariantViolation("round ended without a result".into()))
}

/// One query per seat with its full claim menu, in turn order from the
/// discarder.
fn gather_claims(
    state: &RoundState,
    discarder: Seat,
    tile: Tile,
    decide: &mut DecideFn<'_>,
) -> Result<Vec<(Seat, Claim)>, EngineError> {
    let mut claims = vec![];
    for seat in other_seats_after(discarder, state.num_players()) {
        let seat_i = seat as usize;
        let hand = &state.players[seat_i].hand;
        let available = response_actions(
            &state.rules,
            seat,
            hand,
            tile,
            discarder,
            state.wall.remaining(),
            state.temp_furiten[seat_i],
            state.riichi_furiten[seat_i],
            || state.score_ron(seat, tile, false).is_some(),
        );
        if !available.has_claim() {
            continue;
        }
        let action = decide(seat, &available);
        if !available.allows(&action) {
            return Err(EngineError::illegal(seat, action, available));
        }
        match action {
            Action::Win => {
                let score = state.score_ron(seat, tile, false).ok_or_else(|| {
                    EngineError::InvariantViolation(format!(
                        "offered ron for seat {} scored no yaku", seat
                    ))
                })?;
                claims.push((seat, Claim::Ron(score)));
            }
            meld @ (Action::Triplet(_) | Action::OpenKan(_) | Action::Sequence(_)) => {
                claims.push((seat, Claim::Meld(meld)));
            }
            Action::Skip => {}
            _ => unreachable!("allows() filtered the menu"),
        }
    }
    Ok(claims)
}

/// Ron-only window against an added kan.
fn gather_chankan(
    state: &RoundState,
    kan_seat: Seat,
    tile: Tile,
    decide: &mut DecideFn<'_>,
) -> Result<Vec<(Seat, ScoreResult)>, EngineError> {
    let mut winners = vec![];
    for seat in other_seats_after(kan_seat, state.num_players()) {
        let seat_i = seat as usize;
        let hand = &state.players[seat_i].hand;
        let counts = hand.counts_without_drawn();
        let mut test = counts;
        test[tile] += 1;
        if !crate::analysis::decomp::is_agari(&test) {
            continue;
        }
        let waits = waiting_mask(&counts);
        if super::furiten::ron_blocked(
            hand,
            waits,
            state.temp_furiten[seat_i],
            state.riichi_furiten[seat_i],
        ) {
            continue;
        }
        let Some(score) = state.score_ron(seat, tile, true) else {
            continue;
        };
        let mut menu = AvailableActions::new(seat);
        menu.can_ron = true;
        let action = decide(seat, &menu);
        if !menu.allows(&action) {
            return Err(EngineError::illegal(seat, action, menu));
        }
        if action == Action::Win {
            winners.push((seat, score));
        }
    }
    Ok(winners)
}

/// Priority: triplet/open kan over sequence; earliest seat in turn order
/// wins ties (the claims arrive already ordered from the discarder).
fn resolve_meld_claim(claims: Vec<(Seat, Claim)>) -> Option<(Seat, Action)> {
    let melds: Vec<(Seat, Action)> = claims
        .into_iter()
        .filter_map(|(s, c)| match c {
            Claim::Meld(action) => Some((s, action)),
            _ => None,
        })
        .collect();
    melds
        .iter()
        .find(|(_, a)| matches!(a, Action::Triplet(_) | Action::OpenKan(_)))
        .cloned()
        .or_else(|| {
            melds
                .iter()
                .find(|(_, a)| matches!(a, Action::Sequence(_)))
                .cloned()
        })
}

/// Four kans spread over two or more seats abort the round; four by one
/// seat keep it alive toward the four-kan yakuman.
fn four_kan_abort(state: &RoundState) -> Option<AbortKind> {
    if state.kan_count < 4 {
        return None;
    }
    let kan_seats = state
        .players
        .iter()
        .filter(|p| p.hand.melds.iter().any(|m| m.is_kan()))
        .count();
    (kan_seats >= 2).then_some(AbortKind::FourKans)
}

/// Aborts checked once a discard goes unclaimed.
fn no_claim_abort(state: &RoundState) -> Option<AbortKind> {
    // Four identical wind first-discards in an uninterrupted first
    // go-around.
    if state.four_wind_check_live
        && state.first_discard_winds.len() == state.num_players() as usize
    {
        let first = state.first_discard_winds[0];
        if (27..=30).contains(&first)
            && state.first_discard_winds.iter().all(|&k| k == first)
        {
            return Some(AbortKind::FourWinds);
        }
    }
    if state.riichi_declared >= state.num_players() {
        return Some(AbortKind::FourRiichi);
    }
    if let Some(kind) = four_kan_abort(state) {
        return Some(kind);
    }
    None
}
