//! Agents: who acts for each seat.
//!
//! `PlayerAgent` is the seat controller trait; `AgentTable` maps seats to
//! agents and drives the one whose turn the server reports. UIs only queue
//! human moves and tick the table, so no bot logic leaks into them.

use crate::bidding::Seat;
use crate::client::ClientError;
use crate::engine::{Move, TableEngine};
use core::fmt;
use std::time::{Duration, Instant};
use tracing::warn;

/// Default ceiling on consecutive bot moves in one `run_bots` call.
pub const DEFAULT_BOT_TURN_LIMIT: usize = 64;

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// A seat controller that can act for a player when it is their turn.
pub trait PlayerAgent {
    /// Called when `seat` may be the current actor. Returns whether a move
    /// was sent.
    fn on_turn(&mut self, engine: &mut dyn TableEngine, seat: Seat) -> Result<bool, ClientError>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally receive a queued move; default is to ignore and return false.
    fn receive(&mut self, _mv: Move) -> bool {
        false
    }
}

mod bots;

pub use bots::{choose_play, BotAgent};

/// Sends the move the user queued once the server says it is their turn.
pub struct HumanAgent {
    pending: Option<Move>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }
}

impl Default for HumanAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn receive(&mut self, mv: Move) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(mv);
        true
    }
    fn on_turn(&mut self, engine: &mut dyn TableEngine, seat: Seat) -> Result<bool, ClientError> {
        if engine.current_seat() != Some(seat) {
            return Ok(false);
        }
        match self.pending.take() {
            Some(mv) => engine.submit(seat, mv).map(|_| true),
            None => Ok(false),
        }
    }
}

/// One optional agent per seat; drives whichever seat the server says is up.
pub struct AgentTable {
    seats: Vec<Option<Box<dyn PlayerAgent>>>,
    min_action_delay: Duration,
    next_action_at: Option<Instant>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Bot) => 'B',
                Some(AgentKind::Human) => 'H',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl AgentTable {
    /// Create a table with `n` seats, all empty.
    pub fn for_seats(n: usize) -> Self {
        let mut seats = Vec::with_capacity(n);
        seats.resize_with(n, || None);
        Self { seats, min_action_delay: Duration::ZERO, next_action_at: None }
    }

    /// Seat 0 human, every other seat a bot.
    pub fn human_vs_bots(n: usize) -> Self {
        let mut table = Self::for_seats(n);
        table.set_agent(0, Some(Box::new(HumanAgent::new())));
        for seat in 1..n {
            table.set_agent(seat, Some(Box::new(BotAgent::new())));
        }
        table
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: Seat, agent: Option<Box<dyn PlayerAgent>>) {
        if seat >= self.seats.len() {
            self.seats.resize_with(seat + 1, || None);
        }
        self.seats[seat] = agent;
    }

    /// Return the kind of agent at a seat, if any.
    pub fn agent_kind(&self, seat: Seat) -> Option<AgentKind> {
        self.seats.get(seat).and_then(|a| a.as_deref().map(|ag| ag.kind()))
    }

    /// Send a move intent to a specific seat agent, if any.
    pub fn receive(&mut self, seat: Seat, mv: Move) -> bool {
        if let Some(Some(agent)) = self.seats.get_mut(seat) {
            return agent.receive(mv);
        }
        false
    }

    /// Set a global minimum delay between bot moves at the table.
    pub fn set_min_action_delay_ms(&mut self, delay_ms: u64) {
        self.min_action_delay = Duration::from_millis(delay_ms);
    }

    /// Drive the agent assigned to the current seat, if any. Bots wait out
    /// the table delay between moves.
    pub fn on_turn(&mut self, engine: &mut dyn TableEngine) -> Result<bool, ClientError> {
        let Some(seat) = engine.current_seat() else {
            return Ok(false);
        };
        let Some(Some(agent)) = self.seats.get_mut(seat) else {
            return Ok(false);
        };
        let is_bot = matches!(agent.kind(), AgentKind::Bot);
        let now = Instant::now();
        if is_bot {
            if let Some(next) = self.next_action_at {
                if now < next {
                    return Ok(false);
                }
            }
        }
        let acted = agent.on_turn(engine, seat)?;
        if acted && self.min_action_delay > Duration::ZERO {
            self.next_action_at = Some(now + self.min_action_delay);
        }
        Ok(acted)
    }

    /// Let bots play until a human is to act, the hand stops, a bot
    /// declines, or `limit` moves have been made. Returns the number of
    /// moves sent.
    pub fn run_bots(
        &mut self,
        engine: &mut dyn TableEngine,
        limit: usize,
    ) -> Result<usize, ClientError> {
        let mut moves = 0;
        while let Some(seat) = engine.current_seat() {
            let Some(Some(agent)) = self.seats.get_mut(seat) else {
                break;
            };
            if !matches!(agent.kind(), AgentKind::Bot) {
                break;
            }
            if moves >= limit {
                warn!(limit, seat, "bot turn limit reached");
                break;
            }
            if !agent.on_turn(engine, seat)? {
                break;
            }
            moves += 1;
        }
        Ok(moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SessionSnapshot;

    /// Engine that accepts every move and never advances.
    struct Stuck {
        snap: SessionSnapshot,
        sent: Vec<(Seat, Move)>,
    }

    impl TableEngine for Stuck {
        fn snapshot(&self) -> Option<&SessionSnapshot> {
            Some(&self.snap)
        }
        fn submit(&mut self, seat: Seat, mv: Move) -> Result<(), ClientError> {
            self.sent.push((seat, mv));
            Ok(())
        }
    }

    fn stuck_on(seat: Seat) -> Stuck {
        let card = serde_json::json!({"suit": "spades", "rank": "A", "isJoker": false});
        let json = serde_json::json!({
            "sessionId": "s",
            "phase": "kitty",
            "hands": [[card], [card], [card], [card]],
            "bidding": {
                "dealer": 0,
                "currentSeat": 0,
                "highBid": {"seat": seat, "tricks": 6, "trump": "spades"},
                "completed": true
            }
        });
        Stuck { snap: serde_json::from_value(json).unwrap(), sent: Vec::new() }
    }

    #[test]
    fn run_bots_stops_at_limit() {
        let mut engine = stuck_on(2);
        let mut table = AgentTable::human_vs_bots(4);
        let moves = table.run_bots(&mut engine, 5).unwrap();
        assert_eq!(moves, 5);
        assert_eq!(engine.sent.len(), 5);
        assert!(engine.sent.iter().all(|(s, m)| *s == 2 && *m == Move::RevealKitty));
    }

    #[test]
    fn run_bots_yields_to_human() {
        let mut engine = stuck_on(0);
        let mut table = AgentTable::human_vs_bots(4);
        assert_eq!(table.run_bots(&mut engine, 10).unwrap(), 0);
        assert!(engine.sent.is_empty());
    }

    #[test]
    fn exhausted_limit_still_yields_to_human() {
        let mut engine = stuck_on(0);
        let mut table = AgentTable::human_vs_bots(4);
        assert_eq!(table.run_bots(&mut engine, 0).unwrap(), 0);
        let mut engine = stuck_on(3);
        assert_eq!(table.run_bots(&mut engine, 0).unwrap(), 0);
        assert!(engine.sent.is_empty());
    }

    #[test]
    fn human_sends_queued_move_once() {
        let mut engine = stuck_on(0);
        let mut human = HumanAgent::new();
        assert!(human.receive(Move::RevealKitty));
        assert!(!human.receive(Move::Pass), "only one move may be queued");
        assert!(human.on_turn(&mut engine, 0).unwrap());
        assert!(!human.on_turn(&mut engine, 0).unwrap());
        assert_eq!(engine.sent, vec![(0, Move::RevealKitty)]);
    }

    #[test]
    fn delay_throttles_bots() {
        let mut engine = stuck_on(1);
        let mut table = AgentTable::human_vs_bots(4);
        table.set_min_action_delay_ms(10_000);
        assert!(table.on_turn(&mut engine).unwrap());
        assert!(!table.on_turn(&mut engine).unwrap(), "second move waits for the delay");
    }

    #[test]
    fn debug_shows_seat_kinds() {
        let table = AgentTable::human_vs_bots(4);
        assert_eq!(format!("{table:?}"), "AgentTable(HBBB)");
    }
}
