use crate::agents::{AgentKind, AgentTable};
use crate::api::{Phase, SessionSnapshot, HUMAN_SEAT, SEATS};
use crate::bidding::Trump;
use crate::cards::Card;
use crate::engine::{Move, TableEngine};
use crate::session::Session;
use crate::transport::Transport;
use tracing::{info, warn};

use super::BidEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Lobby,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    Deal,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    Pass,
    RevealKitty,
    SelectNext,
    SelectPrev,
    PlaySelected,
    BidOpen,
    BidDigit(u8),
    BidTrump(Trump),
    BidSubmit,
    BidCancel,
}

/// Everything the terminal UI shows, plus the seat agents it ticks.
#[derive(Debug)]
#[non_exhaustive]
pub struct AppState<T: Transport> {
    pub scene: Scene,
    pub session: Session<T>,
    pub agents: AgentTable,
    pub server_label: String,
    // Index into the sorted human hand
    pub selected: usize,
    bot_turn_limit: usize,
    bot_moves: usize,
    bot_paused: bool,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    bid_entry: Option<BidEntry>,
    notice: Option<String>,
}

impl<T: Transport> AppState<T> {
    pub const HISTORY_PAGE_SIZE: usize = 20;

    pub fn new(session: Session<T>, server_label: &str) -> Self {
        Self {
            scene: Scene::Lobby,
            session,
            agents: AgentTable::human_vs_bots(SEATS),
            server_label: server_label.to_string(),
            selected: 0,
            bot_turn_limit: crate::agents::DEFAULT_BOT_TURN_LIMIT,
            bot_moves: 0,
            bot_paused: false,
            help_open: false,
            history_open: false,
            history_offset: 0,
            bid_entry: None,
            notice: None,
        }
    }

    /// Cap on bot moves between two human moves.
    pub fn with_bot_turn_limit(mut self, limit: usize) -> Self {
        self.bot_turn_limit = limit;
        self
    }

    /// Pause between bot moves so the table can be followed.
    pub fn with_bot_delay_ms(mut self, delay_ms: u64) -> Self {
        self.agents.set_min_action_delay_ms(delay_ms);
        self
    }

    pub fn snapshot(&self) -> Option<&SessionSnapshot> {
        self.session.snapshot()
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub fn bid_entry(&self) -> Option<&BidEntry> {
        self.bid_entry.as_ref()
    }

    pub fn bid_entry_active(&self) -> bool {
        self.bid_entry.is_some()
    }

    /// Local hint that is not a server error (e.g. "not your turn").
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn bots_paused(&self) -> bool {
        self.bot_paused
    }

    pub fn is_bot(&self, seat: usize) -> bool {
        matches!(self.agents.agent_kind(seat), Some(AgentKind::Bot))
    }

    /// The human's cards in display order.
    pub fn human_hand(&self) -> Vec<Card> {
        self.snapshot()
            .and_then(|s| s.hand(HUMAN_SEAT))
            .map(|h| h.sorted().as_slice().to_vec())
            .unwrap_or_default()
    }

    pub fn selected_card(&self) -> Option<Card> {
        self.human_hand().get(self.selected).copied()
    }

    fn human_to_act(&self) -> bool {
        self.scene == Scene::Table && self.session.current_seat() == Some(HUMAN_SEAT)
    }

    fn phase(&self) -> Option<Phase> {
        self.snapshot().map(|s| s.phase)
    }

    fn queue_move(&mut self, mv: Move) -> bool {
        if !self.human_to_act() {
            self.notice = Some("Not your turn.".to_string());
            return false;
        }
        self.notice = None;
        self.agents.receive(HUMAN_SEAT, mv)
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::Deal => {
                self.deal();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.history_open {
                    let max_offset =
                        self.session.events_len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::Pass => {
                if self.phase() != Some(Phase::Bidding) {
                    return false;
                }
                self.queue_move(Move::Pass)
            }
            InputAction::RevealKitty => {
                if self.phase() != Some(Phase::Kitty) {
                    return false;
                }
                self.queue_move(Move::RevealKitty)
            }
            InputAction::SelectNext => {
                let n = self.human_hand().len();
                if n > 0 {
                    self.selected = (self.selected + 1) % n;
                }
                false
            }
            InputAction::SelectPrev => {
                let n = self.human_hand().len();
                if n > 0 {
                    self.selected = (self.selected + n - 1) % n;
                }
                false
            }
            InputAction::PlaySelected => {
                if self.phase() != Some(Phase::Playing) {
                    return false;
                }
                match self.selected_card() {
                    Some(card) => self.queue_move(Move::Play(card)),
                    None => false,
                }
            }
            InputAction::BidOpen => {
                if self.phase() == Some(Phase::Bidding) && self.human_to_act() {
                    self.bid_entry = Some(BidEntry::default());
                } else {
                    self.notice = Some("Not your turn to bid.".to_string());
                }
                false
            }
            InputAction::BidDigit(d) => {
                if let Some(entry) = self.bid_entry.as_mut() {
                    entry.push_digit(d);
                }
                false
            }
            InputAction::BidTrump(trump) => {
                if let Some(entry) = self.bid_entry.as_mut() {
                    entry.set_trump(trump);
                }
                false
            }
            InputAction::BidSubmit => self.bid_submit(),
            InputAction::BidCancel => {
                self.bid_entry = None;
                false
            }
        }
    }

    fn bid_submit(&mut self) -> bool {
        let high = self.snapshot().and_then(|s| s.high_bid()).copied();
        let Some(entry) = self.bid_entry.as_mut() else {
            return false;
        };
        let Some((tricks, trump)) = entry.finish(high.as_ref()) else {
            return false;
        };
        if self.queue_move(Move::Bid { tricks, trump }) {
            self.bid_entry = None;
            return true;
        }
        false
    }

    /// Deal a hand (creating the session on first use). Ignored mid-hand.
    pub fn deal(&mut self) {
        let in_progress = matches!(
            self.phase(),
            Some(Phase::Bidding | Phase::Kitty | Phase::Playing)
        );
        if in_progress {
            self.notice = Some("Finish the current hand first.".to_string());
            return;
        }
        self.notice = None;
        self.bid_entry = None;
        self.bot_moves = 0;
        self.bot_paused = false;
        self.selected = 0;
        self.history_offset = 0;
        if self.session.start().is_ok() {
            info!("hand dealt");
            self.scene = Scene::Table;
        }
    }

    /// Drive whichever seat is up: the human's queued move, or one bot move
    /// unless the bots have hit their turn limit.
    pub fn agents_on_turn(&mut self) {
        if self.scene != Scene::Table {
            return;
        }
        let Some(seat) = self.session.current_seat() else {
            return;
        };
        let bot_turn = self.is_bot(seat);
        if bot_turn && self.bot_paused {
            return;
        }
        if bot_turn && self.bot_moves >= self.bot_turn_limit {
            warn!(limit = self.bot_turn_limit, "bot turn limit reached");
            self.notice = Some("Bots stopped: too many moves in a row.".to_string());
            self.bot_paused = true;
            return;
        }
        match self.agents.on_turn(&mut self.session) {
            Ok(true) if bot_turn => self.bot_moves += 1,
            Ok(true) => {
                self.bot_moves = 0;
                self.bot_paused = false;
                let n = self.human_hand().len();
                if self.selected >= n {
                    self.selected = n.saturating_sub(1);
                }
            }
            Ok(false) => {}
            // A rejected bot move is not resent; the status line already
            // carries the server's reason.
            Err(_) if bot_turn => {
                warn!(seat, "bot move rejected, pausing bots");
                self.notice = Some("Bots stopped: the server rejected a move.".to_string());
                self.bot_paused = true;
            }
            Err(_) => {}
        }
    }
}
