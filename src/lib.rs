//! five-hundred-rs: a terminal client for the card game 500
//!
//! Goals:
//! - Mirror the rules server's session snapshots as typed data
//! - Keep every network call sequential and every failure visible
//! - Provide scripted opponents for the three non-human seats
//!
//! The rules themselves (dealing, bid resolution, trick winners, scoring)
//! live on the backend. This crate only sends moves and renders what comes
//! back.
//!
//! ## Quick start: pick a bid for a hand
//! ```
//! use five_hundred::bidding::{choose_bid, Trump};
//! use five_hundred::cards::parse_cards;
//! use five_hundred::hand::Hand;
//!
//! let hand = Hand::new(parse_cards("Jk Ah Kh Qh Jh 10h 9h As Kc 5d").unwrap());
//! let bid = choose_bid(&hand, None, 1).expect("strong hearts should bid");
//! assert_eq!(bid.trump, Trump::Hearts);
//! ```
//!
//! ## TUI
//! Run the interactive client with:
//! ```sh
//! FIVE_HUNDRED_URL=http://127.0.0.1:8080 cargo run --bin five-hundred
//! ```

pub mod agents;
pub mod api;
pub mod bidding;
pub mod cards;
pub mod client;
pub mod config;
pub mod deck;
pub mod engine;
pub mod hand;
pub mod session;
pub mod transport;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
