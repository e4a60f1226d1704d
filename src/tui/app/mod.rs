mod bid_entry;
mod state;

pub use bid_entry::BidEntry;
pub use state::{AppState, InputAction, Scene};
