use crate::bidding::{contract_value, Bid, Trump, MAX_TRICKS, MIN_TRICKS};

/// Bid being composed in the entry overlay: a trick count and a trump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BidEntry {
    tricks: Option<u8>,
    trump: Option<Trump>,
    error: Option<String>,
}

impl BidEntry {
    pub fn tricks(&self) -> Option<u8> {
        self.tricks
    }

    pub fn trump(&self) -> Option<Trump> {
        self.trump
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `6`..`9` set that many tricks; `0` means ten.
    pub fn push_digit(&mut self, digit: u8) {
        let tricks = if digit == 0 { 10 } else { digit };
        if (MIN_TRICKS..=MAX_TRICKS).contains(&tricks) {
            self.tricks = Some(tricks);
            self.error = None;
        } else {
            self.error = Some(format!("Tricks must be {MIN_TRICKS}-{MAX_TRICKS}"));
        }
    }

    pub fn set_trump(&mut self, trump: Trump) {
        self.trump = Some(trump);
        self.error = None;
    }

    pub fn text(&self) -> String {
        let tricks = self.tricks.map(|t| t.to_string()).unwrap_or_else(|| "_".to_string());
        let trump = self.trump.map(|t| t.label()).unwrap_or("_");
        format!("{tricks}{trump}")
    }

    /// Validate against the standing high bid; on failure the reason is kept
    /// for display.
    pub fn finish(&mut self, high_bid: Option<&Bid>) -> Option<(u8, Trump)> {
        let (Some(tricks), Some(trump)) = (self.tricks, self.trump) else {
            self.error = Some("Pick tricks (6-9, 0=10) and a trump (s/c/d/h/n)".to_string());
            return None;
        };
        if let Some(high) = high_bid {
            if contract_value(tricks, trump) <= high.value() {
                self.error = Some(format!("Must beat {high} ({} points)", high.value()));
                return None;
            }
        }
        Some((tricks, trump))
    }
}
