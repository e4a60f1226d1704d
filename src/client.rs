use crate::api::{
    routes, BidRequest, CreateSessionRequest, DealRequest, KittyRequest, PassRequest,
    PlayCardRequest, SessionSnapshot,
};
use crate::bidding::{Seat, Trump};
use crate::cards::Card;
use crate::transport::Transport;
use serde::Serialize;
use tracing::{debug, info};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClientError {
    #[error("could not reach the server: {0}")]
    Transport(String),
    #[error("server error {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not read the server response: {0}")]
    Decode(String),
    #[error("could not encode the request: {0}")]
    Encode(String),
    #[error("no session yet")]
    NoSession,
}

/// Thin wrapper over the server routes. Each call is one POST and returns
/// the session snapshot the server answers with.
#[derive(Debug)]
pub struct GameClient<T: Transport> {
    transport: T,
}

impl<T: Transport> GameClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn post<B: Serialize>(&mut self, path: &str, body: &B) -> Result<SessionSnapshot, ClientError> {
        let payload = serde_json::to_string(body).map_err(|e| ClientError::Encode(e.to_string()))?;
        let text = self.transport.post_json(path, &payload)?;
        let snapshot: SessionSnapshot =
            serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))?;
        debug!(path, phase = ?snapshot.phase, "snapshot received");
        Ok(snapshot)
    }

    pub fn create_session(
        &mut self,
        player_name: &str,
        seed: Option<u64>,
    ) -> Result<SessionSnapshot, ClientError> {
        let snap = self.post(
            routes::SESSION,
            &CreateSessionRequest { player_name: player_name.to_string(), seed },
        )?;
        info!(session = %snap.session_id, "session created");
        Ok(snap)
    }

    pub fn deal(&mut self, session_id: &str) -> Result<SessionSnapshot, ClientError> {
        self.post(routes::DEAL, &DealRequest { session_id: session_id.to_string() })
    }

    pub fn bid(
        &mut self,
        session_id: &str,
        seat: Seat,
        tricks: u8,
        trump: Trump,
    ) -> Result<SessionSnapshot, ClientError> {
        self.post(
            routes::BID,
            &BidRequest { session_id: session_id.to_string(), seat, tricks, trump },
        )
    }

    pub fn pass(&mut self, session_id: &str, seat: Seat) -> Result<SessionSnapshot, ClientError> {
        self.post(routes::PASS, &PassRequest { session_id: session_id.to_string(), seat })
    }

    pub fn reveal_kitty(
        &mut self,
        session_id: &str,
        seat: Seat,
    ) -> Result<SessionSnapshot, ClientError> {
        self.post(routes::KITTY, &KittyRequest { session_id: session_id.to_string(), seat })
    }

    pub fn play_card(
        &mut self,
        session_id: &str,
        seat: Seat,
        card: Card,
    ) -> Result<SessionSnapshot, ClientError> {
        self.post(routes::PLAY, &PlayCardRequest { session_id: session_id.to_string(), seat, card })
    }
}
