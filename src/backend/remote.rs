//! Remote backend client (native targets)
//!
//! Speaks the HTTP/JSON contract: `GET /makebet` for the full state,
//! `POST /roll`, `POST /reset-game`, `GET /board`. Board payloads are run
//! through the same validation predicate as locally generated boards before
//! they are accepted; the session layer absorbs any error by falling back to
//! the local simulation.

use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use url::Url;

use super::{BackendError, GameBackend, GameStateResponse, RollResponse};
use crate::consts::{DICE_MAX, DICE_MIN};
use crate::sim::{Board, Cell};

/// Timeout for connections and requests
const TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for a backend implementing the game contract
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    base_url: Url,
    http: HttpClient,
}

impl RemoteBackend {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url)?;
        let http = HttpClient::builder().timeout(TIMEOUT).build()?;
        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.base_url.join(path)?)
    }

    fn checked(state: GameStateResponse) -> Result<GameStateResponse, BackendError> {
        if state.boards_valid() {
            Ok(state)
        } else {
            Err(BackendError::InvalidBoard)
        }
    }
}

impl GameBackend for RemoteBackend {
    fn fetch_state(&mut self) -> Result<GameStateResponse, BackendError> {
        let url = self.endpoint("makebet")?;
        let state = self
            .http
            .get(url)
            .send()?
            .error_for_status()?
            .json::<GameStateResponse>()?;
        Self::checked(state)
    }

    fn roll(&mut self) -> Result<RollResponse, BackendError> {
        let url = self.endpoint("roll")?;
        let response = self
            .http
            .post(url)
            .send()?
            .error_for_status()?
            .json::<RollResponse>()?;
        let (d1, d2) = response.dice_result;
        for die in [d1, d2] {
            if !(DICE_MIN..=DICE_MAX).contains(&die) {
                return Err(BackendError::Payload(format!("die out of range: {die}")));
            }
        }
        Ok(response)
    }

    fn reset(&mut self) -> Result<GameStateResponse, BackendError> {
        let url = self.endpoint("reset-game")?;
        let state = self
            .http
            .post(url)
            .send()?
            .error_for_status()?
            .json::<GameStateResponse>()?;
        Self::checked(state)
    }

    fn fetch_board(&mut self) -> Result<Board, BackendError> {
        let url = self.endpoint("board")?;
        let cells = self
            .http
            .get(url)
            .send()?
            .error_for_status()?
            .json::<Vec<Cell>>()?;
        Board::try_from_cells(&cells).ok_or(BackendError::InvalidBoard)
    }
}
