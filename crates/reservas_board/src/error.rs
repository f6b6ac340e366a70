// --- File: crates/reservas_board/src/error.rs ---
use thiserror::Error;

pub const LOGIN_REQUIRED_MESSAGE: &str = "Por favor, faça login com Google primeiro!";

/// Errors surfaced to the person using the board.
#[derive(Error, Debug)]
pub enum BoardError {
    /// No session; raised before any gateway call
    #[error("Por favor, faça login com Google primeiro!")]
    NotAuthenticated,

    /// Form input rejected locally
    #[error("{0}")]
    Validation(String),

    /// The chosen slot is already taken in the cached list
    #[error("{0}")]
    SlotTaken(String),

    #[error("Você só pode cancelar suas próprias reservas")]
    NotOwner,

    #[error("Reserva não encontrada: {0}")]
    UnknownReservation(String),

    /// Error body returned by the gateway
    #[error("{message}")]
    Gateway { status_code: u16, message: String },

    #[error("Falha de comunicação com o servidor: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Resposta inválida do servidor: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BoardError {
    /// Whether the gateway no longer accepts the session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            BoardError::NotAuthenticated | BoardError::Gateway { status_code: 401, .. }
        )
    }
}
