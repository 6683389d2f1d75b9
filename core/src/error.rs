use thiserror::Error;

use crate::types::TOTAL_CELLS;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Cell index out of range")]
    IndexOutOfRange,
    #[error("Board is locked, goals can no longer be changed")]
    BoardLocked,
    #[error("Board is not locked yet, goals cannot be tagged")]
    BoardUnlocked,
    #[error("Only {filled} of {TOTAL_CELLS} goals are filled in, complete the board before locking")]
    IncompleteBoard { filled: usize },
    #[error("A board with that name already exists")]
    NameTaken,
}

pub type Result<T> = core::result::Result<T, BoardError>;

/// Failure of any stage of the share-link pipeline. Decoding never touches
/// board state, so a bad link degrades to a notice and nothing else.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not valid percent-encoded text: {0}")]
    Encoding(#[from] core::str::Utf8Error),
    #[error("payload is not a valid board: {0}")]
    Json(#[from] serde_json::Error),
}
