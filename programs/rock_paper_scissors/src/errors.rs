use anchor_lang::prelude::*;

// Codes are numbered from 6000 in declaration order and are part of the wire
// contract consumed by clients. Append new variants at the end only.
#[error_code]
pub enum RockPaperScissorsError {
    #[msg("Custom error message")]
    CustomError,
    #[msg("Account is not a player in the game")]
    AccountIsNotAPlayerInTheGame,
    #[msg("Invalid game state")]
    InvalidGameState,
    #[msg("Invalid player")]
    InvalidPlayer,
    #[msg("Invalid hash")]
    InvalidHash,
    #[msg("Both players can't be the same")]
    BothPlayersCantBeTheSame,
    #[msg("Game is not stale")]
    GameIsNotStale,
    #[msg("Player already revealed")]
    PlayerAlreadyRevealed,
    #[msg("Numeric overflow")]
    NumericOverflow,
    #[msg("Unauthorized")]
    Unauthorized,
}
