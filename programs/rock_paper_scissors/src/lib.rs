use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod instructions;
pub mod state;
pub mod utils;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

use solana_security_txt::security_txt;

security_txt! {
    // Required fields
    name: "Rock Paper Scissors Escrow",
    project_url: "https://github.com/rps-escrow/rock-paper-scissors",
    contacts: "link:https://github.com/rps-escrow/rock-paper-scissors/issues",
    policy: "https://github.com/rps-escrow/rock-paper-scissors/blob/main/SECURITY.md",

    // Optional fields
    preferred_languages: "en",
    source_code: "https://github.com/rps-escrow/rock-paper-scissors"
}

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod rock_paper_scissors {
    use super::*;
    use crate::instructions::{admin, commit, lifecycle, reveal};

    pub fn initialize_settings(
        ctx: Context<InitializeSettings>,
        forfeit_timeout: i64,
        stale_timeout: i64,
        fee_rate: u64,
        fee_on_draw: bool,
    ) -> Result<()> {
        admin::initialize_settings(ctx, forfeit_timeout, stale_timeout, fee_rate, fee_on_draw)
    }

    pub fn update_settings(
        ctx: Context<UpdateSettings>,
        forfeit_timeout: i64,
        stale_timeout: i64,
        fee_rate: u64,
        fee_on_draw: bool,
    ) -> Result<()> {
        admin::update_settings(ctx, forfeit_timeout, stale_timeout, fee_rate, fee_on_draw)
    }

    pub fn initialize_game(
        ctx: Context<InitializeGame>,
        game_id: String,
        stake_amount: u64,
        commitment: [u8; 32], // digest of choice + salt
    ) -> Result<()> {
        commit::initialize_game(ctx, game_id, stake_amount, commitment)
    }

    pub fn join_game(
        ctx: Context<JoinGame>,
        commitment: [u8; 32], // digest of choice + salt
    ) -> Result<()> {
        commit::join_game(ctx, commitment)
    }

    pub fn reveal_choice(
        ctx: Context<RevealChoice>,
        choice: Choice,
        salt: [u8; 32],
    ) -> Result<()> {
        reveal::reveal_choice(ctx, choice, salt)
    }

    pub fn cancel_game(ctx: Context<CancelGame>) -> Result<()> {
        lifecycle::cancel_game(ctx)
    }

    pub fn unwind_game(ctx: Context<UnwindGame>) -> Result<()> {
        lifecycle::unwind_game(ctx)
    }

    pub fn settle_game(ctx: Context<SettleGame>) -> Result<()> {
        lifecycle::settle_game(ctx)
    }
}
