use anchor_lang::prelude::*;

use crate::state::Game;
use crate::utils::transfer_tokens;
use crate::{InitializeGame, JoinGame};

/// Opens a game: escrows the creator's stake and records their commitment.
pub fn initialize_game(
    ctx: Context<InitializeGame>,
    game_id: String,
    stake_amount: u64,
    commitment: [u8; 32],
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.player_token_account,
        &ctx.accounts.player_escrow,
        &ctx.accounts.player.to_account_info(),
        stake_amount,
        None,
    )?;

    let game = &mut ctx.accounts.game;
    game.set_inner(Game::new(
        ctx.bumps.game,
        game_id,
        ctx.accounts.mint.key(),
        stake_amount,
        ctx.accounts.player.key(),
        commitment,
        ctx.accounts.player_escrow.key(),
        now,
    ));

    Ok(())
}

/// Second player matches the stake and commits; the game starts.
pub fn join_game(ctx: Context<JoinGame>, commitment: [u8; 32]) -> Result<()> {
    let player = ctx.accounts.player.key();
    let game = &ctx.accounts.game;
    game.check_join(&player)?;

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.player_token_account,
        &ctx.accounts.player_escrow,
        &ctx.accounts.player.to_account_info(),
        game.stake_amount,
        None,
    )?;

    let game = &mut ctx.accounts.game;
    game.join(player, commitment, ctx.accounts.player_escrow.key());

    Ok(())
}
