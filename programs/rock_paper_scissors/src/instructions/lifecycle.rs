use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::GAME_SEED;
use crate::utils::{close_token_account, settlement_payouts, transfer_tokens, EscrowRelease};
use crate::{CancelGame, SettleGame, UnwindGame};

/// Plays out one escrow's transfer legs. Every leg is signed by the game PDA
/// that owns the escrow; zero legs are skipped inside the helper.
#[allow(clippy::too_many_arguments)]
fn release_escrow<'info>(
    token_program: &Program<'info, Token>,
    escrow: &Account<'info, TokenAccount>,
    game_authority: &AccountInfo<'info>,
    release: &EscrowRelease,
    first_player_token_account: &Account<'info, TokenAccount>,
    second_player_token_account: &Account<'info, TokenAccount>,
    treasury_token_account: &Account<'info, TokenAccount>,
    game_signer: &[&[&[u8]]],
) -> Result<()> {
    transfer_tokens(
        token_program,
        escrow,
        first_player_token_account,
        game_authority,
        release.to_first,
        Some(game_signer),
    )?;
    transfer_tokens(
        token_program,
        escrow,
        second_player_token_account,
        game_authority,
        release.to_second,
        Some(game_signer),
    )?;
    transfer_tokens(
        token_program,
        escrow,
        treasury_token_account,
        game_authority,
        release.to_treasury,
        Some(game_signer),
    )?;
    Ok(())
}

/// Creator backs out of a game nobody joined: the stake comes back in full
/// and the escrow account is closed.
pub fn cancel_game(ctx: Context<CancelGame>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let token_program = &ctx.accounts.token_program;
    let game = &mut ctx.accounts.game;

    game.check_cancel(&ctx.accounts.player.key())?;

    let first_player_key = game.first_player;
    let game_seeds = &[
        GAME_SEED,
        first_player_key.as_ref(),
        game.game_id.as_bytes(),
        &[game.bump],
    ];
    let game_signer = &[&game_seeds[..]];

    transfer_tokens(
        token_program,
        &ctx.accounts.player_escrow,
        &ctx.accounts.player_token_account,
        &game.to_account_info(),
        game.stake_amount,
        Some(game_signer),
    )?;
    close_token_account(
        token_program,
        &ctx.accounts.player_escrow,
        &ctx.accounts.player.to_account_info(),
        &game.to_account_info(),
        game_signer,
    )?;

    game.cancel(now);

    Ok(())
}

/// Permissionless teardown of a game where nobody revealed within the
/// staleness window. Both stakes come back in full; no fee is taken.
pub fn unwind_game(ctx: Context<UnwindGame>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let settings = &ctx.accounts.settings;
    let token_program = &ctx.accounts.token_program;
    let game = &mut ctx.accounts.game;

    game.check_unwind(now, settings.stale_timeout)?;

    let first_player_key = game.first_player;
    let game_seeds = &[
        GAME_SEED,
        first_player_key.as_ref(),
        game.game_id.as_bytes(),
        &[game.bump],
    ];
    let game_signer = &[&game_seeds[..]];

    transfer_tokens(
        token_program,
        &ctx.accounts.first_player_escrow,
        &ctx.accounts.first_player_token_account,
        &game.to_account_info(),
        game.stake_amount,
        Some(game_signer),
    )?;
    transfer_tokens(
        token_program,
        &ctx.accounts.second_player_escrow,
        &ctx.accounts.second_player_token_account,
        &game.to_account_info(),
        game.stake_amount,
        Some(game_signer),
    )?;

    close_token_account(
        token_program,
        &ctx.accounts.first_player_escrow,
        &ctx.accounts.first_player,
        &game.to_account_info(),
        game_signer,
    )?;
    close_token_account(
        token_program,
        &ctx.accounts.second_player_escrow,
        &ctx.accounts.second_player,
        &game.to_account_info(),
        game_signer,
    )?;

    game.unwind(now);

    Ok(())
}

/// Permissionless settlement. The outcome comes from the revealed choices,
/// or by forfeit once the lone reveal's timeout has elapsed; settings are
/// read live at this moment, never from a snapshot.
pub fn settle_game(ctx: Context<SettleGame>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let settings = &ctx.accounts.settings;
    let token_program = &ctx.accounts.token_program;
    let game = &mut ctx.accounts.game;

    let outcome = game.settle_outcome(now, settings.forfeit_timeout)?;
    let payouts = settlement_payouts(
        game.stake_amount,
        settings.fee_rate,
        outcome,
        settings.fee_on_draw,
    )?;

    let first_player_key = game.first_player;
    let game_seeds = &[
        GAME_SEED,
        first_player_key.as_ref(),
        game.game_id.as_bytes(),
        &[game.bump],
    ];
    let game_signer = &[&game_seeds[..]];

    release_escrow(
        token_program,
        &ctx.accounts.first_player_escrow,
        &game.to_account_info(),
        &payouts.first_escrow,
        &ctx.accounts.first_player_token_account,
        &ctx.accounts.second_player_token_account,
        &ctx.accounts.treasury_token_account,
        game_signer,
    )?;
    release_escrow(
        token_program,
        &ctx.accounts.second_player_escrow,
        &game.to_account_info(),
        &payouts.second_escrow,
        &ctx.accounts.first_player_token_account,
        &ctx.accounts.second_player_token_account,
        &ctx.accounts.treasury_token_account,
        game_signer,
    )?;

    close_token_account(
        token_program,
        &ctx.accounts.first_player_escrow,
        &ctx.accounts.first_player,
        &game.to_account_info(),
        game_signer,
    )?;
    close_token_account(
        token_program,
        &ctx.accounts.second_player_escrow,
        &ctx.accounts.second_player,
        &game.to_account_info(),
        game_signer,
    )?;

    msg!("game settled: {:?}", outcome);
    game.settle(outcome, now);

    Ok(())
}
