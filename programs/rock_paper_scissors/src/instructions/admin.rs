use anchor_lang::prelude::*;

use crate::constants::INITIAL_VERSION;
use crate::errors::RockPaperScissorsError;
use crate::{InitializeSettings, UpdateSettings};

pub fn initialize_settings(
    ctx: Context<InitializeSettings>,
    forfeit_timeout: i64,
    stale_timeout: i64,
    fee_rate: u64,
    fee_on_draw: bool,
) -> Result<()> {
    let settings = &mut ctx.accounts.settings;

    settings.bump = ctx.bumps.settings;
    settings.authority = ctx.accounts.authority.key();
    settings.treasury = ctx.accounts.treasury.key();

    settings.forfeit_timeout = forfeit_timeout;
    settings.stale_timeout = stale_timeout;
    settings.fee_rate = fee_rate;
    settings.fee_on_draw = fee_on_draw;

    settings.version = INITIAL_VERSION;

    Ok(())
}

pub fn update_settings(
    ctx: Context<UpdateSettings>,
    forfeit_timeout: i64,
    stale_timeout: i64,
    fee_rate: u64,
    fee_on_draw: bool,
) -> Result<()> {
    let settings = &mut ctx.accounts.settings;
    require_keys_eq!(
        settings.authority,
        ctx.accounts.authority.key(),
        RockPaperScissorsError::Unauthorized
    );

    settings.forfeit_timeout = forfeit_timeout;
    settings.stale_timeout = stale_timeout;
    settings.fee_rate = fee_rate;
    settings.fee_on_draw = fee_on_draw;

    Ok(())
}
