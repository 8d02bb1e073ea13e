use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::RockPaperScissorsError;
use crate::state::{Game, GameState, Settings};

#[derive(Accounts)]
pub struct InitializeSettings<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + Settings::INIT_SPACE,
        seeds = [crate::SETTINGS_SEED],
        bump
    )]
    pub settings: Account<'info, Settings>,

    /// CHECK: fee destination recorded in settings; only its key is read.
    pub treasury: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpdateSettings<'info> {
    #[account(
        mut,
        seeds = [crate::SETTINGS_SEED],
        bump = settings.bump,
    )]
    pub settings: Account<'info, Settings>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(game_id: String)]
pub struct InitializeGame<'info> {
    #[account(
        init,
        payer = player,
        space = 8 + Game::INIT_SPACE,
        seeds = [crate::GAME_SEED, player.key().as_ref(), game_id.as_bytes()],
        bump,
    )]
    pub game: Account<'info, Game>,

    #[account(
        init,
        payer = player,
        token::mint = mint,
        token::authority = game,
        seeds = [
            crate::GAME_ESCROW_SEED,
            game.key().as_ref(),
            player.key().as_ref(),
        ],
        bump,
    )]
    pub player_escrow: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = player,
    )]
    pub player_token_account: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct JoinGame<'info> {
    #[account(
        mut,
        seeds = [crate::GAME_SEED, game.first_player.as_ref(), game.game_id.as_bytes()],
        bump = game.bump,
    )]
    pub game: Account<'info, Game>,

    #[account(
        init,
        payer = player,
        token::mint = mint,
        token::authority = game,
        seeds = [
            crate::GAME_ESCROW_SEED,
            game.key().as_ref(),
            player.key().as_ref(),
        ],
        bump,
    )]
    pub player_escrow: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = player,
    )]
    pub player_token_account: Account<'info, TokenAccount>,

    #[account(address = game.mint)]
    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct RevealChoice<'info> {
    #[account(
        mut,
        seeds = [crate::GAME_SEED, game.first_player.as_ref(), game.game_id.as_bytes()],
        bump = game.bump,
    )]
    pub game: Account<'info, Game>,

    pub player: Signer<'info>,
}

#[derive(Accounts)]
pub struct CancelGame<'info> {
    #[account(
        mut,
        seeds = [crate::GAME_SEED, game.first_player.as_ref(), game.game_id.as_bytes()],
        bump = game.bump,
    )]
    pub game: Account<'info, Game>,

    #[account(
        mut,
        address = game.first_escrow,
    )]
    pub player_escrow: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = game.mint,
        token::authority = player,
    )]
    pub player_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct UnwindGame<'info> {
    #[account(
        mut,
        seeds = [crate::GAME_SEED, game.first_player.as_ref(), game.game_id.as_bytes()],
        bump = game.bump,
        constraint = game.state == GameState::AwaitingReveals @ RockPaperScissorsError::InvalidGameState,
    )]
    pub game: Account<'info, Game>,

    #[account(
        seeds = [crate::SETTINGS_SEED],
        bump = settings.bump,
    )]
    pub settings: Account<'info, Settings>,

    #[account(
        mut,
        address = game.first_escrow,
    )]
    pub first_player_escrow: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = game.mint,
        token::authority = game.first_player,
    )]
    pub first_player_token_account: Account<'info, TokenAccount>,

    /// CHECK: rent destination for the first escrow; address enforced.
    #[account(
        mut,
        address = game.first_player,
    )]
    pub first_player: AccountInfo<'info>,

    #[account(
        mut,
        // Unwrapping is fine since the game is in the awaiting-reveals state.
        address = game.second_escrow.unwrap(),
    )]
    pub second_player_escrow: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = game.mint,
        token::authority = game.second_player.unwrap(),
    )]
    pub second_player_token_account: Account<'info, TokenAccount>,

    /// CHECK: rent destination for the second escrow; address enforced.
    #[account(
        mut,
        address = game.second_player.unwrap(),
    )]
    pub second_player: AccountInfo<'info>,

    /// Not checked, so this call is permissionless.
    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct SettleGame<'info> {
    #[account(
        mut,
        seeds = [crate::GAME_SEED, game.first_player.as_ref(), game.game_id.as_bytes()],
        bump = game.bump,
        constraint = game.state == GameState::AwaitingReveals @ RockPaperScissorsError::InvalidGameState,
    )]
    pub game: Box<Account<'info, Game>>,

    #[account(
        seeds = [crate::SETTINGS_SEED],
        bump = settings.bump,
    )]
    pub settings: Account<'info, Settings>,

    #[account(
        mut,
        address = game.first_escrow,
    )]
    pub first_player_escrow: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = game.mint,
        token::authority = game.first_player,
    )]
    pub first_player_token_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: rent destination for the first escrow; address enforced.
    #[account(
        mut,
        address = game.first_player,
    )]
    pub first_player: AccountInfo<'info>,

    #[account(
        mut,
        // Unwrapping is fine since the game is in the awaiting-reveals state.
        address = game.second_escrow.unwrap(),
    )]
    pub second_player_escrow: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = game.mint,
        token::authority = game.second_player.unwrap(),
    )]
    pub second_player_token_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: rent destination for the second escrow; address enforced.
    #[account(
        mut,
        address = game.second_player.unwrap(),
    )]
    pub second_player: AccountInfo<'info>,

    /// Fee destination owned by the settings treasury.
    #[account(
        mut,
        token::mint = game.mint,
        token::authority = settings.treasury,
    )]
    pub treasury_token_account: Box<Account<'info, TokenAccount>>,

    /// Not checked, so this call is permissionless.
    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}
