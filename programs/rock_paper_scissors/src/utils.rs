use anchor_lang::prelude::*;
use anchor_spl::token::{self, CloseAccount, Token, TokenAccount, Transfer};
use solana_sha256_hasher::hashv;

use crate::constants::{COMMITMENT_PREIMAGE_LEN, FEE_DENOMINATOR};
use crate::errors::RockPaperScissorsError;
use crate::state::{Choice, Outcome};

// -------------------------
// Commitment hashing
// -------------------------

/// Builds the fixed 33-byte pre-image: choice byte followed by the salt.
/// The length requirement is enforced by construction; no other shape is
/// expressible.
pub fn commitment_preimage(choice: Choice, salt: &[u8; 32]) -> [u8; COMMITMENT_PREIMAGE_LEN] {
    let mut preimage = [0u8; COMMITMENT_PREIMAGE_LEN];
    preimage[0] = choice.as_byte();
    preimage[1..].copy_from_slice(salt);
    preimage
}

pub fn commitment_digest(choice: Choice, salt: &[u8; 32]) -> [u8; 32] {
    hashv(&[&commitment_preimage(choice, salt)]).to_bytes()
}

/// Byte-for-byte comparison of the recomputed digest against the stored
/// commitment.
pub fn verify_commitment(stored: &[u8; 32], choice: Choice, salt: &[u8; 32]) -> Result<()> {
    require!(
        &commitment_digest(choice, salt) == stored,
        RockPaperScissorsError::InvalidHash
    );
    Ok(())
}

// -------------------------
// Settlement arithmetic
// -------------------------

/// Transfer legs out of one player's escrow. The three destinations always
/// sum to exactly the deposited stake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscrowRelease {
    pub to_first: u64,
    pub to_second: u64,
    pub to_treasury: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementPayouts {
    pub first_escrow: EscrowRelease,
    pub second_escrow: EscrowRelease,
}

/// `pool * fee_rate / FEE_DENOMINATOR`, widened through u128 so the multiply
/// cannot wrap; the narrowing back to u64 is the checked step.
pub fn settlement_fee(stake_amount: u64, fee_rate: u64) -> Result<u64> {
    let pool = stake_amount
        .checked_mul(2)
        .ok_or(RockPaperScissorsError::NumericOverflow)?;
    let fee = (pool as u128) * (fee_rate as u128) / (FEE_DENOMINATOR as u128);
    u64::try_from(fee).map_err(|_| error!(RockPaperScissorsError::NumericOverflow))
}

/// Computes how each escrow is released at settlement.
///
/// Decisive outcome: the winner collects the pool minus the fee; the fee is
/// drawn from the loser's escrow first and only touches the winner's escrow
/// when it exceeds one stake. Draw: stakes are returned, with the fee split
/// across both refunds when `fee_on_draw` is set (the two halves differ by at
/// most one base unit and sum exactly to the fee).
pub fn settlement_payouts(
    stake_amount: u64,
    fee_rate: u64,
    outcome: Outcome,
    fee_on_draw: bool,
) -> Result<SettlementPayouts> {
    let fee = settlement_fee(stake_amount, fee_rate)?;

    match outcome {
        Outcome::FirstPlayerWon | Outcome::SecondPlayerWon => {
            let loser_fee = fee.min(stake_amount);
            let winner_fee = fee
                .checked_sub(loser_fee)
                .ok_or(RockPaperScissorsError::NumericOverflow)?;
            let from_loser = stake_amount
                .checked_sub(loser_fee)
                .ok_or(RockPaperScissorsError::NumericOverflow)?;
            let from_winner = stake_amount
                .checked_sub(winner_fee)
                .ok_or(RockPaperScissorsError::NumericOverflow)?;

            if outcome == Outcome::FirstPlayerWon {
                Ok(SettlementPayouts {
                    first_escrow: EscrowRelease {
                        to_first: from_winner,
                        to_second: 0,
                        to_treasury: winner_fee,
                    },
                    second_escrow: EscrowRelease {
                        to_first: from_loser,
                        to_second: 0,
                        to_treasury: loser_fee,
                    },
                })
            } else {
                Ok(SettlementPayouts {
                    first_escrow: EscrowRelease {
                        to_first: 0,
                        to_second: from_loser,
                        to_treasury: loser_fee,
                    },
                    second_escrow: EscrowRelease {
                        to_first: 0,
                        to_second: from_winner,
                        to_treasury: winner_fee,
                    },
                })
            }
        }
        Outcome::Draw => {
            if !fee_on_draw {
                return Ok(SettlementPayouts {
                    first_escrow: EscrowRelease {
                        to_first: stake_amount,
                        to_second: 0,
                        to_treasury: 0,
                    },
                    second_escrow: EscrowRelease {
                        to_first: 0,
                        to_second: stake_amount,
                        to_treasury: 0,
                    },
                });
            }
            let first_half = fee / 2;
            let second_half = fee
                .checked_sub(first_half)
                .ok_or(RockPaperScissorsError::NumericOverflow)?;
            Ok(SettlementPayouts {
                first_escrow: EscrowRelease {
                    to_first: stake_amount
                        .checked_sub(first_half)
                        .ok_or(RockPaperScissorsError::NumericOverflow)?,
                    to_second: 0,
                    to_treasury: first_half,
                },
                second_escrow: EscrowRelease {
                    to_first: 0,
                    to_second: stake_amount
                        .checked_sub(second_half)
                        .ok_or(RockPaperScissorsError::NumericOverflow)?,
                    to_treasury: second_half,
                },
            })
        }
    }
}

// -------------------------
// SPL escrow plumbing
// -------------------------

/// Moves tokens between accounts. Zero-amount legs are skipped. Pass the
/// game signer seeds when the source is a program-owned escrow.
// Classic SPL transfer; stakes are always held in the game's recorded mint.
#[allow(deprecated)]
pub fn transfer_tokens<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    authority: &AccountInfo<'info>,
    amount: u64,
    signer_seeds: Option<&[&[&[u8]]]>,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let accounts = Transfer {
        from: from.to_account_info(),
        to: to.to_account_info(),
        authority: authority.clone(),
    };
    match signer_seeds {
        Some(seeds) => token::transfer(
            CpiContext::new_with_signer(token_program.to_account_info(), accounts, seeds),
            amount,
        ),
        None => token::transfer(
            CpiContext::new(token_program.to_account_info(), accounts),
            amount,
        ),
    }
}

/// Closes a drained escrow token account, returning its rent to
/// `destination`.
pub fn close_token_account<'info>(
    token_program: &Program<'info, Token>,
    account: &Account<'info, TokenAccount>,
    destination: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    token::close_account(CpiContext::new_with_signer(
        token_program.to_account_info(),
        CloseAccount {
            account: account.to_account_info(),
            destination: destination.clone(),
            authority: authority.clone(),
        },
        signer_seeds,
    ))
}
