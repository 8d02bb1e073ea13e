use anchor_lang::prelude::*;

use crate::state::Choice;
use crate::utils::verify_commitment;
use crate::RevealChoice;

/// Discloses the (choice, salt) pair behind the caller's commitment. The
/// digest is recomputed and compared byte-for-byte before anything is
/// recorded; the game stays in the awaiting-reveals state either way.
pub fn reveal_choice(ctx: Context<RevealChoice>, choice: Choice, salt: [u8; 32]) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let game = &mut ctx.accounts.game;

    let player = game.check_reveal(&ctx.accounts.player.key())?;
    let stored = game.commitment_for(player)?;
    verify_commitment(&stored, choice, &salt)?;

    game.record_reveal(player, choice, now);

    Ok(())
}
