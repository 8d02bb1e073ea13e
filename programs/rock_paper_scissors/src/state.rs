use anchor_lang::prelude::*;

use crate::errors::RockPaperScissorsError;

/// Roster tag for a resolved player. Never stored; always derived from the
/// caller's key via [`Game::player_for`] so slot handling cannot drift from
/// identity checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Player {
    First,
    Second,
}

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    /// Byte that leads the 33-byte commitment pre-image.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Scissors, Choice::Paper)
                | (Choice::Paper, Choice::Rock)
        )
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    AwaitingSecondPlayer,
    AwaitingReveals,
    Settled,
    Cancelled,
    Unwound,
}

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    FirstPlayerWon,
    SecondPlayerWon,
    Draw,
}

#[account]
#[derive(InitSpace)]
pub struct Settings {
    pub bump: u8,
    pub authority: Pubkey,
    pub treasury: Pubkey,

    /// Seconds an unrevealed player gets after the opponent's reveal before
    /// the game becomes settleable by forfeit.
    pub forfeit_timeout: i64,
    /// Seconds after creation before a reveal-less game can be unwound.
    pub stale_timeout: i64,
    /// Parts-per-billion of the pool collected at settlement.
    pub fee_rate: u64,
    /// Whether the fee is also collected when the game ends in a draw.
    pub fee_on_draw: bool,

    pub version: u16,
}

#[account]
#[derive(InitSpace)]
pub struct Game {
    pub bump: u8,
    #[max_len(32)]
    pub game_id: String,
    pub mint: Pubkey,
    pub stake_amount: u64,

    pub first_player: Pubkey,
    pub first_commitment: [u8; 32],
    pub first_escrow: Pubkey,
    pub first_choice: Option<Choice>,
    pub first_revealed_at: Option<i64>,

    pub second_player: Option<Pubkey>,
    pub second_commitment: Option<[u8; 32]>,
    pub second_escrow: Option<Pubkey>,
    pub second_choice: Option<Choice>,
    pub second_revealed_at: Option<i64>,

    pub state: GameState,
    pub outcome: Option<Outcome>,
    pub created_at: i64,
    pub settled_at: Option<i64>,
}

impl Game {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bump: u8,
        game_id: String,
        mint: Pubkey,
        stake_amount: u64,
        first_player: Pubkey,
        first_commitment: [u8; 32],
        first_escrow: Pubkey,
        created_at: i64,
    ) -> Self {
        Self {
            bump,
            game_id,
            mint,
            stake_amount,

            first_player,
            first_commitment,
            first_escrow,
            first_choice: None,
            first_revealed_at: None,

            second_player: None,
            second_commitment: None,
            second_escrow: None,
            second_choice: None,
            second_revealed_at: None,

            state: GameState::AwaitingSecondPlayer,
            outcome: None,
            created_at,
            settled_at: None,
        }
    }

    pub fn player_for(&self, key: &Pubkey) -> Result<Player> {
        if &self.first_player == key {
            Ok(Player::First)
        } else if self.second_player.as_ref() == Some(key) {
            Ok(Player::Second)
        } else {
            Err(RockPaperScissorsError::AccountIsNotAPlayerInTheGame.into())
        }
    }

    pub fn commitment_for(&self, player: Player) -> Result<[u8; 32]> {
        match player {
            Player::First => Ok(self.first_commitment),
            Player::Second => self
                .second_commitment
                .ok_or_else(|| error!(RockPaperScissorsError::InvalidGameState)),
        }
    }

    // ---------------------------------------------------------------------
    // Transition eligibility. One function per transition; every timeout
    // comparison takes `now` as an argument so tests drive the clock.
    // ---------------------------------------------------------------------

    pub fn check_join(&self, player: &Pubkey) -> Result<()> {
        require!(
            self.state == GameState::AwaitingSecondPlayer,
            RockPaperScissorsError::InvalidGameState
        );
        require!(
            player != &self.first_player,
            RockPaperScissorsError::BothPlayersCantBeTheSame
        );
        Ok(())
    }

    pub fn check_reveal(&self, player: &Pubkey) -> Result<Player> {
        require!(
            self.state == GameState::AwaitingReveals,
            RockPaperScissorsError::InvalidGameState
        );
        let player = self.player_for(player)?;
        let already_revealed = match player {
            Player::First => self.first_choice.is_some(),
            Player::Second => self.second_choice.is_some(),
        };
        require!(
            !already_revealed,
            RockPaperScissorsError::PlayerAlreadyRevealed
        );
        Ok(player)
    }

    /// Cancellation resolves the caller against the solo roster only, so a
    /// game that already has a second player reports the caller as not a
    /// player. Clients match on that code.
    pub fn check_cancel(&self, player: &Pubkey) -> Result<()> {
        match self.state {
            GameState::AwaitingSecondPlayer => {
                require_keys_eq!(
                    *player,
                    self.first_player,
                    RockPaperScissorsError::InvalidPlayer
                );
                Ok(())
            }
            GameState::AwaitingReveals => {
                Err(RockPaperScissorsError::AccountIsNotAPlayerInTheGame.into())
            }
            _ => Err(RockPaperScissorsError::InvalidGameState.into()),
        }
    }

    pub fn check_unwind(&self, now: i64, stale_timeout: i64) -> Result<()> {
        require!(
            self.state == GameState::AwaitingReveals,
            RockPaperScissorsError::InvalidGameState
        );
        // Historical error code for the any-reveal case, kept for wire
        // compatibility with existing clients.
        require!(
            self.first_choice.is_none() && self.second_choice.is_none(),
            RockPaperScissorsError::BothPlayersCantBeTheSame
        );
        let stale_at = self
            .created_at
            .checked_add(stale_timeout)
            .ok_or(RockPaperScissorsError::NumericOverflow)?;
        require!(now >= stale_at, RockPaperScissorsError::GameIsNotStale);
        Ok(())
    }

    /// Decides the settlement outcome, or errors when the game is not yet
    /// settleable. A single reveal only settles once the opponent's forfeit
    /// window has fully elapsed (inclusive boundary).
    pub fn settle_outcome(&self, now: i64, forfeit_timeout: i64) -> Result<Outcome> {
        require!(
            self.state == GameState::AwaitingReveals,
            RockPaperScissorsError::InvalidGameState
        );
        match (self.first_choice, self.second_choice) {
            (Some(first), Some(second)) => {
                if first == second {
                    Ok(Outcome::Draw)
                } else if first.beats(second) {
                    Ok(Outcome::FirstPlayerWon)
                } else {
                    Ok(Outcome::SecondPlayerWon)
                }
            }
            (Some(_), None) => forfeit_outcome(
                self.first_revealed_at,
                now,
                forfeit_timeout,
                Outcome::FirstPlayerWon,
            ),
            (None, Some(_)) => forfeit_outcome(
                self.second_revealed_at,
                now,
                forfeit_timeout,
                Outcome::SecondPlayerWon,
            ),
            (None, None) => Err(RockPaperScissorsError::InvalidGameState.into()),
        }
    }

    // ---------------------------------------------------------------------
    // Record mutations. Callers must have passed the matching eligibility
    // check first; these only write fields.
    // ---------------------------------------------------------------------

    pub fn join(&mut self, second_player: Pubkey, commitment: [u8; 32], escrow: Pubkey) {
        self.second_player = Some(second_player);
        self.second_commitment = Some(commitment);
        self.second_escrow = Some(escrow);
        self.state = GameState::AwaitingReveals;
    }

    pub fn record_reveal(&mut self, player: Player, choice: Choice, now: i64) {
        match player {
            Player::First => {
                self.first_choice = Some(choice);
                self.first_revealed_at = Some(now);
            }
            Player::Second => {
                self.second_choice = Some(choice);
                self.second_revealed_at = Some(now);
            }
        }
    }

    pub fn cancel(&mut self, now: i64) {
        self.state = GameState::Cancelled;
        self.settled_at = Some(now);
    }

    pub fn unwind(&mut self, now: i64) {
        self.state = GameState::Unwound;
        self.settled_at = Some(now);
    }

    pub fn settle(&mut self, outcome: Outcome, now: i64) {
        self.state = GameState::Settled;
        self.outcome = Some(outcome);
        self.settled_at = Some(now);
    }
}

fn forfeit_outcome(
    revealed_at: Option<i64>,
    now: i64,
    forfeit_timeout: i64,
    winner: Outcome,
) -> Result<Outcome> {
    let revealed_at = revealed_at.ok_or(RockPaperScissorsError::InvalidGameState)?;
    let forfeit_at = revealed_at
        .checked_add(forfeit_timeout)
        .ok_or(RockPaperScissorsError::NumericOverflow)?;
    require!(now >= forfeit_at, RockPaperScissorsError::InvalidGameState);
    Ok(winner)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAKE: u64 = 10;
    const FORFEIT_TIMEOUT: i64 = 600;
    const STALE_TIMEOUT: i64 = 3_600;

    fn open_game(first_player: Pubkey) -> Game {
        Game::new(
            255,
            "test-game".to_string(),
            Pubkey::new_unique(),
            STAKE,
            first_player,
            [0xAA; 32],
            Pubkey::new_unique(),
            1_000,
        )
    }

    fn joined_game(first_player: Pubkey, second_player: Pubkey) -> Game {
        let mut game = open_game(first_player);
        game.join(second_player, [0xBB; 32], Pubkey::new_unique());
        game
    }

    #[test]
    fn open_game_awaits_second_player() {
        let game = open_game(Pubkey::new_unique());
        assert_eq!(game.state, GameState::AwaitingSecondPlayer);
        assert!(game.second_player.is_none());
        assert!(game.outcome.is_none());
    }

    #[test]
    fn resolves_players_by_identity() {
        let (first, second) = (Pubkey::new_unique(), Pubkey::new_unique());
        let game = joined_game(first, second);
        assert_eq!(game.player_for(&first).unwrap(), Player::First);
        assert_eq!(game.player_for(&second).unwrap(), Player::Second);
        assert_eq!(
            game.player_for(&Pubkey::new_unique()).unwrap_err(),
            RockPaperScissorsError::AccountIsNotAPlayerInTheGame.into()
        );
    }

    #[test]
    fn join_rejects_creator_joining_own_game() {
        let first = Pubkey::new_unique();
        let game = open_game(first);
        assert_eq!(
            game.check_join(&first).unwrap_err(),
            RockPaperScissorsError::BothPlayersCantBeTheSame.into()
        );
    }

    #[test]
    fn join_rejects_started_game() {
        let game = joined_game(Pubkey::new_unique(), Pubkey::new_unique());
        assert_eq!(
            game.check_join(&Pubkey::new_unique()).unwrap_err(),
            RockPaperScissorsError::InvalidGameState.into()
        );
    }

    #[test]
    fn join_transitions_to_awaiting_reveals() {
        let second = Pubkey::new_unique();
        let mut game = open_game(Pubkey::new_unique());
        game.check_join(&second).unwrap();
        game.join(second, [0xBB; 32], Pubkey::new_unique());
        assert_eq!(game.state, GameState::AwaitingReveals);
        assert_eq!(game.second_player, Some(second));
        assert_eq!(game.commitment_for(Player::Second).unwrap(), [0xBB; 32]);
    }

    #[test]
    fn reveal_requires_started_game() {
        let first = Pubkey::new_unique();
        let game = open_game(first);
        assert_eq!(
            game.check_reveal(&first).unwrap_err(),
            RockPaperScissorsError::InvalidGameState.into()
        );
    }

    #[test]
    fn reveal_rejects_stranger() {
        let game = joined_game(Pubkey::new_unique(), Pubkey::new_unique());
        assert_eq!(
            game.check_reveal(&Pubkey::new_unique()).unwrap_err(),
            RockPaperScissorsError::AccountIsNotAPlayerInTheGame.into()
        );
    }

    #[test]
    fn reveal_records_once_per_player() {
        let (first, second) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut game = joined_game(first, second);

        let player = game.check_reveal(&first).unwrap();
        game.record_reveal(player, Choice::Rock, 2_000);
        assert_eq!(game.first_choice, Some(Choice::Rock));
        assert_eq!(game.first_revealed_at, Some(2_000));
        assert_eq!(game.state, GameState::AwaitingReveals);

        assert_eq!(
            game.check_reveal(&first).unwrap_err(),
            RockPaperScissorsError::PlayerAlreadyRevealed.into()
        );

        // The other slot is unaffected.
        let player = game.check_reveal(&second).unwrap();
        game.record_reveal(player, Choice::Paper, 2_100);
        assert_eq!(game.second_choice, Some(Choice::Paper));
    }

    #[test]
    fn cancel_allows_only_creator_before_join() {
        let first = Pubkey::new_unique();
        let mut game = open_game(first);
        assert_eq!(
            game.check_cancel(&Pubkey::new_unique()).unwrap_err(),
            RockPaperScissorsError::InvalidPlayer.into()
        );
        game.check_cancel(&first).unwrap();
        game.cancel(2_000);
        assert_eq!(game.state, GameState::Cancelled);
    }

    #[test]
    fn cancel_after_join_reports_not_a_player() {
        // Compatibility behavior: once a second player has joined, the
        // cancellation path surfaces the roster error rather than a state
        // error. Pinned so the wire code never drifts.
        let first = Pubkey::new_unique();
        let game = joined_game(first, Pubkey::new_unique());
        assert_eq!(
            game.check_cancel(&first).unwrap_err(),
            RockPaperScissorsError::AccountIsNotAPlayerInTheGame.into()
        );
    }

    #[test]
    fn cancelled_game_rejects_everything() {
        let first = Pubkey::new_unique();
        let mut game = open_game(first);
        game.check_cancel(&first).unwrap();
        game.cancel(2_000);

        assert_eq!(
            game.check_cancel(&first).unwrap_err(),
            RockPaperScissorsError::InvalidGameState.into()
        );
        assert_eq!(
            game.check_join(&Pubkey::new_unique()).unwrap_err(),
            RockPaperScissorsError::InvalidGameState.into()
        );
        assert_eq!(
            game.check_reveal(&first).unwrap_err(),
            RockPaperScissorsError::InvalidGameState.into()
        );
        assert_eq!(
            game.check_unwind(i64::MAX, STALE_TIMEOUT).unwrap_err(),
            RockPaperScissorsError::InvalidGameState.into()
        );
        assert_eq!(
            game.settle_outcome(i64::MAX, FORFEIT_TIMEOUT).unwrap_err(),
            RockPaperScissorsError::InvalidGameState.into()
        );
    }

    #[test]
    fn unwind_requires_stale_game() {
        let game = joined_game(Pubkey::new_unique(), Pubkey::new_unique());
        let stale_at = game.created_at + STALE_TIMEOUT;
        assert_eq!(
            game.check_unwind(stale_at - 1, STALE_TIMEOUT).unwrap_err(),
            RockPaperScissorsError::GameIsNotStale.into()
        );
        // Inclusive boundary: exactly stale unwinds.
        game.check_unwind(stale_at, STALE_TIMEOUT).unwrap();
    }

    #[test]
    fn unwind_rejects_unjoined_game() {
        let game = open_game(Pubkey::new_unique());
        assert_eq!(
            game.check_unwind(i64::MAX, STALE_TIMEOUT).unwrap_err(),
            RockPaperScissorsError::InvalidGameState.into()
        );
    }

    #[test]
    fn unwind_with_any_reveal_keeps_historical_code() {
        let (first, second) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut game = joined_game(first, second);
        game.record_reveal(Player::First, Choice::Rock, 2_000);
        assert_eq!(
            game.check_unwind(game.created_at + STALE_TIMEOUT, STALE_TIMEOUT)
                .unwrap_err(),
            RockPaperScissorsError::BothPlayersCantBeTheSame.into()
        );
    }

    #[test]
    fn unwind_overflow_on_pathological_timeout() {
        let game = joined_game(Pubkey::new_unique(), Pubkey::new_unique());
        assert_eq!(
            game.check_unwind(i64::MAX, i64::MAX).unwrap_err(),
            RockPaperScissorsError::NumericOverflow.into()
        );
    }

    #[test]
    fn settle_resolves_all_ordered_pairs() {
        let cases = [
            (Choice::Rock, Choice::Scissors, Outcome::FirstPlayerWon),
            (Choice::Rock, Choice::Paper, Outcome::SecondPlayerWon),
            (Choice::Paper, Choice::Rock, Outcome::FirstPlayerWon),
            (Choice::Paper, Choice::Scissors, Outcome::SecondPlayerWon),
            (Choice::Scissors, Choice::Paper, Outcome::FirstPlayerWon),
            (Choice::Scissors, Choice::Rock, Outcome::SecondPlayerWon),
        ];
        for (first, second, expected) in cases {
            let mut game = joined_game(Pubkey::new_unique(), Pubkey::new_unique());
            game.record_reveal(Player::First, first, 2_000);
            game.record_reveal(Player::Second, second, 2_100);
            assert_eq!(
                game.settle_outcome(2_200, FORFEIT_TIMEOUT).unwrap(),
                expected,
                "{first:?} vs {second:?}"
            );
        }
    }

    #[test]
    fn settle_equal_choices_draw() {
        for choice in [Choice::Rock, Choice::Paper, Choice::Scissors] {
            let mut game = joined_game(Pubkey::new_unique(), Pubkey::new_unique());
            game.record_reveal(Player::First, choice, 2_000);
            game.record_reveal(Player::Second, choice, 2_100);
            assert_eq!(
                game.settle_outcome(2_200, FORFEIT_TIMEOUT).unwrap(),
                Outcome::Draw
            );
        }
    }

    #[test]
    fn settle_by_forfeit_after_timeout() {
        let mut game = joined_game(Pubkey::new_unique(), Pubkey::new_unique());
        game.record_reveal(Player::First, Choice::Paper, 2_000);

        let forfeit_at = 2_000 + FORFEIT_TIMEOUT;
        assert_eq!(
            game.settle_outcome(forfeit_at - 1, FORFEIT_TIMEOUT)
                .unwrap_err(),
            RockPaperScissorsError::InvalidGameState.into()
        );
        // Inclusive boundary: settleable once the window has exactly elapsed.
        assert_eq!(
            game.settle_outcome(forfeit_at, FORFEIT_TIMEOUT).unwrap(),
            Outcome::FirstPlayerWon
        );
    }

    #[test]
    fn settle_by_forfeit_favors_second_player_too() {
        let mut game = joined_game(Pubkey::new_unique(), Pubkey::new_unique());
        game.record_reveal(Player::Second, Choice::Scissors, 2_000);
        assert_eq!(
            game.settle_outcome(2_000 + FORFEIT_TIMEOUT, FORFEIT_TIMEOUT)
                .unwrap(),
            Outcome::SecondPlayerWon
        );
    }

    #[test]
    fn settle_with_zero_reveals_is_rejected() {
        let game = joined_game(Pubkey::new_unique(), Pubkey::new_unique());
        assert_eq!(
            game.settle_outcome(i64::MAX, FORFEIT_TIMEOUT).unwrap_err(),
            RockPaperScissorsError::InvalidGameState.into()
        );
    }

    #[test]
    fn settle_forfeit_overflow_on_pathological_timeout() {
        let mut game = joined_game(Pubkey::new_unique(), Pubkey::new_unique());
        game.record_reveal(Player::First, Choice::Rock, i64::MAX);
        assert_eq!(
            game.settle_outcome(i64::MAX, 1).unwrap_err(),
            RockPaperScissorsError::NumericOverflow.into()
        );
    }

    #[test]
    fn terminal_states_reject_every_transition() {
        let (first, second) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut game = joined_game(first, second);
        game.record_reveal(Player::First, Choice::Rock, 2_000);
        game.record_reveal(Player::Second, Choice::Paper, 2_100);
        let outcome = game.settle_outcome(2_200, FORFEIT_TIMEOUT).unwrap();
        game.settle(outcome, 2_200);
        assert_eq!(game.state, GameState::Settled);
        assert_eq!(game.outcome, Some(Outcome::SecondPlayerWon));

        // Every further transition fails the state check, repeatedly.
        for _ in 0..2 {
            assert_eq!(
                game.settle_outcome(i64::MAX, FORFEIT_TIMEOUT).unwrap_err(),
                RockPaperScissorsError::InvalidGameState.into()
            );
            assert_eq!(
                game.check_unwind(i64::MAX, STALE_TIMEOUT).unwrap_err(),
                RockPaperScissorsError::InvalidGameState.into()
            );
            assert_eq!(
                game.check_cancel(&first).unwrap_err(),
                RockPaperScissorsError::InvalidGameState.into()
            );
            assert_eq!(
                game.check_join(&Pubkey::new_unique()).unwrap_err(),
                RockPaperScissorsError::InvalidGameState.into()
            );
            assert_eq!(
                game.check_reveal(&first).unwrap_err(),
                RockPaperScissorsError::InvalidGameState.into()
            );
        }
    }
}
