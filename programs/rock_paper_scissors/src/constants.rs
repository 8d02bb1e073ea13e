// Centralized protocol constants

// PDA seeds
// =========

pub const SETTINGS_SEED: &[u8] = b"settings";
pub const GAME_SEED: &[u8] = b"game";
pub const GAME_ESCROW_SEED: &[u8] = b"game_escrow";

// Sizing & arithmetic
// ===================

/// Maximum byte length of the caller-supplied game id label.
pub const MAX_GAME_ID_LEN: usize = 32;

/// Commitment pre-image is always 1 choice byte followed by a 32-byte salt.
pub const COMMITMENT_PREIMAGE_LEN: usize = 33;

/// Fee rates are expressed as parts-per-billion of the settled pool.
/// `fee_rate = 10_000_000` is 1%.
pub const FEE_DENOMINATOR: u64 = 1_000_000_000;

// Deployment defaults
// ===================

/// Default window a revealed player waits before settling by forfeit.
/// 10 minutes; tune per deployment via update_settings.
pub const DEFAULT_FORFEIT_TIMEOUT: i64 = 600;

/// Default window before a reveal-less game can be unwound.
/// 1 hour; tune per deployment via update_settings.
pub const DEFAULT_STALE_TIMEOUT: i64 = 3_600;

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;
