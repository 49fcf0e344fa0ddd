// server/src/lib.rs
//
// Trick-or-treat game module. Players run a cooldown-gated random reward
// action, accumulate candy, browse a fixed shop, and compete on a global
// leaderboard. Each reducer invocation is one atomic transaction against
// the database, which is the only concurrency control the game needs.

use log;
use spacetimedb::ReducerContext;

mod chat; // Public messages, private replies, slash-command dispatch
mod cooldown; // Pure cooldown gate and remaining-time formatting
mod inventory; // /inventory command
mod leaderboard; // /topspook ranking
mod profile; // Per-user persisted state
mod reward; // Pure trick/treat outcome computation
mod shop; // Static catalog and /shop command
mod trick_or_treat; // The reward action itself

// Re-export reducers for client bindings
pub use chat::send_message;
pub use inventory::show_inventory;
pub use leaderboard::show_leaderboard;
pub use shop::show_shop;
pub use trick_or_treat::trick_or_treat as trick_or_treat_reducer;

// Re-export table types for other modules and client bindings
pub use chat::{Message, PrivateMessage};
pub use profile::Profile;
pub use shop::ShopItem;

// --- Global Constants ---

/// Minimum interval between successful trick-or-treat actions (2 hours).
pub const TRICK_OR_TREAT_COOLDOWN_MS: u64 = 7_200_000;

/// Number of entries shown on the /topspook board.
pub const LEADERBOARD_SIZE: usize = 10;

/// Title every profile carries until a shop title replaces it.
pub const DEFAULT_TITLE: &str = "New Trick-or-Treater";

/// Display name used for system-generated messages.
pub const SYSTEM_SENDER: &str = "SYSTEM";

#[spacetimedb::reducer(init)]
pub fn init_module(ctx: &ReducerContext) -> Result<(), String> {
    log::info!("Initializing trick-or-treat module...");

    // A bad catalog is a configuration error; fail the publish rather than
    // run with a broken shop.
    crate::shop::seed_shop_catalog(ctx)?;

    log::info!("Module initialized.");
    Ok(())
}

/// Called automatically when a client connects. The game keeps no online
/// state, so this only logs the connection.
#[spacetimedb::reducer(client_connected)]
pub fn identity_connected(ctx: &ReducerContext) -> Result<(), String> {
    log::info!("[Connect] Client connected: {:?}", ctx.sender);
    Ok(())
}
