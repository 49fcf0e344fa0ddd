// server/src/chat.rs
//
// Chat surface: the public message table, private per-user replies, and
// slash-command dispatch into the trick-or-treat game.

use log;
use spacetimedb::{Identity, ReducerContext, Table, Timestamp};

use crate::profile::{self, profile as ProfileTableTrait};
use crate::SYSTEM_SENDER;

// --- Table Definitions ---

#[spacetimedb::table(name = message, public)]
#[derive(Clone, Debug)]
pub struct Message {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    pub sender: Identity,
    pub sender_username: String,
    pub text: String,
    pub sent: Timestamp,
}

/// Private replies to a single user. Public so clients can subscribe with a
/// filter on recipient_identity.
#[spacetimedb::table(name = private_message, public)]
#[derive(Clone, Debug)]
pub struct PrivateMessage {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    pub recipient_identity: Identity,
    pub sender_display_name: String,
    pub text: String,
    /// Display hint (hex color) for outcome embeds.
    pub color: Option<String>,
    pub sent: Timestamp,
}

// --- Reply Helpers ---

/// Sends a private system reply to the invoking user.
pub fn send_private_reply(ctx: &ReducerContext, text: String, color: Option<String>) {
    ctx.db.private_message().insert(PrivateMessage {
        id: 0, // Auto-incremented
        recipient_identity: ctx.sender,
        sender_display_name: SYSTEM_SENDER.to_string(),
        text,
        color,
        sent: ctx.timestamp,
    });
}

/// Posts a system message visible to all players.
pub fn send_system_message(ctx: &ReducerContext, text: String) {
    ctx.db.message().insert(Message {
        id: 0, // Auto-incremented
        sender: ctx.identity(), // Module identity as sender for system messages
        sender_username: SYSTEM_SENDER.to_string(),
        text,
        sent: ctx.timestamp,
    });
}

// --- Reducers ---

/// Sends a chat message visible to all players. Text starting with "/" is
/// dispatched as a game command instead.
#[spacetimedb::reducer]
pub fn send_message(ctx: &ReducerContext, text: String) -> Result<(), String> {
    if text.is_empty() {
        return Err("Message cannot be empty.".to_string());
    }
    if text.len() > 200 {
        return Err("Message too long (max 200 characters).".to_string());
    }

    let sender_id = ctx.sender;

    // --- Command Handling ---
    if text.starts_with('/') {
        let command = text.split_whitespace().next().unwrap_or("").to_lowercase();
        match command.as_str() {
            "/trickortreat" => {
                log::info!("[Command] Player {:?} used /trickortreat.", sender_id);
                // The chat path carries no display name; reuse the stored
                // one (or the identity fallback for first-time users).
                let username = profile::get_or_default(ctx, sender_id).username;
                return crate::trick_or_treat::trick_or_treat(ctx, username);
            }
            "/inventory" => {
                log::info!("[Command] Player {:?} used /inventory.", sender_id);
                return crate::inventory::show_inventory(ctx);
            }
            "/shop" => {
                log::info!("[Command] Player {:?} used /shop.", sender_id);
                return crate::shop::show_shop(ctx);
            }
            "/topspook" => {
                log::info!("[Command] Player {:?} used /topspook.", sender_id);
                return crate::leaderboard::show_leaderboard(ctx);
            }
            _ => {
                return Err(format!("Unknown command: {}", command));
            }
        }
    }
    // --- End Command Handling ---

    let sender_username = ctx
        .db
        .profile()
        .user_id()
        .find(&sender_id)
        .map(|p| p.username)
        .unwrap_or_else(|| profile::display_key(&sender_id));

    log::info!("User {:?} sent message: {}", sender_id, text);
    ctx.db.message().insert(Message {
        id: 0, // Auto-incremented
        sender: sender_id,
        sender_username,
        text,
        sent: ctx.timestamp,
    });
    Ok(())
}
