// server/src/profile.rs
//
// Per-user persisted game state and the helpers every command goes through
// to read and commit it.

use spacetimedb::{Identity, ReducerContext, Table, Timestamp};

use crate::DEFAULT_TITLE;

#[spacetimedb::table(name = profile, public)]
#[derive(Clone, Debug)]
pub struct Profile {
    #[primary_key]
    pub user_id: Identity,
    /// Last-seen display name, rewritten on every successful reward action.
    pub username: String,
    /// Candy balance. Deductions are clamped so this never underflows.
    pub candy: u64,
    /// Currently displayed honorific.
    pub title: String,
    /// Owned shop item ids (unique, order irrelevant).
    pub inventory: Vec<String>,
    /// Last successful trick-or-treat action. The unix epoch means never used.
    pub last_used: Timestamp,
}

/// Builds the default profile for an identity without persisting it.
/// A row is first written only once a reward action succeeds.
pub fn default_profile(user_id: Identity) -> Profile {
    Profile {
        user_id,
        username: display_key(&user_id),
        candy: 0,
        title: DEFAULT_TITLE.to_string(),
        inventory: Vec::new(),
        last_used: Timestamp::from_micros_since_unix_epoch(0),
    }
}

pub fn get_or_default(ctx: &ReducerContext, user_id: Identity) -> Profile {
    ctx.db
        .profile()
        .user_id()
        .find(&user_id)
        .unwrap_or_else(|| default_profile(user_id))
}

/// Insert-or-update by primary key. This runs inside the calling reducer's
/// transaction, so concurrent actions for the same user serialize here and
/// no update is lost.
pub fn commit(ctx: &ReducerContext, profile: Profile) {
    let profiles = ctx.db.profile();
    if profiles.user_id().find(&profile.user_id).is_some() {
        profiles.user_id().update(profile);
    } else {
        profiles.insert(profile);
    }
}

/// Canonical text form of an identity. Used as the display fallback when no
/// username has been seen yet and as the deterministic leaderboard
/// tie-break key.
pub fn display_key(user_id: &Identity) -> String {
    format!("{:?}", user_id)
}

pub fn timestamp_to_ms(ts: Timestamp) -> u64 {
    (ts.to_micros_since_unix_epoch().max(0) as u64) / 1_000
}
