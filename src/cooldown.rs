// server/src/cooldown.rs
//
// Cooldown gate for the trick-or-treat action. Pure time arithmetic;
// callers pass timestamps in ms since the unix epoch so the gate stays
// independent of the host clock.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CooldownStatus {
    Allowed,
    Blocked { remaining_ms: u64 },
}

/// Allowed iff `last_used + cooldown <= now`.
pub fn check(last_used_ms: u64, now_ms: u64, cooldown_ms: u64) -> CooldownStatus {
    let ready_at = last_used_ms.saturating_add(cooldown_ms);
    if ready_at <= now_ms {
        CooldownStatus::Allowed
    } else {
        CooldownStatus::Blocked {
            remaining_ms: ready_at - now_ms,
        }
    }
}

/// Formats a remaining wait as whole hours plus minutes. Hours are floored;
/// minutes are the ceiling of the post-hours remainder, so a one-second
/// wait still reads as one minute rather than zero.
pub fn format_remaining(remaining_ms: u64) -> String {
    const HOUR_MS: u64 = 3_600_000;
    const MINUTE_MS: u64 = 60_000;
    let hours = remaining_ms / HOUR_MS;
    let rem = remaining_ms % HOUR_MS;
    let minutes = (rem + MINUTE_MS - 1) / MINUTE_MS;
    format!("{}h {}m", hours, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TRICK_OR_TREAT_COOLDOWN_MS;

    #[test]
    fn blocked_while_cooldown_running() {
        let last_used = 1_700_000_000_000u64;
        for elapsed in [0u64, 1, 60_000, TRICK_OR_TREAT_COOLDOWN_MS - 1] {
            match check(last_used, last_used + elapsed, TRICK_OR_TREAT_COOLDOWN_MS) {
                CooldownStatus::Blocked { remaining_ms } => {
                    assert!(remaining_ms > 0);
                    assert_eq!(remaining_ms, TRICK_OR_TREAT_COOLDOWN_MS - elapsed);
                }
                CooldownStatus::Allowed => panic!("expected Blocked at {} ms elapsed", elapsed),
            }
        }
    }

    #[test]
    fn allowed_at_and_after_boundary() {
        let last_used = 1_700_000_000_000u64;
        assert_eq!(
            check(
                last_used,
                last_used + TRICK_OR_TREAT_COOLDOWN_MS,
                TRICK_OR_TREAT_COOLDOWN_MS
            ),
            CooldownStatus::Allowed
        );
        assert_eq!(
            check(
                last_used,
                last_used + TRICK_OR_TREAT_COOLDOWN_MS + 1,
                TRICK_OR_TREAT_COOLDOWN_MS
            ),
            CooldownStatus::Allowed
        );
    }

    #[test]
    fn never_used_is_allowed() {
        // last_used of 0 ms marks a profile that has never acted; any
        // realistic clock is long past epoch + cooldown.
        assert_eq!(
            check(0, 1_700_000_000_000, TRICK_OR_TREAT_COOLDOWN_MS),
            CooldownStatus::Allowed
        );
    }

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(format_remaining(5_400_000), "1h 30m");
        assert_eq!(format_remaining(3_600_000), "1h 0m");
        assert_eq!(format_remaining(7_200_000), "2h 0m");
    }

    #[test]
    fn minutes_round_up_from_remainder() {
        // A one-second wait must never display as zero minutes.
        assert_eq!(format_remaining(1_000), "0h 1m");
        assert_eq!(format_remaining(60_001), "0h 2m");
        assert_eq!(format_remaining(3_600_001), "1h 1m");
    }
}
