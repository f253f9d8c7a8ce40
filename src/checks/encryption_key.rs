use crate::checks::{CheckOutcome, Note};
use crate::environment::Environment;

pub const ENCRYPTION_KEY_VAR: &str = "ENCRYPTION_KEY";

/// Shortest key the API key encryption will accept.
pub const MIN_KEY_LENGTH: usize = 32;

/// Check that `ENCRYPTION_KEY` is set and at least [`MIN_KEY_LENGTH`] characters long.
///
/// Never prints the key itself, only its length.
pub fn check_encryption_key(env: &Environment) -> CheckOutcome {
    let notes = vec![Note::Info(format!("Testing {}...", ENCRYPTION_KEY_VAR))];

    let key = match env.get(ENCRYPTION_KEY_VAR) {
        Some(key) if !key.is_empty() => key,
        _ => {
            return CheckOutcome::fail(
                notes,
                format!("{} not set in environment", ENCRYPTION_KEY_VAR),
            )
        }
    };

    // Characters, not bytes.
    let len = key.chars().count();

    if len < MIN_KEY_LENGTH {
        return CheckOutcome::fail(
            notes,
            format!(
                "{} too short: {} chars (need {}+)",
                ENCRYPTION_KEY_VAR, len, MIN_KEY_LENGTH
            ),
        );
    }

    CheckOutcome::pass(
        notes,
        format!("{} is set ({} chars)", ENCRYPTION_KEY_VAR, len),
    )
}
