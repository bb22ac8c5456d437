/// Upper bound on rows fetched by any list or history command.
pub const MAX_LIMIT: u32 = 1000;

/// Compute effective limit with precedence: local arg -> global flag -> configured default.
///
/// The result is clamped to `1..=MAX_LIMIT`.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, configured: u32) -> u32 {
    local.or(global).unwrap_or(configured).clamp(1, MAX_LIMIT)
}
