//! Environment lookups shared by the optimizer configuration.

fn env_true(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|val| {
        let trimmed = val.trim();
        !trimmed.is_empty() && !matches!(trimmed, "0" | "false" | "FALSE" | "False")
    })
}

/// Boolean flag from the environment; `None` when unset.
pub fn bool_from_env(key: &str) -> Option<bool> {
    env_true(key)
}

/// Non-empty string from the environment.
pub fn string_from_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Comma separated list from the environment, blanks dropped.
pub fn list_from_env(key: &str) -> Option<Vec<String>> {
    string_from_env(key).map(|val| {
        val.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
}
