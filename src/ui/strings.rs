//! English text for message keys

/// Resolve a message key, falling back to the key itself
pub fn text(key: &str) -> &str {
    match key {
        "error" => "Error",
        "error_generic" => "Something went wrong. Please try again.",
        "health_unknown" => "Unknown",
        "health_bad" => "Bad",
        "health_medium" => "Medium",
        "health_good" => "Good",
        "health_excellent" => "Excellent",
        other => other,
    }
}

/// Banner line for a swarm health classification
pub fn health_info(classification_key: &str, seeds: u32, peers: u32) -> String {
    format!(
        "Health: {} - Seeds: {} - Peers: {}",
        text(classification_key),
        seeds,
        peers
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_keys() {
        assert_eq!(text("health_good"), "Good");
        assert_eq!(text("no_such_key"), "no_such_key");
    }

    #[test]
    fn test_health_info_line() {
        assert_eq!(
            health_info("health_bad", 3, 40),
            "Health: Bad - Seeds: 3 - Peers: 40"
        );
    }
}
