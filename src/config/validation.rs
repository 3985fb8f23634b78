//! Config validation: unknown-key detection with Levenshtein suggestions
//! and value checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::HeaderValue;

use super::defaults::MAX_SUGGESTION_DISTANCE;
use super::AppConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `AppConfig`.
///
/// Any new field added to `AppConfig` must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    [
        // [server]
        "server",
        "server.addr",
        "server.cors_origins",
        "server.body_limit_bytes",
        // [predictor]
        "predictor",
        "predictor.seed",
    ]
    .into_iter()
    .collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if close enough.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (*k, levenshtein(unknown, k)))
        .filter(|(_, dist)| *dist <= MAX_SUGGESTION_DISTANCE)
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys. Parse errors are left to serde.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Value Validation
// ============================================================================

/// Accept an IP socket address or a `hostname:port` pair the listener can
/// resolve at bind time. IPv6 literals must be bracketed.
fn is_bind_addr(addr: &str) -> bool {
    if addr.parse::<SocketAddr>().is_ok() {
        return true;
    }
    match addr.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty()
                && !host.contains(|c: char| c == ':' || c.is_whitespace())
                && port.parse::<u16>().is_ok()
        }
        None => false,
    }
}

/// Check values that would make the server unable to start or misbehave.
///
/// Returns every problem found rather than stopping at the first.
pub fn validate_values(config: &AppConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if !is_bind_addr(&config.server.addr) {
        errors.push(format!(
            "server.addr = '{}' is not a valid HOST:PORT address",
            config.server.addr
        ));
    }

    if config.server.body_limit_bytes == 0 {
        errors.push("server.body_limit_bytes must be > 0".to_string());
    }

    for origin in &config.server.cors_origins {
        if origin.trim().is_empty() || HeaderValue::from_str(origin.trim()).is_err() {
            errors.push(format!("server.cors_origins entry '{origin}' is not a valid origin"));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("addr", "addr"), 0);
        assert_eq!(levenshtein("adr", "addr"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_walk_nested_keys() {
        let value: toml::Value = "[server]\naddr = \"x\"\n[predictor]\nseed = 1\n"
            .parse()
            .unwrap();
        let mut keys = walk_toml_keys(&value, "");
        keys.sort();
        assert_eq!(keys, ["predictor", "predictor.seed", "server", "server.addr"]);
    }

    #[test]
    fn test_far_off_key_gets_no_suggestion() {
        let warnings = validate_unknown_keys("[server]\ncompletely_unrelated = 1\n");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].suggestion.is_none());
    }

    #[test]
    fn test_malformed_toml_yields_no_warnings() {
        assert!(validate_unknown_keys("[server\naddr = ").is_empty());
    }

    #[test]
    fn test_default_config_has_no_value_errors() {
        assert!(validate_values(&AppConfig::default()).is_empty());
    }

    #[test]
    fn test_hostname_addresses_are_valid() {
        for addr in ["localhost:5000", "casting-host.local:80", "0.0.0.0:5000", "[::1]:5000"] {
            assert!(is_bind_addr(addr), "{addr} should be accepted");
        }
        let mut config = AppConfig::default();
        config.server.addr = "localhost:5000".into();
        assert!(validate_values(&config).is_empty());
    }

    #[test]
    fn test_malformed_addresses_are_rejected() {
        for addr in ["localhost", "not-an-addr", ":5000", "localhost:", "localhost:99999", "::1:5000", "my host:80"] {
            assert!(!is_bind_addr(addr), "{addr} should be rejected");
        }
    }
}
