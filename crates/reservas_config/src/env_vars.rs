//! Environment variable naming for configuration overrides and secrets.
//!
//! Regular settings are overridden with `RESERVAS__SECTION__KEY`. Values marked
//! `"secret_from_env"` in the config files are looked up as
//! `RESERVAS_SECRET_SECTION_KEY` first and then as the plain `SECTION_KEY`
//! form (`GOOGLE_CLIENT_SECRET`, `GOOGLE_CALENDAR_ID`, ...).

use std::env;

use serde_json::Value;
use tracing::warn;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "RESERVAS";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "RESERVAS_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value replaced by an environment lookup.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `"server.host"` becomes `"RESERVAS__SERVER__HOST"`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// `"google.client_secret"` becomes `"RESERVAS_SECRET_GOOGLE_CLIENT_SECRET"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to its plain variable name
///
/// `"google.client_secret"` becomes `"GOOGLE_CLIENT_SECRET"`.
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", service, key).to_uppercase()
}

/// Resolve the value for a `"secret_from_env"` marker at `path`.
///
/// Lookup order: prefixed secret name, plain name, then the regular
/// configuration override name.
pub fn resolve_marker(path: &str) -> Option<String> {
    [
        secret_path_to_env_var(path),
        legacy_secret_path_to_env_var(path),
        config_path_to_env_var(path),
    ]
    .iter()
    .find_map(|name| env::var(name).ok().filter(|v| !v.is_empty()))
}

/// Replace every `"secret_from_env"` string inside `value`.
///
/// Returns the dotted paths whose marker could not be resolved, so the caller
/// can decide whether a missing secret is fatal.
pub fn inject_env_vars(value: &mut Value) -> Vec<String> {
    fn walk(path: &mut Vec<String>, obj: &mut Value, missing: &mut Vec<String>) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    path.push(k.to_string());
                    walk(path, v, missing);
                    path.pop();
                }
            }
            Value::Array(arr) => {
                for (i, v) in arr.iter_mut().enumerate() {
                    path.push(i.to_string());
                    walk(path, v, missing);
                    path.pop();
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                match resolve_marker(&path_str) {
                    Some(env_val) => *s = env_val,
                    None => {
                        warn!("No environment value found for {}", path_str);
                        missing.push(path_str);
                    }
                }
            }
            _ => {}
        }
    }

    let mut missing = Vec::new();
    walk(&mut Vec::new(), value, &mut missing);
    missing
}
