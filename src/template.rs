//! `{{placeholder}}` substitution for embedded script templates.

use std::collections::BTreeMap;

/// LSB init script for a background service.
pub const INIT_SERVICE: &str = include_str!("../templates/init-service.sh");

/// Replace every `{{key}}` in `body` with its value.
///
/// Placeholders without a value are left as-is.
pub fn render(body: &str, placeholders: &BTreeMap<&str, String>) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match placeholders.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
