//! Cookie-header parsing

use std::collections::HashMap;

/// Parse a `k=v; k2=v2` cookie string into key/value pairs. All whitespace is
/// stripped first, matching how browsers format `document.cookie`. Entries
/// without `=` are skipped.
pub fn read_cookies(header: &str) -> HashMap<String, String> {
    let stripped: String = header.chars().filter(|c| !c.is_whitespace()).collect();
    stripped
        .split(';')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}
