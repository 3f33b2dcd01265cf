// SHA-256 primitive and canonical JSON encoding.
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of `data`, lowercase, 64 characters.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Canonical JSON encoding: object keys recursively sorted, no insignificant
/// whitespace, serde_json scalar formatting (shortest round-trip floats).
/// Independent writers of the same value produce byte-identical output,
/// which is what makes `data_hash` comparable across processes.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                write_canonical(&map[*key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        // Scalars already have a stable compact rendering.
        other => out.push_str(&other.to_string()),
    }
}
