use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde_json::{Map, Value};

/// A record is a flat JSON object; identity is its string `id` field.
pub type Record = Map<String, Value>;

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The record's id, when it carries a string one.
#[must_use]
pub fn record_id(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

/// Whether the record's id equals the given id. Only string ids ever
/// match; a numeric `1` is not the record `"1"`.
#[must_use]
pub fn id_matches(record: &Record, id: &str) -> bool {
    record_id(record) == Some(id)
}

/// Synthesize a record id in the `{timestamp}_{random}` shape: unix
/// milliseconds, an underscore, and a short base36 suffix.
#[must_use]
pub fn synthesize_id() -> String {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
    let millis = nanos / 1_000_000;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut rng = ChaCha8Rng::seed_from_u64(nanos as u64);
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[(rng.next_u32() as usize) % BASE36.len()] as char)
        .collect();

    format!("{millis}_{suffix}")
}

/// Shallow-merge `patch` over `existing`. The id is never overwritten,
/// even when the patch carries one.
pub fn merge_into(existing: &mut Record, patch: &Record) {
    let id = existing.get("id").cloned();

    for (key, value) in patch {
        existing.insert(key.clone(), value.clone());
    }
    if let Some(id) = id {
        existing.insert("id".to_string(), id);
    }
}

/// View a JSON value as a record, when it is an object.
#[must_use]
pub const fn as_record(value: &Value) -> Option<&Record> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
