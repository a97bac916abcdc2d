//! Shared helpers for building synthetic rootlist fixtures.
#![allow(dead_code)]

/// Appends a base-128 varint.
pub fn push_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Appends a record tag.
pub fn push_tag(out: &mut Vec<u8>, field: u32, wire_kind: u8) {
    push_varint(out, (u64::from(field) << 3) | u64::from(wire_kind));
}

/// Appends a varint-kind record.
pub fn push_varint_record(out: &mut Vec<u8>, field: u32, value: u64) {
    push_tag(out, field, 0);
    push_varint(out, value);
}

/// Appends a length-delimited record.
pub fn push_bytes_record(out: &mut Vec<u8>, field: u32, payload: &[u8]) {
    push_tag(out, field, 2);
    push_varint(out, payload.len() as u64);
    out.extend_from_slice(payload);
}

/// Builds one rootlist item message carrying a uri.
pub fn item(uri: &str) -> Vec<u8> {
    let mut out = Vec::new();
    push_bytes_record(&mut out, 1, uri.as_bytes());
    out
}

/// Builds a rootlist value from item uris, with a leading version record the
/// projector must ignore.
pub fn rootlist_value(uris: &[&str]) -> Vec<u8> {
    let mut out = Vec::new();
    push_varint_record(&mut out, 1, 114_800_625);
    for uri in uris {
        push_bytes_record(&mut out, 2, &item(uri));
    }
    out
}

/// The entry uris of the documented example hierarchy:
/// Seasons(f1) → [ Summer(f2) → [p1], p2 ].
pub fn seasons_uris() -> Vec<&'static str> {
    vec![
        "spotify:start-group:f1:Seasons",
        "spotify:start-group:f2:Summer",
        "spotify:playlist:p1",
        "spotify:end-group:f2",
        "spotify:playlist:p2",
        "spotify:end-group:f1",
    ]
}
