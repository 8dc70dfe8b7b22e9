// crates/covergen-core/src/digest.rs

use crate::buffer::{quantize_channel, PixelBuffer};

/// First 16 bytes of BLAKE3 over the quantized RGB bytes, hashed one row at a time.
pub fn cover_id(buf: &PixelBuffer) -> [u8; 16] {
    let mut hasher = blake3::Hasher::new();
    let mut row = vec![0u8; buf.stride()];
    for chunk in buf.as_slice().chunks(buf.stride().max(1)) {
        for (b, &v) in row.iter_mut().zip(chunk) {
            *b = quantize_channel(v) as u8;
        }
        hasher.update(&row[..chunk.len()]);
    }
    first_16(&hasher.finalize())
}

fn first_16(hash: &blake3::Hash) -> [u8; 16] {
    let mut out = [0u8; 16];
    out.copy_from_slice(&hash.as_bytes()[0..16]);
    out
}

pub fn blake3_16(bytes: &[u8]) -> [u8; 16] {
    first_16(&blake3::hash(bytes))
}

pub fn cover_id_hex(buf: &PixelBuffer) -> String {
    cover_id(buf).iter().map(|b| format!("{b:02x}")).collect()
}
