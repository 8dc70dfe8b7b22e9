// crates/covergen-core/src/color/rgb.rs

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale unit-range channels to [0, 255] and truncate, as palette conversion requires.
    #[inline]
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        #[inline]
        fn ch(v: f64) -> u8 {
            (v * 255.0).clamp(0.0, 255.0) as u8
        }
        Self::new(ch(r), ch(g), ch(b))
    }

    /// Parse exactly six hex digits (no prefix).
    pub fn from_hex6(s: &str) -> Option<Self> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let p = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        Some(Self::new(p(0)?, p(2)?, p(4)?))
    }

    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parse_and_display() {
        let c = Rgb::from_hex6("ff5733").unwrap();
        assert_eq!(c, Rgb::new(0xFF, 0x57, 0x33));
        assert_eq!(c.to_string(), "#FF5733");
    }

    #[test]
    fn hex_parse_rejects_garbage() {
        assert!(Rgb::from_hex6("ff57").is_none());
        assert!(Rgb::from_hex6("gg0000").is_none());
        assert!(Rgb::from_hex6("+f0000").is_none());
    }

    #[test]
    fn from_unit_truncates() {
        // 0.999 * 255 = 254.745 -> 254
        assert_eq!(Rgb::from_unit(1.0, 0.999, 0.0), Rgb::new(255, 254, 0));
    }
}
