//! Gray code conversion
//!
//! Symbol indices are Gray coded along every linear axis so that
//! neighbouring constellation points differ in exactly one bit.

/// Binary index → Gray code
#[inline]
pub fn gray_encode(s: u32) -> u32 {
    s ^ (s >> 1)
}

/// Gray code → binary index
#[inline]
pub fn gray_decode(g: u32) -> u32 {
    let mut s = g;
    let mut shift = g >> 1;
    while shift != 0 {
        s ^= shift;
        shift >>= 1;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(gray_encode(0), 0);
        assert_eq!(gray_encode(1), 1);
        assert_eq!(gray_encode(2), 3);
        assert_eq!(gray_encode(3), 2);
        assert_eq!(gray_encode(7), 4);
    }

    #[test]
    fn decode_inverts_encode() {
        for s in 0..4096 {
            assert_eq!(gray_decode(gray_encode(s)), s);
        }
    }

    #[test]
    fn neighbours_differ_in_one_bit() {
        for s in 0..255u32 {
            let diff = gray_encode(s) ^ gray_encode(s + 1);
            assert_eq!(diff.count_ones(), 1, "codes for {} and {}", s, s + 1);
        }
    }
}
