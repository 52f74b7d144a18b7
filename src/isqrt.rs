// Integer square root, used by the radial delay pattern.

/// floor(sqrt(x)) by the binary digit-by-digit method.
///
/// `bit` walks down the even bit positions from 2^30; each step decides one
/// bit of the root. Integer-only, exact for every `u32`.
pub fn isqrt(mut x: u32) -> u32 {
    let mut bit: u32 = 0x4000_0000;
    let mut root: u32 = 0;
    while bit != 0 {
        let trial = root | bit;
        root >>= 1;
        if x >= trial {
            x -= trial;
            root |= bit;
        }
        bit >>= 2;
    }
    root
}
