//! Compact amount codec
//!
//! Bitcoin Core stores txout amounts through `CompressAmount`, which maps
//! round satoshi values to much smaller integers before varint encoding.
//! The dump only ever decompresses, but the forward direction is kept so
//! the round-trip law can be stated directly in tests.

use crate::error::{Error, Result};

/// Invert `CompressAmount`: map a compressed value back to satoshis.
pub fn decompress(x: u64) -> Result<u64> {
    if x == 0 {
        return Ok(0);
    }

    let mut x = x - 1;
    // exponent is the low base-10 digit
    let e = x % 10;
    x /= 10;

    let n = if e < 9 {
        let d = (x % 9) + 1;
        x /= 9;
        x.checked_mul(10)
            .and_then(|v| v.checked_add(d))
            .ok_or(Error::AmountOverflow)?
    } else {
        x.checked_add(1).ok_or(Error::AmountOverflow)?
    };

    let mut amount = n;
    for _ in 0..e {
        amount = amount.checked_mul(10).ok_or(Error::AmountOverflow)?;
    }
    Ok(amount)
}

/// Bitcoin Core's `CompressAmount`. The image of this function is exactly
/// the set of values `decompress` accepts without loss.
pub fn compress(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }

    let mut n = n;
    let mut e = 0u64;
    while n % 10 == 0 && e < 9 {
        n /= 10;
        e += 1;
    }

    if e < 9 {
        let d = n % 10;
        n /= 10;
        1 + (n * 9 + d - 1) * 10 + e
    } else {
        1 + (n - 1) * 10 + 9
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_table() {
        // powers of ten sit at the start of the compressed range
        assert_eq!(decompress(0).unwrap(), 0);
        assert_eq!(decompress(1).unwrap(), 1);
        assert_eq!(decompress(2).unwrap(), 10);
        assert_eq!(decompress(3).unwrap(), 100);
        assert_eq!(decompress(4).unwrap(), 1_000);
        assert_eq!(decompress(5).unwrap(), 10_000);
        assert_eq!(decompress(6).unwrap(), 100_000);
        assert_eq!(decompress(7).unwrap(), 1_000_000);
        assert_eq!(decompress(8).unwrap(), 10_000_000);
        assert_eq!(decompress(9).unwrap(), 100_000_000);
    }

    #[test]
    fn test_compress_round_trip() {
        let amounts = [
            1u64,
            7,
            10,
            99,
            339_500,
            100_000_000,
            123_456_789,
            2_100_000_000_000_000,
        ];
        for &n in &amounts {
            assert_eq!(decompress(compress(n)).unwrap(), n);
        }
        // and from the compressed side
        for x in 0..10_000u64 {
            assert_eq!(compress(decompress(x).unwrap()), x);
        }
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(matches!(
            decompress(u64::MAX),
            Err(Error::AmountOverflow)
        ));
    }
}
