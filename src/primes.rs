//! Prime capacity finder.
//!
//! Every backing array of an `IntHashMap` has a prime length taken from
//! `PRIMES`. Consecutive entries grow by roughly 12.5%, so a rehash that asks
//! for "at least n slots" never overshoots by much while growth stays
//! geometric.

/// Ascending table of capacities. Dense at the small end, then each entry is
/// the smallest prime above 9/8 of its predecessor, capped by `i32::MAX`
/// (itself prime).
pub const PRIMES: [u32; 161] = [
    3, 5, 7, 11, 13, 17,
    19, 23, 29, 31, 37, 41,
    43, 47, 53, 61, 71, 83,
    97, 113, 131, 149, 173, 197,
    223, 251, 283, 331, 373, 421,
    479, 541, 613, 691, 787, 887,
    1009, 1151, 1297, 1471, 1657, 1867,
    2111, 2377, 2677, 3019, 3407, 3833,
    4327, 4871, 5483, 6173, 6947, 7817,
    8803, 9907, 11_149, 12_547, 14_143, 15_913,
    17_903, 20_143, 22_669, 25_523, 28_723, 32_321,
    36_373, 40_927, 46_049, 51_817, 58_309, 65_599,
    73_819, 83_047, 93_463, 105_167, 118_343, 133_153,
    149_803, 168_533, 189_613, 213_319, 239_999, 270_001,
    303_767, 341_743, 384_469, 432_539, 486_617, 547_453,
    615_887, 692_893, 779_507, 876_947, 986_567, 1_109_891,
    1_248_631, 1_404_721, 1_580_339, 1_777_891, 2_000_143, 2_250_163,
    2_531_443, 2_847_893, 3_203_909, 3_604_417, 4_054_987, 4_561_877,
    5_132_117, 5_773_679, 6_495_389, 7_307_323, 8_220_743, 9_248_339,
    10_404_403, 11_704_963, 13_168_091, 14_814_103, 16_665_881, 18_749_123,
    21_092_779, 23_729_411, 26_695_609, 30_032_573, 33_786_659, 38_010_019,
    42_761_287, 48_106_453, 54_119_761, 60_884_741, 68_495_347, 77_057_297,
    86_689_469, 97_525_661, 109_716_379, 123_430_961, 138_859_837, 156_217_333,
    175_744_531, 197_712_607, 222_426_683, 250_230_023, 281_508_827, 316_697_431,
    356_284_619, 400_820_209, 450_922_753, 507_288_107, 570_699_121, 642_036_517,
    722_291_083, 812_577_517, 914_149_741, 1_028_418_463, 1_156_970_821, 1_301_592_203,
    1_464_291_239, 1_647_327_679, 1_853_243_677, 2_084_899_139, 2_147_483_647,
];

/// The largest capacity any table can have.
pub const LARGEST_PRIME: usize = PRIMES[PRIMES.len() - 1] as usize;

/// Smallest capacity any table can have.
pub const SMALLEST_PRIME: usize = PRIMES[0] as usize;

/// Returns the smallest prime in `PRIMES` that is `>= n`, or `None` when `n`
/// exceeds `LARGEST_PRIME`.
#[inline]
pub fn next_prime(n: usize) -> Option<usize> {
    let i = PRIMES.partition_point(|&p| (p as usize) < n);
    PRIMES.get(i).map(|&p| p as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_prime(n: u64) -> bool {
        if n < 2 {
            return false;
        }
        let mut d = 2;
        while d * d <= n {
            if n % d == 0 {
                return false;
            }
            d += 1;
        }
        true
    }

    #[test]
    fn table_is_strictly_ascending() {
        assert!(PRIMES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn every_entry_is_prime() {
        for &p in PRIMES.iter() {
            assert!(is_prime(p as u64), "{p} is not prime");
        }
    }

    #[test]
    fn growth_between_entries_stays_bounded() {
        for w in PRIMES.windows(2) {
            // Past the dense prefix no gap exceeds 9/8 plus the distance to the next prime.
            if w[0] > 100 {
                assert!((w[1] as u64) * 100 < (w[0] as u64) * 120, "{} -> {}", w[0], w[1]);
            }
        }
    }

    #[test]
    fn ceiling_is_i32_max() {
        assert_eq!(LARGEST_PRIME, i32::MAX as usize);
        assert_eq!(next_prime(LARGEST_PRIME), Some(LARGEST_PRIME));
        assert_eq!(next_prime(LARGEST_PRIME + 1), None);
    }

    #[test]
    fn rounds_up_to_table_entries() {
        assert_eq!(next_prime(0), Some(3));
        assert_eq!(next_prime(1), Some(3));
        assert_eq!(next_prime(3), Some(3));
        assert_eq!(next_prime(4), Some(5));
        assert_eq!(next_prime(48), Some(53));
        assert_eq!(next_prime(225), Some(251));
        assert_eq!(next_prime(251), Some(251));
    }

    #[test]
    fn result_is_smallest_entry_at_or_above() {
        for n in [2usize, 10, 99, 1000, 65_536, 1 << 20, 1 << 30] {
            let p = next_prime(n).unwrap();
            assert!(p >= n);
            assert!(PRIMES.iter().all(|&q| (q as usize) < n || q as usize >= p));
        }
    }
}
