/// Maps day numbers onto catalog slots so that every slot is used exactly
/// once in any run of `size` consecutive days.
///
/// Slot `nth(day)` is `(multiplier * day) mod size`. The multiplier is derived
/// from the smallest divisor `f` of `size` as `size - size / f + 1`, and must be
/// coprime to `size` for the mapping to be a permutation. Sizes for which that
/// fails are rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    size: usize,
    multiplier: usize,
}

/// The smallest divisor of `n` in `2..n`, if any.
fn smallest_divisor(n: usize) -> Option<usize> {
    (2..n).find(|candidate| n % candidate == 0)
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl Scheduler {
    pub fn new(size: usize) -> Result<Self, Error> {
        if size < 2 {
            return Err(Error::CatalogTooSmall { size });
        }
        let factor = smallest_divisor(size).ok_or(Error::PrimeSize { size })?;
        let big_factor = size / factor;
        let multiplier = size - big_factor + 1;
        if gcd(multiplier, size) != 1 {
            return Err(Error::NotCoprime { size, multiplier });
        }
        tracing::debug!(size, factor, multiplier, "scheduler ready");
        Ok(Self { size, multiplier })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn multiplier(&self) -> usize {
        self.multiplier
    }

    /// The catalog slot scheduled for `day`. Always in `0..size`, for negative days too.
    pub fn nth(&self, day: i64) -> usize {
        let size = self.size as u128;
        // reduce first so the product can't overflow
        let day = u128::from(day.rem_euclid(self.size as i64) as u64);
        ((self.multiplier as u128 * day) % size) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("a catalog of {size} entries is too small to schedule; at least 2 are required")]
    CatalogTooSmall { size: usize },
    #[error("catalog size {size} is prime, so no multiplier can be derived from its divisors")]
    PrimeSize { size: usize },
    #[error("multiplier {multiplier} shares a factor with catalog size {size}; targets would repeat early")]
    NotCoprime { size: usize, multiplier: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn twelve_uses_seven() {
        let scheduler = Scheduler::new(12).unwrap();
        assert_eq!(scheduler.multiplier(), 7);
        let slots: Vec<_> = (0..4).map(|day| scheduler.nth(day)).collect();
        assert_eq!(slots, [0, 7, 2, 9]);
    }

    #[rstest]
    #[case(4)]
    #[case(8)]
    #[case(9)]
    #[case(12)]
    #[case(15)]
    #[case(25)]
    #[case(1024)]
    fn full_period(#[case] size: usize) {
        let scheduler = Scheduler::new(size).unwrap();
        let mut seen = vec![false; size];
        for day in 0..size as i64 {
            let slot = scheduler.nth(day);
            assert!(!seen[slot], "slot {slot} repeated on day {day}");
            seen[slot] = true;
        }
        assert!(seen.into_iter().all(std::convert::identity));
    }

    #[rstest]
    #[case(4)]
    #[case(12)]
    #[case(25)]
    fn periodic(#[case] size: usize) {
        let scheduler = Scheduler::new(size).unwrap();
        let size = size as i64;
        for day in 0..2 * size - 1 {
            assert_eq!(scheduler.nth(day), scheduler.nth(day + size));
        }
    }

    #[test]
    fn negative_days_stay_in_range() {
        let scheduler = Scheduler::new(12).unwrap();
        assert_eq!(scheduler.nth(-1), scheduler.nth(11));
        assert_eq!(scheduler.nth(-12), 0);
        for day in -100..0 {
            assert!(scheduler.nth(day) < 12);
        }
    }

    #[test]
    fn large_day_numbers() {
        let scheduler = Scheduler::new(12).unwrap();
        assert_eq!(scheduler.nth(2_459_722), scheduler.nth(2_459_722 % 12));
        assert!(scheduler.nth(i64::MAX) < 12);
        assert!(scheduler.nth(i64::MIN) < 12);
    }

    #[test]
    fn deterministic() {
        let a = Scheduler::new(12).unwrap();
        let b = Scheduler::new(12).unwrap();
        for day in 0..50 {
            assert_eq!(a.nth(day), b.nth(day));
        }
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn too_small(#[case] size: usize) {
        assert_eq!(Scheduler::new(size), Err(Error::CatalogTooSmall { size }));
    }

    #[rstest]
    #[case(2)]
    #[case(7)]
    #[case(101)]
    fn prime(#[case] size: usize) {
        assert_eq!(Scheduler::new(size), Err(Error::PrimeSize { size }));
    }

    #[rstest]
    #[case(6, 4)]
    #[case(10, 6)]
    fn not_coprime(#[case] size: usize, #[case] multiplier: usize) {
        assert_eq!(
            Scheduler::new(size),
            Err(Error::NotCoprime { size, multiplier })
        );
    }
}
