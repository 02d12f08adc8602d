use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Compute the Julian day number of a proleptic Gregorian date.
///
/// Every integer triple is accepted. Out-of-range months or days produce a
/// well-defined, if meaningless, day number. The arithmetic is carried out in
/// `i128`, which holds the result for any `i64` inputs.
pub fn julian_day_number(year: i64, month: i64, day: i64) -> i128 {
    let (year, month, day) = (i128::from(year), i128::from(month), i128::from(day));
    // -1 for January and February, 0 for the rest of the year
    let a = (month - 14) / 12;
    (1461 * (year + 4800 + a)).div_euclid(4) + (367 * (month - 2 - 12 * a)).div_euclid(12)
        - (3 * (year + 4900 + a).div_euclid(100)).div_euclid(4)
        + day
        - 32075
}

/// The Julian day number of a calendar date.
pub fn day_index(date: NaiveDate) -> i64 {
    let jdn = julian_day_number(
        date.year().into(),
        date.month().into(),
        date.day().into(),
    );
    // chrono years are bounded by +-262143, so the day number always fits
    jdn as i64
}

/// The Julian day number of the UTC calendar date containing `instant`.
pub fn day_index_at(instant: DateTime<Utc>) -> i64 {
    day_index(instant.date_naive())
}

/// Days elapsed between `epoch` and `date`; negative before the epoch.
pub fn edition(epoch: NaiveDate, date: NaiveDate) -> i64 {
    day_index(date) - day_index(epoch)
}
