use chrono::NaiveDate;

/// All monetary amounts are integer cents.
pub type Cents = i64;

/// Round to the nearest cent, half away from zero. Applied after every
/// multiplicative step so line totals match what a clerk would write down.
/// Non-finite inputs collapse to zero.
pub fn round_cents(value: f64) -> Cents {
    if !value.is_finite() {
        return 0;
    }
    if value >= 0.0 {
        (value + 0.5).floor() as Cents
    } else {
        (value - 0.5).ceil() as Cents
    }
}

/// Signed midnight-to-midnight day difference. A vehicle dropped off at
/// 11pm and picked up at 1am the next day counts as one calendar day.
pub fn calendar_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}
