use clockface::clock::{ClockReading, Greeting, Meridiem, Mode, resolve_greeting, resolve_mode};
use proptest::prelude::*;

/// Generate any minute of the day
fn minute_of_day() -> impl Strategy<Value = u16> {
    0u16..1440
}

fn reading(minutes: u16) -> ClockReading {
    ClockReading::from_minutes(minutes)
}

proptest! {
    #[test]
    fn test_morning_window(minutes in 300u16..720) {
        prop_assert_eq!(resolve_greeting(reading(minutes)), Greeting::Morning);
    }

    #[test]
    fn test_afternoon_window(minutes in 720u16..1080) {
        prop_assert_eq!(resolve_greeting(reading(minutes)), Greeting::Afternoon);
    }

    /// Evening wraps midnight: [18:00, 24:00) and [00:00, 05:00)
    #[test]
    fn test_evening_window(minutes in prop_oneof![1080u16..1440, 0u16..300]) {
        prop_assert_eq!(resolve_greeting(reading(minutes)), Greeting::Evening);
    }

    #[test]
    fn test_mode_matches_day_window(minutes in minute_of_day()) {
        let expected = if (300..1080).contains(&minutes) { Mode::Day } else { Mode::Night };
        prop_assert_eq!(resolve_mode(reading(minutes)), expected);
    }

    /// Morning and afternoon are always day; evening is always night
    #[test]
    fn test_greeting_and_mode_agree(minutes in minute_of_day()) {
        let r = reading(minutes);
        let expected = match resolve_greeting(r) {
            Greeting::Morning | Greeting::Afternoon => Mode::Day,
            Greeting::Evening => Mode::Night,
        };
        prop_assert_eq!(resolve_mode(r), expected);
    }

    /// The 12-hour and 24-hour views of a reading describe the same instant
    #[test]
    fn test_twelve_hour_round_trip(minutes in minute_of_day()) {
        let r = reading(minutes);
        let back = ClockReading::from_12h(r.hour_12(), r.minute(), r.meridiem()).unwrap();
        prop_assert_eq!(back, r);
        prop_assert_eq!(
            ClockReading::parse(&format!("{} {}", r, r.meridiem())).unwrap(),
            r
        );
    }
}

#[test]
fn test_documented_boundaries() {
    let at = |h, m, meridiem| ClockReading::from_12h(h, m, meridiem).unwrap();

    assert_eq!(resolve_mode(at(5, 0, Meridiem::Am)), Mode::Day);
    assert_eq!(resolve_mode(at(4, 59, Meridiem::Am)), Mode::Night);
    assert_eq!(resolve_mode(at(6, 0, Meridiem::Pm)), Mode::Night);
    assert_eq!(resolve_mode(at(5, 59, Meridiem::Pm)), Mode::Day);

    // 12:00 PM is noon, 12:00 AM is midnight
    assert_eq!(resolve_greeting(at(12, 0, Meridiem::Pm)), Greeting::Afternoon);
    assert_eq!(resolve_greeting(at(12, 0, Meridiem::Am)), Greeting::Evening);
}
