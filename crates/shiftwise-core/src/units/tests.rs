//! Tests for time and money units.

use super::*;

#[test]
fn test_time_parsing() {
    let t: TimeOfDay = "09:30".parse().unwrap();
    assert_eq!(t.minutes(), 570);
    assert_eq!(t.hour(), 9);
    assert_eq!(t.to_string(), "09:30");

    let end: TimeOfDay = "24:00".parse().unwrap();
    assert_eq!(end.minutes(), 1440);
}

#[test]
fn test_time_parsing_rejects_garbage() {
    assert!("9".parse::<TimeOfDay>().is_err());
    assert!("25:00".parse::<TimeOfDay>().is_err());
    assert!("10:60".parse::<TimeOfDay>().is_err());
    assert!("10:5".parse::<TimeOfDay>().is_err());
    assert!("24:01".parse::<TimeOfDay>().is_err());
    assert!("ab:cd".parse::<TimeOfDay>().is_err());
}

#[test]
fn test_day_index() {
    assert_eq!(day_index("Wednesday"), Some(2));
    assert_eq!(day_index(" SATURDAY "), Some(5));
    assert_eq!(day_index("Someday"), None);
}

#[test]
fn test_money_display() {
    assert_eq!(Money::from_cents(9000).to_string(), "$90.00");
    assert_eq!(Money::from_cents(123456).to_string(), "$1,234.56");
    assert_eq!(Money::from_cents(100_000_005).to_string(), "$1,000,000.05");
    assert_eq!(Money::from_cents(-250).to_string(), "-$2.50");
    assert_eq!(Money::from_cents(-123_456_789).to_string(), "-$1,234,567.89");
    assert_eq!(Money::ZERO.to_string(), "$0.00");
}

#[test]
fn test_money_rate_for_minutes() {
    let rate = Money::from_dollars(16.75);
    assert_eq!(rate.for_minutes(60), Money::from_cents(1675));
    assert_eq!(rate.for_minutes(90), Money::from_cents(2513));
    assert_eq!(rate.for_minutes(0), Money::ZERO);
}

#[test]
fn test_money_arithmetic() {
    let total: Money = [Money::from_cents(150), Money::from_cents(250)]
        .into_iter()
        .sum();
    assert_eq!(total, Money::from_cents(400));
    assert_eq!(total - Money::from_cents(100), Money::from_cents(300));
    assert_eq!(Money::from_cents(150) * 3, Money::from_cents(450));
}
