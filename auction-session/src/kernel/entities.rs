use {
    serde::{
        Deserialize,
        Serialize,
    },
    std::{
        fmt::{
            Display,
            Formatter,
        },
        str::FromStr,
    },
};

pub const CURRENCY_SUFFIX: &str = "đồng";
const THOUSANDS_SEPARATOR: char = '.';

/// Non-negative amount of whole currency units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    pub const fn units(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_mul(self, factor: u64) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }
}

/// Renders `1500000` as `1.500.000 đồng`.
impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(THOUSANDS_SEPARATOR);
            }
            grouped.push(digit);
        }
        write!(f, "{} {}", grouped, CURRENCY_SUFFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMoneyError {
    Empty,
    Negative,
    InvalidDigits(String),
    Overflow,
}

impl Display for ParseMoneyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseMoneyError::Empty => write!(f, "amount is empty"),
            ParseMoneyError::Negative => write!(f, "amount must not be negative"),
            ParseMoneyError::InvalidDigits(raw) => write!(f, "'{}' is not a valid amount", raw),
            ParseMoneyError::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseMoneyError {}

/// Accepts the display form (`1.500.000 đồng`), plain digits and `,` grouping.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let without_suffix = trimmed
            .strip_suffix(CURRENCY_SUFFIX)
            .unwrap_or(trimmed)
            .trim();
        if without_suffix.is_empty() {
            return Err(ParseMoneyError::Empty);
        }
        if without_suffix.starts_with('-') {
            return Err(ParseMoneyError::Negative);
        }
        let digits: String = without_suffix
            .chars()
            .filter(|c| !matches!(c, '.' | ',' | ' '))
            .collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseMoneyError::InvalidDigits(s.to_string()));
        }
        digits.parse::<u64>().map(Money).map_err(|_| ParseMoneyError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::new(0).to_string(), "0 đồng");
        assert_eq!(Money::new(999).to_string(), "999 đồng");
        assert_eq!(Money::new(1_000).to_string(), "1.000 đồng");
        assert_eq!(Money::new(1_500_000).to_string(), "1.500.000 đồng");
        assert_eq!(Money::new(12_345_678_901).to_string(), "12.345.678.901 đồng");
    }

    #[test]
    fn test_parse_accepts_operator_input() {
        assert_eq!("2000000".parse::<Money>().unwrap(), Money::new(2_000_000));
        assert_eq!("2.000.000".parse::<Money>().unwrap(), Money::new(2_000_000));
        assert_eq!("2,000,000".parse::<Money>().unwrap(), Money::new(2_000_000));
        assert_eq!(
            " 2.000.000 đồng ".parse::<Money>().unwrap(),
            Money::new(2_000_000)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert_eq!(" đồng".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert_eq!("-5".parse::<Money>(), Err(ParseMoneyError::Negative));
        assert_eq!(
            "12abc".parse::<Money>(),
            Err(ParseMoneyError::InvalidDigits("12abc".to_string()))
        );
        assert_eq!(
            "99999999999999999999999".parse::<Money>(),
            Err(ParseMoneyError::Overflow)
        );
    }

    #[test]
    fn test_display_parse_round_trip() {
        for units in [0, 7, 1_000, 500_000, 2_500_000, u64::MAX] {
            let money = Money::new(units);
            assert_eq!(money.to_string().parse::<Money>().unwrap(), money);
        }
    }

    #[test]
    fn test_checked_arithmetic() {
        let step = Money::new(500_000);
        assert_eq!(step.checked_mul(3), Some(Money::new(1_500_000)));
        assert_eq!(
            Money::new(1_000_000).checked_add(step),
            Some(Money::new(1_500_000))
        );
        assert_eq!(Money::new(u64::MAX).checked_add(step), None);
        assert_eq!(step.checked_mul(u64::MAX), None);
    }
}
