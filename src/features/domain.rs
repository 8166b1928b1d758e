//! Value domains for form controls
//!
//! Each control value is held in a type that cannot represent anything
//! outside the control's declared range.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{HousePriceError, Result};

/// Integer restricted to `MIN..=MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct BoundedInt<const MIN: i64, const MAX: i64>(i64);

impl<const MIN: i64, const MAX: i64> BoundedInt<MIN, MAX> {
    pub const LOWER: i64 = MIN;
    pub const UPPER: i64 = MAX;

    /// Construct a value, rejecting anything outside the bounds
    pub fn new(value: i64) -> Result<Self> {
        if (MIN..=MAX).contains(&value) {
            Ok(BoundedInt(value))
        } else {
            Err(HousePriceError::OutOfRange {
                field: String::new(),
                value: value.to_string(),
                min: MIN.to_string(),
                max: MAX.to_string(),
            })
        }
    }

    /// Construct a value, pulling it onto the nearest bound (slider behaviour)
    pub const fn clamped(value: i64) -> Self {
        if value < MIN {
            BoundedInt(MIN)
        } else if value > MAX {
            BoundedInt(MAX)
        } else {
            BoundedInt(value)
        }
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl<const MIN: i64, const MAX: i64> TryFrom<i64> for BoundedInt<MIN, MAX> {
    type Error = HousePriceError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl<const MIN: i64, const MAX: i64> From<BoundedInt<MIN, MAX>> for i64 {
    fn from(value: BoundedInt<MIN, MAX>) -> i64 {
        value.0
    }
}

impl<const MIN: i64, const MAX: i64> fmt::Display for BoundedInt<MIN, MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1 (worst) to 5 (best) rating
pub type Rating = BoundedInt<1, 5>;
/// Room and carpark counts
pub type Count = BoundedInt<0, { i64::MAX }>;
pub type YearBuilt = BoundedInt<1800, 2025>;
pub type SoldYear = BoundedInt<2000, 2030>;
pub type SoldMonth = BoundedInt<1, 12>;

/// Finite float that is never negative
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct NonNegative(f64);

impl NonNegative {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(NonNegative(value))
        } else {
            Err(HousePriceError::OutOfRange {
                field: String::new(),
                value: value.to_string(),
                min: "0".to_string(),
                max: "inf".to_string(),
            })
        }
    }

    /// Construct a value, replacing negative or non-finite input with 0
    pub fn clamped(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            NonNegative(value)
        } else {
            NonNegative(0.0)
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for NonNegative {
    type Error = HousePriceError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<NonNegative> for f64 {
    fn from(value: NonNegative) -> f64 {
        value.0
    }
}

impl fmt::Display for NonNegative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Exclusive choice rendered as a radio group and encoded one-hot
pub trait Choice: Copy + PartialEq + Sized + 'static {
    /// All options, in display (and one-hot column) order
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.label()).collect()
    }

    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }

    /// Position of this option in `ALL`
    fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    /// 1 for the selected option, 0 for every other
    fn indicator(&self, option: Self) -> i64 {
        i64::from(*self == option)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suburb {
    MairangiBay,
    Other,
}

impl Choice for Suburb {
    const ALL: &'static [Self] = &[Suburb::MairangiBay, Suburb::Other];

    fn label(&self) -> &'static str {
        match self {
            Suburb::MairangiBay => "Mairangi Bay",
            Suburb::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Crosslease,
    Freehold,
    Townhouse,
}

impl Choice for PropertyType {
    const ALL: &'static [Self] = &[
        PropertyType::Crosslease,
        PropertyType::Freehold,
        PropertyType::Townhouse,
    ];

    fn label(&self) -> &'static str {
        match self {
            PropertyType::Crosslease => "Crosslease",
            PropertyType::Freehold => "Freehold",
            PropertyType::Townhouse => "Townhouse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingType {
    Auction,
    NoAuction,
}

impl Choice for ListingType {
    const ALL: &'static [Self] = &[ListingType::Auction, ListingType::NoAuction];

    fn label(&self) -> &'static str {
        match self {
            ListingType::Auction => "Auction",
            ListingType::NoAuction => "No Auction",
        }
    }
}
