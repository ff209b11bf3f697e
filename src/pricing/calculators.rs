//! Core booking price calculations.
//!
//! Pure functions for pricing math - no document or storage access.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::pricing::region::Region;

/// Flat charge added to a booking when the night-time option is selected.
pub const NIGHT_SURCHARGE: Decimal = Decimal::from_parts(1500, 0, 0, false, 0);

/// The two region-scoped prices carried by an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionalPrice {
    pub ncr: Decimal,
    pub other: Decimal,
}

impl RegionalPrice {
    pub fn new(ncr: Decimal, other: Decimal) -> Self {
        Self { ncr, other }
    }

    /// Price applicable in the given region
    pub fn for_region(&self, region: Region) -> Decimal {
        match region {
            Region::Ncr => self.ncr,
            Region::Other => self.other,
        }
    }
}

/// Computed totals for the open booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookingTotal {
    pub region: Region,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub surcharge: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

/// Surcharge actually applied for the given night flag.
pub fn effective_surcharge(is_night: bool, night_surcharge: Decimal) -> Decimal {
    if is_night {
        night_surcharge
    } else {
        Decimal::ZERO
    }
}

/// Calculate a booking total.
///
/// `total = base + (is_night ? night_surcharge : 0)` where `base` is the
/// item's price for `region`. A sum beyond the `Decimal` range saturates at
/// `Decimal::MAX` (or `Decimal::MIN`).
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use regional_pricing::pricing::calculators::{calculate_booking_total, RegionalPrice, NIGHT_SURCHARGE};
/// use regional_pricing::Region;
///
/// let price = RegionalPrice::new(dec!(2000), dec!(1800));
/// let total = calculate_booking_total(&price, Region::Ncr, true, NIGHT_SURCHARGE);
/// assert_eq!(total.total, dec!(3500));
/// ```
pub fn calculate_booking_total(
    price: &RegionalPrice,
    region: Region,
    is_night: bool,
    night_surcharge: Decimal,
) -> BookingTotal {
    let base_price = price.for_region(region);
    let surcharge = effective_surcharge(is_night, night_surcharge);

    BookingTotal {
        region,
        base_price,
        surcharge,
        total: base_price.saturating_add(surcharge),
    }
}
