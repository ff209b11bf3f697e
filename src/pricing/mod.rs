//! Pricing domain for the display controller.
//!
//! Regions, money parsing/formatting and booking-total math. Nothing here
//! touches the page or storage.

pub mod calculators;
pub mod money;
pub mod region;

// Re-export commonly used items
pub use calculators::{calculate_booking_total, BookingTotal, RegionalPrice, NIGHT_SURCHARGE};
pub use money::{format_amount, format_money, parse_price};
pub use region::Region;
