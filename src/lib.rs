//! Region-aware price display for therapist booking pages.
//!
//! A visitor picks a pricing region (Delhi-NCR or the rest of India); every
//! price on the page follows that choice and the open booking's total is
//! recomputed with an optional flat night surcharge. The page and the
//! preference storage are injected through [`ViewBinding`] and
//! [`PreferenceStore`] so the controller runs against any document model.

pub mod config;
pub mod controller;
pub mod error;
pub mod markup;
pub mod pricing;
pub mod store;
pub mod view;

pub use config::PricingConfig;
pub use controller::{BookingSnapshot, PricingDisplayController, UiEvent};
pub use error::{PricingError, Result};
pub use pricing::{BookingTotal, Region};
pub use store::{JsonFileStore, MemoryStore, PreferenceStore};
pub use view::{ItemAttributes, MemoryView, ViewBinding};
