//! Region-aware price display controller.
//!
//! Owns the selected region, keeps every price on the page in sync with it,
//! and recomputes the open booking's total. All document and storage access
//! goes through the injected [`ViewBinding`] and [`PreferenceStore`]; nothing
//! here ever fails outward. Missing elements or storage errors leave the
//! affected display untouched and are logged.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::PricingConfig;
use crate::markup;
use crate::pricing::calculators::{calculate_booking_total, effective_surcharge, BookingTotal};
use crate::pricing::money::format_money;
use crate::pricing::region::Region;
use crate::store::PreferenceStore;
use crate::view::ViewBinding;

/// Wrapper of the region selector block
pub const REGION_TOGGLE_ID: &str = "regionToggle";
/// Navbar label showing the active region name
pub const REGION_INDICATOR_ID: &str = "regionIndicator";
pub const BOOKING_MODAL_ID: &str = "bookingModal";
/// Hidden field holding the id of the item being booked
pub const BOOKING_ITEM_ID: &str = "bookingTherapistId";
pub const NIGHT_TOGGLE_ID: &str = "nightTimeToggle";
pub const PRICE_BREAKDOWN_ID: &str = "priceBreakdown";
pub const DISPLAY_AMOUNT_ID: &str = "displayAmount";
/// Hidden field read by booking submission
pub const BOOKING_AMOUNT_ID: &str = "bookingAmount";
/// Class marking the booking modal as open
pub const VISIBLE_CLASS: &str = "show";

/// User interaction delivered by the host's event delegation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Click on a `.region-btn`, carrying its `data-region`
    RegionButtonClicked { region: Option<String> },
    /// Click anywhere else
    Clicked,
    /// `change` fired on the element with `target_id`
    Changed { target_id: String },
}

/// Booking-relevant pricing state for submission logic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSnapshot {
    pub region: Region,
    pub is_night: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub night_charge: Decimal,
}

/// Price display controller for one page view
#[derive(Debug)]
pub struct PricingDisplayController<V, S> {
    view: V,
    store: S,
    config: PricingConfig,
    /// Raw region key as selected or stored; unknown keys price as OTHER
    region_key: String,
    listening: bool,
}

impl<V: ViewBinding, S: PreferenceStore> PricingDisplayController<V, S> {
    pub fn new(view: V, store: S, config: PricingConfig) -> Self {
        Self {
            view,
            store,
            config,
            region_key: Region::default().key().to_string(),
            listening: false,
        }
    }

    /// Load the stored region, mount the region selector if the page lacks
    /// one, start handling events and render every price.
    pub fn initialize(&mut self) {
        self.region_key = self.stored_region_key();
        debug!("Initializing pricing display with region {:?}", self.region_key);

        self.ensure_region_toggle();
        self.update_region_display();
        self.listening = true;
        self.refresh_all_prices();
    }

    /// Select a region, persist it and redraw all prices.
    ///
    /// The key is stored verbatim; anything other than `"ncr"` prices as
    /// [`Region::Other`].
    pub fn set_region(&mut self, region: &str) {
        self.region_key = region.to_string();
        if let Err(e) = self.store.set(&self.config.storage_key, region) {
            warn!("Failed to persist region {:?}: {}", region, e);
        }
        info!("Region set to {:?} ({})", region, self.region());

        self.refresh_all_prices();
        self.update_region_display();
    }

    /// Redraw every item's price label, then the open booking total.
    pub fn refresh_all_prices(&mut self) {
        let region = self.region();
        let items = self.view.items();

        for (index, item) in items.iter().enumerate() {
            let price = item.regional_price().for_region(region);
            let text = format!(
                "{}{}",
                format_money(&self.config.currency_symbol, price),
                self.config.price_suffix
            );
            self.view.set_item_price_text(index, &text);
        }
        debug!("Refreshed {} item prices for {}", items.len(), region);

        self.refresh_booking_total();
    }

    /// Recompute the open booking's total.
    ///
    /// Does nothing (and returns `None`) unless the booking modal is shown
    /// with a selected item that exists on the page.
    pub fn refresh_booking_total(&mut self) -> Option<BookingTotal> {
        if !self.view.has_class(BOOKING_MODAL_ID, VISIBLE_CLASS) {
            return None;
        }

        let item_id = self
            .view
            .field_value(BOOKING_ITEM_ID)
            .filter(|id| !id.is_empty())?;
        let Some(item) = self.view.find_item(&item_id) else {
            debug!("Booked item {:?} not found on page", item_id);
            return None;
        };

        let is_night = self.view.is_checked(NIGHT_TOGGLE_ID);
        let totals = calculate_booking_total(
            &item.regional_price(),
            self.region(),
            is_night,
            self.config.night_surcharge,
        );

        self.update_price_breakdown(&totals);
        self.view
            .set_field_value(BOOKING_AMOUNT_ID, &totals.total.normalize().to_string());

        debug!(
            "Booking total for {:?}: {} + {} = {}",
            item_id, totals.base_price, totals.surcharge, totals.total
        );
        Some(totals)
    }

    /// Current region, night flag and applied surcharge
    pub fn booking_snapshot(&self) -> BookingSnapshot {
        let is_night = self.view.is_checked(NIGHT_TOGGLE_ID);
        BookingSnapshot {
            region: self.region(),
            is_night,
            night_charge: effective_surcharge(is_night, self.config.night_surcharge),
        }
    }

    /// Delegated event entry point. Ignored until [`initialize`] has run.
    ///
    /// [`initialize`]: Self::initialize
    pub fn handle_event(&mut self, event: &UiEvent) {
        if !self.listening {
            return;
        }

        match event {
            UiEvent::RegionButtonClicked {
                region: Some(region),
            } => self.set_region(region),
            UiEvent::RegionButtonClicked { region: None } => {
                debug!("Region button without data-region ignored");
            }
            UiEvent::Changed { target_id } if target_id == NIGHT_TOGGLE_ID => {
                self.refresh_booking_total();
            }
            UiEvent::Changed { .. } | UiEvent::Clicked => {}
        }
    }

    pub fn region(&self) -> Region {
        Region::from_key(&self.region_key)
    }

    pub fn region_key(&self) -> &str {
        &self.region_key
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (V, S) {
        (self.view, self.store)
    }

    fn stored_region_key(&self) -> String {
        match self.store.get(&self.config.storage_key) {
            Ok(Some(key)) if !key.is_empty() => key,
            Ok(_) => Region::default().key().to_string(),
            Err(e) => {
                warn!("Failed to read stored region: {}", e);
                Region::default().key().to_string()
            }
        }
    }

    fn ensure_region_toggle(&mut self) {
        if self.view.element_exists(REGION_TOGGLE_ID) {
            return;
        }

        let html = match markup::render_region_toggle(REGION_TOGGLE_ID) {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to render region toggle: {}", e);
                return;
            }
        };

        if !self.view.append_html(&self.config.mount_selector, &html) {
            debug!("Mount {:?} absent, region toggle not inserted", self.config.mount_selector);
        }
    }

    fn update_region_display(&mut self) {
        for (index, button) in self.view.region_buttons().iter().enumerate() {
            let active = button.as_deref() == Some(self.region_key.as_str());
            self.view.set_region_button_active(index, active);
        }

        let region_name = self.region().display_name();
        self.view.set_text(REGION_INDICATOR_ID, region_name);
    }

    fn update_price_breakdown(&mut self, totals: &BookingTotal) {
        if !self.view.element_exists(PRICE_BREAKDOWN_ID) {
            return;
        }

        match markup::render_price_breakdown(totals, &self.config.currency_symbol) {
            Ok(html) => {
                self.view.set_inner_html(PRICE_BREAKDOWN_ID, &html);
            }
            Err(e) => {
                warn!("Failed to render price breakdown: {}", e);
                return;
            }
        }

        self.view.set_text(
            DISPLAY_AMOUNT_ID,
            &format_money(&self.config.currency_symbol, totals.total),
        );
    }
}
