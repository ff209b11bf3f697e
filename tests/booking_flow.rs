//! End-to-end booking page flows against the in-memory document.

use regional_pricing::controller::{
    BOOKING_AMOUNT_ID, BOOKING_ITEM_ID, BOOKING_MODAL_ID, DISPLAY_AMOUNT_ID, NIGHT_TOGGLE_ID,
    PRICE_BREAKDOWN_ID, REGION_INDICATOR_ID, VISIBLE_CLASS,
};
use regional_pricing::{
    ItemAttributes, JsonFileStore, MemoryStore, MemoryView, PreferenceStore, PricingConfig,
    PricingDisplayController, Region, UiEvent, ViewBinding,
};
use rust_decimal_macros::dec;

const MOUNT: &str = ".hero-section .container .row";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("regional_pricing=debug")
        .with_test_writer()
        .try_init();
}

fn therapist_page() -> MemoryView {
    MemoryView::new()
        .with_mount(MOUNT)
        .with_element(REGION_INDICATOR_ID)
        .with_item(ItemAttributes::new("t1", "2000", "1800"))
        .with_item(ItemAttributes::new("t2", "2500", "2200"))
        .with_classes(BOOKING_MODAL_ID, &["modal"])
        .with_field(BOOKING_ITEM_ID, "")
        .with_checkbox(NIGHT_TOGGLE_ID, false)
        .with_element(PRICE_BREAKDOWN_ID)
        .with_element(DISPLAY_AMOUNT_ID)
        .with_field(BOOKING_AMOUNT_ID, "")
}

#[test]
fn region_survives_reload_with_file_store() {
    init_tracing();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");

    let mut first = PricingDisplayController::new(
        therapist_page(),
        JsonFileStore::new(&path),
        PricingConfig::default(),
    );
    first.initialize();
    assert_eq!(first.region(), Region::Other);
    first.set_region("ncr");

    // Simulated reload: fresh page, fresh controller, same storage
    let mut reloaded = PricingDisplayController::new(
        therapist_page(),
        JsonFileStore::new(&path),
        PricingConfig::default(),
    );
    reloaded.initialize();
    assert_eq!(reloaded.region(), Region::Ncr);
    assert_eq!(reloaded.view().item_price_text(0), Some("₹2,000/session"));
    assert_eq!(reloaded.view().item_price_text(1), Some("₹2,500/session"));
    assert_eq!(reloaded.view().text(REGION_INDICATOR_ID), Some("Delhi-NCR"));
}

#[test]
fn booking_modal_flow() {
    init_tracing();
    let mut controller =
        PricingDisplayController::new(therapist_page(), MemoryStore::new(), PricingConfig::default());
    controller.initialize();

    // Modal closed: nothing to compute
    assert!(controller.refresh_booking_total().is_none());

    // Host opens the modal for t1
    let view = controller.view_mut();
    view.add_class(BOOKING_MODAL_ID, VISIBLE_CLASS);
    view.set_field_value(BOOKING_ITEM_ID, "t1");
    let totals = controller.refresh_booking_total().unwrap();
    assert_eq!(totals.total, dec!(1800));

    controller.handle_event(&UiEvent::RegionButtonClicked {
        region: Some("ncr".to_string()),
    });
    assert_eq!(
        controller.view().field_value(BOOKING_AMOUNT_ID).as_deref(),
        Some("2000")
    );

    controller.view_mut().set_checked(NIGHT_TOGGLE_ID, true);
    controller.handle_event(&UiEvent::Changed {
        target_id: NIGHT_TOGGLE_ID.to_string(),
    });
    assert_eq!(
        controller.view().field_value(BOOKING_AMOUNT_ID).as_deref(),
        Some("3500")
    );
    let breakdown = controller.view().inner_html(PRICE_BREAKDOWN_ID).unwrap();
    assert!(breakdown.contains("Base Price (Delhi-NCR):"));
    assert!(breakdown.contains("Night Time Charge:"));
    assert_eq!(controller.view().text(DISPLAY_AMOUNT_ID), Some("₹3,500"));

    let snapshot = controller.booking_snapshot();
    assert_eq!(snapshot.region, Region::Ncr);
    assert!(snapshot.is_night);
    assert_eq!(snapshot.night_charge, dec!(1500));

    let (_view, store) = controller.into_parts();
    assert_eq!(store.get("selectedRegion").unwrap().as_deref(), Some("ncr"));
}

#[test]
fn toggle_block_is_inserted_once() {
    let mut controller =
        PricingDisplayController::new(therapist_page(), MemoryStore::new(), PricingConfig::default());
    controller.initialize();
    controller.initialize();

    assert_eq!(controller.view().mounted_html(MOUNT).len(), 1);
    assert_eq!(controller.view().buttons().len(), 2);
}
