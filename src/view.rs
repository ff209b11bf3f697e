//! View binding capability.
//!
//! The controller never touches a document directly. Everything it reads or
//! writes goes through [`ViewBinding`], which a host implements over its real
//! document tree. [`MemoryView`] is an in-memory implementation for tests and
//! server-side previews.

use std::collections::{BTreeMap, BTreeSet};

use crate::pricing::calculators::RegionalPrice;
use crate::pricing::money::parse_price;

/// Attributes of a priceable item element, read verbatim from markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemAttributes {
    /// `data-therapist-id`
    pub item_id: Option<String>,
    /// `data-price-ncr`
    pub price_ncr: Option<String>,
    /// `data-price-other`
    pub price_other: Option<String>,
}

impl ItemAttributes {
    pub fn new(item_id: &str, price_ncr: &str, price_other: &str) -> Self {
        Self {
            item_id: Some(item_id.to_string()),
            price_ncr: Some(price_ncr.to_string()),
            price_other: Some(price_other.to_string()),
        }
    }

    /// Parsed prices; missing or non-numeric attributes count as zero.
    pub fn regional_price(&self) -> RegionalPrice {
        RegionalPrice::new(
            parse_price(self.price_ncr.as_deref()),
            parse_price(self.price_other.as_deref()),
        )
    }
}

/// Query and mutate the host document.
///
/// Elements are addressed by id, priceable items and region buttons by their
/// position in document order. Writes return `false` when the target does not
/// exist; callers treat that as a skipped update.
pub trait ViewBinding {
    fn element_exists(&self, id: &str) -> bool;

    fn has_class(&self, id: &str, class: &str) -> bool;

    /// Form value of the element, `None` when absent or not a field
    fn field_value(&self, id: &str) -> Option<String>;

    /// Checked state of a checkbox; absent elements read as unchecked
    fn is_checked(&self, id: &str) -> bool;

    fn set_text(&mut self, id: &str, text: &str) -> bool;

    fn set_inner_html(&mut self, id: &str, html: &str) -> bool;

    fn set_field_value(&mut self, id: &str, value: &str) -> bool;

    /// Append markup at the end of the first element matching `selector`
    fn append_html(&mut self, selector: &str, html: &str) -> bool;

    /// Every element carrying `data-therapist-id`, in document order
    fn items(&self) -> Vec<ItemAttributes>;

    /// First item whose id equals `item_id`
    fn find_item(&self, item_id: &str) -> Option<ItemAttributes> {
        self.items()
            .into_iter()
            .find(|item| item.item_id.as_deref() == Some(item_id))
    }

    /// Write the text of the item's `.price-display` child
    fn set_item_price_text(&mut self, index: usize, text: &str) -> bool;

    /// `data-region` of every `.region-btn`, in document order
    fn region_buttons(&self) -> Vec<Option<String>>;

    fn set_region_button_active(&mut self, index: usize, active: bool);
}

/// An element in a [`MemoryView`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub classes: BTreeSet<String>,
    pub text: String,
    pub inner_html: String,
    pub value: Option<String>,
    pub checked: bool,
}

/// A priceable item in a [`MemoryView`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryItem {
    pub attributes: ItemAttributes,
    /// Text of the `.price-display` child, `None` when the card has none
    pub price_display: Option<String>,
}

/// A region selector button in a [`MemoryView`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryButton {
    pub region: Option<String>,
    pub active: bool,
}

/// In-memory document.
///
/// Appended markup is kept verbatim per mount selector; `id` and region
/// buttons found in it are registered so later lookups see them.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    elements: BTreeMap<String, MemoryElement>,
    items: Vec<MemoryItem>,
    buttons: Vec<MemoryButton>,
    mounts: BTreeMap<String, Vec<String>>,
    mutations: usize,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty element with the given id
    pub fn with_element(mut self, id: &str) -> Self {
        self.elements.entry(id.to_string()).or_default();
        self
    }

    /// Add an element carrying the given classes
    pub fn with_classes(mut self, id: &str, classes: &[&str]) -> Self {
        let element = self.elements.entry(id.to_string()).or_default();
        element
            .classes
            .extend(classes.iter().map(|class| class.to_string()));
        self
    }

    /// Add a form field with an initial value
    pub fn with_field(mut self, id: &str, value: &str) -> Self {
        let element = self.elements.entry(id.to_string()).or_default();
        element.value = Some(value.to_string());
        self
    }

    /// Add a checkbox
    pub fn with_checkbox(mut self, id: &str, checked: bool) -> Self {
        let element = self.elements.entry(id.to_string()).or_default();
        element.value = Some("on".to_string());
        element.checked = checked;
        self
    }

    /// Add an item card with a `.price-display` child
    pub fn with_item(mut self, attributes: ItemAttributes) -> Self {
        self.items.push(MemoryItem {
            attributes,
            price_display: Some(String::new()),
        });
        self
    }

    /// Add an item card without a `.price-display` child
    pub fn with_bare_item(mut self, attributes: ItemAttributes) -> Self {
        self.items.push(MemoryItem {
            attributes,
            price_display: None,
        });
        self
    }

    pub fn with_region_button(mut self, region: &str) -> Self {
        self.buttons.push(MemoryButton {
            region: Some(region.to_string()),
            active: false,
        });
        self
    }

    /// Add a mount point that `append_html` can target
    pub fn with_mount(mut self, selector: &str) -> Self {
        self.mounts.entry(selector.to_string()).or_default();
        self
    }

    pub fn element(&self, id: &str) -> Option<&MemoryElement> {
        self.elements.get(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|element| element.text.as_str())
    }

    pub fn inner_html(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|element| element.inner_html.as_str())
    }

    pub fn item_price_text(&self, index: usize) -> Option<&str> {
        self.items.get(index)?.price_display.as_deref()
    }

    pub fn buttons(&self) -> &[MemoryButton] {
        &self.buttons
    }

    /// Markup appended under `selector`, oldest first
    pub fn mounted_html(&self, selector: &str) -> &[String] {
        self.mounts.get(selector).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of writes that reached an existing target
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    /// Simulate the user ticking or clearing a checkbox
    pub fn set_checked(&mut self, id: &str, checked: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            element.checked = checked;
        }
    }

    pub fn add_class(&mut self, id: &str, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.classes.remove(class);
        }
    }

    pub fn remove_element(&mut self, id: &str) {
        self.elements.remove(id);
    }

    /// Register ids and region buttons declared in inserted markup
    fn register_markup(&mut self, html: &str) {
        for id in attribute_values(html, "id") {
            self.elements.entry(id).or_default();
        }
        for region in attribute_values(html, "data-region") {
            self.buttons.push(MemoryButton {
                region: Some(region),
                active: false,
            });
        }
    }
}

/// Values of every `name="..."` attribute in `html`
fn attribute_values(html: &str, name: &str) -> Vec<String> {
    let needle = format!(" {}=\"", name);
    let mut values = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find(&needle) {
        rest = &rest[start + needle.len()..];
        let Some(end) = rest.find('"') else {
            break;
        };
        values.push(rest[..end].to_string());
        rest = &rest[end + 1..];
    }
    values
}

impl ViewBinding for MemoryView {
    fn element_exists(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|element| element.classes.contains(class))
    }

    fn field_value(&self, id: &str) -> Option<String> {
        self.elements.get(id)?.value.clone()
    }

    fn is_checked(&self, id: &str) -> bool {
        self.elements.get(id).is_some_and(|element| element.checked)
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        let Some(element) = self.elements.get_mut(id) else {
            return false;
        };
        element.text = text.to_string();
        self.mutations += 1;
        true
    }

    fn set_inner_html(&mut self, id: &str, html: &str) -> bool {
        let Some(element) = self.elements.get_mut(id) else {
            return false;
        };
        element.inner_html = html.to_string();
        self.mutations += 1;
        true
    }

    fn set_field_value(&mut self, id: &str, value: &str) -> bool {
        let Some(element) = self.elements.get_mut(id) else {
            return false;
        };
        element.value = Some(value.to_string());
        self.mutations += 1;
        true
    }

    fn append_html(&mut self, selector: &str, html: &str) -> bool {
        let Some(mounted) = self.mounts.get_mut(selector) else {
            return false;
        };
        mounted.push(html.to_string());
        self.mutations += 1;
        self.register_markup(html);
        true
    }

    fn items(&self) -> Vec<ItemAttributes> {
        self.items
            .iter()
            .map(|item| item.attributes.clone())
            .collect()
    }

    fn set_item_price_text(&mut self, index: usize, text: &str) -> bool {
        let Some(display) = self
            .items
            .get_mut(index)
            .and_then(|item| item.price_display.as_mut())
        else {
            return false;
        };
        *display = text.to_string();
        self.mutations += 1;
        true
    }

    fn region_buttons(&self) -> Vec<Option<String>> {
        self.buttons.iter().map(|button| button.region.clone()).collect()
    }

    fn set_region_button_active(&mut self, index: usize, active: bool) {
        if let Some(button) = self.buttons.get_mut(index) {
            button.active = active;
            self.mutations += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_item_attributes_missing_prices_are_zero() {
        let attributes = ItemAttributes {
            item_id: Some("t9".to_string()),
            ..Default::default()
        };
        let price = attributes.regional_price();
        assert_eq!(price.ncr, dec!(0));
        assert_eq!(price.other, dec!(0));
    }

    #[test]
    fn test_find_item_returns_first_match() {
        let view = MemoryView::new()
            .with_item(ItemAttributes::new("t1", "2000", "1800"))
            .with_item(ItemAttributes::new("t2", "900", "800"))
            .with_item(ItemAttributes::new("t1", "1", "1"));

        let found = view.find_item("t1").unwrap();
        assert_eq!(found.price_ncr.as_deref(), Some("2000"));
        assert!(view.find_item("t3").is_none());
    }

    #[test]
    fn test_writes_to_missing_targets_are_skipped() {
        let mut view = MemoryView::new().with_bare_item(ItemAttributes::new("t1", "1", "1"));

        assert!(!view.set_text("displayAmount", "x"));
        assert!(!view.set_inner_html("priceBreakdown", "x"));
        assert!(!view.set_field_value("bookingAmount", "1"));
        assert!(!view.append_html(".hero-section", "<div></div>"));
        assert!(!view.set_item_price_text(0, "x"));
        assert!(!view.set_item_price_text(5, "x"));
        assert_eq!(view.mutations(), 0);
    }

    #[test]
    fn test_append_html_registers_ids_and_buttons() {
        let mut view = MemoryView::new().with_mount(".row");
        let html = r#"<div id="regionToggle"><button class="region-btn" data-region="ncr"></button></div>"#;

        assert!(view.append_html(".row", html));
        assert!(view.element_exists("regionToggle"));
        assert_eq!(view.region_buttons(), vec![Some("ncr".to_string())]);
        assert_eq!(view.mounted_html(".row"), &[html.to_string()]);
    }

    #[test]
    fn test_checkbox_state() {
        let mut view = MemoryView::new().with_checkbox("nightTimeToggle", false);
        assert!(!view.is_checked("nightTimeToggle"));
        view.set_checked("nightTimeToggle", true);
        assert!(view.is_checked("nightTimeToggle"));
        assert!(!view.is_checked("missing"));
    }
}
