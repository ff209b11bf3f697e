//! Markup fragments written into the page.
//!
//! Both fragments are askama templates so interpolated text is HTML-escaped.

use askama::Template;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::pricing::calculators::BookingTotal;
use crate::pricing::money::format_money;
use crate::pricing::region::Region;

/// A button in the region selector
#[derive(Debug, Clone)]
struct RegionOption {
    key: &'static str,
    label: &'static str,
    icon: &'static str,
}

impl RegionOption {
    fn for_region(region: Region) -> Self {
        let icon = match region {
            Region::Ncr => "bi-building",
            Region::Other => "bi-geo-alt",
        };
        Self {
            key: region.key(),
            label: region.display_name(),
            icon,
        }
    }
}

/// Region selector block appended to the hero section
#[derive(Template)]
#[template(
    source = r#"
<div class="col-12 mt-4">
    <div class="region-toggle-container" id="{{ container_id }}">
        <div class="region-toggle">
            <span class="toggle-label">Select Your Region:</span>
            <div class="toggle-buttons">
                {%- for option in options %}
                <button class="region-btn" data-region="{{ option.key }}">
                    <i class="bi {{ option.icon }} me-2"></i>{{ option.label }}
                </button>
                {%- endfor %}
            </div>
        </div>
    </div>
</div>
"#,
    ext = "html"
)]
struct RegionToggleTemplate<'a> {
    container_id: &'a str,
    options: Vec<RegionOption>,
}

/// Booking price breakdown shown inside the booking modal
#[derive(Template)]
#[template(
    source = r#"
<div class="price-breakdown">
    <div class="d-flex justify-content-between">
        <span>Base Price ({{ region_name }}):</span>
        <span>{{ base_price }}</span>
    </div>
    {%- if has_surcharge %}
    <div class="d-flex justify-content-between text-warning">
        <span>Night Time Charge:</span>
        <span>{{ surcharge }}</span>
    </div>
    {%- endif %}
    <hr class="my-2">
    <div class="d-flex justify-content-between fw-bold text-success">
        <span>Total Amount:</span>
        <span>{{ total }}</span>
    </div>
</div>
"#,
    ext = "html"
)]
struct PriceBreakdownTemplate<'a> {
    region_name: &'a str,
    base_price: String,
    has_surcharge: bool,
    surcharge: String,
    total: String,
}

/// Render the region selector block.
///
/// `container_id` becomes the id of the wrapper so a later lookup finds it
/// and the block is never inserted twice.
pub fn render_region_toggle(container_id: &str) -> Result<String> {
    let template = RegionToggleTemplate {
        container_id,
        options: vec![
            RegionOption::for_region(Region::Ncr),
            RegionOption::for_region(Region::Other),
        ],
    };
    Ok(template.render()?)
}

/// Render the booking breakdown. The surcharge line only appears when the
/// surcharge is positive.
pub fn render_price_breakdown(totals: &BookingTotal, currency_symbol: &str) -> Result<String> {
    let template = PriceBreakdownTemplate {
        region_name: totals.region.display_name(),
        base_price: format_money(currency_symbol, totals.base_price),
        has_surcharge: totals.surcharge > Decimal::ZERO,
        surcharge: format_money(currency_symbol, totals.surcharge),
        total: format_money(currency_symbol, totals.total),
    };
    Ok(template.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn totals(region: Region, base: Decimal, surcharge: Decimal) -> BookingTotal {
        BookingTotal {
            region,
            base_price: base,
            surcharge,
            total: base.saturating_add(surcharge),
        }
    }

    #[test]
    fn test_region_toggle_contains_both_buttons() {
        let html = render_region_toggle("regionToggle").unwrap();
        assert!(html.contains(r#"id="regionToggle""#));
        assert!(html.contains(r#"data-region="ncr""#));
        assert!(html.contains(r#"data-region="other""#));
        assert!(html.contains("Delhi-NCR"));
        assert!(html.contains("Rest of India"));
        assert_eq!(html.matches("class=\"region-btn\"").count(), 2);
    }

    #[test]
    fn test_breakdown_without_surcharge() {
        let html = render_price_breakdown(&totals(Region::Other, dec!(1800), dec!(0)), "₹").unwrap();
        assert!(html.contains("Base Price (Rest of India):"));
        assert!(html.contains("₹1,800"));
        assert!(!html.contains("Night Time Charge"));
        assert!(html.contains("fw-bold"));
        assert!(html.contains("Total Amount:"));
    }

    #[test]
    fn test_breakdown_with_surcharge() {
        let html =
            render_price_breakdown(&totals(Region::Ncr, dec!(2000), dec!(1500)), "₹").unwrap();
        assert!(html.contains("Base Price (Delhi-NCR):"));
        assert!(html.contains("Night Time Charge:"));
        assert!(html.contains("<span>₹1,500</span>"));
        assert!(html.contains("<span>₹3,500</span>"));
    }

    #[test]
    fn test_breakdown_escapes_currency_symbol() {
        let html =
            render_price_breakdown(&totals(Region::Other, dec!(10), dec!(0)), "<b>").unwrap();
        assert!(!html.contains("<b>10"));
        assert!(html.contains("&lt;b&gt;10"));
    }
}
