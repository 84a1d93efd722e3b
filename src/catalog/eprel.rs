//! Built-in layout and schema for the EPREL tyre catalog.
//!
//! Selectors follow the Europa Component Library markup of
//! `eprel.ec.europa.eu/screen/product/tyres`.

use crate::browser::By;

use super::CatalogLayout;
use super::schema::{ExtractionSchema, FieldSource, FieldSpec, NodeRef, TextRule};

// ============================================================================
// Addresses
// ============================================================================

/// First listing page of the tyre catalog.
pub const START_URL: &str = "https://eprel.ec.europa.eu/screen/product/tyres";

/// Label image address built from a product id.
pub const LABEL_TEMPLATE: &str = "https://eprel.ec.europa.eu/labels/tyres/Label_{id}.svg";

// ============================================================================
// Listing Selectors
// ============================================================================

/// One catalog entry on a listing page.
pub const ITEM: &str = "article";

/// "Details" control inside an entry.
pub const DETAILS_BUTTON: &str = ".ecl-button--primary.pull-right.ecl-button";

/// Previous/Next pagination links.
pub const PAGER: &str = ".ecl-pagination__link.ecl-link--standalone.ecl-link--icon";

/// Text of the "Previous" pagination link.
pub const PREVIOUS_LABEL: &str = "Previous";

// ============================================================================
// Detail Selectors
// ============================================================================

/// Title/number block, present once the detail view has rendered.
pub const TITLE_BLOCK: &str = ".ecl-u-type-l.ecl-u-type-color-grey-75.ecl-u-type-family-alt";

/// Title text node.
pub const TITLE: &str = ".ecl-u-type-l.ecl-u-type-color-grey-75.ecl-u-type-family-alt span";

/// Registration number text node.
pub const NUMBER: &str = ".ecl-u-d-inline-block.ecl-u-type-2xl.ecl-u-type-bold.ecl-u-type-color-blue.ecl-u-type-family-alt.ecl-u-mt-xs span";

/// Attribute values, in display order.
pub const INFO_VALUE: &str = ".ecl-u-type-bold.ecl-u-pl-lg-xl.ecl-u-pr-2xs.text-right";

/// Rolling noise class (first match).
pub const NOISE_CLASS: &str = ".ecl-u-type-bold.ecl-u-pr-2xs.text-right.ecl-u-pl-lg-xl.ng-star-inserted";

/// Rolling noise level in dB (second match).
pub const NOISE_DB: &str = ".ecl-u-type-bold.ecl-u-pr-2xs.text-right.ng-star-inserted";

/// Label image.
pub const LABEL_IMAGE: &str = "img[alt='Label']";

// ============================================================================
// Header
// ============================================================================

/// Attribute names in display order. Position 7 is the noise pair.
pub const INFO_FIELDS: [&str; 12] = [
    "Commercial name or trade designation",
    "Tyre size designation",
    "Tyre class",
    "Load-capacity index",
    "Speed category symbol",
    "Fuel efficiency class",
    "Wet grip class",
    "External rolling noise class and level",
    "Tyre for use in severe snow conditions",
    "Tyre for use in severe ice conditions",
    "Load version",
    "Additional information",
];

/// Attribute position rendered as two nodes (class and decibel).
pub const NOISE_POSITION: usize = 7;

/// Output column names.
pub const HEADER: [&str; 15] = [
    "Title",
    "Number",
    INFO_FIELDS[0],
    INFO_FIELDS[1],
    INFO_FIELDS[2],
    INFO_FIELDS[3],
    INFO_FIELDS[4],
    INFO_FIELDS[5],
    INFO_FIELDS[6],
    INFO_FIELDS[7],
    INFO_FIELDS[8],
    INFO_FIELDS[9],
    INFO_FIELDS[10],
    INFO_FIELDS[11],
    "Label URL",
];

// ============================================================================
// Defaults
// ============================================================================

/// Listing layout of the tyre catalog.
#[must_use]
pub fn layout() -> CatalogLayout {
    CatalogLayout {
        item: By::css(ITEM),
        details_button: By::css(DETAILS_BUTTON),
        pager: By::css(PAGER),
        previous_label: PREVIOUS_LABEL.to_string(),
    }
}

/// Detail schema of the tyre catalog.
#[must_use]
pub fn schema() -> ExtractionSchema {
    let mut fields = Vec::with_capacity(HEADER.len());

    fields.push(FieldSpec::new(HEADER[0], FieldSource::node(By::css(TITLE), 0)));
    fields.push(FieldSpec::new(HEADER[1], FieldSource::node(By::css(NUMBER), 0)));

    for (position, name) in INFO_FIELDS.iter().enumerate() {
        let source = if position == NOISE_POSITION {
            FieldSource::joined(
                vec![
                    NodeRef::new(By::css(NOISE_CLASS), 0),
                    NodeRef::new(By::css(NOISE_DB), 1),
                ],
                "/",
            )
        } else {
            FieldSource::node(By::css(INFO_VALUE), position)
        };
        fields.push(FieldSpec::new(*name, source));
    }

    fields.push(
        FieldSpec::new(
            HEADER[14],
            FieldSource::label_url(By::css(LABEL_IMAGE), "src", LABEL_TEMPLATE),
        )
        .with_rule(TextRule::Trim),
    );

    ExtractionSchema::new(By::css(TITLE_BLOCK), fields)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_matches_header() {
        let schema = schema();
        assert_eq!(schema.width(), 15);
        assert_eq!(schema.header(), HEADER.to_vec());
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_noise_field_is_joined() {
        let schema = schema();
        let noise = &schema.fields[2 + NOISE_POSITION];
        assert_eq!(noise.name, "External rolling noise class and level");
        assert!(matches!(
            &noise.source,
            FieldSource::Joined { parts, separator } if parts.len() == 2 && separator == "/"
        ));
    }

    #[test]
    fn test_label_is_last() {
        let schema = schema();
        let label = schema.fields.last().unwrap();
        assert_eq!(label.name, "Label URL");
        assert!(matches!(label.source, FieldSource::LabelUrl { .. }));
    }

    #[test]
    fn test_layout_validates() {
        assert!(layout().validate().is_ok());
    }
}
