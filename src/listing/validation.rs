//! Field validation shared by listing create and update.

use super::error::ListingError;
use super::types::{CreateListingOptions, ListingKind, UpdateListingOptions, DEFAULT_VIEWS_RANGE};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_LOCATION_LEN: usize = 100;
pub const MAX_AREA_LEN: usize = 50;
pub const MAX_PRICE_LEN: usize = 100;

/// Trim a required text field and check its length in characters.
pub fn required_text(field: &str, value: &str, max_len: usize) -> Result<String, ListingError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ListingError::validation(format!("{field} is required")));
    }
    if value.chars().count() > max_len {
        return Err(ListingError::validation(format!(
            "{field} cannot exceed {max_len} characters"
        )));
    }
    Ok(value.to_string())
}

/// Drop blank features, trim the rest, and require at least one.
pub fn clean_features(features: &[String]) -> Result<Vec<String>, ListingError> {
    let cleaned: Vec<String> = features
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();
    if cleaned.is_empty() {
        return Err(ListingError::validation("At least one feature is required"));
    }
    Ok(cleaned)
}

/// Drop blank image locators and require at least one.
pub fn clean_images(images: &[String]) -> Result<Vec<String>, ListingError> {
    let cleaned: Vec<String> = images
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .map(str::to_string)
        .collect();
    if cleaned.is_empty() {
        return Err(ListingError::validation("At least one image is required"));
    }
    Ok(cleaned)
}

pub fn check_views_range(range: [u64; 2]) -> Result<[u64; 2], ListingError> {
    let [min, max] = range;
    if max < min {
        return Err(ListingError::validation(
            "Views range must be two non-negative numbers with min <= max",
        ));
    }
    Ok(range)
}

/// Create options after validation, ready for code allocation.
#[derive(Debug, Clone)]
pub struct ValidatedListing {
    pub title: String,
    pub kind: ListingKind,
    pub location: String,
    pub area: String,
    pub price: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub views_range: [u64; 2],
}

pub fn validate_create(options: &CreateListingOptions) -> Result<ValidatedListing, ListingError> {
    Ok(ValidatedListing {
        title: required_text("Title", &options.title, MAX_TITLE_LEN)?,
        kind: options.kind.parse()?,
        location: required_text("Location", &options.location, MAX_LOCATION_LEN)?,
        area: required_text("Area", &options.area, MAX_AREA_LEN)?,
        price: required_text("Price", &options.price, MAX_PRICE_LEN)?,
        features: clean_features(&options.features)?,
        images: clean_images(&options.images)?,
        views_range: check_views_range(options.views_range.unwrap_or(DEFAULT_VIEWS_RANGE))?,
    })
}

/// Validate every field present in an update, returning a cleaned copy.
pub fn validate_update(options: &UpdateListingOptions) -> Result<UpdateListingOptions, ListingError> {
    Ok(UpdateListingOptions {
        title: options
            .title
            .as_deref()
            .map(|t| required_text("Title", t, MAX_TITLE_LEN))
            .transpose()?,
        kind: options
            .kind
            .as_deref()
            .map(|k| k.parse::<ListingKind>().map(|kind| kind.as_str().to_string()))
            .transpose()?,
        location: options
            .location
            .as_deref()
            .map(|l| required_text("Location", l, MAX_LOCATION_LEN))
            .transpose()?,
        area: options
            .area
            .as_deref()
            .map(|a| required_text("Area", a, MAX_AREA_LEN))
            .transpose()?,
        price: options
            .price
            .as_deref()
            .map(|p| required_text("Price", p, MAX_PRICE_LEN))
            .transpose()?,
        images: options.images.as_deref().map(clean_images).transpose()?,
        features: options.features.as_deref().map(clean_features).transpose()?,
        views_range: options.views_range.map(check_views_range).transpose()?,
        is_active: options.is_active,
        featured: options.featured,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_options() -> CreateListingOptions {
        CreateListingOptions {
            title: "  Grade A office in ORR  ".to_string(),
            kind: "Office".to_string(),
            location: "Bangalore".to_string(),
            area: "12,000 sq.ft".to_string(),
            price: "₹ 95 / sq.ft".to_string(),
            images: vec!["https://img.example/1.jpg".to_string()],
            features: vec!["Power backup".to_string(), "  ".to_string(), " Cafeteria ".to_string()],
            views_range: None,
        }
    }

    #[test]
    fn test_validate_create_trims_and_defaults() {
        let validated = validate_create(&valid_options()).unwrap();
        assert_eq!(validated.title, "Grade A office in ORR");
        assert_eq!(validated.kind, ListingKind::Office);
        assert_eq!(validated.features, vec!["Power backup", "Cafeteria"]);
        assert_eq!(validated.views_range, DEFAULT_VIEWS_RANGE);
    }

    #[test]
    fn test_missing_required_field() {
        let mut options = valid_options();
        options.area = "   ".to_string();
        let err = validate_create(&options).unwrap_err();
        assert!(err.to_string().contains("Area is required"));
    }

    #[test]
    fn test_title_too_long() {
        let mut options = valid_options();
        options.title = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(matches!(validate_create(&options), Err(ListingError::Validation(_))));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let price = "₹".repeat(MAX_PRICE_LEN);
        assert!(required_text("Price", &price, MAX_PRICE_LEN).is_ok());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let mut options = valid_options();
        options.kind = "Warehouse".to_string();
        assert!(matches!(validate_create(&options), Err(ListingError::Validation(_))));
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        assert_eq!("co-working".parse::<ListingKind>().unwrap(), ListingKind::CoWorking);
        assert_eq!(" RETAIL ".parse::<ListingKind>().unwrap(), ListingKind::Retail);
    }

    #[test]
    fn test_blank_features_rejected() {
        let mut options = valid_options();
        options.features = vec![String::new(), " ".to_string()];
        let err = validate_create(&options).unwrap_err();
        assert!(err.to_string().contains("feature"));
    }

    #[test]
    fn test_no_images_rejected() {
        let mut options = valid_options();
        options.images.clear();
        let err = validate_create(&options).unwrap_err();
        assert!(err.to_string().contains("image"));
    }

    #[test]
    fn test_inverted_views_range_rejected() {
        let mut options = valid_options();
        options.views_range = Some([500, 100]);
        assert!(validate_create(&options).is_err());
        assert_eq!(check_views_range([0, 0]).unwrap(), [0, 0]);
    }

    #[test]
    fn test_validate_update_only_checks_present_fields() {
        let patch = UpdateListingOptions {
            title: Some(" New title ".to_string()),
            kind: Some("retail".to_string()),
            ..Default::default()
        };
        let cleaned = validate_update(&patch).unwrap();
        assert_eq!(cleaned.title.as_deref(), Some("New title"));
        assert_eq!(cleaned.kind.as_deref(), Some("Retail"));
        assert!(cleaned.location.is_none());
    }

    #[test]
    fn test_validate_update_rejects_empty_features() {
        let patch = UpdateListingOptions {
            features: Some(vec![" ".to_string()]),
            ..Default::default()
        };
        assert!(validate_update(&patch).is_err());
    }
}
