//! Page layout: configuration, the shelf packer and layout emission.

pub mod entries;
pub mod shelf;

pub use entries::{LayoutEntry, PageSummary};
pub use shelf::PackingStats;

use serde::{Deserialize, Serialize};

use crate::unwrap_error::UnwrapError;

/// Page size and the gap kept between polygons and around the page edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub spacing: f64,
}

impl PageLayout {
    pub fn new(page_width: f64, page_height: f64, spacing: f64) -> Self {
        Self {
            page_width,
            page_height,
            spacing,
        }
    }

    pub fn validate(&self) -> Result<(), UnwrapError> {
        for (name, value) in [("page_width", self.page_width), ("page_height", self.page_height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(UnwrapError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !(self.spacing.is_finite() && self.spacing >= 0.0) {
            return Err(UnwrapError::InvalidConfig(format!(
                "spacing must be a non-negative number, got {}",
                self.spacing
            )));
        }
        Ok(())
    }
}

/// A4 portrait in millimetres with 3 mm spacing.
impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            spacing: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_bad_sizes() {
        assert!(PageLayout::new(10.0, 10.0, 0.0).validate().is_ok());
        assert!(PageLayout::new(0.0, 10.0, 1.0).validate().is_err());
        assert!(PageLayout::new(10.0, f64::NAN, 1.0).validate().is_err());
        assert!(PageLayout::new(10.0, 10.0, -1.0).validate().is_err());
    }

    #[test]
    fn deserializes_with_defaults() {
        let layout: PageLayout = serde_json::from_str(r#"{ "page_width": 100 }"#).unwrap();
        assert_eq!(layout.page_width, 100.0);
        assert_eq!(layout.page_height, 297.0);
        assert_eq!(layout.spacing, 3.0);
    }
}
