//! Area size categorization. Pure computation, cannot fail.

use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AreaCategory {
    Small,
    Medium,
    Large,
}

impl fmt::Display for AreaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AreaCategory::Small => "small",
            AreaCategory::Medium => "medium",
            AreaCategory::Large => "large",
        })
    }
}

/// Buckets a floor area in square feet: below 500 is small, below 1500 is
/// medium, everything else is large.
pub fn area_category(area_sqft: f64) -> AreaCategory {
    if area_sqft < 500.0 {
        AreaCategory::Small
    } else if area_sqft < 1500.0 {
        AreaCategory::Medium
    } else {
        AreaCategory::Large
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorizes_boundary_areas() {
        assert_eq!(area_category(400.0), AreaCategory::Small);
        assert_eq!(area_category(500.0), AreaCategory::Medium);
        assert_eq!(area_category(1499.0), AreaCategory::Medium);
        assert_eq!(area_category(1500.0), AreaCategory::Large);
    }

    #[test]
    fn renders_lowercase_labels() {
        assert_eq!(AreaCategory::Small.to_string(), "small");
        assert_eq!(AreaCategory::Medium.to_string(), "medium");
        assert_eq!(AreaCategory::Large.to_string(), "large");
    }
}
