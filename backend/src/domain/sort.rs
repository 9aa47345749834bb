//! Sort selection for catalog listing.
//!
//! A single-key ordering over one creature attribute. No secondary
//! tiebreak key is defined; ties retain store order, which is not
//! guaranteed stable across calls.

use serde::Deserialize;
use utoipa::ToSchema;

/// Attribute the list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortField {
    /// Order by display name.
    #[default]
    Name,
    /// Order by height.
    Height,
    /// Order by weight.
    Weight,
}

/// Direction of the ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// A complete ordering spec: field plus direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sort {
    /// Attribute to order by; defaults to name.
    pub field: SortField,
    /// Direction; defaults to ascending.
    pub order: SortOrder,
}

#[cfg(test)]
mod tests {
    //! Wire-casing and default coverage.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_are_name_ascending() {
        let sort = Sort::default();
        assert_eq!(sort.field, SortField::Name);
        assert_eq!(sort.order, SortOrder::Asc);
    }

    #[rstest]
    #[case("\"NAME\"", SortField::Name)]
    #[case("\"HEIGHT\"", SortField::Height)]
    #[case("\"WEIGHT\"", SortField::Weight)]
    fn sort_fields_deserialise_screaming_case(#[case] json: &str, #[case] expected: SortField) {
        let parsed: SortField = serde_json::from_str(json).expect("valid enum value");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    #[case("\"ASC\"", SortOrder::Asc)]
    #[case("\"DESC\"", SortOrder::Desc)]
    fn sort_orders_deserialise_screaming_case(#[case] json: &str, #[case] expected: SortOrder) {
        let parsed: SortOrder = serde_json::from_str(json).expect("valid enum value");
        assert_eq!(parsed, expected);
    }
}
