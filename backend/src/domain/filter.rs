//! Optional filter criteria for catalog listing.
//!
//! All fields are independently optional; present fields combine with
//! logical AND. The persistence adapter turns this structure into a
//! SQL predicate — see `outbound::persistence`.

/// Filter criteria for the creature list.
///
/// An all-`None` filter (the default) matches every creature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatureFilter {
    /// Case-insensitive substring match against the name.
    pub name: Option<String>,
    /// Inclusive lower bound on height.
    pub min_height: Option<i32>,
    /// Inclusive upper bound on height.
    pub max_height: Option<i32>,
    /// Inclusive lower bound on weight.
    pub min_weight: Option<i32>,
    /// Inclusive upper bound on weight.
    pub max_weight: Option<i32>,
    /// Case-insensitive substring match against any element of the
    /// type list (membership test, not exact match). Wire name: `type`.
    pub kind: Option<String>,
}

impl CreatureFilter {
    /// True when no criterion is present.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.name.is_none()
            && self.min_height.is_none()
            && self.max_height.is_none()
            && self.min_weight.is_none()
            && self.max_weight.is_none()
            && self.kind.is_none()
    }
}

#[cfg(test)]
mod tests {
    //! Filter presence semantics.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_filter_is_unconstrained() {
        assert!(CreatureFilter::default().is_unconstrained());
    }

    #[rstest]
    fn any_present_field_constrains_the_filter() {
        let filter = CreatureFilter {
            kind: Some("electric".to_owned()),
            ..CreatureFilter::default()
        };
        assert!(!filter.is_unconstrained());
    }
}
