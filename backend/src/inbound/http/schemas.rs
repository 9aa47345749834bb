//! OpenAPI schema definitions for types from support crates.
//!
//! The `pagination` crate stays framework-agnostic by not depending on
//! `utoipa`; the schema wrapper here mirrors its serialised shape and
//! is registered under the crate type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`pagination::PageInfo`].
#[derive(ToSchema)]
#[schema(as = pagination::PageInfo, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "used only for OpenAPI schema generation via utoipa"
)]
pub struct PageInfoSchema {
    /// The page the caller asked for (1-based).
    #[schema(example = 1)]
    current_page: u32,
    /// Total pages available under the current filter.
    #[schema(example = 4)]
    total_pages: u32,
    /// Page size echoed back to the caller.
    #[schema(example = 10)]
    page_size: u32,
}
