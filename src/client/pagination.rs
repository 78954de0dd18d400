use crate::constants::ITEMS_PER_PAGE;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub page_size: i64,
    pub page_token: String,
}

/// Clamps a requested page size into `1..=ITEMS_PER_PAGE`; anything out of
/// range falls back to the maximum.
pub fn page_size(requested: i64) -> i64 {
    if requested <= 0 || requested > ITEMS_PER_PAGE {
        ITEMS_PER_PAGE
    } else {
        requested
    }
}
