//! Filtering, pagination and statistics over a user's shipments.
//!
//! These are pure functions over already-loaded records so the query service
//! and its tests share one implementation regardless of the store.

use serde::Serialize;

use super::shipment::{Shipment, ShipmentStatus};
use super::user::UserId;

/// Page used when the caller omits `page`.
pub const DEFAULT_PAGE: usize = 1;
/// Page size used when the caller omits `limit`.
pub const DEFAULT_LIMIT: usize = 5;

/// Errors raised when pagination parameters are not positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// `page` was zero.
    #[error("page must be a positive integer")]
    ZeroPage,
    /// `limit` was zero.
    #[error("limit must be a positive integer")]
    ZeroLimit,
}

/// One-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    limit: usize,
}

impl Pagination {
    /// Validate and construct a page window.
    pub fn new(page: usize, limit: usize) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        Ok(Self { page, limit })
    }

    /// One-based page number.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Maximum number of records per page.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Optional narrowing applied before pagination.
///
/// Empty strings are treated as absent. `status` must equal the wire label
/// exactly; `search` is matched case-insensitively against the tracking id,
/// the status label and the priority label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipmentFilter {
    status: Option<String>,
    search: Option<String>,
}

impl ShipmentFilter {
    /// Build a filter from raw query values.
    #[must_use]
    pub fn new(status: Option<String>, search: Option<String>) -> Self {
        Self {
            status: status.filter(|value| !value.is_empty()),
            search: search
                .filter(|value| !value.is_empty())
                .map(|value| value.to_lowercase()),
        }
    }

    /// Whether `shipment` passes every configured criterion.
    #[must_use]
    pub fn matches(&self, shipment: &Shipment) -> bool {
        self.matches_status(shipment) && self.matches_search(shipment)
    }

    fn matches_status(&self, shipment: &Shipment) -> bool {
        self.status
            .as_deref()
            .is_none_or(|status| shipment.status().as_str() == status)
    }

    fn matches_search(&self, shipment: &Shipment) -> bool {
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        shipment
            .tracking_id()
            .as_ref()
            .to_lowercase()
            .contains(term)
            || shipment.status().as_str().to_lowercase().contains(term)
            || shipment.priority_label().contains(term)
    }
}

/// Listing request for one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentListQuery {
    pub user_id: UserId,
    pub filter: ShipmentFilter,
    pub pagination: Pagination,
}

/// One page of results plus totals over the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentPage {
    pub shipments: Vec<Shipment>,
    pub total_pages: usize,
    pub total_shipments: usize,
}

impl ShipmentPage {
    /// Filter `shipments` (already in store order) and cut out one page.
    ///
    /// Pages past the end yield an empty slice with unchanged totals.
    ///
    /// # Examples
    /// ```
    /// use shipment_tracker::domain::{Pagination, ShipmentFilter, ShipmentPage};
    ///
    /// let page =
    ///     ShipmentPage::select(Vec::new(), &ShipmentFilter::default(), Pagination::default());
    /// assert_eq!(page.total_pages, 0);
    /// assert!(page.shipments.is_empty());
    /// ```
    #[must_use]
    pub fn select(
        shipments: Vec<Shipment>,
        filter: &ShipmentFilter,
        pagination: Pagination,
    ) -> Self {
        let matching: Vec<Shipment> = shipments
            .into_iter()
            .filter(|shipment| filter.matches(shipment))
            .collect();
        let total_shipments = matching.len();
        let total_pages = total_shipments.div_ceil(pagination.limit());
        let shipments = matching
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.limit())
            .collect();
        Self {
            shipments,
            total_pages,
            total_shipments,
        }
    }
}

/// Per-owner counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentStats {
    pub total: usize,
    pub pending: usize,
    pub in_transit: usize,
    pub delivered: usize,
    pub cancelled: usize,
    pub express: usize,
}

impl ShipmentStats {
    /// Tally `shipments` owned by `user_id`; others are ignored.
    #[must_use]
    pub fn tally<'a>(user_id: &UserId, shipments: impl IntoIterator<Item = &'a Shipment>) -> Self {
        shipments
            .into_iter()
            .filter(|shipment| shipment.is_owned_by(user_id))
            .fold(Self::default(), |mut stats, shipment| {
                stats.total += 1;
                match shipment.status() {
                    ShipmentStatus::Pending => stats.pending += 1,
                    ShipmentStatus::InTransit => stats.in_transit += 1,
                    ShipmentStatus::Delivered => stats.delivered += 1,
                    ShipmentStatus::Cancelled => stats.cancelled += 1,
                }
                if shipment.express_delivery() {
                    stats.express += 1;
                }
                stats
            })
    }
}
