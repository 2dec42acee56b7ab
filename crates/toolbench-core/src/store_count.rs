use serde::Serialize;

/// Active, churned and new store partitions between two periods.
///
/// Counts are derived from the de-duplicated identifier sets, so
/// `churned_count + active_count` is always the size of the previous period and
/// `new_count + active_count` the size of the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCounts {
    pub active_count: usize,
    pub churned_count: usize,
    pub new_count: usize,
    /// Stores present in both periods, in current-period order.
    pub active_ids: Vec<String>,
    /// Stores only in the previous period, in previous-period order.
    pub churned_ids: Vec<String>,
    /// Stores only in the current period, in current-period order.
    pub new_ids: Vec<String>,
}

impl StoreCounts {
    /// Number of distinct stores in the current period.
    #[must_use]
    pub fn current_total(&self) -> usize {
        self.active_count + self.new_count
    }

    /// Number of distinct stores in the previous period.
    #[must_use]
    pub fn previous_total(&self) -> usize {
        self.active_count + self.churned_count
    }

    /// The copyable one-line summary, e.g.
    /// `"Active Stores (1), Churned Stores (1), New Stores (1)"`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "Active Stores ({}), Churned Stores ({}), New Stores ({})",
            self.active_count, self.churned_count, self.new_count
        )
    }
}
