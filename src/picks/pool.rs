use std::collections::HashSet;

use crate::commands::AppSummary;

/// Eligible apps that are not assigned to any slot, in eligible order.
pub fn resolve(eligible: &[AppSummary], assigned: &HashSet<String>) -> Vec<AppSummary> {
    eligible
        .iter()
        .filter(|app| !assigned.contains(&app.id))
        .cloned()
        .collect()
}
