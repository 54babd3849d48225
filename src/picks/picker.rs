use crate::commands::AppSummary;

/// Case-insensitive substring match on the app name. An empty query keeps
/// every candidate.
pub fn filter_candidates(candidates: &[AppSummary], query: &str) -> Vec<AppSummary> {
    if query.is_empty() {
        return candidates.to_vec();
    }
    let query = query.to_lowercase();
    candidates
        .iter()
        .filter(|app| app.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

pub fn is_selected(candidate: &AppSummary, selected: Option<&AppSummary>) -> bool {
    selected.is_some_and(|s| s.same_app(candidate))
}

/// Text for the closed picker. Comes from the selection itself, since the
/// selected app is usually no longer among the candidates.
pub fn display_name(selected: Option<&AppSummary>) -> Option<String> {
    selected.map(|app| app.name.clone())
}

pub fn count_label(count: usize) -> String {
    format!("{} app{}", count, if count == 1 { "" } else { "s" })
}
