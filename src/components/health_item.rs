use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
    /// Could not be determined, e.g. the API was unreachable.
    Unknown,
}

impl CheckStatus {
    pub fn from_flag(ok: bool) -> Self {
        if ok {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        }
    }
}

/// One line of the health report.
#[component]
pub fn HealthItem(
    #[prop(into)] label: String,
    status: CheckStatus,
    #[prop(optional, into)] detail: Option<String>,
) -> impl IntoView {
    let (icon, class) = match status {
        CheckStatus::Pass => ("\u{2713}", "status-badge status-pass"),
        CheckStatus::Fail => ("\u{2717}", "status-badge status-fail"),
        CheckStatus::Unknown => ("?", "status-badge status-unknown"),
    };

    view! {
        <div class="health-item">
            <span class=class>{icon}</span>
            <span class="health-name">{label}</span>
            {detail.map(|d| view! { <span class="health-detail">{d}</span> })}
        </div>
    }
}
