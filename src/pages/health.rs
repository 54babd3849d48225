use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, HealthReport};
use crate::components::health_item::{CheckStatus, HealthItem};

#[component]
pub fn HealthPage() -> impl IntoView {
    let (checking, set_checking) = signal(false);
    let (report, set_report) = signal::<Option<HealthReport>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let do_health_check = move || {
        set_checking.set(true);
        set_error.set(None);
        spawn_local(async move {
            match commands::run_health_check().await {
                Ok(r) => set_report.set(Some(r)),
                Err(e) => set_error.set(Some(format!("Health check failed: {}", e))),
            }
            set_checking.set(false);
        });
    };

    // Auto-run health check on mount
    Effect::new(move |_| {
        do_health_check();
    });

    view! {
        <div class="page health-page">
            <h2>"Health Check"</h2>
            <p class="page-description">
                "Verify that the catalog service is reachable and your account is set up."
            </p>

            <button
                class="btn btn-primary"
                on:click=move |_| do_health_check()
                disabled=move || checking.get()
            >
                {move || if checking.get() { "Checking..." } else { "Run Health Check" }}
            </button>

            {move || error.get().map(|e| view! {
                <div class="health-error">
                    <span class="status-text status-error">{e}</span>
                </div>
            })}

            {move || report.get().map(|r| {
                let passed = [r.api_reachable, r.api_token_set, r.is_quality_moderator]
                    .iter()
                    .filter(|&&v| v)
                    .count();

                // Moderator status is meaningless without a reachable API and a token
                let moderator_status = if r.api_reachable && r.api_token_set {
                    CheckStatus::from_flag(r.is_quality_moderator)
                } else {
                    CheckStatus::Unknown
                };
                let token_detail = if r.api_token_set { "Configured" } else { "Not configured" };
                let cache_detail = match r.cached_apps {
                    Some(n) => format!("{} apps cached", n),
                    None => "Unavailable".to_string(),
                };

                let summary_class = match passed {
                    3 => "summary-all-pass",
                    0 => "summary-all-fail",
                    _ => "summary-partial",
                };

                view! {
                    <div class="health-results">
                        <HealthItem label="Catalog API" status=CheckStatus::from_flag(r.api_reachable) detail=r.api_base_url.clone() />
                        <HealthItem label="API Token" status=CheckStatus::from_flag(r.api_token_set) detail=token_detail />
                        <HealthItem label="Quality Moderator" status=moderator_status />
                        <HealthItem label="Metadata Cache" status=CheckStatus::from_flag(r.cached_apps.is_some()) detail=cache_detail />

                        <div class={format!("health-summary {}", summary_class)}>
                            {format!("{} of 3 checks passed", passed)}
                        </div>
                    </div>
                }
            })}
        </div>
    }
}
