use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, AppSummary};
use crate::components::quality_panel::QualityModerationPanel;
use crate::moderation::ModerationMode;

#[component]
pub fn QualityReviewPage() -> impl IntoView {
    let (app_id, set_app_id) = signal(String::new());
    let (mode, set_mode) = signal(ModerationMode::Developer);
    let (is_moderator, set_is_moderator) = signal(false);
    let (opened, set_opened) = signal::<Option<AppSummary>>(None);
    let (looking_up, set_looking_up) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    // Moderator mode is only offered to quality moderators
    Effect::new(move |_| {
        spawn_local(async move {
            if let Ok(info) = commands::get_user_info().await {
                set_is_moderator.set(info.is_quality_moderator);
            }
        });
    });

    let open_panel = move || {
        let id = app_id.get().trim().to_string();
        if id.is_empty() {
            set_error.set(Some("Enter an app id".to_string()));
            return;
        }
        set_looking_up.set(true);
        set_error.set(None);
        spawn_local(async move {
            match commands::get_app_summary(&id).await {
                Ok(app) => set_opened.set(Some(app)),
                Err(e) => set_error.set(Some(format!("Could not open {}: {}", id, e))),
            }
            set_looking_up.set(false);
        });
    };

    view! {
        <div class="page quality-review-page">
            <h2>"Quality Review"</h2>
            <p class="page-description">
                "Check an app listing against the catalog's quality guidelines."
            </p>

            <div class="form-group">
                <label for="review-app-id">"App ID"</label>
                <div class="input-row">
                    <input
                        id="review-app-id"
                        type="text"
                        class="input"
                        placeholder="org.gimp.GIMP"
                        prop:value=move || app_id.get()
                        on:input=move |ev| set_app_id.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                open_panel();
                            }
                        }
                    />
                    <select
                        class="input"
                        prop:value=move || mode.get().as_str()
                        on:change=move |ev| set_mode.set(ModerationMode::parse(&event_target_value(&ev)))
                    >
                        <option value="developer">"Developer"</option>
                        <Show when=move || is_moderator.get()>
                            <option value="moderator">"Moderator"</option>
                        </Show>
                    </select>
                    <button
                        class="btn btn-primary"
                        disabled=move || looking_up.get()
                        on:click=move |_| open_panel()
                    >
                        {move || if looking_up.get() { "Opening..." } else { "Review" }}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <p class="status-text status-error">{e}</p> })}

            {move || opened.get().map(|app| {
                // Moderator mode requires the role
                let effective = if is_moderator.get_untracked() { mode.get_untracked() } else { ModerationMode::Developer };
                view! {
                    <QualityModerationPanel
                        app_id=app.id.clone()
                        app_name=app.name.clone()
                        mode=effective
                        on_close=Callback::new(move |_| set_opened.set(None))
                    />
                }
            })}
        </div>
    }
}
