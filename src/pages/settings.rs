use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands;
use crate::components::api_token_form::{ApiTokenForm, CATALOG_TOKEN_SERVICE};

/// A single text preference with its own save button and status line.
#[component]
fn PreferenceField(
    #[prop(into)] key: String,
    #[prop(into)] label: String,
    #[prop(into)] placeholder: String,
) -> impl IntoView {
    let (value, set_value) = signal(String::new());
    let (status, set_status) = signal::<Option<String>>(None);
    let key = StoredValue::new(key);
    let input_id = format!("pref-{}", key.get_value());

    // Load the stored value on mount
    Effect::new(move |_| {
        let k = key.get_value();
        spawn_local(async move {
            match commands::get_preference(&k).await {
                Ok(Some(v)) => set_value.set(v),
                Ok(None) => {}
                Err(e) => set_status.set(Some(format!("Failed to load preference: {}", e))),
            }
        });
    });

    let save = move |_| {
        let k = key.get_value();
        let v = value.get().trim().to_string();
        spawn_local(async move {
            match commands::set_preference(&k, &v).await {
                Ok(()) => set_status.set(Some("Saved".to_string())),
                Err(e) => set_status.set(Some(format!("Failed to save: {}", e))),
            }
        });
    };

    view! {
        <div class="form-group">
            <label for={input_id.clone()}>{label}</label>
            <div class="input-row">
                <input
                    id=input_id
                    type="text"
                    class="input"
                    placeholder=placeholder
                    prop:value=move || value.get()
                    on:input=move |ev| set_value.set(event_target_value(&ev))
                />
                <button class="btn btn-save" on:click=save>"Save"</button>
            </div>
            <Show when=move || status.get().is_some()>
                <span class="status-text">{move || status.get().unwrap_or_default()}</span>
            </Show>
        </div>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let (cache_status, set_cache_status) = signal::<Option<String>>(None);

    let clear_cache = move |_| {
        spawn_local(async move {
            match commands::clear_metadata_cache().await {
                Ok(n) => set_cache_status.set(Some(format!("Removed {} cached apps", n))),
                Err(e) => set_cache_status.set(Some(format!("Failed to clear cache: {}", e))),
            }
        });
    };

    view! {
        <div class="page settings-page">
            <h2>"Settings"</h2>

            <section class="settings-section">
                <h3>"Account"</h3>
                <p class="section-description">"The API token is stored in your system keychain."</p>
                <ApiTokenForm
                    label="Catalog API Token"
                    service_id=CATALOG_TOKEN_SERVICE
                    placeholder="Paste your token"
                />
            </section>

            <section class="settings-section">
                <h3>"Catalog"</h3>
                <p class="section-description">"Where the catalog service lives and how many apps to list."</p>
                <PreferenceField
                    key="api_base_url"
                    label="API Base URL"
                    placeholder="https://flathub.org/api/v2"
                />
                <PreferenceField
                    key="eligible_page_size"
                    label="Eligible apps page size"
                    placeholder="10000"
                />
                <div class="form-group">
                    <button class="btn btn-secondary" on:click=clear_cache>"Clear metadata cache"</button>
                    <Show when=move || cache_status.get().is_some()>
                        <span class="status-text">{move || cache_status.get().unwrap_or_default()}</span>
                    </Show>
                </div>
            </section>
        </div>
    }
}
