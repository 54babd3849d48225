use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands;

/// Keychain service under which the catalog API token is stored.
pub const CATALOG_TOKEN_SERVICE: &str = "apppicks-catalog-token";

#[component]
pub fn ApiTokenForm(
    /// Display name, e.g. "Catalog API Token"
    #[prop(into)]
    label: String,
    /// Keyring service identifier
    #[prop(into)]
    service_id: String,
    #[prop(into)]
    placeholder: String,
) -> impl IntoView {
    let (token_value, set_token_value) = signal(String::new());
    let (is_saved, set_is_saved) = signal(false);
    let (is_loading, set_is_loading) = signal(false);
    let (error_message, set_error_message) = signal::<Option<String>>(None);

    // Check for an existing token on mount
    let sid_check = service_id.clone();
    Effect::new(move |_| {
        let sid = sid_check.clone();
        spawn_local(async move {
            match commands::get_api_token(&sid).await {
                Ok(found) => set_is_saved.set(found.is_some()),
                Err(e) => set_error_message.set(Some(format!("Failed to check token: {}", e))),
            }
        });
    });

    let sid_save = service_id.clone();
    let save_token = move |_| {
        let sid = sid_save.clone();
        let token = token_value.get().trim().to_string();
        if token.is_empty() {
            set_error_message.set(Some("Please enter a token".to_string()));
            return;
        }
        set_is_loading.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match commands::set_api_token(&sid, &token).await {
                Ok(()) => {
                    set_is_saved.set(true);
                    set_token_value.set(String::new());
                }
                Err(e) => set_error_message.set(Some(format!("Failed to save: {}", e))),
            }
            set_is_loading.set(false);
        });
    };

    let sid_delete = service_id.clone();
    let delete_token = move |_| {
        let sid = sid_delete.clone();
        set_is_loading.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match commands::delete_api_token(&sid).await {
                Ok(()) => set_is_saved.set(false),
                Err(e) => set_error_message.set(Some(format!("Failed to delete: {}", e))),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="form-group api-token-form">
            <label>{label}</label>
            <div class="input-row">
                <input
                    type="password"
                    placeholder=placeholder
                    class="input input-password"
                    prop:value=move || token_value.get()
                    on:input=move |ev| set_token_value.set(event_target_value(&ev))
                    disabled=move || is_loading.get()
                />
                <button class="btn btn-save" on:click=save_token disabled=move || is_loading.get()>
                    {move || if is_loading.get() { "Saving..." } else { "Save" }}
                </button>
                <button
                    class="btn btn-delete"
                    on:click=delete_token
                    disabled=move || is_loading.get()
                    style:display=move || if is_saved.get() { "inline-block" } else { "none" }
                >
                    "Remove"
                </button>
            </div>
            <div class="key-status-row">
                {move || {
                    if let Some(err) = error_message.get() {
                        view! { <span class="status-text status-error">{err}</span> }.into_any()
                    } else if is_saved.get() {
                        view! { <span class="status-text status-saved">"Stored in the system keychain"</span> }.into_any()
                    } else {
                        view! { <span class="status-text status-not-set">"Not configured"</span> }.into_any()
                    }
                }}
            </div>
        </div>
    }
}
