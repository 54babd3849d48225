use leptos::prelude::*;

use crate::commands::AppSummary;
use crate::picks::picker::{count_label, display_name, filter_candidates, is_selected};

/// A searchable single-app picker.
///
/// Shows the current selection when closed; when open, a text input filters
/// the candidates by name. The selection is rendered from `selected` itself,
/// so it stays visible after it has left the candidate pool.
#[component]
pub fn AppPicker(
    /// Unique ID for this picker instance.
    #[prop(into)]
    id: String,
    /// Text shown when nothing is selected.
    #[prop(into)]
    placeholder: String,
    /// Apps that may be chosen.
    candidates: Signal<Vec<AppSummary>>,
    /// The app currently in the slot.
    selected: Signal<Option<AppSummary>>,
    /// Called with the chosen app.
    on_select: Callback<AppSummary>,
    /// Called when the clear button is pressed. No button without it.
    #[prop(optional)]
    on_clear: Option<Callback<()>>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let (is_open, set_is_open) = signal(false);
    let (search_text, set_search_text) = signal(String::new());

    let filtered = move || filter_candidates(&candidates.get(), &search_text.get());

    let open = move || {
        if disabled.get_untracked() {
            return;
        }
        set_is_open.set(true);
        set_search_text.set(String::new());
    };

    let on_input_change = move |ev: leptos::ev::Event| {
        set_search_text.set(event_target_value(&ev));
        set_is_open.set(true);
    };

    let choose = move |app: AppSummary| {
        on_select.run(app);
        set_is_open.set(false);
        set_search_text.set(String::new());
    };

    // Close dropdown when clicking outside
    let container_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move |_| {
        use wasm_bindgen::prelude::*;
        use wasm_bindgen::JsCast;

        if !is_open.get() {
            return;
        }
        let Some(container) = container_ref.get() else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            if let Some(node) = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok()) {
                if !container.contains(Some(&node)) {
                    set_is_open.set(false);
                }
            }
        });

        let _ = window.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    });

    let dropdown_id = format!("{}-dropdown", id);

    view! {
        <div
            class="app-picker"
            class:open=move || is_open.get()
            class:disabled=move || disabled.get()
            node_ref=container_ref
        >
            <style>{include_str!("app_picker.css")}</style>

            {move || {
                if is_open.get() {
                    view! {
                        <input
                            type="text"
                            class="ap-search input"
                            placeholder="Type to search..."
                            prop:value=move || search_text.get()
                            on:input=on_input_change
                            autofocus=true
                        />
                    }.into_any()
                } else {
                    let current = selected.get();
                    let label = display_name(current.as_ref()).unwrap_or_else(|| placeholder.clone());
                    let icon = current.as_ref().and_then(|a| a.icon.clone());

                    view! {
                        <div
                            class="ap-display"
                            class:has-value={current.is_some()}
                            on:click=move |_| open()
                        >
                            {icon.map(|src| view! { <img class="ap-icon" src=src alt="" /> })}
                            <span class="ap-display-text">{label}</span>
                            {match (current.is_some(), on_clear) {
                                (true, Some(clear)) => Some(view! {
                                    <button
                                        class="ap-clear"
                                        title="Clear selection"
                                        on:click=move |ev: leptos::ev::MouseEvent| {
                                            ev.prevent_default();
                                            ev.stop_propagation();
                                            clear.run(());
                                        }
                                    >
                                        "\u{2715}"
                                    </button>
                                }),
                                _ => None,
                            }}
                            <span class="ap-chevron">"\u{25BE}"</span>
                        </div>
                    }.into_any()
                }
            }}

            {move || {
                if !is_open.get() {
                    return view! { <div style="display:none"></div> }.into_any();
                }

                let apps = filtered();
                if apps.is_empty() {
                    return view! {
                        <div class="ap-dropdown">
                            <div class="ap-empty">"No matching apps"</div>
                        </div>
                    }.into_any();
                }

                let count = count_label(apps.len());
                let current = selected.get();
                let option_views: Vec<_> = apps.into_iter().map(|app| {
                    let checked = is_selected(&app, current.as_ref());
                    let icon = app.icon.clone();
                    let name = app.name.clone();
                    let subtitle = app.subtitle.clone();
                    view! {
                        <div
                            class="ap-option"
                            class:selected=checked
                            on:mousedown=move |_| choose(app.clone())
                        >
                            {icon.map(|src| view! { <img class="ap-icon" src=src alt="" /> })}
                            <div class="ap-option-text">
                                <span class="ap-option-name">{name}</span>
                                {subtitle.map(|s| view! { <span class="ap-option-subtitle">{s}</span> })}
                            </div>
                            {checked.then(|| view! { <span class="ap-check">"\u{2713}"</span> })}
                        </div>
                    }
                }).collect();

                view! {
                    <div class="ap-dropdown" id={dropdown_id.clone()}>
                        <div class="ap-options">
                            {option_views}
                            <div class="ap-count">{count}</div>
                        </div>
                    </div>
                }.into_any()
            }}
        </div>
    }
}
