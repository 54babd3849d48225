use leptos::prelude::*;

use crate::moderation::IconPreview;

/// Collapsible preview of the app icon on a light and a dark background.
#[component]
pub fn IconPreviewToggle(preview: IconPreview) -> impl IntoView {
    let (expanded, set_expanded) = signal(false);

    let IconPreview {
        icon,
        light_background,
        dark_background,
        show_grid,
    } = preview;
    let tile = |background: String, theme: &'static str| {
        view! {
            <div class={format!("icon-tile icon-tile-{}", theme)} style:background-color=background>
                {icon.clone().map(|src| view! { <img class="icon-tile-image" src=src alt="" /> })}
                {show_grid.then(|| view! { <div class="icon-grid"></div> })}
            </div>
        }
    };
    let tiles = view! {
        <div class="icon-tiles">
            {tile(light_background, "light")}
            {tile(dark_background, "dark")}
        </div>
    };

    view! {
        <div class="icon-preview">
            <button class="btn btn-small btn-secondary" on:click=move |_| set_expanded.update(|e| *e = !*e)>
                {move || if expanded.get() { "Hide icon \u{25B4}" } else { "Show icon \u{25BE}" }}
            </button>
            <div class="icon-preview-body" class:collapsed={move || !expanded.get()}>
                {tiles}
            </div>
        </div>
    }
}
