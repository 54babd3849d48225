use leptos::prelude::*;

use crate::moderation::Verdict;

/// Status icon for a guideline that cannot be edited here.
#[component]
pub fn VerdictIndicator(verdict: Signal<Verdict>) -> impl IntoView {
    let (hovered, set_hovered) = signal(false);

    view! {
        <span
            class="verdict-indicator"
            aria-label="read-only"
            on:mouseenter=move |_| set_hovered.set(true)
            on:mouseleave=move |_| set_hovered.set(false)
        >
            {move || {
                let (icon, class) = match verdict.get() {
                    Verdict::Approved => ("\u{2714}", "verdict-icon verdict-approved"),
                    Verdict::Rejected => ("\u{26A0}", "verdict-icon verdict-rejected"),
                    Verdict::Unset => ("?", "verdict-icon verdict-unset"),
                };
                view! { <span class=class>{icon}</span> }
            }}
            <Show when=move || hovered.get()>
                <span class="verdict-tooltip">{move || verdict.get().label()}</span>
            </Show>
        </span>
    }
}

/// Three-state control: unset (display only), not passed, passed.
#[component]
pub fn VerdictToggle(
    verdict: Signal<Verdict>,
    /// Called with `true` for passed, `false` for not passed.
    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <div class="multi-toggle">
            <button
                class="toggle-item toggle-unset"
                class:selected=move || verdict.get() == Verdict::Unset
                disabled=true
                title="Pending"
            >
                "?"
            </button>
            <button
                class="toggle-item toggle-rejected"
                class:selected=move || verdict.get() == Verdict::Rejected
                title="Not passed"
                on:click=move |_| on_change.run(false)
            >
                "\u{2715}"
            </button>
            <button
                class="toggle-item toggle-approved"
                class:selected=move || verdict.get() == Verdict::Approved
                title="Passed"
                on:click=move |_| on_change.run(true)
            >
                "\u{2713}"
            </button>
        </div>
    }
}
