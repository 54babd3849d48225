//! Slide-over panel listing an app's quality guidelines.
//!
//! Developers see each guideline's status; moderators can set verdicts, pass
//! everything at once, dismiss a pending review request and flag the app's
//! screenshots as fullscreen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, GuidelineStatus};
use crate::components::icon_preview::IconPreviewToggle;
use crate::components::verdict::{VerdictIndicator, VerdictToggle};
use crate::moderation::{
    group_by_category, humanize, icon_preview, is_editable, pass_all_targets, ModerationMode, ReviewBoard,
    SCREENSHOTS_CATEGORY,
};

#[component]
pub fn QualityModerationPanel(
    /// App under review.
    #[prop(into)]
    app_id: String,
    /// Display name of the app, shown in the header.
    #[prop(into)]
    app_name: String,
    mode: ModerationMode,
    on_close: Callback<()>,
) -> impl IntoView {
    let board = RwSignal::new(ReviewBoard::new());
    let app_id = StoredValue::new(app_id);

    // Abandon the guideline fetch when the panel goes away.
    let cancelled = Arc::new(AtomicBool::new(false));
    let cancel_flag = StoredValue::new(cancelled.clone());
    on_cleanup(move || cancelled.store(true, Ordering::Relaxed));

    let load = move || {
        let id = app_id.get_value();
        spawn_local(async move {
            let result = commands::get_guideline_status(&id).await;
            let aborted = cancel_flag
                .try_get_value()
                .map_or(true, |flag| flag.load(Ordering::Relaxed));
            if aborted {
                return;
            }
            board.update(|b| b.load(result));
        });
    };

    // Load guidelines on mount
    Effect::new(move |_| {
        load();
    });

    let set_verdict = move |guideline_id: String, passed: bool| {
        let Some(request) = board
            .try_update(|b| b.set_verdict(&guideline_id, passed, mode))
            .flatten()
        else {
            return;
        };
        let id = app_id.get_value();
        spawn_local(async move {
            let result = commands::set_guideline_status(&id, &guideline_id, passed).await;
            let refetch = board
                .try_update(|b| b.settle_verdict(&guideline_id, request, result))
                .unwrap_or(false);
            if refetch {
                load();
            }
        });
    };

    let set_fullscreen = move |value: bool| {
        let Some(request) = board.try_update(|b| b.set_fullscreen(value, mode)).flatten() else {
            return;
        };
        let id = app_id.get_value();
        spawn_local(async move {
            let result = commands::set_fullscreen_app(&id, value).await;
            let refetch = board
                .try_update(|b| b.settle_fullscreen(request, result))
                .unwrap_or(false);
            if refetch {
                load();
            }
        });
    };

    let pass_all = move |_| {
        let targets = board.with(|b| {
            b.report()
                .map(|r| pass_all_targets(&r.guidelines))
                .unwrap_or_default()
        });
        let id = app_id.get_value();
        spawn_local(async move {
            match commands::pass_all_guidelines(&id, targets).await {
                Ok(_) => load(),
                Err(e) => {
                    board.try_update(|b| b.action_failed("all guidelines", e));
                }
            }
        });
    };

    let dismiss_review = move |_| {
        let id = app_id.get_value();
        spawn_local(async move {
            match commands::dismiss_review_request(&id).await {
                Ok(()) => load(),
                Err(e) => {
                    board.try_update(|b| b.action_failed("review request", e));
                }
            }
        });
    };

    let guideline_row = move |g: GuidelineStatus| {
        let gid = g.guideline_id.clone();
        let verdict = Signal::derive(move || board.with(|b| b.verdict(&gid)));
        let editable = is_editable(&g, mode);
        let target = g.guideline_id.clone();
        view! {
            <div class="guideline-row">
                <span class="guideline-name">{humanize(&g.guideline_id)}</span>
                {g.url.clone().map(|url| view! {
                    <a class="guideline-link" href=url target="_blank" rel="noreferrer">"\u{2197}"</a>
                })}
                <div class="guideline-status">
                    {if editable {
                        view! {
                            <VerdictToggle
                                verdict=verdict
                                on_change=Callback::new(move |passed| set_verdict(target.clone(), passed))
                            />
                        }.into_any()
                    } else {
                        view! { <VerdictIndicator verdict=verdict /> }.into_any()
                    }}
                </div>
            </div>
        }
    };

    view! {
        <div class="slide-over-backdrop" on:click=move |_| on_close.run(())></div>
        <aside class="slide-over quality-panel">
            <style>{include_str!("quality_panel.css")}</style>
            <header class="slide-over-header">
                <h3>"App listing quality"</h3>
                <span class="slide-over-subtitle">{app_name}</span>
                <button class="btn btn-small btn-secondary" on:click=move |_| on_close.run(())>
                    "Close"
                </button>
            </header>

            <div class="slide-over-body">
                {move || {
                    if board.with(|b| b.is_loading()) {
                        return view! { <p class="quality-loading">"Loading guidelines..."</p> }.into_any();
                    }
                    if let Some(err) = board.with(|b| b.fetch_error().cloned()) {
                        return view! {
                            <p class="status-text status-error">{format!("Server error: {}", err)}</p>
                        }.into_any();
                    }
                    let Some(report) = board.with(|b| b.report().cloned()) else {
                        return view! { <p class="quality-empty">"No data"</p> }.into_any();
                    };
                    let review_requested = board.with(|b| b.review_requested());

                    let actions = (mode == ModerationMode::Moderator).then(|| view! {
                        <div class="quality-actions">
                            {review_requested.then(|| view! {
                                <button class="btn btn-primary" on:click=dismiss_review>
                                    "Dismiss review request"
                                </button>
                            })}
                            <button class="btn btn-secondary" on:click=pass_all>"Pass all"</button>
                        </div>
                    });

                    let groups = group_by_category(&report.guidelines).into_iter().map(|(category, guidelines)| {
                        let screenshot_toggle = (category == SCREENSHOTS_CATEGORY && mode == ModerationMode::Moderator)
                            .then(|| view! {
                                <div class="multi-toggle screenshot-type">
                                    <button
                                        class="toggle-item"
                                        class:selected=move || !board.with(|b| b.is_fullscreen())
                                        title="Default"
                                        on:click=move |_| set_fullscreen(false)
                                    >
                                        "Default"
                                    </button>
                                    <button
                                        class="toggle-item"
                                        class:selected=move || board.with(|b| b.is_fullscreen())
                                        title="Fullscreen"
                                        on:click=move |_| set_fullscreen(true)
                                    >
                                        "Fullscreen"
                                    </button>
                                </div>
                            });
                        let preview = icon_preview(&category, report.branding.as_ref())
                            .map(|preview| view! { <IconPreviewToggle preview=preview /> });
                        let rows = guidelines.into_iter().map(guideline_row).collect::<Vec<_>>();
                        view! {
                            <section class="quality-category">
                                <div class="quality-category-header">
                                    <h4>{humanize(&category)}</h4>
                                    {screenshot_toggle}
                                </div>
                                {preview}
                                <div class="quality-guidelines">{rows}</div>
                            </section>
                        }
                    }).collect::<Vec<_>>();

                    view! {
                        <div class="quality-categories">
                            {actions}
                            {groups}
                        </div>
                    }.into_any()
                }}

                {move || board.with(|b| b.mutation_error().cloned()).map(|err| view! {
                    <div class="mutation-error">
                        <span class="status-text status-error">{err.to_string()}</span>
                        <button
                            class="btn btn-small btn-secondary"
                            on:click=move |_| board.update(|b| b.dismiss_error())
                        >
                            "Dismiss"
                        </button>
                    </div>
                })}
            </div>
        </aside>
    }
}
