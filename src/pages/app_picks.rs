use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, AppSummary};
use crate::components::app_picker::AppPicker;
use crate::picks::slot::{DAYS_PER_WEEK, WEEK_POSITIONS};
use crate::picks::week::day_label;
use crate::picks::{IsoWeek, Request, SessionPhase, SessionView, SlotKey, SyncController};

/// Run one request against the backend and return whatever follow-ups the
/// controller asks for.
async fn execute(controller: RwSignal<SyncController>, request: Request) -> Vec<Request> {
    match request {
        Request::FetchWeek { epoch, week } => {
            let result = commands::get_week_picks(&week.start().to_string()).await;
            controller.try_update(|c| c.week_loaded(epoch, result));
            vec![]
        }
        Request::FetchEligible => {
            let result = commands::list_eligible_apps().await;
            controller.try_update(|c| c.eligible_loaded(result));
            vec![]
        }
        Request::Persist { epoch, week, request } => {
            let result = match request.slot {
                SlotKey::Week(position) => {
                    commands::set_week_pick(&request.app_id, week.number(), week.year(), position).await
                }
                SlotKey::Day(offset) => {
                    commands::set_day_pick(&request.app_id, &week.day(offset).to_string()).await
                }
            };
            controller
                .try_update(|c| c.persisted(epoch, &request, result))
                .unwrap_or_default()
        }
    }
}

fn run_requests(controller: RwSignal<SyncController>, requests: Vec<Request>) {
    for request in requests {
        spawn_local(async move {
            let follow_ups = execute(controller, request).await;
            run_requests(controller, follow_ups);
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Access {
    Checking,
    Allowed,
    Denied(String),
}

#[component]
pub fn AppPicksPage() -> impl IntoView {
    let (access, set_access) = signal(Access::Checking);

    Effect::new(move |_| {
        spawn_local(async move {
            let state = match commands::get_user_info().await {
                Ok(info) if info.is_quality_moderator => Access::Allowed,
                Ok(_) => Access::Denied("App picks are limited to quality moderators.".to_string()),
                Err(e) => Access::Denied(format!("Could not verify your account: {}", e)),
            };
            set_access.set(state);
        });
    });

    view! {
        <div class="page app-picks-page">
            <h2>"App Picks"</h2>
            {move || match access.get() {
                Access::Checking => view! { <p class="status-text">"Checking permissions..."</p> }.into_any(),
                Access::Denied(reason) => view! {
                    <div class="access-denied">
                        <p class="status-text status-error">{reason}</p>
                        <a href="/settings" class="btn btn-secondary">"Open Settings"</a>
                    </div>
                }.into_any(),
                Access::Allowed => view! { <WeeklyPicks /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn WeeklyPicks() -> impl IntoView {
    let controller = RwSignal::new(SyncController::new(IsoWeek::current()));

    Effect::new(move |_| {
        let requests = controller.try_update(|c| c.mount()).unwrap_or_default();
        run_requests(controller, requests);
    });

    let pool = Memo::new(move |_| controller.with(|c| c.pool()));
    let phase = Memo::new(move |_| controller.with(|c| c.phase()));
    // Only changes on Loading/Failed/Interactive, so saves keep the pickers mounted.
    let shape = Memo::new(move |_| phase.with(|p| p.view()));
    let week = Memo::new(move |_| controller.with(|c| c.week()));

    let go_to = move |target: IsoWeek| {
        let requests = controller.try_update(|c| c.change_week(target)).unwrap_or_default();
        run_requests(controller, requests);
    };

    let picker = move |key: SlotKey, placeholder: String| {
        let selected = Signal::derive(move || controller.with(|c| c.current(key)));
        let candidates = Signal::from(pool);
        let disabled = Signal::derive(move || shape.get() != SessionView::Interactive);
        let id = match key {
            SlotKey::Week(p) => format!("week-pick-{}", p),
            SlotKey::Day(d) => format!("day-pick-{}", d),
        };
        view! {
            <AppPicker
                id=id
                placeholder=placeholder
                candidates=candidates
                selected=selected
                disabled=disabled
                on_select=Callback::new(move |app: AppSummary| {
                    let requests = controller.try_update(|c| c.select(key, app)).unwrap_or_default();
                    run_requests(controller, requests);
                })
                on_clear=Callback::new(move |_| controller.update(|c| c.clear(key)))
            />
        }
    };

    view! {
        <div class="weekly-picks">
            <div class="week-nav">
                <button class="btn btn-secondary" on:click=move |_| go_to(week.get_untracked().previous())>
                    "\u{2190} Previous"
                </button>
                <div class="week-heading">
                    <h3>{move || week.get().title()}</h3>
                    <span class="week-range">{move || week.get().range_label()}</span>
                </div>
                <button class="btn btn-secondary" on:click=move |_| go_to(week.get_untracked().next())>
                    "Next \u{2192}"
                </button>
            </div>

            {move || match shape.get() {
                SessionView::Loading => view! { <p class="status-text">"Loading..."</p> }.into_any(),
                SessionView::Failed(err) => view! {
                    <div class="picks-error">
                        <h3>"Whoops"</h3>
                        <p>"Something went wrong while loading this week's picks."</p>
                        <p class="status-text status-error">{err.to_string()}</p>
                        <p>"Try again later or go back to the start page."</p>
                        <a href="/" class="btn btn-secondary">"Go home"</a>
                    </div>
                }.into_any(),
                SessionView::Interactive => {
                    let week_rows = (1..=WEEK_POSITIONS).map(|position| view! {
                        <div class="pick-row">
                            <label class="pick-label">{format!("Position {}", position)}</label>
                            {picker(SlotKey::Week(position), "Choose an app".to_string())}
                        </div>
                    }).collect::<Vec<_>>();

                    let day_rows = (0..DAYS_PER_WEEK).map(|offset| {
                        let label = move || day_label(week.get().day(offset));
                        view! {
                            <div class="pick-row">
                                <label class="pick-label">{label}</label>
                                {picker(SlotKey::Day(offset), "Choose an app".to_string())}
                            </div>
                        }
                    }).collect::<Vec<_>>();

                    view! {
                        <section class="picks-section">
                            <h3>"Apps of the week"</h3>
                            {week_rows}
                        </section>
                        <section class="picks-section">
                            <h3>"App of the day"</h3>
                            {day_rows}
                        </section>
                        <WeekPreview controller=controller />
                    }.into_any()
                }
            }}

            <Show when=move || phase.get() == SessionPhase::Saving>
                <p class="status-text saving-indicator">"Saving..."</p>
            </Show>

            {move || controller.with(|c| c.mutation_error().cloned()).map(|err| view! {
                <div class="mutation-error">
                    <span class="status-text status-error">{err.to_string()}</span>
                    <button
                        class="btn btn-small btn-secondary"
                        on:click=move |_| controller.update(|c| c.dismiss_mutation_error())
                    >
                        "Dismiss"
                    </button>
                </div>
            })}
        </div>
    }
}

/// The featured apps in position order, with the last saved one highlighted.
#[component]
fn WeekPreview(controller: RwSignal<SyncController>) -> impl IntoView {
    view! {
        <section class="picks-preview">
            <h3>"Preview"</h3>
            <ol class="preview-list">
                {move || {
                    let highlighted = controller.with(|c| c.last_saved());
                    (1..=WEEK_POSITIONS).filter_map(|position| {
                        let key = SlotKey::Week(position);
                        let app = controller.with(|c| c.current(key))?;
                        Some(view! {
                            <li class="preview-item" class:highlighted={highlighted == Some(key)}>
                                {app.icon.clone().map(|src| view! { <img class="preview-icon" src=src alt="" /> })}
                                <span class="preview-name">{app.name.clone()}</span>
                                {app.subtitle.clone().map(|s| view! { <span class="preview-subtitle">{s}</span> })}
                            </li>
                        })
                    }).collect::<Vec<_>>()
                }}
            </ol>
        </section>
    }
}
