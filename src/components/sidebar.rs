use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let links = [
        ("/", "Home"),
        ("/app-picks", "App Picks"),
        ("/quality", "Quality Review"),
        ("/settings", "Settings"),
        ("/health", "Health Check"),
    ];

    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <h1 class="sidebar-title">"App Picks"</h1>
                <p class="sidebar-subtitle">"Catalog Curation Console"</p>
            </div>
            <ul class="nav-list">
                {links.into_iter().map(|(href, label)| view! {
                    <li class="nav-item">
                        <a href=href class="nav-link">{label}</a>
                    </li>
                }).collect::<Vec<_>>()}
            </ul>
        </nav>
    }
}
