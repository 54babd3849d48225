use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="page home-page">
            <h2>"App Picks"</h2>
            <p class="page-description">
                "Curate the catalog's featured apps and review app listings."
            </p>

            <div class="card-grid">
                <div class="card">
                    <h3>"Weekly Picks"</h3>
                    <p>"Choose five apps of the week and one app for each day"</p>
                    <a href="/app-picks" class="btn btn-primary">"Open Picks"</a>
                </div>
                <div class="card">
                    <h3>"Quality Review"</h3>
                    <p>"Check an app listing against the quality guidelines"</p>
                    <a href="/quality" class="btn btn-primary">"Review App"</a>
                </div>
                <div class="card">
                    <h3>"Settings"</h3>
                    <p>"Add your API token and point the console at a catalog"</p>
                    <a href="/settings" class="btn btn-primary">"Configure"</a>
                </div>
            </div>

            <div class="how-it-works">
                <h3>"How It Works"</h3>
                <div class="steps">
                    <div class="step">
                        <span class="step-number">"1"</span>
                        <div class="step-content">
                            <strong>"Pick a week"</strong>
                            <p>"Browse to any ISO week, past or upcoming"</p>
                        </div>
                    </div>
                    <div class="step">
                        <span class="step-number">"2"</span>
                        <div class="step-content">
                            <strong>"Assign apps"</strong>
                            <p>"Only apps passing quality moderation can be chosen, each at most once per week"</p>
                        </div>
                    </div>
                    <div class="step">
                        <span class="step-number">"3"</span>
                        <div class="step-content">
                            <strong>"Saved instantly"</strong>
                            <p>"Every choice is written right away and confirmed against the server"</p>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
