mod app;
mod commands;
mod components;
mod errors;
mod moderation;
mod pages;
mod picks;

use app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
