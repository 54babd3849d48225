pub mod api_token_form;
pub mod app_picker;
pub mod health_item;
pub mod icon_preview;
pub mod quality_panel;
pub mod sidebar;
pub mod verdict;
