pub mod card;
pub mod confirm_dialog;
pub mod history_list;
pub mod menu;
pub mod pass_sidebar;
pub mod progress_bar;
pub mod result_summary;
