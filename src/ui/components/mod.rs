pub mod feedback;
pub mod menu;
pub mod progress_bar;
pub mod progress_panel;
pub mod question_card;
pub mod summary;
