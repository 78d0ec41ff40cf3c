mod search_box;
pub mod slip_panel;

pub use search_box::SearchBox;
