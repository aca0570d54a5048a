pub mod feature;
pub mod form;
pub mod ui_state;
