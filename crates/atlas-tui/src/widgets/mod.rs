//! Small rendering helpers shared by the screens.

pub mod chips;
pub mod number_fmt;
pub mod sub_tabs;
