pub mod banner;
pub mod footer;
pub mod nav_bar;
pub mod theme_toggle;
