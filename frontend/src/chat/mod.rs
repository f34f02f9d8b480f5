pub mod client;
pub mod session;
mod widget;

pub use widget::ChatWidget;
