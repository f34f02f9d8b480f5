//! Hash-fragment navigation between the site's sections.

pub mod browser;
pub mod bus;
pub mod router;
pub mod view;

pub use bus::PageChangeBus;
pub use router::ViewRouter;
pub use view::View;
