// Layout pieces shared by every screen

pub mod footer;
pub mod header;
pub mod popup;

pub use footer::Footer;
pub use header::Header;
pub use popup::{Popup, PopupAreas};
