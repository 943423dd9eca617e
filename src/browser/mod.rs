pub mod capability;
pub mod headless;

pub use capability::{BrowserSession, PageContext};
pub use headless::{launch_headless_browser, ChromePage, ChromeSession};
