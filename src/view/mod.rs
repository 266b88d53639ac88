pub mod chart;
pub mod format;
pub mod notifier;
pub mod page;
pub mod render;

pub use notifier::Notifier;
pub use page::{Alert, AlertKind, Page, PageKind, Region, SharedPage};
