pub mod list;
pub mod registry;
pub mod site;

pub use list::{ListParams, Page};
pub use registry::{AdminRegistry, FilterKind, ModelAdmin};
pub use site::default_registry;
