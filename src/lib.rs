pub mod app;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod geocode;
pub mod observer;
pub mod projection;
pub mod render;
pub mod screenshot;
pub mod starminal_errors;
pub mod style;
pub mod terminal;
pub mod time;
pub mod view;
pub mod visibility;

pub use catalog::{CatalogEntry, CatalogOptions, StarCatalog};
pub use observer::ObserverLocation;
pub use starminal_errors::StarminalError;
pub use visibility::{compute_visible, VisibleStar};
