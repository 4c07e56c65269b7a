//! Persisted settings: the flat file format, typed values, observable cells
//! and the [`BuilderState`] that ties them together.

pub mod location;
pub mod observable;
pub mod state;
pub mod store;
pub mod value;

pub use state::{BuilderState, WindowGeometry, WindowPosition, keys};
pub use store::SettingsMap;
pub use value::WindowPlacement;
