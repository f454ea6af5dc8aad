//! Navigation from a message index to its rendered element.
//!
//! The host exposes its rendered transcript through [`RenderSurface`]; the
//! [`Navigator`] owns the range check, scroll, and highlight lifecycle on top.

pub mod focus;
pub mod jump;
pub mod surface;

pub use focus::{DEFAULT_HIGHLIGHT_DURATION, Navigator, NavigatorConfig};
pub use jump::{jump_to_floor, parse_floor};
pub use surface::{RenderSurface, ScrollAlign};
