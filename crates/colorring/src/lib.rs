//! # colorring
//!
//! A circular color-picker ring: a wheel of palette wedges, a draggable thumb
//! and an optional confirm button.
//!
//! The widget itself is host independent. Hosts report their bounds, forward
//! pointer input and hand [`ColorWheelSelector::render`] something that
//! implements [`Surface`]; [`CairoSurface`] covers cairo-based toolkits.
//!
//! ```rust,no_run
//! use colorring::{ColorWheelSelector, Point, Preset};
//!
//! let mut ring = ColorWheelSelector::new(Preset::Classic.config()).unwrap();
//! ring.set_listener(|color| println!("picked {color}"));
//! ring.on_bounds_changed(400.0, 400.0);
//! ring.handle_touch_down(Point::new(300.0, 200.0));
//! ring.handle_touch_up();
//! ```

pub mod cairo_surface;
pub mod config;
pub mod error;
pub mod geometry;
pub mod render;
pub mod selector;
pub mod swatch;

pub use cairo_surface::{CairoSurface, ImageCache};
pub use config::{ButtonConfig, ImageRef, Preset, SelectorConfig, ThumbConfig};
pub use error::{SelectorError, SwatchError};
pub use geometry::{Geometry, Point, Rect, normalize_degrees};
pub use render::Surface;
pub use selector::{
    ColorListener, ColorWheelSelector, DragState, TouchEvent, TouchPhase, TouchResponse,
};
pub use swatch::{Palette, Swatch};
