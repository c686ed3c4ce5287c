//! # Host primitives
//!
//! `roundbar-core` holds the small set of host-side types the progress bar
//! widget talks to. None of them know about progress bars:
//!
//! - `Color`, `Vec2`, `Size`, `Rect`, `PxSize`: values.
//! - `Density` / `Dp`: dp→px conversion via composition locals.
//! - `Gravity` / `Alignment`: toolkit gravity bits and their decomposition.
//! - `AttributeSet`: construction-time attributes parsed from markup.
//! - `LayoutObserver`: one-shot "layout measured" notifications.
//! - `Scene`: the display list handed to a renderer.
//!
//! ## Density
//!
//! Dimensions are authored in dp and converted with the current `Density`:
//!
//! ```rust
//! use roundbar_core::*;
//!
//! let px = with_density(Density { scale: 2.0 }, || Dp(10.0).to_px_int());
//! assert_eq!(px, 20);
//! ```
//!
//! ## One-shot layout notifications
//!
//! A widget registers with `LayoutObserver::once` and is detached as soon as
//! the first measured size is dispatched:
//!
//! ```rust
//! use roundbar_core::*;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let observer = LayoutObserver::new();
//! let seen = Rc::new(Cell::new(0));
//! let _guard = observer.once({
//!     let seen = seen.clone();
//!     move |size| seen.set(size.width)
//! });
//!
//! observer.dispatch(PxSize::new(200, 40));
//! observer.dispatch(PxSize::new(300, 40));
//! assert_eq!(seen.get(), 200);
//! ```

pub mod attrs;
pub mod color;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod gravity;
pub mod locals;
pub mod modifier;
pub mod observer;
pub mod prelude;
pub mod view;

pub use attrs::*;
pub use color::*;
pub use effects::*;
pub use error::*;
pub use geometry::*;
pub use gravity::*;
pub use locals::*;
pub use modifier::*;
pub use observer::*;
pub use view::*;
