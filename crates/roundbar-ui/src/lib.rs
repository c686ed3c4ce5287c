//! Round-corner progress bar.
//!
//! The bar is a rounded track with two rounded fills inside it: a secondary
//! fill underneath a primary one. Each fill's extent along the growth axis is
//!
//! ```text
//! floor((track - 2 * padding) * progress / max)
//! ```
//!
//! Track size is only known once the host has run a layout pass, so setters
//! that arrive earlier are buffered and replayed when the first measured size
//! comes in (see [`state`] for the phases).
//!
//! ```rust
//! use roundbar_core::*;
//! use roundbar_ui::RoundCornerProgressBar;
//!
//! let attrs = AttributeSet::new().with("padding", "5px");
//! let bar = RoundCornerProgressBar::builder()
//!     .modifier(Modifier::new().size(200.0, 40.0))
//!     .progress(50.0)
//!     .build(&attrs)
//!     .unwrap();
//!
//! // Nothing is sized until the first layout pass.
//! assert_eq!(bar.state().progress_extent(), 0);
//!
//! let layout = bar.layout(Size::new(400.0, 400.0)).unwrap();
//! assert_eq!(bar.state().progress_extent(), 95);
//! assert_eq!(layout.primary.w, 95.0);
//! ```

pub mod layout;
pub mod state;
pub mod widget;

pub use layout::{ProgressLayout, measure_box, paint, place_fills};
pub use state::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_MAX, DEFAULT_PADDING_DP, DEFAULT_PROGRESS_COLOR,
    DEFAULT_RADIUS_DP, DEFAULT_SECONDARY_PROGRESS_COLOR, DEFAULT_THICKNESS_DP, PendingConfig,
    Phase, ProgressBarState, RoundRect, clamp_progress, fill_extent,
};
pub use widget::{RoundCornerProgressBar, RoundCornerProgressBarBuilder, attr};
