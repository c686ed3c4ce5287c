pub use crate::attrs::AttributeSet;
pub use crate::color::Color;
pub use crate::effects::Dispose;
pub use crate::error::{AttrError, ColorError, GravityError, LayoutError};
pub use crate::geometry::{Orientation, PxSize, Rect, Size, Vec2};
pub use crate::gravity::{Alignment, Gravity, HorizontalAlign, VerticalAlign};
pub use crate::locals::{Density, Dp, density, dp_to_px, with_density};
pub use crate::modifier::Modifier;
pub use crate::observer::LayoutObserver;
pub use crate::view::{Scene, SceneNode};
