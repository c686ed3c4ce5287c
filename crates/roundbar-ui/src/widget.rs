use std::cell::{Ref, RefCell};
use std::rc::Rc;

use roundbar_core::{
    Alignment, AttrError, AttributeSet, Color, Dispose, Gravity, LayoutError, LayoutObserver,
    Modifier, Orientation, Scene, Size,
};

use crate::layout::{self, ProgressLayout};
use crate::state::ProgressBarState;

/// Attribute keys understood by [`RoundCornerProgressBarBuilder::build`].
pub mod attr {
    pub const MAX: &str = "max";
    pub const PROGRESS: &str = "progress";
    pub const SECONDARY_PROGRESS: &str = "secondary_progress";
    pub const CORNER_RADIUS: &str = "corner_radius";
    pub const PADDING: &str = "padding";
    pub const BACKGROUND_COLOR: &str = "background_color";
    pub const PROGRESS_COLOR: &str = "progress_color";
    pub const SECONDARY_PROGRESS_COLOR: &str = "secondary_progress_color";
    pub const ORIENTATION: &str = "orientation";
    pub const GRAVITY: &str = "gravity";
}

/// Collects configuration before the bar exists.
///
/// Progress, maximum and color calls made here are recorded as pending and
/// win over the matching attributes passed to [`build`](Self::build).
pub struct RoundCornerProgressBarBuilder {
    state: ProgressBarState,
    modifier: Modifier,
    observer: Option<LayoutObserver>,
    orientation: Option<Orientation>,
    gravity: Option<Gravity>,
    radius: Option<i32>,
    padding: Option<i32>,
}

impl Default for RoundCornerProgressBarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundCornerProgressBarBuilder {
    pub fn new() -> Self {
        Self {
            state: ProgressBarState::default(),
            modifier: Modifier::default(),
            observer: None,
            orientation: None,
            gravity: None,
            radius: None,
            padding: None,
        }
    }

    pub fn max(mut self, max: f32) -> Self {
        self.state.set_max(max);
        self
    }
    pub fn progress(mut self, value: f32) -> Self {
        self.state.set_progress(value);
        self
    }
    pub fn secondary_progress(mut self, value: f32) -> Self {
        self.state.set_secondary_progress(value);
        self
    }
    pub fn progress_color(mut self, color: Color) -> Self {
        self.state.set_progress_color(color);
        self
    }
    pub fn progress_colors(mut self, color: Color, secondary: Color) -> Self {
        self.state.set_progress_colors(color, secondary);
        self
    }
    pub fn background_color(mut self, color: Color) -> Self {
        self.state.set_background_color(color);
        self
    }
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }
    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = Some(gravity);
        self
    }
    pub fn alignment(self, alignment: Alignment) -> Self {
        self.gravity(alignment.to_gravity())
    }
    /// Corner radius in px.
    pub fn corner_radius(mut self, radius: i32) -> Self {
        self.radius = Some(radius);
        self
    }
    /// Track padding in px.
    pub fn padding(mut self, padding: i32) -> Self {
        self.padding = Some(padding);
        self
    }
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }
    /// Share a host-owned observer instead of creating one.
    pub fn observer(mut self, observer: LayoutObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Applies `attrs` to everything not already set on the builder, finishes
    /// construction, and subscribes to the first layout pass.
    pub fn build(self, attrs: &AttributeSet) -> Result<RoundCornerProgressBar, AttrError> {
        let mut state = self.state;
        let pending = state.pending().copied().unwrap_or_default();

        let orientation = match self.orientation {
            Some(o) => o,
            None => attrs.orientation(attr::ORIENTATION)?.unwrap_or_default(),
        };
        state.set_orientation(orientation);

        let radius = match self.radius {
            Some(r) => Some(r),
            None => attrs.dimension(attr::CORNER_RADIUS)?,
        };
        if let Some(r) = radius {
            state.set_corner_radius(r);
        }
        let padding = match self.padding {
            Some(p) => Some(p),
            None => attrs.dimension(attr::PADDING)?,
        };
        if let Some(p) = padding {
            state.set_padding(p);
        }

        if !pending.background_color_pending()
            && let Some(c) = attrs.color(attr::BACKGROUND_COLOR)?
        {
            state.set_background_color(c);
        }

        if !pending.colors_pending() {
            let primary = attrs.color(attr::PROGRESS_COLOR)?;
            let secondary = attrs.color(attr::SECONDARY_PROGRESS_COLOR)?;
            if primary.is_some() || secondary.is_some() {
                state.set_progress_colors(
                    primary.unwrap_or(state.progress_color()),
                    secondary.unwrap_or(state.secondary_progress_color()),
                );
            }
        }

        if !pending.maximum_pending()
            && let Some(max) = attrs.float(attr::MAX)?
        {
            state.set_max(max);
        }

        if !pending.progress_pending() {
            if let Some(p) = attrs.float(attr::PROGRESS)? {
                state.set_progress(p);
            }
            if let Some(p) = attrs.float(attr::SECONDARY_PROGRESS)? {
                state.set_secondary_progress(p);
            }
        }

        let gravity = match self.gravity {
            Some(g) => g,
            None => attrs.gravity(attr::GRAVITY)?.unwrap_or_default(),
        };
        state.set_alignment(Alignment::from_gravity(gravity));

        state.mark_constructed();

        let state = Rc::new(RefCell::new(state));
        let observer = self.observer.unwrap_or_default();
        let layout_listener = observer.once({
            let state = Rc::downgrade(&state);
            move |size| {
                if let Some(state) = state.upgrade() {
                    state
                        .borrow_mut()
                        .on_layout_measured(size.width, size.height);
                }
            }
        });

        Ok(RoundCornerProgressBar {
            state,
            observer,
            modifier: self.modifier,
            layout_listener,
        })
    }
}

/// Rounded track with a primary and a secondary fill.
///
/// Fill sizes are only known after the first layout pass; values set before
/// then are replayed when it arrives.
pub struct RoundCornerProgressBar {
    state: Rc<RefCell<ProgressBarState>>,
    observer: LayoutObserver,
    modifier: Modifier,
    layout_listener: Dispose,
}

impl RoundCornerProgressBar {
    pub fn builder() -> RoundCornerProgressBarBuilder {
        RoundCornerProgressBarBuilder::new()
    }

    /// Construct purely from attributes.
    pub fn from_attrs(attrs: &AttributeSet) -> Result<Self, AttrError> {
        Self::builder().build(attrs)
    }

    pub fn state(&self) -> Ref<'_, ProgressBarState> {
        self.state.borrow()
    }

    pub fn observer(&self) -> &LayoutObserver {
        &self.observer
    }

    pub fn modifier(&self) -> &Modifier {
        &self.modifier
    }

    /// Whether the first layout pass has reached this bar.
    pub fn is_laid_out(&self) -> bool {
        self.state.borrow().track().is_some()
    }

    pub fn set_max(&self, max: f32) {
        self.state.borrow_mut().set_max(max);
    }
    pub fn set_progress(&self, value: f32) {
        self.state.borrow_mut().set_progress(value);
    }
    pub fn set_secondary_progress(&self, value: f32) {
        self.state.borrow_mut().set_secondary_progress(value);
    }
    pub fn set_progress_color(&self, color: Color) {
        self.state.borrow_mut().set_progress_color(color);
    }
    pub fn set_progress_colors(&self, color: Color, secondary: Color) {
        self.state.borrow_mut().set_progress_colors(color, secondary);
    }
    pub fn set_background_color(&self, color: Color) {
        self.state.borrow_mut().set_background_color(color);
    }

    pub fn max(&self) -> f32 {
        self.state.borrow().max()
    }
    pub fn progress(&self) -> f32 {
        self.state.borrow().progress()
    }
    pub fn secondary_progress(&self) -> f32 {
        self.state.borrow().secondary_progress()
    }
    pub fn progress_color(&self) -> Color {
        self.state.borrow().progress_color()
    }
    pub fn secondary_progress_color(&self) -> Color {
        self.state.borrow().secondary_progress_color()
    }
    pub fn background_color(&self) -> Color {
        self.state.borrow().background_color()
    }

    /// Measures the bar inside `available` (px), reports the size to the
    /// observer, and places the fills.
    pub fn layout(&self, available: Size) -> Result<ProgressLayout, LayoutError> {
        let measured = layout::measure_box(&self.modifier, available)?;
        self.observer.dispatch(measured);
        let state = self.state.borrow();
        layout::place_fills(&state, measured)
    }

    pub fn paint(&self, layout: &ProgressLayout, scene: &mut Scene) {
        layout::paint(&self.state.borrow(), layout, scene);
    }

    pub fn layout_and_paint(&self, available: Size) -> Result<Scene, LayoutError> {
        let layout = self.layout(available)?;
        let mut scene = Scene::new(Color::TRANSPARENT);
        self.paint(&layout, &mut scene);
        Ok(scene)
    }
}

impl Drop for RoundCornerProgressBar {
    fn drop(&mut self) {
        // Detach from a shared observer if no layout pass ever arrived.
        self.layout_listener.run();
    }
}

impl std::fmt::Debug for RoundCornerProgressBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundCornerProgressBar")
            .field("state", &*self.state.borrow())
            .field("modifier", &self.modifier)
            .field("observer", &self.observer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundbar_core::{Density, PxSize, Rect, SceneNode, with_density};

    fn bar_200x40() -> RoundCornerProgressBarBuilder {
        RoundCornerProgressBar::builder()
            .modifier(Modifier::new().size(200.0, 40.0))
            .padding(5)
    }

    fn roomy() -> Size {
        Size::new(400.0, 400.0)
    }

    #[test]
    fn test_layout_applies_half_progress() {
        let bar = bar_200x40().build(&AttributeSet::new()).unwrap();
        assert!(!bar.is_laid_out());

        let layout = bar.layout(roomy()).unwrap();
        assert!(bar.is_laid_out());
        bar.set_progress(50.0);
        assert_eq!(bar.state().progress_extent(), 95);

        let layout_after = bar.layout(roomy()).unwrap();
        assert_eq!(layout.track, layout_after.track);
        assert_eq!(
            layout_after.primary,
            Rect {
                x: 5.0,
                y: 5.0,
                w: 95.0,
                h: 30.0
            }
        );
    }

    #[test]
    fn test_host_dispatch_reaches_state() {
        let bar = bar_200x40().build(&AttributeSet::new()).unwrap();
        bar.set_progress(30.0);
        assert_eq!(bar.state().progress_extent(), 0);

        assert_eq!(bar.observer().dispatch(PxSize::new(200, 40)), 1);
        assert_eq!(bar.state().progress_extent(), 57);
        assert_eq!(bar.observer().listener_count(), 0);
    }

    #[test]
    fn test_early_and_late_progress_agree() {
        let early = bar_200x40().progress(30.0).build(&AttributeSet::new()).unwrap();
        let early_layout = early.layout(roomy()).unwrap();

        let late = bar_200x40().build(&AttributeSet::new()).unwrap();
        late.layout(roomy()).unwrap();
        late.set_progress(30.0);
        let late_layout = late.layout(roomy()).unwrap();

        assert_eq!(early_layout.primary, late_layout.primary);
        assert_eq!(early_layout.primary.w, 57.0);
    }

    #[test]
    fn test_builder_values_beat_attributes() {
        let attrs = AttributeSet::new()
            .with(attr::MAX, "200")
            .with(attr::PROGRESS, "10")
            .with(attr::SECONDARY_PROGRESS, "5")
            .with(attr::PROGRESS_COLOR, "#ff112233")
            .with(attr::SECONDARY_PROGRESS_COLOR, "#ff445566")
            .with(attr::BACKGROUND_COLOR, "#ff000000");

        let bar = RoundCornerProgressBar::builder()
            .progress(30.0)
            .progress_color(Color::WHITE)
            .build(&attrs)
            .unwrap();

        assert_eq!(bar.max(), 200.0);
        assert_eq!(bar.progress(), 30.0);
        // Progress was set explicitly, so neither progress attribute applies.
        assert_eq!(bar.secondary_progress(), 0.0);
        assert_eq!(bar.progress_color(), Color::WHITE);
        assert_eq!(
            bar.secondary_progress_color(),
            crate::state::DEFAULT_SECONDARY_PROGRESS_COLOR
        );
        assert_eq!(bar.background_color(), Color::BLACK);
        assert!(bar.state().pending().is_none());
    }

    #[test]
    fn test_early_progress_survives_larger_max() {
        let bar = RoundCornerProgressBar::builder()
            .progress(150.0)
            .max(200.0)
            .build(&AttributeSet::new())
            .unwrap();
        assert_eq!(bar.progress(), 150.0);

        let attrs = AttributeSet::new().with(attr::MAX, "200");
        let bar = RoundCornerProgressBar::builder()
            .progress(150.0)
            .secondary_progress(175.0)
            .build(&attrs)
            .unwrap();
        assert_eq!(bar.max(), 200.0);
        assert_eq!(bar.progress(), 150.0);
        assert_eq!(bar.secondary_progress(), 175.0);

        let bar = RoundCornerProgressBar::builder()
            .max(200.0)
            .progress(150.0)
            .build(&AttributeSet::new())
            .unwrap();
        assert_eq!(bar.progress(), 150.0);
    }

    #[test]
    fn test_attributes_configure_bar() {
        let attrs: AttributeSet = serde_json::from_str(
            r#"{
                "max": "50",
                "progress": "25",
                "padding": "4px",
                "corner_radius": "6px",
                "orientation": "vertical",
                "gravity": "center"
            }"#,
        )
        .unwrap();

        let bar = RoundCornerProgressBar::from_attrs(&attrs).unwrap();
        let state = bar.state();
        assert_eq!(state.max(), 50.0);
        assert_eq!(state.progress(), 25.0);
        assert_eq!(state.padding(), 4);
        assert_eq!(state.corner_radius(), 6);
        assert_eq!(state.orientation(), Orientation::Vertical);
        assert_eq!(state.alignment(), Alignment::CENTER);
        assert_eq!(state.progress_drawable().radius, 4.0);
        assert_eq!(state.phase(), crate::state::Phase::PendingGeometry);
    }

    #[test]
    fn test_invalid_attribute_is_reported() {
        let attrs = AttributeSet::new().with(attr::PROGRESS, "most of it");
        let err = RoundCornerProgressBar::from_attrs(&attrs).unwrap_err();
        assert!(matches!(err, AttrError::InvalidNumber { ref key, .. } if key == "progress"));
    }

    #[test]
    fn test_horizontal_alignment_positions_fill() {
        let right = bar_200x40()
            .gravity(Gravity::RIGHT)
            .progress(50.0)
            .build(&AttributeSet::new())
            .unwrap();
        let layout = right.layout(roomy()).unwrap();
        assert_eq!(layout.primary.x, 100.0);
        assert_eq!(layout.primary.y, 5.0);

        let centered = bar_200x40()
            .gravity(Gravity::CENTER_HORIZONTAL)
            .progress(40.0)
            .build(&AttributeSet::new())
            .unwrap();
        let layout = centered.layout(roomy()).unwrap();
        assert_eq!(layout.primary.w, 76.0);
        assert_eq!(layout.primary.x, 62.0);
    }

    #[test]
    fn test_vertical_alignment_positions_fill() {
        let bottom = RoundCornerProgressBar::builder()
            .modifier(Modifier::new().size(40.0, 200.0))
            .orientation(Orientation::Vertical)
            .gravity(Gravity::BOTTOM)
            .padding(5)
            .progress(50.0)
            .build(&AttributeSet::new())
            .unwrap();
        let layout = bottom.layout(roomy()).unwrap();
        assert_eq!(
            layout.primary,
            Rect {
                x: 5.0,
                y: 100.0,
                w: 30.0,
                h: 95.0
            }
        );

        let top = RoundCornerProgressBar::builder()
            .modifier(Modifier::new().size(40.0, 200.0))
            .orientation(Orientation::Vertical)
            .padding(5)
            .progress(50.0)
            .build(&AttributeSet::new())
            .unwrap();
        let layout = top.layout(roomy()).unwrap();
        assert_eq!(layout.primary.y, 5.0);
    }

    #[test]
    fn test_missing_height_falls_back_to_default_thickness() {
        let bar = RoundCornerProgressBar::builder()
            .modifier(Modifier::new().width(200.0))
            .padding(5)
            .progress(100.0)
            .build(&AttributeSet::new())
            .unwrap();
        let layout = bar.layout(roomy()).unwrap();
        assert_eq!(layout.track.h, 30.0);
        assert_eq!(layout.primary.w, 190.0);
        assert_eq!(layout.primary.h, 20.0);
    }

    #[test]
    fn test_fill_max_width_tracks_parent() {
        let bar = RoundCornerProgressBar::builder()
            .modifier(Modifier::new().fill_max_width().height(10.0))
            .build(&AttributeSet::new())
            .unwrap();
        let layout = bar.layout(Size::new(320.0, 100.0)).unwrap();
        assert_eq!(layout.track.w, 320.0);
        assert_eq!(layout.track.h, 10.0);

        // Geometry is latched on the first pass.
        let layout = bar.layout(Size::new(500.0, 100.0)).unwrap();
        assert_eq!(layout.track.w, 320.0);
    }

    #[test]
    fn test_density_scales_defaults_and_modifier() {
        with_density(Density { scale: 2.0 }, || {
            let bar = RoundCornerProgressBar::builder()
                .modifier(Modifier::new().size(100.0, 20.0))
                .progress(50.0)
                .build(&AttributeSet::new())
                .unwrap();
            let layout = bar.layout(roomy()).unwrap();
            assert_eq!(layout.track.w, 200.0);
            assert_eq!(bar.state().padding(), 10);
            assert_eq!(bar.state().progress_extent(), 90);
        });
    }

    #[test]
    fn test_drop_detaches_from_shared_observer() {
        let observer = LayoutObserver::new();
        let bar = RoundCornerProgressBar::builder()
            .observer(observer.clone())
            .build(&AttributeSet::new())
            .unwrap();
        assert_eq!(observer.listener_count(), 1);
        drop(bar);
        assert_eq!(observer.listener_count(), 0);
        assert_eq!(observer.dispatch(PxSize::new(10, 10)), 0);
    }

    #[test]
    fn test_paint_order_and_colors() {
        let bar = bar_200x40()
            .progress(50.0)
            .secondary_progress(75.0)
            .progress_colors(Color::WHITE, Color::BLACK)
            .background_color(Color::TRANSPARENT)
            .build(&AttributeSet::new())
            .unwrap();
        let scene = bar.layout_and_paint(roomy()).unwrap();

        assert_eq!(scene.nodes.len(), 5);
        assert!(matches!(scene.nodes[1], SceneNode::PushClip { .. }));
        assert!(matches!(scene.nodes[4], SceneNode::PopClip));

        let rects: Vec<_> = scene.rects().collect();
        assert_eq!(rects.len(), 3);
        assert_eq!(*rects[0].1, Color::TRANSPARENT);
        assert_eq!(rects[0].2, 10.0);
        assert_eq!(*rects[1].1, Color::BLACK);
        assert_eq!(rects[1].0.w, 142.0);
        assert_eq!(*rects[2].1, Color::WHITE);
        assert_eq!(rects[2].0.w, 95.0);
        assert_eq!(rects[2].2, 8.0);
    }

    #[test]
    fn test_empty_progress_paints_track_only() {
        let bar = bar_200x40().build(&AttributeSet::new()).unwrap();
        let scene = bar.layout_and_paint(roomy()).unwrap();
        assert_eq!(scene.nodes.len(), 1);
    }
}
