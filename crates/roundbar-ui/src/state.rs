//! Progress values, drawables and the construction/geometry state machine.
//!
//! A bar goes through three phases:
//!
//! 1. `Unconfigured`: being built. Setter calls are recorded in a
//!    [`PendingConfig`] so construction-time attributes don't overwrite them.
//! 2. `PendingGeometry`: built, but no layout pass has reported a size yet.
//!    Setters store values; fill extents stay at zero.
//! 3. `Ready`: track geometry is latched. Setters recompute extents at once.
//!
//! The `PendingGeometry → Ready` transition in
//! [`ProgressBarState::on_layout_measured`] is the only place buffered values
//! become visible.

use roundbar_core::{Alignment, Color, Dp, Orientation, PxSize};

pub const DEFAULT_MAX: f32 = 100.0;
pub const DEFAULT_RADIUS_DP: f32 = 10.0;
pub const DEFAULT_PADDING_DP: f32 = 5.0;
/// Substituted for a zero cross-axis measurement.
pub const DEFAULT_THICKNESS_DP: f32 = 30.0;

pub const DEFAULT_PROGRESS_COLOR: Color = Color::from_argb(0xff7f7f7f);
pub const DEFAULT_SECONDARY_PROGRESS_COLOR: Color = Color::from_argb(0x7f7f7f7f);
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::from_argb(0xff5f5f5f);

/// Solid rounded rectangle. Geometry comes from layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundRect {
    pub color: Color,
    pub radius: f32,
}

/// Values set before construction finished. They take precedence over
/// attributes and are applied exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PendingConfig {
    pub max: Option<f32>,
    pub progress: Option<f32>,
    pub secondary_progress: Option<f32>,
    pub progress_color: Option<Color>,
    pub secondary_progress_color: Option<Color>,
    pub background_color: Option<Color>,
}

impl PendingConfig {
    pub fn maximum_pending(&self) -> bool {
        self.max.is_some()
    }
    /// Either channel counts; attributes for both are then skipped.
    pub fn progress_pending(&self) -> bool {
        self.progress.is_some() || self.secondary_progress.is_some()
    }
    pub fn colors_pending(&self) -> bool {
        self.progress_color.is_some() || self.secondary_progress_color.is_some()
    }
    pub fn background_color_pending(&self) -> bool {
        self.background_color.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Unconfigured(PendingConfig),
    PendingGeometry,
    Ready(PxSize),
}

/// Clamps into `[0, max]`; above `max` first, then below zero, so a negative
/// or zero `max` yields 0.
pub fn clamp_progress(value: f32, max: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    let v = if value > max { max } else { value };
    if v < 0.0 { 0.0 } else { v }
}

/// Pixel extent of a fill along the growth axis.
///
/// `floor((track - 2 * padding) * progress / max)`, with zero progress, a
/// non-positive `max`, or a padding larger than the track all giving 0.
pub fn fill_extent(track: i32, padding: i32, progress: f32, max: f32) -> i32 {
    let available = track.saturating_sub(padding.saturating_mul(2)).max(0);
    if progress <= 0.0 || max <= 0.0 || !progress.is_finite() || !max.is_finite() {
        return 0;
    }
    if progress >= max {
        return available;
    }
    ((available as f64 * progress as f64) / max as f64).floor() as i32
}

#[derive(Clone, Debug)]
pub struct ProgressBarState {
    max: f32,
    progress: f32,
    secondary_progress: f32,
    radius: i32,
    padding: i32,
    progress_color: Color,
    secondary_progress_color: Color,
    background_color: Color,
    orientation: Orientation,
    alignment: Alignment,
    default_thickness: i32,

    track_drawable: RoundRect,
    progress_drawable: RoundRect,
    secondary_drawable: RoundRect,
    progress_extent: i32,
    secondary_extent: i32,

    phase: Phase,
}

impl Default for ProgressBarState {
    fn default() -> Self {
        Self::new(Orientation::Horizontal)
    }
}

impl ProgressBarState {
    /// Fresh, unconfigured state. Dimension defaults are converted with the
    /// current density.
    pub fn new(orientation: Orientation) -> Self {
        let radius = Dp(DEFAULT_RADIUS_DP).to_px_int();
        let padding = Dp(DEFAULT_PADDING_DP).to_px_int();
        let mut s = Self {
            max: DEFAULT_MAX,
            progress: 0.0,
            secondary_progress: 0.0,
            radius,
            padding,
            progress_color: DEFAULT_PROGRESS_COLOR,
            secondary_progress_color: DEFAULT_SECONDARY_PROGRESS_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
            orientation,
            alignment: Alignment::TOP_LEFT,
            default_thickness: Dp(DEFAULT_THICKNESS_DP).to_px_round(),
            track_drawable: RoundRect {
                color: DEFAULT_BACKGROUND_COLOR,
                radius: 0.0,
            },
            progress_drawable: RoundRect {
                color: DEFAULT_PROGRESS_COLOR,
                radius: 0.0,
            },
            secondary_drawable: RoundRect {
                color: DEFAULT_SECONDARY_PROGRESS_COLOR,
                radius: 0.0,
            },
            progress_extent: 0,
            secondary_extent: 0,
            phase: Phase::Unconfigured(PendingConfig::default()),
        };
        s.rebuild_drawables();
        s
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Recorded pre-construction values; `None` once constructed.
    pub fn pending(&self) -> Option<&PendingConfig> {
        match &self.phase {
            Phase::Unconfigured(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_constructed(&self) -> bool {
        !matches!(self.phase, Phase::Unconfigured(_))
    }

    /// Latched track geometry, once a layout pass has reported it.
    pub fn track(&self) -> Option<PxSize> {
        match self.phase {
            Phase::Ready(t) => Some(t),
            _ => None,
        }
    }

    fn pending_mut(&mut self) -> Option<&mut PendingConfig> {
        match &mut self.phase {
            Phase::Unconfigured(p) => Some(p),
            _ => None,
        }
    }

    /// Ends construction: progress values recorded while unconfigured are
    /// clamped against the final maximum and drawables rebuilt with the final
    /// radius and padding.
    pub fn mark_constructed(&mut self) {
        if self.is_constructed() {
            return;
        }
        let pending = self.pending().copied().unwrap_or_default();
        self.phase = Phase::PendingGeometry;
        self.progress = clamp_progress(pending.progress.unwrap_or(self.progress), self.max);
        self.secondary_progress = clamp_progress(
            pending.secondary_progress.unwrap_or(self.secondary_progress),
            self.max,
        );
        self.rebuild_drawables();
        log::debug!(
            "progress bar constructed: max={} progress={} secondary={}",
            self.max,
            self.progress,
            self.secondary_progress
        );
    }

    /// Latches track geometry from the first layout pass and replays the
    /// current progress values into fill extents.
    ///
    /// A zero measurement across the growth axis is replaced by the default
    /// thickness. Geometry is latched once; later calls recompute extents
    /// against the latched track and ignore the new size.
    pub fn on_layout_measured(&mut self, width: i32, height: i32) {
        match self.phase {
            Phase::Ready(track) => {
                if track != PxSize::new(width, height) {
                    log::warn!(
                        "progress bar: ignoring re-layout to {width}x{height}, track stays {}x{}",
                        track.width,
                        track.height
                    );
                }
            }
            Phase::Unconfigured(_) | Phase::PendingGeometry => {
                self.mark_constructed();
                let cross = self.orientation.cross(PxSize::new(width, height));
                let cross = if cross == 0 {
                    self.default_thickness
                } else {
                    cross
                };
                let main = self.orientation.main(PxSize::new(width, height));
                let track = self.orientation.size(main, cross);
                log::debug!(
                    "progress bar: track latched at {}x{}",
                    track.width,
                    track.height
                );
                self.phase = Phase::Ready(track);
            }
        }
        self.apply_progress();
        self.apply_secondary_progress();
    }

    pub fn set_max(&mut self, max: f32) {
        if let Some(p) = self.pending_mut() {
            p.max = Some(max);
        }
        self.max = max;
        if self.is_constructed() {
            self.progress = clamp_progress(self.progress, max);
            self.secondary_progress = clamp_progress(self.secondary_progress, max);
            self.apply_progress();
            self.apply_secondary_progress();
        }
    }

    pub fn set_progress(&mut self, value: f32) {
        if let Some(p) = self.pending_mut() {
            p.progress = Some(value);
        }
        self.progress = clamp_progress(value, self.max);
        self.apply_progress();
    }

    pub fn set_secondary_progress(&mut self, value: f32) {
        if let Some(p) = self.pending_mut() {
            p.secondary_progress = Some(value);
        }
        self.secondary_progress = clamp_progress(value, self.max);
        self.apply_secondary_progress();
    }

    pub fn set_progress_color(&mut self, color: Color) {
        if let Some(p) = self.pending_mut() {
            p.progress_color = Some(color);
        }
        self.progress_color = color;
        self.progress_drawable = self.fill_drawable(color);
    }

    pub fn set_progress_colors(&mut self, color: Color, secondary: Color) {
        if let Some(p) = self.pending_mut() {
            p.progress_color = Some(color);
            p.secondary_progress_color = Some(secondary);
        }
        self.progress_color = color;
        self.secondary_progress_color = secondary;
        self.progress_drawable = self.fill_drawable(color);
        self.secondary_drawable = self.fill_drawable(secondary);
    }

    pub fn set_background_color(&mut self, color: Color) {
        if let Some(p) = self.pending_mut() {
            p.background_color = Some(color);
        }
        self.background_color = color;
        self.track_drawable = RoundRect {
            color,
            radius: self.radius as f32,
        };
    }

    pub fn set_corner_radius(&mut self, radius: i32) {
        self.radius = radius.max(0);
        self.rebuild_drawables();
    }

    pub fn set_padding(&mut self, padding: i32) {
        self.padding = padding.max(0);
        self.rebuild_drawables();
        self.apply_progress();
        self.apply_secondary_progress();
    }

    /// Only meaningful before construction completes.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.is_constructed() {
            log::warn!("progress bar: orientation is fixed after construction");
            return;
        }
        self.orientation = orientation;
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    pub fn max(&self) -> f32 {
        self.max
    }
    pub fn progress(&self) -> f32 {
        self.progress
    }
    pub fn secondary_progress(&self) -> f32 {
        self.secondary_progress
    }
    pub fn corner_radius(&self) -> i32 {
        self.radius
    }
    pub fn padding(&self) -> i32 {
        self.padding
    }
    pub fn progress_color(&self) -> Color {
        self.progress_color
    }
    pub fn secondary_progress_color(&self) -> Color {
        self.secondary_progress_color
    }
    pub fn background_color(&self) -> Color {
        self.background_color
    }
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }
    pub fn default_thickness(&self) -> i32 {
        self.default_thickness
    }
    pub fn background_width(&self) -> i32 {
        self.track().map_or(0, |t| t.width)
    }
    pub fn background_height(&self) -> i32 {
        self.track().map_or(0, |t| t.height)
    }

    pub fn track_drawable(&self) -> RoundRect {
        self.track_drawable
    }
    pub fn progress_drawable(&self) -> RoundRect {
        self.progress_drawable
    }
    pub fn secondary_progress_drawable(&self) -> RoundRect {
        self.secondary_drawable
    }

    /// Primary fill extent along the growth axis; 0 until geometry is known.
    pub fn progress_extent(&self) -> i32 {
        self.progress_extent
    }
    pub fn secondary_progress_extent(&self) -> i32 {
        self.secondary_extent
    }

    /// `progress / max` in `[0, 1]`; 0 when `max` is not positive.
    pub fn fraction(&self) -> f32 {
        ratio(self.progress, self.max)
    }
    pub fn secondary_fraction(&self) -> f32 {
        ratio(self.secondary_progress, self.max)
    }

    /// Inner area the fills live in: the track minus padding on every side.
    pub fn fill_area(&self) -> Option<PxSize> {
        self.track().map(|t| {
            PxSize::new(
                (t.width - 2 * self.padding).max(0),
                (t.height - 2 * self.padding).max(0),
            )
        })
    }

    /// Full size of each fill layer as `(primary, secondary)`: the extent
    /// along the growth axis, the whole fill area across it.
    pub fn fill_sizes(&self) -> Option<(PxSize, PxSize)> {
        let area = self.fill_area()?;
        let cross = self.orientation.cross(area);
        Some((
            self.orientation.size(self.progress_extent, cross),
            self.orientation.size(self.secondary_extent, cross),
        ))
    }

    fn apply_progress(&mut self) {
        if let Some(track) = self.track() {
            self.progress_extent = fill_extent(
                self.orientation.main(track),
                self.padding,
                self.progress,
                self.max,
            );
            log::trace!("progress bar: primary extent {}", self.progress_extent);
        }
    }

    fn apply_secondary_progress(&mut self) {
        if let Some(track) = self.track() {
            self.secondary_extent = fill_extent(
                self.orientation.main(track),
                self.padding,
                self.secondary_progress,
                self.max,
            );
            log::trace!("progress bar: secondary extent {}", self.secondary_extent);
        }
    }

    fn fill_radius(&self) -> f32 {
        (self.radius - self.padding / 2).max(0) as f32
    }

    fn fill_drawable(&self, color: Color) -> RoundRect {
        RoundRect {
            color,
            radius: self.fill_radius(),
        }
    }

    fn rebuild_drawables(&mut self) {
        self.track_drawable = RoundRect {
            color: self.background_color,
            radius: self.radius as f32,
        };
        self.progress_drawable = self.fill_drawable(self.progress_color);
        self.secondary_drawable = self.fill_drawable(self.secondary_progress_color);
    }
}

fn ratio(value: f32, max: f32) -> f32 {
    if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constructed() -> ProgressBarState {
        let mut s = ProgressBarState::new(Orientation::Horizontal);
        s.mark_constructed();
        s
    }

    #[test]
    fn test_defaults() {
        let s = ProgressBarState::new(Orientation::Horizontal);
        assert_eq!(s.max(), 100.0);
        assert_eq!(s.progress(), 0.0);
        assert_eq!(s.corner_radius(), 10);
        assert_eq!(s.padding(), 5);
        assert_eq!(s.default_thickness(), 30);
        assert_eq!(s.background_width(), 0);
        assert_eq!(s.background_height(), 0);
        assert_eq!(s.progress_color(), Color(0x7f, 0x7f, 0x7f, 0xff));
        assert_eq!(s.secondary_progress_color(), Color(0x7f, 0x7f, 0x7f, 0x7f));
        assert_eq!(s.background_color(), Color(0x5f, 0x5f, 0x5f, 0xff));
        assert!(matches!(s.phase(), Phase::Unconfigured(_)));
    }

    #[test]
    fn test_progress_in_range_reads_back_exactly() {
        let mut s = constructed();
        for p in [0.0, 0.5, 33.3, 99.99, 100.0] {
            s.set_progress(p);
            assert_eq!(s.progress(), p);
            s.set_secondary_progress(p);
            assert_eq!(s.secondary_progress(), p);
        }
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut s = constructed();
        s.set_progress(150.0);
        assert_eq!(s.progress(), 100.0);
        s.set_progress(-3.0);
        assert_eq!(s.progress(), 0.0);
        s.set_secondary_progress(1e9);
        assert_eq!(s.secondary_progress(), 100.0);
        s.set_progress(f32::NAN);
        assert_eq!(s.progress(), 0.0);
    }

    #[test]
    fn test_clamp_with_degenerate_max() {
        assert_eq!(clamp_progress(10.0, 0.0), 0.0);
        assert_eq!(clamp_progress(10.0, -5.0), 0.0);
        assert_eq!(clamp_progress(-1.0, 0.0), 0.0);
    }

    #[test]
    fn test_fill_extent_formula() {
        assert_eq!(fill_extent(200, 5, 50.0, 100.0), 95);
        assert_eq!(fill_extent(200, 5, 30.0, 100.0), 57);
        assert_eq!(fill_extent(200, 5, 100.0, 100.0), 190);
        assert_eq!(fill_extent(200, 5, 1.0, 3.0), 63);
    }

    #[test]
    fn test_fill_extent_edge_cases() {
        assert_eq!(fill_extent(200, 5, 0.0, 100.0), 0);
        assert_eq!(fill_extent(200, 5, 50.0, 0.0), 0);
        assert_eq!(fill_extent(8, 5, 50.0, 100.0), 0);
        assert_eq!(fill_extent(200, 5, 500.0, 100.0), 190);
    }

    #[test]
    fn test_zero_progress_after_layout() {
        let mut s = constructed();
        s.on_layout_measured(200, 40);
        s.set_progress(0.0);
        assert_eq!(s.progress_extent(), 0);
    }

    #[test]
    fn test_half_progress_after_layout() {
        let mut s = constructed();
        s.on_layout_measured(200, 40);
        s.set_progress(50.0);
        assert_eq!(s.progress_extent(), 95);
        assert_eq!(s.fill_sizes(), Some((PxSize::new(95, 30), PxSize::new(0, 30))));
    }

    #[test]
    fn test_values_before_layout_are_replayed() {
        let mut early = constructed();
        early.set_progress(30.0);
        early.set_secondary_progress(60.0);
        assert_eq!(early.progress_extent(), 0);
        assert_eq!(early.phase(), Phase::PendingGeometry);
        early.on_layout_measured(200, 40);

        let mut late = constructed();
        late.on_layout_measured(200, 40);
        late.set_progress(30.0);
        late.set_secondary_progress(60.0);

        assert_eq!(early.progress_extent(), late.progress_extent());
        assert_eq!(early.secondary_progress_extent(), late.secondary_progress_extent());
        assert_eq!(early.progress_extent(), 57);
        assert_eq!(early.secondary_progress_extent(), 114);
    }

    #[test]
    fn test_second_layout_only_recomputes() {
        let mut s = constructed();
        s.set_progress(40.0);
        s.on_layout_measured(200, 40);
        let before = (s.track(), s.progress_extent(), s.secondary_progress_extent());
        s.on_layout_measured(200, 40);
        assert_eq!(
            (s.track(), s.progress_extent(), s.secondary_progress_extent()),
            before
        );
    }

    #[test]
    fn test_geometry_is_latched() {
        let mut s = constructed();
        s.on_layout_measured(200, 40);
        s.on_layout_measured(400, 80);
        assert_eq!(s.track(), Some(PxSize::new(200, 40)));
        s.set_progress(50.0);
        assert_eq!(s.progress_extent(), 95);
    }

    #[test]
    fn test_zero_cross_axis_uses_default_thickness() {
        let mut h = constructed();
        h.on_layout_measured(200, 0);
        assert_eq!(h.track(), Some(PxSize::new(200, 30)));

        let mut v = ProgressBarState::new(Orientation::Vertical);
        v.mark_constructed();
        v.on_layout_measured(0, 120);
        assert_eq!(v.background_width(), 30);
        assert_eq!(v.background_height(), 120);
    }

    #[test]
    fn test_vertical_grows_along_height() {
        let mut v = ProgressBarState::new(Orientation::Vertical);
        v.mark_constructed();
        v.on_layout_measured(40, 200);
        v.set_progress(50.0);
        assert_eq!(v.progress_extent(), 95);
        assert_eq!(v.fill_sizes().map(|f| f.0), Some(PxSize::new(30, 95)));
    }

    #[test]
    fn test_pending_records_pre_construction_calls() {
        let mut s = ProgressBarState::new(Orientation::Horizontal);
        s.set_max(50.0);
        s.set_progress_color(Color::WHITE);
        let p = *s.pending().unwrap();
        assert!(p.maximum_pending());
        assert!(p.colors_pending());
        assert!(!p.progress_pending());
        assert!(!p.background_color_pending());

        s.mark_constructed();
        assert!(s.pending().is_none());

        // Post-construction calls are not recorded anywhere.
        s.set_progress(10.0);
        assert!(s.pending().is_none());
    }

    #[test]
    fn test_construction_reclamps_against_final_max() {
        let mut s = ProgressBarState::new(Orientation::Horizontal);
        s.set_progress(80.0);
        s.set_max(50.0);
        s.mark_constructed();
        assert_eq!(s.progress(), 50.0);
    }

    #[test]
    fn test_construction_keeps_progress_above_default_max() {
        let mut s = ProgressBarState::new(Orientation::Horizontal);
        s.set_progress(150.0);
        s.set_secondary_progress(180.0);
        // Still clamped against the default maximum for now.
        assert_eq!(s.progress(), 100.0);
        s.set_max(200.0);
        s.mark_constructed();
        assert_eq!(s.progress(), 150.0);
        assert_eq!(s.secondary_progress(), 180.0);

        let mut s = ProgressBarState::new(Orientation::Horizontal);
        s.set_max(200.0);
        s.set_progress(150.0);
        s.mark_constructed();
        assert_eq!(s.progress(), 150.0);

        s.on_layout_measured(210, 40);
        assert_eq!(s.progress_extent(), 150);
    }

    #[test]
    fn test_lowering_max_keeps_invariant() {
        let mut s = constructed();
        s.on_layout_measured(200, 40);
        s.set_progress(80.0);
        s.set_secondary_progress(90.0);
        s.set_max(40.0);
        assert_eq!(s.progress(), 40.0);
        assert_eq!(s.secondary_progress(), 40.0);
        assert_eq!(s.progress_extent(), 190);
    }

    #[test]
    fn test_zero_max_yields_empty_fill() {
        let mut s = constructed();
        s.on_layout_measured(200, 40);
        s.set_max(0.0);
        s.set_progress(10.0);
        assert_eq!(s.progress(), 0.0);
        assert_eq!(s.progress_extent(), 0);
        assert_eq!(s.fraction(), 0.0);
    }

    #[test]
    fn test_drawable_radii() {
        let mut s = constructed();
        assert_eq!(s.track_drawable().radius, 10.0);
        assert_eq!(s.progress_drawable().radius, 8.0);

        s.set_background_color(Color::BLACK);
        s.set_progress_colors(Color::WHITE, Color::TRANSPARENT);
        assert_eq!(s.track_drawable(), RoundRect { color: Color::BLACK, radius: 10.0 });
        assert_eq!(
            s.secondary_progress_drawable(),
            RoundRect { color: Color::TRANSPARENT, radius: 8.0 }
        );
    }

    #[test]
    fn test_orientation_fixed_after_construction() {
        let mut s = constructed();
        s.set_orientation(Orientation::Vertical);
        assert_eq!(s.orientation(), Orientation::Horizontal);
    }
}
