use taffy::prelude::{length, percent};
use taffy::style::Style;

use crate::{Size, dp_to_px};

/// Sizing of a widget's outer box, in dp.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Modifier {
    pub size: Option<Size>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill_max_w: bool,
    pub fill_max_h: bool,
    pub min_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Size {
            width: w,
            height: h,
        });
        self
    }
    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }
    pub fn height(mut self, h: f32) -> Self {
        self.height = Some(h);
        self
    }
    pub fn fill_max_size(mut self) -> Self {
        self.fill_max_w = true;
        self.fill_max_h = true;
        self
    }
    pub fn fill_max_width(mut self) -> Self {
        self.fill_max_w = true;
        self
    }
    pub fn fill_max_height(mut self) -> Self {
        self.fill_max_h = true;
        self
    }
    pub fn min_size(mut self, w: f32, h: f32) -> Self {
        self.min_width = Some(w);
        self.min_height = Some(h);
        self
    }
    pub fn max_size(mut self, w: f32, h: f32) -> Self {
        self.max_width = Some(w);
        self.max_height = Some(h);
        self
    }

    /// Taffy style for this box as a child of a column container.
    ///
    /// Explicit sizes win over fill; fill is tight (min == max == 100%) so the
    /// box never grows past its parent.
    pub fn to_style(&self) -> Style {
        let px = |dp: f32| dp_to_px(dp.max(0.0));
        let mut s = Style {
            flex_shrink: 0.0,
            ..Style::default()
        };

        let mut width_set = false;
        let mut height_set = false;
        if let Some(sz) = self.size {
            if sz.width.is_finite() {
                s.size.width = length(px(sz.width));
                width_set = true;
            }
            if sz.height.is_finite() {
                s.size.height = length(px(sz.height));
                height_set = true;
            }
        }
        if let Some(w) = self.width {
            s.size.width = length(px(w));
            width_set = true;
        }
        if let Some(h) = self.height {
            s.size.height = length(px(h));
            height_set = true;
        }

        if self.fill_max_w && !width_set {
            s.min_size.width = percent(1.0);
            s.max_size.width = percent(1.0);
        }
        if self.fill_max_h && !height_set {
            s.min_size.height = percent(1.0);
            s.max_size.height = percent(1.0);
        }

        if let Some(v) = self.min_width {
            s.min_size.width = length(px(v));
        }
        if let Some(v) = self.min_height {
            s.min_size.height = length(px(v));
        }
        if let Some(v) = self.max_width {
            s.max_size.width = length(px(v));
        }
        if let Some(v) = self.max_height {
            s.max_size.height = length(px(v));
        }

        s
    }
}
