//! # Composition locals
//!
//! Thread‑local values that apply to everything built inside a closure.
//! Only `Density` lives here today: widgets convert dp to px through it, so a
//! host can build the same tree for different screens:
//!
//! ```rust
//! use roundbar_core::*;
//!
//! assert_eq!(dp_to_px(5.0), 5.0);
//! with_density(Density { scale: 3.0 }, || {
//!     assert_eq!(dp_to_px(5.0), 15.0);
//! });
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

/// density‑independent pixels (dp)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dp(pub f32);

impl Dp {
    /// Converts this dp value into physical pixels using the current Density.
    pub fn to_px(self) -> f32 {
        self.0 * density().scale
    }

    /// Whole pixels, truncated toward zero.
    pub fn to_px_int(self) -> i32 {
        self.to_px() as i32
    }

    /// Whole pixels, rounded to nearest.
    pub fn to_px_round(self) -> i32 {
        self.to_px().round() as i32
    }
}

/// Convenience: convert a raw dp scalar into px using current Density.
pub fn dp_to_px(dp: f32) -> f32 {
    Dp(dp).to_px()
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        } else {
            // no frame: create a temporary one
            let mut m = HashMap::new();
            m.insert(t, v);
            st.borrow_mut().push(m);
        }
    });
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density {
    pub scale: f32, // dp→px multiplier
}
impl Default for Density {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Density {
    /// Baseline screen density; `dpi / 160` is the dp→px multiplier.
    pub const BASELINE_DPI: f32 = 160.0;

    /// Fractional scale, so 240 dpi gives 1.5. Toolkits that divide whole
    /// dpi buckets (`240 / 160 == 1`) produce smaller pixels on such screens.
    pub fn from_dpi(dpi: f32) -> Self {
        Self {
            scale: dpi / Self::BASELINE_DPI,
        }
    }
}

pub fn with_density<R>(density: Density, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<Density>(), Box::new(density));
        f()
    })
}

pub fn density() -> Density {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<Density>())
                && let Some(d) = v.downcast_ref::<Density>()
            {
                return *d;
            }
        }
        Density::default()
    })
}
