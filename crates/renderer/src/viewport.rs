/// Pixel rectangle passed to `set_viewport`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Largest rectangle of `target_aspect` (width / height) centered in the surface.
pub fn fit_viewport(width: u32, height: u32, target_aspect: f32) -> Viewport {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;

    if w / h > target_aspect {
        let vw = h * target_aspect;
        Viewport {
            x: (w - vw) * 0.5,
            y: 0.0,
            width: vw,
            height: h,
        }
    } else {
        let vh = w / target_aspect;
        Viewport {
            x: 0.0,
            y: (h - vh) * 0.5,
            width: w,
            height: vh,
        }
    }
}
