use zoon::*;

pub const SPACING_4: u32 = 4;
pub const SPACING_8: u32 = 8;
pub const SPACING_12: u32 = 12;
pub const ROW_HEIGHT: u32 = 26;
pub const INDENT_PER_LEVEL: u32 = 12;

pub fn surface() -> HSLuv {
    hsluv!(250, 15, 14)
}

pub fn surface_raised() -> HSLuv {
    hsluv!(250, 15, 20)
}

pub fn border() -> HSLuv {
    hsluv!(250, 12, 30)
}

pub fn text() -> HSLuv {
    hsluv!(250, 10, 88)
}

pub fn text_muted() -> HSLuv {
    hsluv!(250, 8, 60)
}

pub fn accent() -> HSLuv {
    hsluv!(250, 80, 60)
}

/// Drop-target highlight behind a hovered folder
pub fn drop_highlight() -> HSLuv {
    hsluv!(250, 70, 35, 60)
}

pub fn danger() -> HSLuv {
    hsluv!(12, 85, 60)
}

pub fn success() -> HSLuv {
    hsluv!(130, 70, 65)
}
