use plotters::style::RGBColor;

/// Base colors for category segments, in assignment order
pub const BASE_PALETTE: [RGBColor; 10] = [
    RGBColor(0x2E, 0x7D, 0x32), // forest green
    RGBColor(0x19, 0x76, 0xD2), // royal blue
    RGBColor(0xFF, 0xC1, 0x07), // amber
    RGBColor(0x9C, 0x27, 0xB0), // purple
    RGBColor(0xE9, 0x1E, 0x63), // pink
    RGBColor(0xFF, 0x57, 0x22), // deep orange
    RGBColor(0x00, 0xBC, 0xD4), // cyan
    RGBColor(0x3F, 0x51, 0xB5), // indigo
    RGBColor(0x00, 0x96, 0x88), // teal
    RGBColor(0x8B, 0xC3, 0x4A), // light green
];

/// One color per category.
///
/// Up to ten categories get the base colors as-is. Past that the base palette
/// is cycled, and the k-th cycle after the first is lightened by `10 * k` percent.
pub fn palette_for(count: usize) -> Vec<RGBColor> {
    (0..count)
        .map(|i| {
            let base = BASE_PALETTE[i % BASE_PALETTE.len()];
            match i / BASE_PALETTE.len() {
                0 => base,
                cycle => lighten(base, 10 * cycle as u32),
            }
        })
        .collect()
}

/// Raise every channel by `percent` of full scale, clamped to 255
pub fn lighten(color: RGBColor, percent: u32) -> RGBColor {
    let step = 255 * percent / 100;
    let channel = |c: u8| (c as u32 + step).min(255) as u8;
    RGBColor(channel(color.0), channel(color.1), channel(color.2))
}
