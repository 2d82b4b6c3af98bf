use honyaku_config::FontRange;

/// Shorter text renders larger: one point less per ten characters,
/// bounded by `range`. Empty text gets the largest size.
pub fn auto_font_size(text: &str, range: FontRange) -> u32 {
    let (min, max) = (range.min.min(range.max), range.min.max(range.max));

    let length = text.chars().count();
    if length == 0 {
        return max;
    }

    let size = (max as f64 - length as f64 / 10.0).trunc();
    size.clamp(min as f64, max as f64) as u32
}
