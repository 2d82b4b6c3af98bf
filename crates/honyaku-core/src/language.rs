//! Coarse check that recognized text is in the expected script.
//!
//! Only letters are counted; digits, punctuation and whitespace are
//! ignored. This is a ratio heuristic, not language detection.

use honyaku_types::SourceScript;

/// Share of letters in `text` that belong to `script`, `None` without letters
pub fn script_ratio(text: &str, script: SourceScript) -> Option<f32> {
    let (letters, native) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(letters, native), c| {
            (letters + 1, native + usize::from(script.contains(c)))
        });

    if letters == 0 {
        return None;
    }

    Some(native as f32 / letters as f32)
}

/// Text without any letters is never plausible
pub fn is_plausible(text: &str, script: SourceScript, threshold: f32) -> bool {
    script_ratio(text, script).is_some_and(|ratio| ratio >= threshold)
}
