//! Plural form selection for `|`-separated templates.
//!
//! Selection is locale-independent and follows the vue-i18n convention:
//!
//! | Forms | `0` | `1` | `n > 1` |
//! |-------|-----|-----|---------|
//! | 1     | 0   | 0   | 0       |
//! | 2     | 1   | 0   | 1       |
//! | 3+    | 0   | 1   | 2       |
//!
//! Negative counts select by their absolute value.

/// Returns the index of the form to use for `count` among `forms` forms.
pub fn form_index(forms: usize, count: i64) -> usize {
    let choice = count.unsigned_abs();
    let index = match forms {
        0 | 1 => 0,
        2 => usize::from(choice != 1),
        _ => choice.min(2) as usize,
    };
    index.min(forms.saturating_sub(1))
}
