use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Level labels the scrapers emit when the posting had no level at all.
const NOISY_LEVELS: &[&str] = &[
    "",
    "nan",
    "none",
    "error",
    "chua cap nhat",
    "chua cap nhat.",
    "chua cap nhat -",
    "chua cap nhat,",
];

/// Removes Vietnamese (and any other) diacritics and collapses whitespace runs.
///
/// Case is preserved; `đ`/`Đ` have no decomposition and pass through unchanged.
pub fn strip_accents(s: &str) -> String {
    let stripped: String = s.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Match key used for filtering: accent-free, lower-case, trimmed.
pub fn norm_text(s: &str) -> String {
    strip_accents(s).to_lowercase().trim().to_string()
}

/// Same as [`norm_text`], but placeholder levels collapse to an empty key.
pub fn norm_level(s: &str) -> String {
    let key = norm_text(s);
    if NOISY_LEVELS.contains(&key.as_str()) {
        String::new()
    } else {
        key
    }
}

/// Normalizes user-selected values, dropping blank ones.
pub fn norm_set<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(AsRef::as_ref)
        .filter(|v| !v.trim().is_empty())
        .map(norm_text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_vietnamese_diacritics() {
        assert_eq!(strip_accents("Hồ Chí Minh"), "Ho Chi Minh");
        assert_eq!(strip_accents("Nhân viên   Kế toán"), "Nhan vien Ke toan");
        assert_eq!(strip_accents("Đà Nẵng"), "Đa Nang");
    }

    #[test]
    fn norm_text_lowercases_and_trims() {
        assert_eq!(norm_text("  Hà Nội "), "ha noi");
        assert_eq!(norm_text(""), "");
    }

    #[test]
    fn noisy_levels_become_empty() {
        assert_eq!(norm_level("Chưa cập nhật"), "");
        assert_eq!(norm_level("nan"), "");
        assert_eq!(norm_level("Chưa cập nhật,"), "");
        assert_eq!(norm_level("Trưởng phòng"), "truong phong");
    }

    #[test]
    fn norm_set_skips_blank_values() {
        let got = norm_set(&["Hà Nội", "  ", "Đà Nẵng"]);
        assert_eq!(got, vec!["ha noi".to_string(), "đa nang".to_string()]);
    }
}
