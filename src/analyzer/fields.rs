use crate::normalizer::strip_accents;

/// Records listing more fields than this only count toward the first ones.
pub const MAX_FIELDS_PER_RECORD: usize = 5;

const PLACEHOLDER: &str = "nan";

/// Splits a free-text job-fields cell into at most five normalized field tokens.
///
/// `;`, `|` and `/` act like `,`, and every segment is further split on `" - "`.
/// Tokens keep their order of appearance. Case folding runs again after accent
/// stripping because compatibility decomposition can yield capitals (`™` -> `TM`).
pub fn split_fields(raw: Option<&str>) -> Vec<String> {
    let lowered = raw.unwrap_or("").to_lowercase().replace([';', '|', '/'], ",");

    lowered
        .split(',')
        .flat_map(|segment| segment.split(" - "))
        .map(|piece| strip_accents(piece.trim()).to_lowercase())
        .filter(|token| !token.is_empty() && token != PLACEHOLDER)
        .take(MAX_FIELDS_PER_RECORD)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_every_separator() {
        assert_eq!(
            split_fields(Some("IT, Marketing; Sales/HR - Remote")),
            vec!["it", "marketing", "sales", "hr", "remote"]
        );
    }

    #[test]
    fn missing_input_yields_nothing() {
        assert!(split_fields(None).is_empty());
        assert!(split_fields(Some("")).is_empty());
        assert!(split_fields(Some(" , ; nan | NaN ")).is_empty());
    }

    #[test]
    fn keeps_only_first_five() {
        let got = split_fields(Some("a,b,c,d,e,f,g"));
        assert_eq!(got, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn hyphen_without_spaces_is_not_a_separator() {
        assert_eq!(split_fields(Some("e-commerce - Logistics")), vec!["e-commerce", "logistics"]);
    }

    #[test]
    fn strips_accents_from_tokens() {
        assert_eq!(
            split_fields(Some("Kế toán / Kiểm toán|Ngân hàng")),
            vec!["ke toan", "kiem toan", "ngan hang"]
        );
    }

    #[test]
    fn compatibility_characters_fold_to_lower_case() {
        let got = split_fields(Some("Brand™, Ｈｒ, ℌealth, brandtm"));
        assert_eq!(got, vec!["brandtm", "hr", "health", "brandtm"]);
        assert!(got.iter().all(|t| t.chars().all(|c| !c.is_uppercase())));
    }
}
