//! Filesystem-safe folder names for job folders.

use unicode_normalization::UnicodeNormalization;

/// Maximum length of a sanitized slug.
pub const SLUG_MAX_LEN: usize = 60;

/// Characters of the title considered before sanitizing.
const TITLE_PREFIX_CHARS: usize = 40;

/// Reduces a job title to `[A-Za-z0-9_]`, at most 60 characters.
///
/// Accents are folded by NFKD decomposition; anything that is still not
/// ASCII afterwards is dropped. Whitespace runs become a single `_`.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .nfkd()
        .filter(|c| c.is_ascii())
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_ascii_whitespace())
        .collect();

    let mut slug = kept.split_whitespace().collect::<Vec<_>>().join("_");
    // slug is pure ASCII, so byte truncation is a char boundary
    slug.truncate(SLUG_MAX_LEN);
    slug
}

/// `<slug>_<id>`: the first 40 title characters sanitized, then the job id.
pub fn folder_name(title: &str, job_id: &str) -> String {
    let prefix: String = title.chars().take(TITLE_PREFIX_CHARS).collect();
    let slug = sanitize_title(&prefix);
    let slug = if slug.is_empty() { "job".to_string() } else { slug };
    format!("{slug}_{}", sanitize_id(job_id))
}

// Ids are opaque; keep them from escaping the store root.
fn sanitize_id(job_id: &str) -> String {
    job_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize_strips_punctuation_and_joins_words() {
        assert_eq!(sanitize_title("Senior/Engineer (NZ)!"), "SeniorEngineer_NZ");
    }

    #[test]
    fn test_sanitize_folds_accents() {
        assert_eq!(sanitize_title("Café Manager – Rōtorua"), "Cafe_Manager_Rotorua");
    }

    #[test]
    fn test_sanitize_collapses_and_trims_whitespace() {
        assert_eq!(sanitize_title("  Data \t  Analyst \n"), "Data_Analyst");
    }

    #[test]
    fn test_sanitize_drops_hyphens() {
        assert_eq!(sanitize_title("Full-Stack Dev"), "FullStack_Dev");
    }

    #[test]
    fn test_sanitize_output_charset_and_length() {
        let long = "x".repeat(500);
        let titles = [
            "Senior/Engineer (NZ)!",
            "日本語のタイトル",
            "a b c d e f g h i j k l m n o p q r s t u v w x y z a b c d e f g h",
            "Ünïcödé    ßtraße — Ωmega",
            "",
            "!!!",
            long.as_str(),
        ];
        for title in titles {
            let slug = sanitize_title(title);
            assert!(slug.len() <= SLUG_MAX_LEN, "{slug:?} too long");
            assert!(
                slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "{slug:?} has a forbidden character"
            );
        }
    }

    #[test]
    fn test_folder_name_uses_first_40_chars_and_id() {
        let title = "Principal Platform Reliability Engineer - Observability and Tooling";
        let name = folder_name(title, "81234567");
        assert_eq!(name, "Principal_Platform_Reliability_Engineer_81234567");
    }

    #[test]
    fn test_folder_name_falls_back_when_slug_empty() {
        assert_eq!(folder_name("???", "42"), "job_42");
    }

    #[test]
    fn test_folder_name_cannot_escape_root() {
        assert_eq!(folder_name("Chef", "../../etc"), "Chef_etc");
    }
}
