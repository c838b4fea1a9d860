//! Map the POSIX locale environment to a Bing market code (`en_US.UTF-8` → `en-US`).

/// Locale variables in lookup order.
const LOCALE_VARS: [&str; 4] = ["LC_ALL", "LC_CTYPE", "LANG", "LANGUAGE"];

/// Market code for one locale string, or `None` for `C`, `POSIX` and empty values.
pub fn region_from_locale(value: &str) -> Option<String> {
    let first = value.split(':').next().unwrap_or("");
    let name = first
        .split(['.', '@'])
        .next()
        .unwrap_or("")
        .trim();
    if name.is_empty() || name == "C" || name == "POSIX" {
        return None;
    }
    Some(name.replace('_', "-"))
}

/// Region from an environment lookup; first variable that maps to a region wins.
pub fn detect_region_with<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    LOCALE_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .filter(|v| !v.is_empty())
        .find_map(|v| region_from_locale(&v))
}

/// Region from the process environment, or `fallback` (logged) when none maps.
pub fn detect_region(fallback: &str) -> String {
    match detect_region_with(|var| std::env::var(var).ok()) {
        Some(region) => {
            tracing::debug!(region = region.as_str(), "detected region from locale");
            region
        }
        None => {
            tracing::warn!(
                fallback,
                "could not derive a region from LC_ALL/LC_CTYPE/LANG/LANGUAGE, using fallback"
            );
            fallback.to_string()
        }
    }
}

/// Split a comma-separated region list, dropping blanks.
pub fn parse_region_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn locale_to_region() {
        assert_eq!(region_from_locale("en_US.UTF-8").as_deref(), Some("en-US"));
        assert_eq!(region_from_locale("de_DE@euro").as_deref(), Some("de-DE"));
        assert_eq!(region_from_locale("ja_JP").as_deref(), Some("ja-JP"));
        assert_eq!(region_from_locale("fr_FR:en_US").as_deref(), Some("fr-FR"));
    }

    #[test]
    fn c_and_posix_are_not_regions() {
        assert_eq!(region_from_locale("C"), None);
        assert_eq!(region_from_locale("C.UTF-8"), None);
        assert_eq!(region_from_locale("POSIX"), None);
        assert_eq!(region_from_locale(""), None);
    }

    #[test]
    fn lookup_order() {
        let lookup = env(&[("LANG", "en_GB.UTF-8"), ("LC_ALL", "pt_BR.UTF-8")]);
        assert_eq!(detect_region_with(lookup).as_deref(), Some("pt-BR"));
    }

    #[test]
    fn skips_c_locale_to_next_var() {
        let lookup = env(&[("LC_ALL", "C"), ("LANG", "es_ES.UTF-8")]);
        assert_eq!(detect_region_with(lookup).as_deref(), Some("es-ES"));
    }

    #[test]
    fn nothing_set() {
        assert_eq!(detect_region_with(env(&[])), None);
    }

    #[test]
    fn region_list() {
        assert_eq!(
            parse_region_list("en-US, en-GB,,en-CA "),
            vec!["en-US", "en-GB", "en-CA"]
        );
        assert!(parse_region_list(" , ").is_empty());
    }
}
