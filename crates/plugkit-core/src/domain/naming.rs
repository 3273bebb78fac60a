//! Case conversion for identifiers derived from a project name.
//!
//! Every conversion goes through [`split_words`], so `sample-plugin`,
//! `sample_plugin`, `samplePlugin` and `Sample Plugin` all derive the same
//! identifiers. The identifier forms (snake, SCREAMING, Pascal) go through
//! [`identifier_words`] as well and are always valid PHP identifiers.

/// Leading word for names whose first character is a digit.
pub const DIGIT_LEAD: &str = "plugin";

/// Convert a string to a snake_case identifier (`sample_plugin`).
pub fn to_snake_case(s: &str) -> String {
    identifier_words(s).join("_")
}

/// Convert a string to SCREAMING_SNAKE_CASE (`SAMPLE_PLUGIN`).
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Convert a string to a PascalCase identifier.
///
/// | Input | Output |
/// |-------|--------|
/// | "sample-plugin" | "SamplePlugin" |
/// | "HTTPClient" | "HttpClient" |
/// | "2fa-login" | "Plugin2faLogin" |
pub fn to_pascal_case(s: &str) -> String {
    identifier_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to space-separated Title Case (`Sample Plugin`).
pub fn to_title_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Words that can be joined into an identifier: ASCII letters and digits
/// only, and never starting with a digit ([`DIGIT_LEAD`] is prepended).
/// Empty when the name has no ASCII letter or digit.
pub fn identifier_words(s: &str) -> Vec<String> {
    let mut words: Vec<String> = split_words(s)
        .into_iter()
        .map(|w| w.chars().filter(char::is_ascii_alphanumeric).collect::<String>())
        .filter(|w| !w.is_empty())
        .collect();

    if words
        .first()
        .is_some_and(|w| w.starts_with(|c: char| c.is_ascii_digit()))
    {
        words.insert(0, DIGIT_LEAD.to_string());
    }
    words
}

/// Split a string into lowercase words.
///
/// Boundaries:
///
/// 1. **Separators:** `_`, `-`, `.` and whitespace always split
/// 2. **camelCase:** `aB` splits between `a` and `B`
/// 3. **Acronyms:** `HTTPServer` splits between `P` and `S`
///    (detected by `Upper Upper Lower`)
/// 4. **Digits:** stay attached to the word they follow (`plugin2go` is one word)
pub fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        // Anything else that can't appear in an identifier is dropped.
        if !c.is_alphanumeric() {
            continue;
        }

        if let Some(&next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_separators_and_case() {
        assert_eq!(split_words("sample-plugin"), vec!["sample", "plugin"]);
        assert_eq!(split_words("sample_plugin"), vec!["sample", "plugin"]);
        assert_eq!(split_words("samplePlugin"), vec!["sample", "plugin"]);
        assert_eq!(split_words("  Sample   Plugin "), vec!["sample", "plugin"]);
        assert_eq!(split_words("HTTPServer"), vec!["http", "server"]);
    }

    #[test]
    fn drops_non_identifier_characters() {
        assert_eq!(split_words("my@plugin!"), vec!["myplugin"]);
        assert_eq!(split_words("acme.tools"), vec!["acme", "tools"]);
    }

    #[test]
    fn derives_all_cases_from_one_name() {
        let name = "sample-plugin";
        assert_eq!(to_snake_case(name), "sample_plugin");
        assert_eq!(to_screaming_snake_case(name), "SAMPLE_PLUGIN");
        assert_eq!(to_pascal_case(name), "SamplePlugin");
        assert_eq!(to_title_case(name), "Sample Plugin");
    }

    #[test]
    fn acronyms_are_normalized() {
        assert_eq!(to_pascal_case("SEOTools"), "SeoTools");
        assert_eq!(to_snake_case("SEOTools"), "seo_tools");
    }

    #[test]
    fn digits_stay_in_word() {
        assert_eq!(to_snake_case("plugin2go"), "plugin2go");
        assert_eq!(to_pascal_case("v2-forms"), "V2Forms");
    }

    #[test]
    fn leading_digit_gets_a_word_in_front() {
        assert_eq!(identifier_words("2fa-login"), vec!["plugin", "2fa", "login"]);
        assert_eq!(to_pascal_case("2fa-login"), "Plugin2faLogin");
        assert_eq!(to_snake_case("2fa-login"), "plugin_2fa_login");
        assert_eq!(to_screaming_snake_case("2fa-login"), "PLUGIN_2FA_LOGIN");
        // Display names keep the name as written.
        assert_eq!(to_title_case("2fa-login"), "2fa Login");
    }

    #[test]
    fn identifiers_drop_non_ascii_letters() {
        assert_eq!(to_pascal_case("café-tools"), "CafTools");
        assert_eq!(to_snake_case("café-tools"), "caf_tools");
        assert_eq!(to_title_case("café-tools"), "Café Tools");
        assert!(identifier_words("日本").is_empty());
        assert_eq!(to_snake_case("über-2"), "ber_2");
        assert_eq!(to_snake_case("é-2x"), "plugin_2x");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(split_words("").is_empty());
        assert_eq!(to_pascal_case("---"), "");
    }
}
