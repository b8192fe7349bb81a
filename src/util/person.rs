use std::sync::OnceLock;

use regex::Regex;

use super::{resolve_entities, simplify_whitespace};
use crate::feed::Person;

static EMAIL: OnceLock<Regex> = OnceLock::new();
static PARENTHESIZED: OnceLock<Regex> = OnceLock::new();

/// Parses free-form author strings such as `"Jane Doe <jane@example.com>"`
/// or `"jane@example.com (Jane Doe)"`.
///
/// The first e-mail-looking token is extracted (minus any `mailto:` prefix
/// and parentheses); the remainder, whitespace-simplified and unwrapped from
/// surrounding parentheses, becomes the name. Input with neither a name nor
/// an e-mail yields a null person.
pub fn person_from_string(s: &str) -> Person {
    let s = s.trim();
    if s.is_empty() {
        return Person::default();
    }

    let mut rest = resolve_entities(s).into_owned();
    let email_re = EMAIL.get_or_init(|| Regex::new(r"<?([^@\s<]+@[^>\s]+)>?").expect("valid e-mail pattern"));

    let mut email = String::new();
    if let Some(caps) = email_re.captures(&rest) {
        let whole = caps[0].to_string();
        email = caps[1].to_string();
        rest = rest.replace(&whole, "");
    }
    let email = email.replace("mailto:", "").replace(['(', ')'], "");

    let mut name = simplify_whitespace(&rest);
    let paren_re = PARENTHESIZED.get_or_init(|| Regex::new(r"^\(([^)]*)\)$").expect("valid name pattern"));
    if let Some(caps) = paren_re.captures(&name) {
        name = caps[1].to_string();
    }

    if name.is_empty() && email.is_empty() {
        return Person::default();
    }
    Person::new(name, String::new(), email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_angle_bracket_email() {
        let p = person_from_string("Jane Doe <jane@example.com>");
        assert_eq!(p.name, "Jane Doe");
        assert_eq!(p.email, "jane@example.com");
    }

    #[test]
    fn test_email_with_parenthesized_name() {
        let p = person_from_string("jane@example.com (Jane  Doe)");
        assert_eq!(p.name, "Jane Doe");
        assert_eq!(p.email, "jane@example.com");
    }

    #[test]
    fn test_trailing_role_is_kept() {
        let p = person_from_string("Jane Doe (President)");
        assert_eq!(p.name, "Jane Doe (President)");
        assert!(p.email.is_empty());
    }

    #[test]
    fn test_mailto_is_stripped() {
        let p = person_from_string("<mailto:jane@example.com>");
        assert_eq!(p.email, "jane@example.com");
        assert!(p.name.is_empty());
    }

    #[test]
    fn test_empty_is_null() {
        assert!(person_from_string("   ").is_null());
        assert!(!person_from_string("Jane").is_null());
    }
}
