//! Substitution of rendered values into templates.

use std::ops::Range;
use std::sync::Arc;

/// Substitutes one rendered value into a template.
///
/// Arguments are the template, the match token (e.g. `"1"` or `"name"`) and
/// the rendered replacement. Returns the new template.
pub type Interpolator = Arc<dyn Fn(&str, &str, &str) -> String + Send + Sync>;

/// Built-in interpolator.
///
/// Replaces the first `{{ token }}` occurrence, ignoring whitespace inside
/// the braces. Matching anchors on the narrowest `{{…}}` span, so extra
/// enclosing braces stay in the output (`{{{key}}}` → `{a}`).
pub fn default_interpolator(template: &str, token: &str, replacement: &str) -> String {
    match find_token(template, token) {
        Some(span) => {
            let mut text = String::with_capacity(template.len() - span.len() + replacement.len());
            text.push_str(&template[..span.start]);
            text.push_str(replacement);
            text.push_str(&template[span.end..]);
            text
        }
        None => template.to_string(),
    }
}

/// Byte range of the leftmost `{{ token }}` in `template`
fn find_token(template: &str, token: &str) -> Option<Range<usize>> {
    template
        .match_indices('{')
        .find_map(|(start, _)| {
            let rest = template[start..].strip_prefix("{{")?;
            let rest = rest.trim_start().strip_prefix(token)?;
            let rest = rest.trim_start().strip_prefix("}}")?;
            Some(start..template.len() - rest.len())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_token() {
        assert_eq!(default_interpolator("bar {{key}}", "key", "a"), "bar a");
        assert_eq!(default_interpolator("bar {{1}}", "1", "a"), "bar a");
    }

    #[test]
    fn test_ignores_whitespace_inside_braces() {
        assert_eq!(default_interpolator("bar {{  key      }}", "key", "a"), "bar a");
        assert_eq!(default_interpolator("bar {{ key }}", "key", "a"), "bar a");
    }

    #[test]
    fn test_keeps_extra_outer_braces() {
        assert_eq!(default_interpolator("bar {{{key}}}", "key", "a"), "bar {a}");
    }

    #[test]
    fn test_replaces_first_occurrence_only() {
        assert_eq!(default_interpolator("{{x}} and {{x}}", "x", "1"), "1 and {{x}}");
    }

    #[test]
    fn test_unknown_token_leaves_template() {
        assert_eq!(default_interpolator("bar {{other}}", "key", "a"), "bar {{other}}");
    }

    #[test]
    fn test_token_is_literal_not_pattern() {
        assert_eq!(default_interpolator("{{a.b}} {{axb}}", "a.b", "1"), "1 {{axb}}");
        assert_eq!(default_interpolator("{{axb}}", "a.b", "1"), "{{axb}}");
    }

    #[test]
    fn test_unicode_around_token() {
        assert_eq!(default_interpolator("Grüße {{ name }}!", "name", "Jörg"), "Grüße Jörg!");
        assert_eq!(default_interpolator("{{\u{2003}name\u{2003}}}", "name", "a"), "a");
    }

    #[test]
    fn test_unclosed_braces_are_left_alone() {
        assert_eq!(default_interpolator("{{key} {{key", "key", "a"), "{{key} {{key");
        assert_eq!(default_interpolator("{{key} {{key}}", "key", "a"), "{{key} a");
    }

    #[test]
    fn test_replacement_is_not_expanded() {
        assert_eq!(default_interpolator("{{key}}", "key", "$1 ${x}"), "$1 ${x}");
    }
}
