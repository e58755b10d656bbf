//! Key resolution: lookup → fallback → interpolation → placeholder.

use crate::translator::formatter::Formatter;
use crate::translator::interpolator::Interpolator;
use crate::translator::placeholder::Placeholder;
use crate::translator::translations::Translations;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Fully resolved settings for one lookup
pub struct ResolveContext<'a> {
    pub language: &'a str,
    pub fallback_language: Option<&'a str>,
    pub interpolate: bool,
    pub formatter: &'a Formatter,
    pub interpolator: &'a Interpolator,
    pub placeholder: &'a Placeholder,
}

/// Where a resolved string came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Language,
    Fallback,
    Placeholder,
}

/// Result of resolving a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    pub source: Source,
}

/// Resolve `key` against `translations`.
///
/// The fallback language is consulted only on a miss, and only when it
/// differs from the resolution language. Keys that resolve to anything other
/// than a string count as misses.
pub fn translate(
    translations: &Translations,
    key: &str,
    replacements: &Map<String, Value>,
    ctx: &ResolveContext<'_>,
) -> Resolution {
    let found = match translations.template(ctx.language, key) {
        Some(template) => Some((template, Source::Language)),
        None => ctx
            .fallback_language
            .filter(|fallback| *fallback != ctx.language)
            .and_then(|fallback| {
                trace!("Key '{}' missing in '{}', trying '{}'", key, ctx.language, fallback);
                translations.template(fallback, key)
            })
            .map(|template| (template, Source::Fallback)),
    };

    match found {
        Some((template, source)) => {
            let text = if ctx.interpolate {
                interpolate(template, ctx.language, replacements, ctx.formatter, ctx.interpolator)
            } else {
                template.to_string()
            };
            Resolution { text, source }
        }
        None => {
            debug!("No translation for '{}' in '{}'", key, ctx.language);
            Resolution {
                text: (ctx.placeholder)(ctx.language, key, replacements),
                source: Source::Placeholder,
            }
        }
    }
}

/// Thread `template` through every replacement in order.
///
/// Each value is rendered by `formatter` and substituted by `interpolator`;
/// later replacements see the partially substituted template.
pub fn interpolate(
    template: &str,
    language: &str,
    replacements: &Map<String, Value>,
    formatter: &Formatter,
    interpolator: &Interpolator,
) -> String {
    replacements
        .iter()
        .fold(template.to_string(), |text, (token, value)| {
            let rendered = formatter(language, value, replacements);
            interpolator(&text, token, &rendered)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::formatter::default_formatter;
    use crate::translator::interpolator::default_interpolator;
    use crate::translator::placeholder::default_placeholder;
    use crate::translator::replacements::Replacements;
    use serde_json::json;
    use std::sync::Arc;

    struct Strategies {
        formatter: Formatter,
        interpolator: Interpolator,
        placeholder: Placeholder,
    }

    impl Strategies {
        fn new() -> Self {
            Self {
                formatter: Arc::new(default_formatter),
                interpolator: Arc::new(default_interpolator),
                placeholder: Arc::new(default_placeholder),
            }
        }

        fn ctx<'a>(&'a self, language: &'a str, fallback: Option<&'a str>) -> ResolveContext<'a> {
            ResolveContext {
                language,
                fallback_language: fallback,
                interpolate: true,
                formatter: &self.formatter,
                interpolator: &self.interpolator,
                placeholder: &self.placeholder,
            }
        }
    }

    fn translations() -> Translations {
        Translations::from_value(json!({
            "en": { "foo": "baz", "greet": "hi {{1}} and {{2}}", "obj": { "x": "y" } },
            "de": { "foo": "bar", "only_de": "nur" }
        }))
        .unwrap()
    }

    #[test]
    fn test_primary_hit() {
        let strategies = Strategies::new();
        let resolution = translate(&translations(), "foo", &Map::new(), &strategies.ctx("en", None));
        assert_eq!(resolution, Resolution { text: "baz".into(), source: Source::Language });
    }

    #[test]
    fn test_fallback_hit() {
        let strategies = Strategies::new();
        let resolution = translate(&translations(), "foo", &Map::new(), &strategies.ctx("ru", Some("de")));
        assert_eq!(resolution.text, "bar");
        assert_eq!(resolution.source, Source::Fallback);
    }

    #[test]
    fn test_fallback_same_as_language_is_skipped() {
        let strategies = Strategies::new();
        let resolution = translate(&translations(), "only_de", &Map::new(), &strategies.ctx("en", Some("en")));
        assert_eq!(resolution.text, "{ en.only_de }");
        assert_eq!(resolution.source, Source::Placeholder);
    }

    #[test]
    fn test_object_is_a_miss() {
        let strategies = Strategies::new();
        let resolution = translate(&translations(), "obj", &Map::new(), &strategies.ctx("en", None));
        assert_eq!(resolution.text, "{ en.obj }");
    }

    #[test]
    fn test_placeholder_uses_resolution_language() {
        let strategies = Strategies::new();
        let resolution = translate(&translations(), "nope", &Map::new(), &strategies.ctx("ru", Some("de")));
        assert_eq!(resolution.text, "{ ru.nope }");
    }

    #[test]
    fn test_interpolates_in_order() {
        let strategies = Strategies::new();
        let replacements = Replacements::positional(["a", "b"]).to_tokens();
        let resolution = translate(&translations(), "greet", &replacements, &strategies.ctx("en", None));
        assert_eq!(resolution.text, "hi a and b");
    }

    #[test]
    fn test_later_replacements_see_earlier_output() {
        let strategies = Strategies::new();
        let replacements = Replacements::named([("first", "{{second}}"), ("second", "done")]).to_tokens();
        let text = interpolate(
            "{{first}}",
            "en",
            &replacements,
            &strategies.formatter,
            &strategies.interpolator,
        );
        assert_eq!(text, "done");
    }

    #[test]
    fn test_no_interpolation_returns_raw_template() {
        let strategies = Strategies::new();
        let mut ctx = strategies.ctx("en", None);
        ctx.interpolate = false;
        let replacements = Replacements::positional(["a", "b"]).to_tokens();
        let resolution = translate(&translations(), "greet", &replacements, &ctx);
        assert_eq!(resolution.text, "hi {{1}} and {{2}}");
    }
}
