use anyhow::{Context, Result};
use reactive_translator::config::Settings;
use reactive_translator::{Replacements, TranslateOptions, Translations, Translator};
use tracing::info;

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("reactive_translator=info".parse()?),
        )
        .init();

    let settings = Settings::from_env()?;

    let translations = match &settings.translations_file {
        Some(path) => Translations::from_file(path)
            .with_context(|| format!("Failed to load translations from {}", path.display()))?,
        None => Translations::new(),
    };
    info!(
        "Loaded translations for {} languages",
        translations.languages().len()
    );

    let translator = Translator::new(translations, settings.configuration())?;

    // Arguments: keys, each optionally followed by name=value replacements
    let mut requests: Vec<(String, Vec<(String, String)>)> = Vec::new();
    for arg in std::env::args().skip(1) {
        if let Some((name, value)) = arg.split_once('=') {
            let Some((_, replacements)) = requests.last_mut() else {
                anyhow::bail!("Replacement '{}' given before any key", arg);
            };
            replacements.push((name.to_string(), value.to_string()));
        } else {
            requests.push((arg, Vec::new()));
        }
    }

    if requests.is_empty() {
        anyhow::bail!("Usage: translate <key> [name=value ...] [<key> ...]");
    }

    for (key, replacements) in requests {
        let options = TranslateOptions::new().with_replace(Replacements::named(replacements));
        println!("{} = {}", key, translator.get_with(&key, &options));
    }

    let report = translator.metrics().report();
    info!(
        "Resolved {} keys ({} via fallback, {} missing)",
        report.hits + report.fallback_hits + report.misses,
        report.fallback_hits,
        report.misses
    );

    Ok(())
}
