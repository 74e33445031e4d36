use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use toml::Value;

use bidforge_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "pipeline.fallback_quantity",
        &config.pipeline.fallback_quantity.to_string(),
        field_source(
            "pipeline.fallback_quantity",
            Some("BIDFORGE_FALLBACK_QUANTITY"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "pipeline.top_k",
        &config.pipeline.top_k.to_string(),
        field_source(
            "pipeline.top_k",
            Some("BIDFORGE_TOP_K"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "pipeline.vocabulary",
        &format!("{} terms", config.pipeline.vocabulary.len()),
        field_source(
            "pipeline.vocabulary",
            None,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "pipeline.keyword_weights",
        &format!("{} entries", config.pipeline.keyword_weights.len()),
        field_source(
            "pipeline.keyword_weights",
            None,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "pipeline.critical_keywords",
        &config.pipeline.critical_keywords.join(","),
        field_source(
            "pipeline.critical_keywords",
            None,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "pipeline.discount_tiers",
        &config
            .pipeline
            .discount_tiers
            .iter()
            .map(|tier| format!("{}+:{}", tier.min_quantity, tier.fraction))
            .collect::<Vec<_>>()
            .join(" "),
        field_source(
            "pipeline.discount_tiers",
            None,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source(
            "logging.level",
            Some("BIDFORGE_LOG_LEVEL"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format).to_lowercase(),
        field_source(
            "logging.format",
            Some("BIDFORGE_LOG_FORMAT"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.join("\n")
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("  {key} = {value}  [{source}]")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("bidforge.toml"), PathBuf::from("config/bidforge.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key: &str,
    env_key: Option<&str>,
    doc: Option<&Value>,
    path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var(env_key).map(|value| !value.trim().is_empty()).unwrap_or(false) {
            return format!("env:{env_key}");
        }
    }

    if let (Some(doc), Some(path)) = (doc, path) {
        if doc_contains_key(doc, key) {
            return format!("file:{}", path.display());
        }
    }

    "default".to_string()
}

fn doc_contains_key(doc: &Value, dotted_key: &str) -> bool {
    let mut current = doc;
    for part in dotted_key.split('.') {
        match current.get(part) {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    #[test]
    fn renders_every_tracked_field_with_a_source() {
        let output = super::run();
        for key in [
            "pipeline.fallback_quantity",
            "pipeline.top_k",
            "pipeline.keyword_weights",
            "pipeline.discount_tiers",
            "logging.level",
            "logging.format",
        ] {
            assert!(output.contains(key), "missing `{key}` in:\n{output}");
        }
    }
}
