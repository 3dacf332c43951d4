//! Locale resolution and message catalogs.
//!
//! Catalogs are the JSON files under `locales/`, embedded at build time. Keys
//! are dotted paths into the catalog (`unsubscribe.errors.EXPIRED`), optionally
//! relative to a namespace. Lookups fall back to the default locale and then to
//! the key itself.

use include_dir::{include_dir, Dir};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

static LOCALES_DIR: Dir = include_dir!("locales");

pub const DEFAULT_LOCALE: &str = "en";
pub const SUPPORTED_LOCALES: &[&str] = &["en", "es-ES"];

static CATALOGS: Lazy<HashMap<&'static str, Value>> = Lazy::new(|| {
    let mut catalogs = HashMap::new();
    for locale in SUPPORTED_LOCALES {
        let file_name = format!("{}.json", locale);
        let Some(content) = LOCALES_DIR
            .get_file(&file_name)
            .and_then(|file| file.contents_utf8())
        else {
            warn!("Missing message catalog for locale {}", locale);
            continue;
        };
        match serde_json::from_str(content) {
            Ok(catalog) => {
                catalogs.insert(*locale, catalog);
            }
            Err(e) => warn!("Invalid message catalog {}: {}", file_name, e),
        }
    }
    catalogs
});

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w+)\}").expect("Invalid regex pattern for placeholders"));

/// Map a stored or requested locale onto a supported one.
///
/// Exact matches win, then a match on the language part (`es`, `es-MX` both
/// give `es-ES`); anything else is the default locale.
pub fn resolve_locale(preferred: Option<&str>) -> &'static str {
    preferred.and_then(match_locale).unwrap_or(DEFAULT_LOCALE)
}

fn match_locale(tag: &str) -> Option<&'static str> {
    let tag = tag.trim();
    if tag.is_empty() {
        return None;
    }

    let exact = SUPPORTED_LOCALES
        .iter()
        .find(|supported| supported.eq_ignore_ascii_case(tag));
    if exact.is_some() {
        return exact.copied();
    }

    let language = tag
        .split(['-', '_'])
        .next()
        .unwrap_or(tag)
        .to_ascii_lowercase();
    SUPPORTED_LOCALES
        .iter()
        .find(|supported| supported.split('-').next() == Some(language.as_str()))
        .copied()
}

/// Pick a supported locale from an `Accept-Language` header, honouring
/// q-weights. `None` when the header names no supported language.
pub fn locale_from_accept_language(header: &str) -> Option<&'static str> {
    let mut candidates: Vec<(&str, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.trim().split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let weight = pieces
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            Some((tag, weight))
        })
        .collect();
    // Stable sort keeps header order among equal weights
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

    candidates
        .into_iter()
        .find_map(|(tag, _weight)| match_locale(tag))
}

/// Replace `{name}` placeholders with values from `args`. Placeholders without
/// a value are left as they are.
pub fn interpolate(template: &str, args: &HashMap<&str, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match args.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn lookup<'a>(catalog: &'a Value, key: &str) -> Option<&'a str> {
    key.split('.')
        .try_fold(catalog, |node, part| node.get(part))
        .and_then(Value::as_str)
}

#[derive(Clone, Debug)]
pub struct Translator {
    locale: &'static str,
    namespace: Option<String>,
}

impl Translator {
    pub fn new(locale: &str, namespace: Option<&str>) -> Self {
        Self {
            locale: resolve_locale(Some(locale)),
            namespace: namespace.map(str::to_string),
        }
    }

    /// Translator for a user's stored language preference.
    pub fn for_language(language: Option<&str>, namespace: Option<&str>) -> Self {
        Self {
            locale: resolve_locale(language),
            namespace: namespace.map(str::to_string),
        }
    }

    pub fn t(&self, key: &str) -> String {
        let full_key = match &self.namespace {
            Some(ns) => format!("{}.{}", ns, key),
            None => key.to_string(),
        };

        [self.locale, DEFAULT_LOCALE]
            .iter()
            .filter_map(|locale| CATALOGS.get(locale))
            .find_map(|catalog| lookup(catalog, &full_key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    pub fn t_with(&self, key: &str, args: &HashMap<&str, String>) -> String {
        interpolate(&self.t(key), args)
    }
}
