//! Model/trim/generation/year normalization for listing titles.
//!
//! Primary path: one classification call with a fixed instruction prompt.
//! Fallback path (service unavailable, rate-limited, or unparseable):
//! ordered deterministic matching against a fixed trim vocabulary.
//!
//! The vocabulary is ordered most-specific-first and the first match wins:
//! "GT3 RS" contains "GT3" as a substring, so the combined pattern must be
//! tried (and must win) before the plain one. Generation falls back to a
//! per-model year table when the title does not state a chassis code.

use regex::Regex;

use crate::client::{parse_json_payload, ClassifierClient};
use crate::error::NormalizeError;
use crate::types::ModelTrim;

const INSTRUCTION: &str = "You classify vehicle auction listing titles. \
Return a JSON object with keys model, trim, generation, year. Use null for \
anything the title does not state. Respond with JSON only.";

/// Model families this pipeline does not track; titles naming them resolve
/// all-null so the caller can discard the listing.
const DENYLIST: [&str; 4] = ["cayenne", "macan", "panamera", "taycan"];

/// `(pattern fragment, canonical model)` — most specific first, so
/// "Carrera GT" is recognized as a model before "Carrera" could be read as
/// a trim of the 911.
const MODELS: [(&str, &str); 7] = [
    ("carrera gt", "Carrera GT"),
    ("918", "918 Spyder"),
    ("959", "959"),
    ("911", "911"),
    ("boxster", "Boxster"),
    ("cayman", "Cayman"),
    ("718", "718"),
];

/// Trim vocabulary, most-specific-first. First match wins.
const TRIMS: [&str; 23] = [
    "GT3 RS",
    "GT2 RS",
    "GT4 RS",
    "GT3 Touring",
    "GT3 Cup",
    "GT3",
    "GT2",
    "GT4",
    "Turbo S",
    "Turbo",
    "GTS 4.0",
    "Carrera 4S",
    "Carrera 4",
    "Carrera S",
    "Carrera T",
    "Carrera",
    "Targa 4S",
    "Targa 4",
    "Targa",
    "GTS",
    "Speedster",
    "Spyder RS",
    "Spyder",
];

/// Normalize a title via the classification service, falling back to
/// [`fallback_model_trim`] on any service failure. Never errors: degraded
/// output beats a dropped record.
pub async fn normalize_model_trim(client: Option<&ClassifierClient>, title: &str) -> ModelTrim {
    if let Some(client) = client {
        match classify(client, title).await {
            Ok(result) => return result,
            Err(err) => {
                tracing::warn!(error = %err, title, "classifier unavailable, using deterministic fallback");
            }
        }
    }
    fallback_model_trim(title)
}

async fn classify(client: &ClassifierClient, title: &str) -> Result<ModelTrim, NormalizeError> {
    let content = client.complete(INSTRUCTION, title).await?;
    let value = parse_json_payload(&content).ok_or(NormalizeError::EmptyResponse)?;

    let field = |key: &str| {
        value
            .get(key)
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    };
    let year = value
        .get("year")
        .and_then(serde_json::Value::as_i64)
        .and_then(|y| i32::try_from(y).ok())
        .filter(|y| (1950..=2100).contains(y));

    Ok(ModelTrim {
        model: field("model"),
        trim: field("trim"),
        generation: field("generation"),
        year,
    })
}

/// Deterministic normalization: ordered vocabulary matching only, no
/// guessing beyond the tables below.
#[must_use]
pub fn fallback_model_trim(title: &str) -> ModelTrim {
    let lower = title.to_lowercase();
    if DENYLIST.iter().any(|family| lower.contains(family)) {
        return ModelTrim::none();
    }

    let model = detect_model(&lower);
    let year = extract_year(title);

    // Halo models carry no trim ladder; "Carrera GT" must not yield
    // trim "Carrera".
    let trim = match model {
        Some("911" | "Boxster" | "Cayman" | "718") => detect_trim(title),
        _ => None,
    };

    let generation = explicit_generation(title)
        .or_else(|| model.and_then(|m| year.and_then(|y| generation_for(m, y))));

    ModelTrim {
        model: model.map(ToString::to_string),
        trim,
        generation,
        year,
    }
}

fn detect_model(lower_title: &str) -> Option<&'static str> {
    MODELS.iter().find_map(|(fragment, canonical)| {
        let pattern = format!(r"\b{}\b", regex::escape(fragment));
        Regex::new(&pattern)
            .expect("valid regex")
            .is_match(lower_title)
            .then_some(*canonical)
    })
}

fn detect_trim(title: &str) -> Option<String> {
    TRIMS.iter().find_map(|trim| {
        // Allow "GT3-RS" and arbitrary spacing between the words.
        let fragment = regex::escape(trim).replace(' ', r"[\s-]+");
        let pattern = format!(r"(?i)\b{fragment}\b");
        Regex::new(&pattern)
            .expect("valid regex")
            .is_match(title)
            .then(|| (*trim).to_string())
    })
}

fn extract_year(title: &str) -> Option<i32> {
    let year_re = Regex::new(r"\b(19[5-9]\d|20[0-2]\d)\b").expect("valid regex");
    year_re
        .find(title)
        .and_then(|m| m.as_str().parse::<i32>().ok())
}

/// Chassis code stated outright in the title, e.g. `"991.2 GT3"`.
fn explicit_generation(title: &str) -> Option<String> {
    let gen_re = Regex::new(r"\b(964|993|996|997|991(?:\.[12])?|992(?:\.[12])?|986|987|981|982)\b")
        .expect("valid regex");
    gen_re.find(title).map(|m| m.as_str().to_string())
}

/// Per-model generation-by-year tables.
fn generation_for(model: &str, year: i32) -> Option<String> {
    let generation = match model {
        "911" => match year {
            1964..=1988 => "Classic",
            1989..=1994 => "964",
            1995..=1998 => "993",
            1999..=2004 => "996",
            2005..=2011 => "997",
            2012..=2018 => "991",
            2019..=2029 => "992",
            _ => return None,
        },
        "Boxster" => match year {
            1997..=2004 => "986",
            2005..=2012 => "987",
            2013..=2016 => "981",
            2017..=2029 => "982",
            _ => return None,
        },
        "Cayman" => match year {
            2006..=2012 => "987",
            2013..=2016 => "981",
            2017..=2029 => "982",
            _ => return None,
        },
        "718" => match year {
            2017..=2029 => "982",
            _ => return None,
        },
        _ => return None,
    };
    Some(generation.to_string())
}

#[cfg(test)]
#[path = "model_trim_test.rs"]
mod model_trim_test;
