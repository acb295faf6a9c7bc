use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::debug;

use super::collapse_whitespace;
use crate::domain::JobRecord;

static LD_JSON: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[type*="ld+json"]"#).expect("static selector"));

/// Every schema.org JobPosting found in the document's JSON-LD blocks.
pub fn job_postings(document: &Html) -> Vec<JobRecord> {
    let mut jobs = Vec::new();
    for script in document.select(&LD_JSON) {
        let raw = script.text().collect::<String>();
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => collect_jobs(&value, &mut jobs),
            Err(err) => {
                debug!(target: "extract", error = %err, "skipping malformed JSON-LD block");
            }
        }
    }
    jobs
}

fn collect_jobs(value: &Value, jobs: &mut Vec<JobRecord>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect_jobs(item, jobs)),
        Value::Object(node) => {
            if is_job_posting(node) {
                jobs.push(job_record(node));
            }
            if let Some(graph) = node.get("@graph") {
                collect_jobs(graph, jobs);
            }
        }
        _ => {}
    }
}

fn is_job_posting(node: &Map<String, Value>) -> bool {
    let kind = node.get("@type").or_else(|| node.get("type"));
    match kind {
        Some(Value::String(name)) => name.eq_ignore_ascii_case("jobposting"),
        Some(Value::Array(names)) => names
            .iter()
            .filter_map(Value::as_str)
            .any(|name| name.eq_ignore_ascii_case("jobposting")),
        _ => false,
    }
}

fn job_record(node: &Map<String, Value>) -> JobRecord {
    let title = string_field(node, "title")
        .or_else(|| string_field(node, "name"))
        .unwrap_or_default();
    let description = string_field(node, "description")
        .map(|html| strip_markup(&html))
        .unwrap_or_default();

    let mut locations = Vec::new();
    match node.get("jobLocation") {
        Some(Value::Array(places)) => locations.extend(places.iter().filter_map(place_text)),
        Some(place) => locations.extend(place_text(place)),
        None => {}
    }
    match node.get("applicantLocationRequirements") {
        Some(Value::Array(reqs)) => locations.extend(reqs.iter().filter_map(named_text)),
        Some(req) => locations.extend(named_text(req)),
        None => {}
    }
    if let Some(kind) = string_field(node, "jobLocationType") {
        locations.push(kind);
    }

    JobRecord {
        title: collapse_whitespace(&title),
        description,
        locations: locations
            .into_iter()
            .filter(|loc| !loc.is_empty())
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

fn place_text(place: &Value) -> Option<String> {
    let address = place.get("address")?;
    if let Some(text) = address.as_str() {
        return Some(collapse_whitespace(text));
    }
    let parts: Vec<String> = ["addressLocality", "addressRegion", "addressCountry"]
        .iter()
        .filter_map(|key| address.get(key).and_then(named_text))
        .collect();
    Some(parts.join(" "))
}

/// Plain strings, or objects such as `{"@type": "Country", "name": "US"}`.
fn named_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(collapse_whitespace(text)),
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .map(collapse_whitespace),
        _ => None,
    }
}

fn string_field(node: &Map<String, Value>, key: &str) -> Option<String> {
    node.get(key).and_then(Value::as_str).map(str::to_string)
}

fn strip_markup(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    collapse_whitespace(&fragment.root_element().text().collect::<Vec<_>>().join(" "))
}
