//! Front-block handling for description files.
//!
//! A description file is a YAML front block fenced by `---` lines, followed
//! by a markdown body. The raw mapping is kept alongside the typed view so
//! merge-updates preserve fields the typed view does not model.

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};

use super::types::Frontmatter;

/// A description file split into its front block and body.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub frontmatter: Mapping,
    pub body: String,
}

/// Split `text` into the raw YAML front block and the body.
///
/// Returns `None` when the text does not start with a `---` fence or the
/// closing fence is missing.
pub fn split_front_block(text: &str) -> Option<(&str, &str)> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let fm_start = first.len();
    let mut offset = fm_start;
    for line in lines {
        if line.trim_end() == "---" {
            let front = &text[fm_start..offset];
            let body = &text[offset + line.len()..];
            return Some((front, body));
        }
        offset += line.len();
    }
    None
}

/// Parse a description file's text into a `Document`.
///
/// Text without a front block yields an empty mapping and the full text as
/// body.
pub fn parse_document(text: &str) -> Result<Document> {
    match split_front_block(text) {
        Some((front, body)) => {
            let frontmatter: Mapping = if front.trim().is_empty() {
                Mapping::new()
            } else {
                serde_yaml::from_str(front).context("Failed to parse front block")?
            };
            Ok(Document {
                frontmatter,
                body: body.to_string(),
            })
        }
        None => Ok(Document {
            frontmatter: Mapping::new(),
            body: text.to_string(),
        }),
    }
}

/// Serialize a front-block mapping and body back into file text.
pub fn stringify_document(frontmatter: &Mapping, body: &str) -> Result<String> {
    if frontmatter.is_empty() {
        return Ok(body.to_string());
    }
    let yaml =
        serde_yaml::to_string(frontmatter).context("Failed to serialize front block")?;
    Ok(format!("---\n{}---\n{}", yaml, body))
}

/// Apply updates to a front-block mapping.
///
/// Array-valued fields are unioned with existing values and deduplicated;
/// all other values replace the existing one.
pub fn merge_updates(
    mapping: &mut Mapping,
    updates: impl IntoIterator<Item = (String, Value)>,
) {
    for (key, value) in updates {
        let key = Value::String(key);
        let merged = match (mapping.get(&key).cloned(), value) {
            (Some(Value::Sequence(mut existing)), Value::Sequence(additions)) => {
                for item in additions {
                    if !existing.contains(&item) {
                        existing.push(item);
                    }
                }
                Value::Sequence(existing)
            }
            (_, value) => value,
        };
        mapping.insert(key, merged);
    }
}

/// Build the typed frontmatter view from a raw mapping.
pub fn typed_frontmatter(mapping: &Mapping) -> Result<Frontmatter> {
    serde_yaml::from_value(Value::Mapping(mapping.clone()))
        .context("Failed to interpret front block fields")
}
