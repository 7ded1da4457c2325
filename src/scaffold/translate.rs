//! Selector-to-element translation.
//!
//! One rule selector becomes one element descriptor:
//!
//! - the tag is the first tag component found; failing that, the first
//!   pseudo-class argument is resolved the same way; `div` when nothing
//!   turns one up
//! - every attribute component contributes a `key`/`value` pair, including
//!   those inside pseudo-class arguments at any depth; repeats of the same
//!   key merge by joining their values with a space (empty and absent
//!   values are skipped)
//! - universal selectors, combinators, pseudo-elements, nesting markers,
//!   and argument-less pseudo-classes contribute nothing
//!
//! A leading `&` and a trailing `*N` repetition suffix are authoring syntax,
//! stripped before the selector is parsed.

use crate::markup::{Attribute, Element};
use crate::scaffold::multiplier;
use crate::selector::{self, Component, PseudoArg, SelectorError};

/// Translate a rule selector into an element descriptor (no children).
pub fn translate(selector: &str) -> Result<Element, SelectorError> {
    let base = multiplier::strip(selector.trim());
    let base = base.strip_prefix('&').unwrap_or(base);
    let components = selector::parse(base)?;
    let (tag, raw) = resolve(&components);
    let mut element = Element::new(tag.unwrap_or_else(|| "div".to_string()));
    element.attributes = merge_attributes(raw);
    Ok(element)
}

/// Resolve a component sequence to a tag candidate and the raw attribute
/// pairs it carries, in encounter order. Attributes recurse into every
/// pseudo-class argument; the tag only into the first, and only when the
/// sequence itself has no tag.
fn resolve(components: &[Component]) -> (Option<String>, Vec<(String, Option<String>)>) {
    let mut tag = None;
    let mut raw = Vec::new();
    for component in components {
        match component {
            Component::Tag(name) => {
                if tag.is_none() {
                    tag = Some(name.clone());
                }
            }
            Component::Attribute { name, value, .. } => {
                raw.push((name.clone(), value.clone()));
            }
            _ => {}
        }
    }

    let mut first_pseudo = true;
    for component in components {
        if let Component::Pseudo { arg, .. } = component {
            let inner: &[Component] = match arg {
                PseudoArg::Selector(inner) => inner,
                _ => &[],
            };
            let (inner_tag, inner_raw) = resolve(inner);
            if first_pseudo {
                first_pseudo = false;
                if tag.is_none() {
                    tag = inner_tag;
                }
            }
            raw.extend(inner_raw);
        }
    }
    (tag, raw)
}

/// Merge raw pairs by key. The first occurrence fixes the attribute's
/// position; later values for the same key append with a space.
fn merge_attributes(raw: Vec<(String, Option<String>)>) -> Vec<Attribute> {
    let mut merged: Vec<Attribute> = Vec::new();
    for (key, value) in raw {
        match merged.iter_mut().find(|attribute| attribute.key == key) {
            None => merged.push(Attribute { key, value }),
            Some(existing) => {
                let parts: Vec<&str> = existing
                    .value
                    .as_deref()
                    .into_iter()
                    .chain(value.as_deref())
                    .filter(|part| !part.is_empty())
                    .collect();
                existing.value = match parts.is_empty() {
                    true => None,
                    false => Some(parts.join(" ").trim().to_string()),
                };
            }
        }
    }
    merged
}
