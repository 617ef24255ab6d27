use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::normalize::{normalize, normalize_value};
use super::types::AttrValue;

/// `[[Target#fragment|alias]]`
static LINK: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\[\[([^\[\]#|]*)(?:#([^\[\]|]*))?(?:\|[^\[\]]*)?\]\]$").expect("valid link regex")
});

/// `target @ 0.4`, `target: 40`, `target (0.4)`, `target | 40`
static DELIMITED: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(.*?)\s*[@(:|]\s*([-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?)\s*\)?$")
		.expect("valid delimited regex")
});

const TARGET_FIELDS: [&str; 3] = ["target", "path", "id"];
const LENGTH_FIELDS: [&str; 2] = ["distance", "length"];

/// One raw distance reference as found in a record's distance list.
#[derive(Clone, Copy, Debug)]
pub enum DistanceRef<'a> {
	/// A string in one of the accepted text forms.
	Text(&'a str),
	/// An object with target and distance fields.
	Fields(&'a BTreeMap<String, AttrValue>),
}

impl<'a> DistanceRef<'a> {
	/// Text and record values are references; anything else is not.
	pub fn from_value(value: &'a AttrValue) -> Option<Self> {
		match value {
			AttrValue::Text(s) => Some(Self::Text(s)),
			AttrValue::Record(fields) => Some(Self::Fields(fields)),
			_ => None,
		}
	}
}

/// Result of parsing a reference. A `None` target means the reference is
/// unusable and the caller drops it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedDistance {
	/// Raw target name, before resolution.
	pub target: Option<String>,
	/// Normalised length, if one was given and accepted.
	pub length: Option<f64>,
}

/// Parses a distance reference. Never fails; malformed input yields an
/// empty target.
pub fn parse_distance(reference: DistanceRef<'_>) -> ParsedDistance {
	match reference {
		DistanceRef::Text(raw) => parse_text(raw),
		DistanceRef::Fields(fields) => parse_fields(fields),
	}
}

fn parse_text(raw: &str) -> ParsedDistance {
	let raw = raw.trim();

	if let Some(caps) = LINK.captures(raw) {
		return ParsedDistance {
			target: non_empty(&caps[1]),
			length: caps
				.get(2)
				.and_then(|fragment| fragment.as_str().trim().parse::<f64>().ok())
				.and_then(normalize),
		};
	}

	if let Some(caps) = DELIMITED.captures(raw) {
		return ParsedDistance {
			target: non_empty(strip_link(&caps[1])),
			length: caps[2].parse::<f64>().ok().and_then(normalize),
		};
	}

	ParsedDistance {
		target: non_empty(raw),
		length: None,
	}
}

fn parse_fields(fields: &BTreeMap<String, AttrValue>) -> ParsedDistance {
	ParsedDistance {
		target: first_present(fields, &TARGET_FIELDS)
			.and_then(AttrValue::as_text)
			.and_then(|t| non_empty(strip_link(t))),
		length: first_present(fields, &LENGTH_FIELDS).and_then(normalize_value),
	}
}

fn first_present<'a>(fields: &'a BTreeMap<String, AttrValue>, keys: &[&str]) -> Option<&'a AttrValue> {
	keys.iter()
		.filter_map(|key| fields.get(*key))
		.find(|value| **value != AttrValue::None)
}

/// `[[Name]]` -> `Name`; other text is returned trimmed.
fn strip_link(raw: &str) -> &str {
	let raw = raw.trim();
	match LINK.captures(raw).and_then(|caps| caps.get(1)) {
		Some(target) => target.as_str(),
		None => raw,
	}
}

fn non_empty(raw: &str) -> Option<String> {
	let raw = raw.trim();
	(!raw.is_empty()).then(|| raw.to_string())
}
