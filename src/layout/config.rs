use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading settings or record data.
///
/// The layout core itself never fails; this is only returned at the edges
/// where JSON enters the system.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The JSON did not parse or did not match the expected shape.
	#[error("invalid JSON: {0}")]
	Parse(#[from] serde_json::Error),
	/// A numeric option outside its allowed range.
	#[error("{field} = {value} is out of range ({expected})")]
	OutOfRange {
		/// Option name as written in settings JSON.
		field: &'static str,
		/// The rejected value.
		value: f64,
		/// Human-readable range.
		expected: &'static str,
	},
}

/// Options for graph building and solving, passed explicitly to each call.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
	/// Attribute keys scanned for distance lists.
	pub distances_keys: Vec<String>,
	/// Attribute key holding the marker size.
	pub size_key: String,
	/// Attribute key holding the node colour.
	pub color_key: String,
	/// Attribute key holding the category.
	pub type_key: String,
	/// Attribute key holding the display name.
	pub name_key: String,
	/// Resolve raw targets through the record source.
	pub resolve_links: bool,
	/// Rescale the whole edge set when any length exceeds 1.
	pub normalize_absolute_lengths: bool,
	/// Length used for edges without one, in (0,1].
	pub default_edge_length_rel: f64,
	/// Number of relaxation rounds.
	pub iterations: u32,
	/// Fraction of the length error corrected per edge visit.
	pub stiffness: f64,
	/// Scale applied to every correction.
	pub damping: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			distances_keys: vec!["distances".into(), "pathways".into()],
			size_key: "size".into(),
			color_key: "color".into(),
			type_key: "type".into(),
			name_key: "name".into(),
			resolve_links: true,
			normalize_absolute_lengths: true,
			default_edge_length_rel: 0.5,
			iterations: 400,
			stiffness: 0.08,
			damping: 0.85,
		}
	}
}

impl LayoutConfig {
	/// Reads settings JSON; missing options take their defaults.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks the numeric options against their documented ranges.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.iterations == 0 {
			return Err(ConfigError::OutOfRange {
				field: "iterations",
				value: 0.0,
				expected: "a positive integer",
			});
		}
		for (field, value) in [
			("defaultEdgeLengthRel", self.default_edge_length_rel),
			("stiffness", self.stiffness),
			("damping", self.damping),
		] {
			if !(value > 0.0 && value <= 1.0) {
				return Err(ConfigError::OutOfRange {
					field,
					value,
					expected: "(0, 1]",
				});
			}
		}
		Ok(())
	}
}
