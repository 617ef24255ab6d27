use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

/// Visual class of a node. Only affects rendering weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
	/// The whole map.
	World,
	/// A landmass.
	Continent,
	/// Part of a continent.
	Region,
	/// Part of a region.
	Territory,
	/// A single place; the default.
	#[default]
	Location,
	/// A road or route drawn as a small marker.
	Pathway,
}

impl Category {
	/// Parses a category name case-insensitively. Unknown names map to `Location`.
	pub fn parse(raw: &str) -> Self {
		match raw.trim().to_ascii_lowercase().as_str() {
			"world" => Self::World,
			"continent" => Self::Continent,
			"region" => Self::Region,
			"territory" => Self::Territory,
			"pathway" => Self::Pathway,
			_ => Self::Location,
		}
	}

	/// Radius multiplier used by the renderer.
	pub fn weight(self) -> f64 {
		match self {
			Self::World => 3.0,
			Self::Continent => 2.2,
			Self::Region => 1.7,
			Self::Territory => 1.35,
			Self::Location => 1.0,
			Self::Pathway => 0.6,
		}
	}

	/// Stable palette slot for nodes without an explicit colour.
	pub fn palette_index(self) -> usize {
		self as usize
	}
}

/// An attribute value read from a source record.
///
/// Values are classified once when a record is ingested so that readers
/// never have to probe raw JSON again.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum AttrValue {
	/// Missing or `null`.
	#[default]
	None,
	/// `true`/`false`.
	Bool(bool),
	/// Any JSON number.
	Number(f64),
	/// A string.
	Text(String),
	/// An array of values.
	List(Vec<AttrValue>),
	/// A nested object, e.g. a structured distance reference.
	Record(BTreeMap<String, AttrValue>),
}

impl AttrValue {
	/// The text of a `Text` value.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(s) => Some(s),
			_ => None,
		}
	}

	/// Numbers, and text that parses as a number.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(*n),
			Self::Text(s) => s.trim().parse().ok(),
			_ => None,
		}
	}

	/// Lists as-is; any other present value as a one-item list.
	pub fn as_list(&self) -> &[AttrValue] {
		match self {
			Self::None => &[],
			Self::List(items) => items,
			other => std::slice::from_ref(other),
		}
	}
}

impl From<serde_json::Value> for AttrValue {
	fn from(value: serde_json::Value) -> Self {
		use serde_json::Value;
		match value {
			Value::Null => Self::None,
			Value::Bool(b) => Self::Bool(b),
			Value::Number(n) => n.as_f64().map_or(Self::None, Self::Number),
			Value::String(s) => Self::Text(s),
			Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
			Value::Object(map) => {
				Self::Record(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
			}
		}
	}
}

impl From<&str> for AttrValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<f64> for AttrValue {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

/// One visual entity.
///
/// `x`/`y` are unit-square coordinates while solving and pixel coordinates
/// after projection. `NaN` means "not placed yet".
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Unique key, shared with `Edge::from_id`/`to_id`.
	pub id: String,
	/// Drawing weight; ignored by the solver.
	pub category: Category,
	/// Display label.
	pub name: Option<String>,
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// CSS colour used instead of the category palette.
	pub color: Option<String>,
	/// Marker scale factor.
	pub size: Option<f64>,
}

impl Node {
	/// An unplaced `Location` node.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			category: Category::default(),
			name: None,
			x: f64::NAN,
			y: f64::NAN,
			color: None,
			size: None,
		}
	}

	/// The same node placed at `(x, y)`.
	pub fn at(mut self, x: f64, y: f64) -> Self {
		self.x = x;
		self.y = y;
		self
	}

	/// Both coordinates are finite.
	pub fn is_placed(&self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}

	/// Label to draw: the name, else the id.
	pub fn label(&self) -> &str {
		self.name.as_deref().unwrap_or(&self.id)
	}
}

/// A desired-distance constraint. Stored directed, treated symmetrically.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Id of the record the reference was read from.
	pub from_id: String,
	/// Id of the target; may name no node.
	pub to_id: String,
	/// Desired relative length in [0,1]; `None` uses the configured default.
	pub length: Option<f64>,
	/// Free text, not read by the solver.
	pub label: Option<String>,
}

impl Edge {
	/// An unlabelled edge.
	pub fn new(from_id: impl Into<String>, to_id: impl Into<String>, length: Option<f64>) -> Self {
		Self {
			from_id: from_id.into(),
			to_id: to_id.into(),
			length,
			label: None,
		}
	}
}

/// Output of one build pass.
#[derive(Clone, Debug, Default)]
pub struct GraphData {
	/// One node per identified record, in record order.
	pub nodes: Vec<Node>,
	/// Constraints in the order they were read.
	pub edges: Vec<Edge>,
}

impl GraphData {
	/// Node id to position in `nodes`.
	pub fn node_index(&self) -> HashMap<&str, usize> {
		index_by_id(&self.nodes)
	}

	/// Edges whose endpoints both exist, with those endpoints.
	pub fn resolved_edges(&self) -> impl Iterator<Item = (&Edge, &Node, &Node)> + '_ {
		let index = self.node_index();
		self.edges.iter().filter_map(move |edge| {
			let from = *index.get(edge.from_id.as_str())?;
			let to = *index.get(edge.to_id.as_str())?;
			Some((edge, &self.nodes[from], &self.nodes[to]))
		})
	}
}

pub(crate) fn index_by_id(nodes: &[Node]) -> HashMap<&str, usize> {
	nodes
		.iter()
		.enumerate()
		.map(|(i, node)| (node.id.as_str(), i))
		.collect()
}
