use std::collections::{BTreeMap, HashMap};

use log::{debug, info};
use serde::Deserialize;

use super::config::{ConfigError, LayoutConfig};
use super::normalize::rescale_lengths;
use super::parse::{DistanceRef, parse_distance};
use super::types::{AttrValue, Category, Edge, GraphData, Node};

/// One entity as supplied by the record store.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SourceRecord {
	/// Identity (typically the note path). Records without one are skipped.
	#[serde(default)]
	pub id: Option<String>,
	/// Attribute bag.
	#[serde(default)]
	pub attrs: BTreeMap<String, AttrValue>,
}

impl SourceRecord {
	/// An identified record with no attributes.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: Some(id.into()),
			attrs: BTreeMap::new(),
		}
	}

	/// Adds or replaces an attribute.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
		self.attrs.insert(key.into(), value.into());
		self
	}

	/// A present, non-null attribute.
	pub fn get(&self, key: &str) -> Option<&AttrValue> {
		self.attrs.get(key).filter(|v| **v != AttrValue::None)
	}
}

/// Read-only access to the records a layout is built from.
pub trait RecordSource {
	/// All records, in the order nodes are built.
	fn records(&self) -> &[SourceRecord];

	/// Maps a raw link target to a record id, if the store knows it.
	fn resolve(&self, _raw: &str, _from_id: &str) -> Option<String> {
		None
	}
}

/// Records held in memory, loadable from JSON.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct MemorySource {
	records: Vec<SourceRecord>,
}

impl MemorySource {
	/// Wraps already loaded records.
	pub fn new(records: Vec<SourceRecord>) -> Self {
		Self { records }
	}

	/// Reads a JSON array of `{ "id": ..., "attrs": { ... } }` objects.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(json)?)
	}
}

impl RecordSource for MemorySource {
	fn records(&self) -> &[SourceRecord] {
		&self.records
	}

	/// Matches, in order: the exact id, the id without `.md`, the file
	/// stem, then the record's `name` attribute. Case-insensitive.
	fn resolve(&self, raw: &str, _from_id: &str) -> Option<String> {
		let wanted = raw.trim().to_lowercase();
		let keyed: [fn(&SourceRecord) -> Option<String>; 4] = [
			|r| r.id.clone(),
			|r| r.id.as_deref().map(|id| id.strip_suffix(".md").unwrap_or(id).to_string()),
			|r| r.id.as_deref().map(file_stem),
			|r| r.get("name").and_then(AttrValue::as_text).map(str::to_string),
		];
		keyed.iter().find_map(|key| {
			self.records
				.iter()
				.filter(|r| r.id.is_some())
				.find(|r| key(*r).is_some_and(|k| k.to_lowercase() == wanted))
				.and_then(|r| r.id.clone())
		})
	}
}

fn file_stem(id: &str) -> String {
	let last = id.rsplit('/').next().unwrap_or(id);
	match last.rsplit_once('.') {
		Some((stem, _)) if !stem.is_empty() => stem.to_string(),
		_ => last.to_string(),
	}
}

/// Builds the node and edge sets from a record source.
///
/// Never fails: records without identity and unusable distance references
/// simply contribute nothing.
pub fn build(source: &dyn RecordSource, config: &LayoutConfig) -> GraphData {
	let mut graph = GraphData::default();
	let mut positions: HashMap<String, usize> = HashMap::new();

	for record in source.records() {
		let Some(id) = record.id.as_deref().filter(|id| !id.trim().is_empty()) else {
			debug!("skipping record without identity");
			continue;
		};

		let node = read_node(id, record, config);
		match positions.get(id) {
			Some(&at) => graph.nodes[at] = node,
			None => {
				positions.insert(id.to_string(), graph.nodes.len());
				graph.nodes.push(node);
			}
		}

		for key in &config.distances_keys {
			let Some(list) = record.get(key) else {
				continue;
			};
			for item in list.as_list() {
				match read_edge(source, id, key, item, config) {
					Some(edge) => graph.edges.push(edge),
					None => debug!("{id}: dropped unusable {key} entry {item:?}"),
				}
			}
		}
	}

	if config.normalize_absolute_lengths {
		if let Some(max) = rescale_lengths(&mut graph.edges) {
			info!("rescaled edge lengths by {max}");
		}
	}

	info!(
		"built {} nodes and {} edges from {} records",
		graph.nodes.len(),
		graph.edges.len(),
		source.records().len()
	);
	graph
}

fn read_node(id: &str, record: &SourceRecord, config: &LayoutConfig) -> Node {
	let text = |key: &str| record.get(key).and_then(AttrValue::as_text);
	Node {
		category: text(config.type_key.as_str()).map(Category::parse).unwrap_or_default(),
		name: Some(text(config.name_key.as_str()).unwrap_or(id).to_string()),
		color: text(config.color_key.as_str()).map(str::to_string),
		size: record
			.get(&config.size_key)
			.and_then(AttrValue::as_number)
			.filter(|s| s.is_finite()),
		..Node::new(id)
	}
}

fn read_edge(
	source: &dyn RecordSource,
	from_id: &str,
	key: &str,
	item: &AttrValue,
	config: &LayoutConfig,
) -> Option<Edge> {
	let parsed = parse_distance(DistanceRef::from_value(item)?);
	let raw_target = parsed.target?;
	let to_id = if config.resolve_links {
		source.resolve(&raw_target, from_id).unwrap_or(raw_target)
	} else {
		raw_target
	};
	Some(Edge {
		label: Some(key.to_string()),
		..Edge::new(from_id, to_id, parsed.length)
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn list(items: &[&str]) -> AttrValue {
		AttrValue::List(items.iter().map(|s| AttrValue::from(*s)).collect())
	}

	fn vault() -> MemorySource {
		MemorySource::new(vec![
			SourceRecord::new("Places/Harbor.md")
				.with("type", "region")
				.with("name", "The Harbor")
				.with("color", "#336699")
				.with("size", 2.0)
				.with("distances", list(&["[[Mill#30]]", "Lighthouse @ 0.8", "Nowhere"])),
			SourceRecord::new("Places/Mill.md").with("pathways", list(&["Old Road: 20"])),
			SourceRecord::new("Places/Lighthouse.md").with("name", "Beacon"),
			SourceRecord::default().with("distances", list(&["Mill"])),
		])
	}

	#[test]
	fn builds_nodes_with_attribute_defaults() {
		let graph = build(&vault(), &LayoutConfig::default());
		assert_eq!(graph.nodes.len(), 3);

		let harbor = &graph.nodes[0];
		assert_eq!(harbor.category, Category::Region);
		assert_eq!(harbor.name.as_deref(), Some("The Harbor"));
		assert_eq!(harbor.color.as_deref(), Some("#336699"));
		assert_eq!(harbor.size, Some(2.0));
		assert!(!harbor.is_placed());

		let mill = &graph.nodes[1];
		assert_eq!(mill.category, Category::Location);
		assert_eq!(mill.name.as_deref(), Some("Places/Mill.md"));
		assert_eq!(mill.color, None);
	}

	#[test]
	fn resolves_targets_and_keeps_unresolved_literally() {
		let graph = build(&vault(), &LayoutConfig::default());
		let edges: Vec<_> = graph
			.edges
			.iter()
			.map(|e| (e.from_id.as_str(), e.to_id.as_str(), e.length))
			.collect();
		assert_eq!(
			edges,
			vec![
				("Places/Harbor.md", "Places/Mill.md", Some(0.3)),
				("Places/Harbor.md", "Places/Lighthouse.md", Some(0.8)),
				("Places/Harbor.md", "Nowhere", None),
				("Places/Mill.md", "Old Road", Some(0.2)),
			]
		);
		assert_eq!(graph.edges[3].label.as_deref(), Some("pathways"));
	}

	#[test]
	fn resolution_can_be_disabled() {
		let config = LayoutConfig {
			resolve_links: false,
			..LayoutConfig::default()
		};
		let graph = build(&vault(), &config);
		assert_eq!(graph.edges[0].to_id, "Mill");
	}

	#[test]
	fn batch_rescale_can_be_disabled() {
		let source = MemorySource::new(vec![
			SourceRecord::new("a").with(
				"distances",
				AttrValue::List(vec![
					AttrValue::from("b @ 0.4"),
					serde_json::json!({"target": "c", "length": 90}).into(),
					AttrValue::from("d"),
				]),
			),
		]);
		let lengths = |normalize_absolute_lengths| {
			let config = LayoutConfig {
				normalize_absolute_lengths,
				..LayoutConfig::default()
			};
			build(&source, &config)
				.edges
				.iter()
				.map(|e| e.length)
				.collect::<Vec<_>>()
		};
		// parsed lengths are already relative, so both settings agree
		assert_eq!(lengths(false), [Some(0.4), Some(0.9), None]);
		assert_eq!(lengths(true), lengths(false));
	}

	#[test]
	fn custom_keys() {
		let source = MemorySource::new(vec![
			SourceRecord::new("a")
				.with("kind", "continent")
				.with("links", AttrValue::from("b @ 0.1"))
				.with("distances", list(&["c"])),
		]);
		let config = LayoutConfig {
			type_key: "kind".into(),
			distances_keys: vec!["links".into()],
			..LayoutConfig::default()
		};
		let graph = build(&source, &config);
		assert_eq!(graph.nodes[0].category, Category::Continent);
		assert_eq!(graph.edges.len(), 1);
		assert_eq!(graph.edges[0].to_id, "b");
	}

	#[test]
	fn later_duplicate_replaces_earlier_node() {
		let source = MemorySource::new(vec![
			SourceRecord::new("a").with("name", "first"),
			SourceRecord::new("b"),
			SourceRecord::new("a").with("name", "second"),
		]);
		let graph = build(&source, &LayoutConfig::default());
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.nodes[0].name.as_deref(), Some("second"));
	}

	#[test]
	fn drops_unusable_entries() {
		let source = MemorySource::new(vec![SourceRecord::new("a").with(
			"distances",
			AttrValue::List(vec![
				AttrValue::Number(0.4),
				AttrValue::from("  "),
				AttrValue::Bool(false),
				AttrValue::from("b"),
			]),
		)]);
		let graph = build(&source, &LayoutConfig::default());
		assert_eq!(graph.edges.len(), 1);
		assert_eq!(graph.edges[0].to_id, "b");
	}

	#[test]
	fn empty_source_builds_empty_graph() {
		let graph = build(&MemorySource::default(), &LayoutConfig::default());
		assert!(graph.nodes.is_empty());
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn memory_source_resolution_order() {
		let source = vault();
		assert_eq!(source.resolve("Places/Mill.md", "x").as_deref(), Some("Places/Mill.md"));
		assert_eq!(source.resolve("places/mill", "x").as_deref(), Some("Places/Mill.md"));
		assert_eq!(source.resolve("lighthouse", "x").as_deref(), Some("Places/Lighthouse.md"));
		assert_eq!(source.resolve("Beacon", "x").as_deref(), Some("Places/Lighthouse.md"));
		assert_eq!(source.resolve("Atlantis", "x"), None);
	}

	#[test]
	fn memory_source_from_json() {
		let source = MemorySource::from_json_str(
			r#"[
				{"id": "a", "attrs": {"distances": [{"target": "b", "distance": 45}]}},
				{"attrs": {"name": "anonymous"}},
				{"id": "b"}
			]"#,
		)
		.unwrap();
		assert_eq!(source.records().len(), 3);
		let graph = build(&source, &LayoutConfig::default());
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.edges[0].length, Some(0.45));
		assert!(MemorySource::from_json_str("{").is_err());
	}
}
