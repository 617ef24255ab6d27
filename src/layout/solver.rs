use std::f64::consts::PI;

use log::debug;

use super::config::LayoutConfig;
use super::types::{Edge, Node, index_by_id};

/// Radius of the ring unplaced nodes start on.
pub const INIT_RADIUS: f64 = 0.4;
/// Floor for the distance between two endpoints.
pub const MIN_DISTANCE: f64 = 1e-6;

/// Relaxes node positions in the unit square towards the edge lengths.
///
/// Runs exactly `config.iterations` rounds over the edges in list order.
/// Both endpoints of an edge move half of the damped correction each, in
/// opposite directions, and are clamped to [0,1] straight after. Edges with
/// a missing endpoint are ignored. The result is fully deterministic.
pub fn solve(nodes: &mut [Node], edges: &[Edge], config: &LayoutConfig) {
	place_unplaced(nodes);

	let pairs: Vec<(usize, usize, f64)> = {
		let index = index_by_id(nodes);
		edges
			.iter()
			.filter_map(|edge| {
				let a = *index.get(edge.from_id.as_str())?;
				let b = *index.get(edge.to_id.as_str())?;
				let target = edge.length.filter(|l| l.is_finite());
				Some((a, b, target.unwrap_or(config.default_edge_length_rel)))
			})
			.collect()
	};
	debug!(
		"solving {} nodes, {} of {} edges resolvable, {} iterations",
		nodes.len(),
		pairs.len(),
		edges.len(),
		config.iterations
	);

	let gain = config.damping * 0.5;
	for _ in 0..config.iterations {
		for &(a, b, target) in &pairs {
			let (dx, dy) = (nodes[b].x - nodes[a].x, nodes[b].y - nodes[a].y);
			let d = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
			let force = config.stiffness * (d - target);
			let (mx, my) = (dx / d * force * gain, dy / d * force * gain);

			nodes[a].x += mx;
			nodes[a].y += my;
			nodes[b].x -= mx;
			nodes[b].y -= my;
			clamp_unit(&mut nodes[a]);
			clamp_unit(&mut nodes[b]);
		}
	}
}

/// Puts nodes without finite coordinates on a ring around the centre, by
/// index. Already placed nodes are pulled into the unit square.
fn place_unplaced(nodes: &mut [Node]) {
	let step = 2.0 * PI / nodes.len().max(1) as f64;
	for (i, node) in nodes.iter_mut().enumerate() {
		if node.is_placed() {
			clamp_unit(node);
		} else {
			let angle = i as f64 * step;
			node.x = 0.5 + INIT_RADIUS * angle.cos();
			node.y = 0.5 + INIT_RADIUS * angle.sin();
		}
	}
}

fn clamp_unit(node: &mut Node) {
	node.x = node.x.clamp(0.0, 1.0);
	node.y = node.y.clamp(0.0, 1.0);
}

#[cfg(test)]
mod tests {
	use super::*;

	fn distance(a: &Node, b: &Node) -> f64 {
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	#[test]
	fn unplaced_nodes_start_on_the_ring() {
		let mut nodes: Vec<_> = (0..4).map(|i| Node::new(i.to_string())).collect();
		solve(&mut nodes, &[], &LayoutConfig::default());
		let expected = [(0.9, 0.5), (0.5, 0.9), (0.1, 0.5), (0.5, 0.1)];
		for (node, (x, y)) in nodes.iter().zip(expected) {
			assert!((node.x - x).abs() < 1e-12, "{node:?}");
			assert!((node.y - y).abs() < 1e-12, "{node:?}");
		}
	}

	#[test]
	fn placed_nodes_keep_their_position() {
		let mut nodes = vec![Node::new("a").at(0.2, 0.3), Node::new("b").at(1.4, -2.0)];
		solve(&mut nodes, &[], &LayoutConfig::default());
		assert_eq!((nodes[0].x, nodes[0].y), (0.2, 0.3));
		assert_eq!((nodes[1].x, nodes[1].y), (1.0, 0.0));
	}

	#[test]
	fn two_nodes_converge_to_target() {
		let mut nodes = vec![Node::new("a"), Node::new("b")];
		let edges = [Edge::new("a", "b", Some(0.3))];
		solve(&mut nodes, &edges, &LayoutConfig::default());
		assert!((distance(&nodes[0], &nodes[1]) - 0.3).abs() < 1e-6);
		// symmetric moves keep the midpoint
		assert!(((nodes[0].x + nodes[1].x) / 2.0 - 0.5).abs() < 1e-9);
	}

	#[test]
	fn missing_length_uses_default() {
		let mut nodes = vec![Node::new("a").at(0.5, 0.5), Node::new("b").at(0.52, 0.5)];
		let config = LayoutConfig {
			default_edge_length_rel: 0.2,
			..LayoutConfig::default()
		};
		solve(&mut nodes, &[Edge::new("b", "a", None)], &config);
		assert!((distance(&nodes[0], &nodes[1]) - 0.2).abs() < 1e-6);
	}

	#[test]
	fn non_finite_length_falls_back_to_default() {
		for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
			let mut nodes = vec![Node::new("a"), Node::new("b")];
			solve(&mut nodes, &[Edge::new("a", "b", Some(bad))], &LayoutConfig::default());
			for node in &nodes {
				assert!((0.0..=1.0).contains(&node.x), "{bad}: {node:?}");
				assert!((0.0..=1.0).contains(&node.y), "{bad}: {node:?}");
			}
			assert!((distance(&nodes[0], &nodes[1]) - 0.5).abs() < 1e-6, "{bad}");
		}
	}

	#[test]
	fn dangling_edges_change_nothing() {
		let edges = [Edge::new("a", "b", Some(0.2))];
		let mut with = vec![Node::new("a"), Node::new("b"), Node::new("c")];
		let mut without = with.clone();
		let mut dangling = edges.to_vec();
		dangling.push(Edge::new("c", "nowhere", Some(0.9)));
		dangling.push(Edge::new("ghost", "a", Some(0.9)));

		solve(&mut with, &dangling, &LayoutConfig::default());
		solve(&mut without, &edges, &LayoutConfig::default());
		assert_eq!(with, without);
	}

	#[test]
	fn zero_edge_node_stays_on_the_ring() {
		let mut nodes = vec![Node::new("a"), Node::new("b"), Node::new("lonely")];
		let edges = [Edge::new("a", "b", Some(0.1))];
		solve(&mut nodes, &edges, &LayoutConfig::default());
		let angle = 2.0 * (2.0 * PI / 3.0);
		assert_eq!(nodes[2].x, 0.5 + INIT_RADIUS * angle.cos());
		assert_eq!(nodes[2].y, 0.5 + INIT_RADIUS * angle.sin());
	}

	#[test]
	fn coincident_nodes_do_not_blow_up() {
		let mut nodes = vec![Node::new("a").at(0.5, 0.5), Node::new("b").at(0.5, 0.5)];
		let edges = [Edge::new("a", "b", Some(0.5)), Edge::new("a", "a", Some(0.5))];
		solve(&mut nodes, &edges, &LayoutConfig::default());
		assert!(nodes.iter().all(Node::is_placed));
	}

	#[test]
	fn deterministic() {
		let run = || {
			let mut nodes: Vec<_> = (0..6).map(|i| Node::new(format!("n{i}"))).collect();
			let edges: Vec<_> = (0..6)
				.map(|i| Edge::new(format!("n{i}"), format!("n{}", (i + 2) % 6), Some(0.1 * i as f64)))
				.collect();
			solve(&mut nodes, &edges, &LayoutConfig::default());
			nodes
		};
		let (first, second) = (run(), run());
		for (a, b) in first.iter().zip(&second) {
			assert_eq!(a.x.to_bits(), b.x.to_bits());
			assert_eq!(a.y.to_bits(), b.y.to_bits());
		}
	}

	#[test]
	fn zero_iterations_only_initializes() {
		let mut nodes = vec![Node::new("a"), Node::new("b")];
		let config = LayoutConfig {
			iterations: 0,
			..LayoutConfig::default()
		};
		solve(&mut nodes, &[Edge::new("a", "b", Some(0.1))], &config);
		assert!((nodes[0].x - 0.9).abs() < 1e-12);
		assert_eq!(nodes[0].y, 0.5);
	}
}
