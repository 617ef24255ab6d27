use super::types::{AttrValue, Edge};

/// Maps a raw length onto the relative [0,1] scale.
///
/// Values already in [0,1] pass through, values in (1,100] are read as
/// percentages. Anything else is rejected rather than guessed at.
pub fn normalize(raw: f64) -> Option<f64> {
	if !raw.is_finite() {
		return None;
	}
	if (0.0..=1.0).contains(&raw) {
		Some(raw)
	} else if raw > 1.0 && raw <= 100.0 {
		Some(raw / 100.0)
	} else {
		None
	}
}

/// `normalize` for an attribute value; numeric text is accepted.
pub fn normalize_value(value: &AttrValue) -> Option<f64> {
	value.as_number().and_then(normalize)
}

/// Brings the whole edge set onto one relative scale.
///
/// Non-finite lengths are cleared first. When the largest remaining length
/// exceeds 1, every present length is divided by it. Returns the divisor if
/// a rescale happened.
pub fn rescale_lengths(edges: &mut [Edge]) -> Option<f64> {
	for edge in edges.iter_mut() {
		edge.length = edge.length.filter(|l| l.is_finite());
	}
	let max = edges
		.iter()
		.filter_map(|e| e.length)
		.fold(f64::NEG_INFINITY, f64::max);
	if max <= 1.0 {
		return None;
	}
	for length in edges.iter_mut().filter_map(|e| e.length.as_mut()) {
		*length /= max;
	}
	Some(max)
}
