/// Normalize a raw documentation comment into plain text.
///
/// Each line is trimmed and stripped of leading `/`, `*`, and spaces; a closing `*/` is dropped.
pub(crate) fn clean_doc(raw: Option<&str>) -> Option<String> {
	let raw = raw?;
	if raw.trim().is_empty() {
		return None;
	}

	let lines: Vec<&str> = raw
		.lines()
		.map(|line| {
			let line = line.trim();
			let line = line.strip_suffix("*/").unwrap_or(line).trim_end();
			line.trim_start_matches(['/', '*', ' '])
		})
		.collect();

	let text = lines.join("\n").trim().to_owned();
	if text.is_empty() { None } else { Some(text) }
}
