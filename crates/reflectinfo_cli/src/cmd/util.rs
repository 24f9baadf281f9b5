use std::io::{self, Write};

use reflectinfo::inspect::Result;

/// Write a JSON payload to stdout, pretty-printed, with a trailing newline.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	let stdout = io::stdout();
	let mut out = stdout.lock();
	serde_json::to_writer_pretty(&mut out, payload)?;
	writeln!(out)?;
	Ok(())
}

/// Cut text to `max_len` Unicode scalar values, marking the cut with `...`.
pub(crate) fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

/// Render an optional label, `-` when absent.
pub(crate) fn or_dash(value: Option<&str>) -> &str {
	value.unwrap_or("-")
}
