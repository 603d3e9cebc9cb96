//! Small pure helpers shared across the app.

use url::Url;
use uuid::Uuid;

/// Generate a collection-unique id with a type prefix, e.g. `node-…`.
pub fn new_id(prefix: &str) -> String {
	format!("{prefix}-{}", Uuid::new_v4())
}

/// Current time in epoch milliseconds.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
	js_sys::Date::now()
}

/// Current time in epoch milliseconds.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
	use std::time::{SystemTime, UNIX_EPOCH};

	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_millis() as f64)
		.unwrap_or(0.0)
}

/// Extract the video id from a YouTube URL, if any.
///
/// Handles `youtu.be/<id>`, `watch?v=<id>`, `/shorts/<id>` and `/embed/<id>`.
pub fn youtube_video_id(raw: &str) -> Option<String> {
	let url = Url::parse(raw).ok()?;
	let host = url.host_str()?;

	if host.contains("youtu.be") {
		return url
			.path_segments()?
			.next()
			.filter(|id| !id.is_empty())
			.map(str::to_string);
	}

	if let Some((_, v)) = url.query_pairs().find(|(key, _)| key == "v") {
		if !v.is_empty() {
			return Some(v.into_owned());
		}
	}

	let mut segments = url.path_segments()?;
	match segments.next() {
		Some("shorts") | Some("embed") => segments
			.next()
			.filter(|id| !id.is_empty())
			.map(str::to_string),
		_ => None,
	}
}

/// Thumbnail URL for a YouTube video id.
pub fn youtube_thumb(video_id: &str) -> String {
	format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn id_carries_prefix_and_is_unique() {
		let a = new_id("node");
		let b = new_id("node");
		assert!(a.starts_with("node-"));
		assert_ne!(a, b);
	}

	#[test]
	fn video_id_from_watch_url() {
		assert_eq!(
			youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
			Some("dQw4w9WgXcQ".to_string()),
		);
	}

	#[test]
	fn video_id_from_short_link() {
		assert_eq!(
			youtube_video_id("https://youtu.be/dQw4w9WgXcQ"),
			Some("dQw4w9WgXcQ".to_string()),
		);
	}

	#[test]
	fn video_id_from_shorts_and_embed_paths() {
		assert_eq!(
			youtube_video_id("https://www.youtube.com/shorts/abc123"),
			Some("abc123".to_string()),
		);
		assert_eq!(
			youtube_video_id("https://www.youtube.com/embed/abc123"),
			Some("abc123".to_string()),
		);
	}

	#[test]
	fn video_id_rejects_unmatched_input() {
		assert_eq!(youtube_video_id("not a url"), None);
		assert_eq!(youtube_video_id("https://youtu.be/"), None);
		assert_eq!(youtube_video_id("https://example.com/watch?x=1"), None);
	}

	#[test]
	fn thumb_url_embeds_the_id() {
		assert_eq!(
			youtube_thumb("abc123"),
			"https://img.youtube.com/vi/abc123/hqdefault.jpg",
		);
	}
}
