const FENCE: &str = "```";
const MARKDOWN_FENCE: &str = "```markdown";

/// Strips the code fence the endpoint sometimes wraps around raw markdown.
///
/// Only one leading opener (bare or tagged `markdown`) and one trailing closer
/// are removed; fences inside the body are real code blocks and stay.
pub fn strip_fences(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(MARKDOWN_FENCE) {
        text = rest.trim_start();
    } else if let Some(rest) = text.strip_prefix(FENCE) {
        text = rest.trim_start();
    }

    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest.trim_end();
    }

    text.to_string()
}
