//! Markdown-lite structuring of substituted contract text.

/// Headers that open a signature block.
pub const SIGNATURE_HEADERS: &[&str] = &[
    "### PROVIDER",
    "### CLIENT",
    "### CONTENT CREATOR",
    "### DEVELOPER",
];

const SIGNATURE_BLOCK_OPEN: &str = r#"<div class="signature-block">"#;
const SIGNATURE_BLOCK_CLOSE: &str = "</div>";

fn is_rule(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

/// Convert substituted text into HTML, one output line per content line.
///
/// - the first non-blank line is dropped if it is a `# ` title;
/// - a signature header opens a signature block, closed by the next
///   signature header or the end of the document;
/// - `## ` / `### ` lines become `<h2>` / `<h3>`, `---` becomes `<hr />`;
/// - other non-blank lines become paragraphs, blank lines are dropped.
pub fn structure(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut seen_content = false;
    let mut in_block = false;

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if !seen_content {
            seen_content = true;
            if line.starts_with("# ") {
                continue;
            }
        }

        if SIGNATURE_HEADERS.iter().any(|h| line.starts_with(h)) {
            if in_block {
                out.push(SIGNATURE_BLOCK_CLOSE.to_string());
            }
            out.push(SIGNATURE_BLOCK_OPEN.to_string());
            in_block = true;
        }

        let html = if let Some(rest) = line.strip_prefix("### ") {
            format!("<h3>{}</h3>", rest)
        } else if let Some(rest) = line.strip_prefix("## ") {
            format!("<h2>{}</h2>", rest)
        } else if is_rule(line) {
            "<hr />".to_string()
        } else {
            format!("<p>{}</p>", line)
        };
        out.push(html);
    }

    if in_block {
        out.push(SIGNATURE_BLOCK_CLOSE.to_string());
    }
    out.join("\n")
}
