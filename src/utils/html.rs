use std::sync::OnceLock;

use ammonia;
use regex::Regex;

/// Clean HTML content using the ammonia library.
///
/// Whitelist-based: safe tags (like <b>, <strong>, <p>) survive, while dangerous
/// tags (like <script>, <iframe>) and attributes (like onclick) are stripped.
/// Note: <script> is removed together with its content.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

fn bold_marker() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    BOLD.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold marker pattern is valid"))
}

/// Renders the course description convention: `**text**` becomes `<strong>text</strong>`
/// and line breaks become `<br>`. The result is sanitized before it is returned.
pub fn render_rich_text(input: &str) -> String {
    let bolded = bold_marker().replace_all(input, "<strong>$1</strong>");
    let with_breaks = bolded.replace("\r\n", "\n").replace('\n', "<br>");
    clean_html(&with_breaks)
}

/// Plain-text rendering for terminals: markers dropped, tags never produced.
pub fn strip_rich_text(input: &str) -> String {
    bold_marker().replace_all(input, "$1").into_owned()
}
