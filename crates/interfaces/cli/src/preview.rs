//! Plain-text markdown preview collaborator.
//!
//! Line-based rendering only: headings are indented, list markers become
//! bullets, fenced code passes through verbatim.  Enough to eyeball the
//! document the reviewer is editing.

use rxdesk_review::MarkdownPreview;

pub struct TextPreview;

impl MarkdownPreview for TextPreview {
    fn render(&self, md: &str) -> String {
        let mut out: Vec<String> = Vec::new();
        let mut in_code_block = false;

        for raw_line in md.lines() {
            if raw_line.trim_start().starts_with("```") {
                in_code_block = !in_code_block;
                continue;
            }
            if in_code_block {
                out.push(format!("    {raw_line}"));
                continue;
            }
            out.push(render_inline(raw_line));
        }
        out.join("\n")
    }
}

fn render_inline(line: &str) -> String {
    let trimmed = line.trim_start();

    if let Some(rest) = trimmed.strip_prefix("### ") {
        return format!("   {rest}");
    }
    if let Some(rest) = trimmed.strip_prefix("## ") {
        return format!("  {rest}");
    }
    if let Some(rest) = trimmed.strip_prefix("# ") {
        return rest.to_string();
    }

    // unordered list items  (-, *, +)
    if trimmed.starts_with("- ") || trimmed.starts_with("* ") || trimmed.starts_with("+ ") {
        return format!("  • {}", &trimmed[2..]);
    }

    line.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_are_indented_by_depth() {
        let out = TextPreview.render("# 제목\n## 소제목\n### 섹션");
        assert_eq!(out, "제목\n  소제목\n   섹션");
    }

    #[test]
    fn list_markers_become_bullets() {
        let out = TextPreview.render("- 하나\n* 둘");
        assert_eq!(out, "  • 하나\n  • 둘");
    }

    #[test]
    fn code_fences_pass_content_through() {
        let out = TextPreview.render("```\n### not a heading\n```");
        assert_eq!(out, "    ### not a heading");
    }

    #[test]
    fn plain_lines_are_untouched() {
        let out = TextPreview.render("빈도(F): 주 3회");
        assert_eq!(out, "빈도(F): 주 3회");
    }
}
