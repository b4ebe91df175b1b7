//! Labeled-line extraction of plan text into editable blocks.
//!
//! The grammar is fixed: `###` heading lines open a section, and within a
//! section each field is found by a `<label>: <value>` lookup (first match
//! wins, ASCII and fullwidth colons both accepted).  Extraction is pattern
//! search, not a real tokenizer — free text containing label-like substrings
//! can shift a match.  That fragility is confined to this module.

use std::sync::OnceLock;

use regex::Regex;

use crate::block::{BLOCK_COUNT, Block, SEED_CATEGORIES, seed_blocks};

/// Content cues that open a chunk when the document has no `###` headings.
const CHUNK_CUES: [&str; 3] = ["종목", "🎬", "CSV"];

struct LabelSet {
    title: Regex,
    freq: Regex,
    intensity: Regex,
    time: Regex,
    kind: Regex,
    video_title: Regex,
    video_url: Regex,
    notes: Regex,
    csv_id: Regex,
}

fn labels() -> &'static LabelSet {
    static SET: OnceLock<LabelSet> = OnceLock::new();
    SET.get_or_init(|| LabelSet {
        title: re(r"종목\s*[:：]\s*([^\n]+)"),
        freq: re(r"빈도\(F\)\s*[:：]\s*([^\n]+)"),
        intensity: re(r"강도\(I\)\s*[:：]\s*([^\n]+)"),
        time: re(r"시간\(T\)\s*[:：]\s*([^\n]+)"),
        kind: re(r"유형\(T\)\s*[:：]\s*([^\n]+)"),
        video_title: re(r"대표영상\s*[:：]\s*([^(\n]+?)\s*(?:\(|$)"),
        video_url: re(r"(?i)\(\s*YouTube\s*:\s*([^)]+)\)"),
        // Non-greedy body ending at a blank line, the next heading, the
        // reference-id line, or end of text.  The reference-id boundary keeps
        // notes from swallowing the `CSV:` line the serializer emits right
        // after them.
        notes: re(r"(?i)(?:진행규칙·주의|주의|메모)\s*[:：]?\s*([\s\S]*?)(?:\n{2,}|\n###|\nCSV|\z)"),
        csv_id: re(r"(?i)CSV\s*[:：]\s*([0-9]+)"),
    })
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("label pattern")
}

fn blank_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| re(r"\n{2,}"))
}

/// Parse plan text into exactly [`BLOCK_COUNT`] blocks.
///
/// Never fails: text with no extractable sections degrades to the blank seed
/// blocks, and any missing field is the empty string.
pub fn parse(text: &str) -> Vec<Block> {
    if text.trim().is_empty() {
        return seed_blocks();
    }

    let sections = split_sections(text);
    let blocks = if !sections.is_empty() {
        sections.iter().map(|sec| parse_section(sec)).collect()
    } else {
        // Label-listing documents without headings: best-effort split on
        // blank-line runs that precede a content cue, categories assigned by
        // chunk position.
        split_on_cues(text)
            .into_iter()
            .take(BLOCK_COUNT)
            .enumerate()
            .map(|(idx, chunk)| {
                let mut block = extract_fields(&chunk);
                block.category = SEED_CATEGORIES[idx].to_string();
                block
            })
            .collect()
    };

    fill_to_count(blocks)
}

/// [`parse`] for callers holding an optional document.  `None` behaves like
/// empty text.
pub fn parse_opt(text: Option<&str>) -> Vec<Block> {
    parse(text.unwrap_or_default())
}

/// Split into `###`-headed sections.  Text before the first heading is
/// dropped; a document with no heading yields no sections.
fn split_sections(text: &str) -> Vec<String> {
    let mut sections: Vec<String> = Vec::new();
    let mut current: Option<String> = None;
    for line in text.lines() {
        if line.starts_with("###") {
            if let Some(sec) = current.take() {
                sections.push(sec);
            }
            current = Some(String::new());
        }
        if let Some(sec) = current.as_mut() {
            sec.push_str(line);
            sec.push('\n');
        }
    }
    if let Some(sec) = current {
        sections.push(sec);
    }
    sections
}

fn parse_section(section: &str) -> Block {
    let mut block = extract_fields(section);
    let heading = section.lines().next().unwrap_or_default();
    block.category = heading
        .strip_prefix("###")
        .unwrap_or(heading)
        .trim()
        .to_string();
    block
}

fn extract_fields(text: &str) -> Block {
    let l = labels();
    let kind_line = capture(&l.kind, text);
    let (kind, video_title, video_url) = split_kind_line(&kind_line);
    Block {
        category: String::new(),
        title: capture(&l.title, text),
        freq: capture(&l.freq, text),
        intensity: capture(&l.intensity, text),
        time: capture(&l.time, text),
        kind,
        video_title,
        video_url,
        notes: capture(&l.notes, text),
        csv_id: capture(&l.csv_id, text),
    }
}

/// Decompose the combined type/video line: modality before the `·` separator,
/// then an optional `대표영상: <title> (YouTube: <url>)` clause.
fn split_kind_line(line: &str) -> (String, String, String) {
    if line.is_empty() {
        return (String::new(), String::new(), String::new());
    }
    let l = labels();
    let kind = line
        .split('·')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    let video_title = capture(&l.video_title, line);
    let video_url = capture(&l.video_url, line);
    (kind, video_title, video_url)
}

fn capture(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Split on blank-line runs immediately followed by one of [`CHUNK_CUES`].
fn split_on_cues(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for gap in blank_run().find_iter(text) {
        let rest = &text[gap.end()..];
        if CHUNK_CUES.iter().any(|cue| rest.starts_with(cue)) {
            chunks.push(text[start..gap.start()].to_string());
            start = gap.end();
        }
    }
    chunks.push(text[start..].to_string());
    chunks
}

/// Pad with blank seeds (positional categories) or truncate to the fixed
/// block count, preserving parsed order.
fn fill_to_count(mut blocks: Vec<Block>) -> Vec<Block> {
    let seeds = seed_blocks();
    for seed in seeds.into_iter().skip(blocks.len()) {
        blocks.push(seed);
    }
    blocks.truncate(BLOCK_COUNT);
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::SEED_TEMPLATE;
    use crate::serialize::serialize;

    #[test]
    fn empty_and_none_input_yield_seed_blocks() {
        for blocks in [parse(""), parse("   \n\n  "), parse_opt(None)] {
            assert_eq!(blocks.len(), BLOCK_COUNT);
            assert_eq!(blocks[0].category, "유산소 운동");
            assert_eq!(blocks[1].category, "근력/근지구력");
            assert_eq!(blocks[2].category, "유연성");
            assert!(blocks.iter().all(|b| b.title.is_empty()));
        }
    }

    #[test]
    fn parses_seed_template_fields() {
        let blocks = parse(SEED_TEMPLATE);
        assert_eq!(blocks.len(), 3);

        assert_eq!(blocks[0].category, "유산소 운동");
        assert_eq!(blocks[0].title, "-");
        assert_eq!(blocks[0].freq, "주 3회");
        assert_eq!(blocks[0].intensity, "RPE 11-13");
        assert_eq!(blocks[0].time, "20-30분");
        assert_eq!(blocks[0].kind, "빠른 걷기");
        assert_eq!(blocks[0].video_title, "-");
        assert!(blocks[0].video_url.is_empty());
        assert_eq!(blocks[0].notes, "-");
        // "CSV: -" carries no digits.
        assert!(blocks[0].csv_id.is_empty());

        assert_eq!(blocks[1].kind, "하체/코어");
        assert!(blocks[1].video_title.is_empty());
        assert_eq!(blocks[2].category, "유연성");
        assert_eq!(blocks[2].freq, "매일");
    }

    #[test]
    fn combined_line_decomposes_into_kind_title_and_url() {
        let text = "### 유산소 운동\n유형(T): 걷기 · 대표영상: 실내걷기 (YouTube: http://x)";
        let blocks = parse(text);
        assert_eq!(blocks[0].kind, "걷기");
        assert_eq!(blocks[0].video_title, "실내걷기");
        assert_eq!(blocks[0].video_url, "http://x");
    }

    #[test]
    fn combined_line_without_video_clause() {
        let blocks = parse("### 근력\n유형(T): 매달려서 다리 들기");
        assert_eq!(blocks[0].kind, "매달려서 다리 들기");
        assert!(blocks[0].video_title.is_empty());
        assert!(blocks[0].video_url.is_empty());
    }

    #[test]
    fn section_with_no_fields_still_produces_a_block() {
        let blocks = parse("### 유산소 운동\n자유 서술만 있는 섹션입니다.");
        assert_eq!(blocks[0].category, "유산소 운동");
        assert!(blocks[0].title.is_empty());
        assert!(blocks[0].freq.is_empty());
        // Remaining two positions are padded seeds.
        assert_eq!(blocks[1].category, "근력/근지구력");
        assert_eq!(blocks[2].category, "유연성");
    }

    #[test]
    fn non_numeric_reference_id_is_empty_not_an_error() {
        let blocks = parse("### 유연성\nCSV: abc");
        assert!(blocks[0].csv_id.is_empty());

        let blocks = parse("### 유연성\nCSV: 2348");
        assert_eq!(blocks[0].csv_id, "2348");
    }

    #[test]
    fn notes_stop_at_reference_id_line() {
        let text = "### 근력\n진행규칙·주의: 통증 시 중단\nCSV: 17";
        let blocks = parse(text);
        assert_eq!(blocks[0].notes, "통증 시 중단");
        assert_eq!(blocks[0].csv_id, "17");
    }

    #[test]
    fn notes_may_span_lines_until_blank_line() {
        let text = "### 근력\n주의: 첫째 주는 가볍게\n둘째 주부터 증량\n\n별도 문단";
        let blocks = parse(text);
        assert_eq!(blocks[0].notes, "첫째 주는 가볍게\n둘째 주부터 증량");
    }

    #[test]
    fn alternate_notes_labels_are_recognized() {
        assert_eq!(parse("### a\n메모: 기록용")[0].notes, "기록용");
        assert_eq!(parse("### a\n주의: 무리 금지")[0].notes, "무리 금지");
    }

    #[test]
    fn fullwidth_colons_are_accepted() {
        let blocks = parse("### 유산소 운동\n종목： 걷기\n빈도(F)： 주 5회");
        assert_eq!(blocks[0].title, "걷기");
        assert_eq!(blocks[0].freq, "주 5회");
    }

    #[test]
    fn more_than_three_sections_are_truncated() {
        let text = (1..=5)
            .map(|i| format!("### 섹션{i}\n종목: 운동{i}"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let blocks = parse(&text);
        assert_eq!(blocks.len(), BLOCK_COUNT);
        assert_eq!(blocks[2].category, "섹션3");
    }

    #[test]
    fn headingless_text_splits_on_content_cues() {
        let text = "종목: 걷기\n빈도(F): 주 3회\n\n종목: 스쿼트\n강도(I): 10RM\n\n종목: 스트레칭";
        let blocks = parse(text);
        assert_eq!(blocks[0].category, "유산소 운동");
        assert_eq!(blocks[0].title, "걷기");
        assert_eq!(blocks[1].category, "근력/근지구력");
        assert_eq!(blocks[1].title, "스쿼트");
        assert_eq!(blocks[1].intensity, "10RM");
        assert_eq!(blocks[2].category, "유연성");
        assert_eq!(blocks[2].title, "스트레칭");
    }

    #[test]
    fn headingless_text_without_cues_is_one_chunk() {
        let blocks = parse("종목: 걷기\n\n완전히 다른 문단");
        assert_eq!(blocks[0].title, "걷기");
        assert_eq!(blocks[1].category, "근력/근지구력");
        assert!(blocks[1].title.is_empty());
    }

    #[test]
    fn unicode_fields_round_trip_unchanged() {
        let text = "### 유산소 운동\n종목: 韓國語·日本語 테스트 ✓\n진행규칙·주의: 숨이 찰 때 멈추기 🏃";
        let blocks = parse(text);
        assert_eq!(blocks[0].title, "韓國語·日本語 테스트 ✓");
        assert_eq!(blocks[0].notes, "숨이 찰 때 멈추기 🏃");

        let reparsed = parse(&serialize(&blocks));
        assert_eq!(reparsed[0].notes, "숨이 찰 때 멈추기 🏃");
    }

    #[test]
    fn double_round_trip_is_stable() {
        let doc = "### 유산소 운동\n종목: 빠른 걷기\n빈도(F): 주 3회\n강도(I): RPE 11-13\n시간(T): 30분\n\
                   유형(T): 걷기 · 대표영상: 실내걷기 (YouTube: http://x)\n진행규칙·주의: 흉통 시 중단\nCSV: 2348\n\n\
                   ### 근력/근지구력\n종목: 스쿼트\n빈도(F): 주 2회\n강도(I): 10-15RM\n시간(T): 20분\n유형(T): 하체\n\n\
                   ### 유연성\n빈도(F): 매일\n강도(I): 통증 없는 범위\n시간(T): 10분\n유형(T): 스트레칭";
        let first = parse(doc);
        let second = parse(&serialize(&first));
        assert_eq!(first, second);
        let third = parse(&serialize(&second));
        assert_eq!(second, third);
    }
}
