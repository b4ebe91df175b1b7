//! Reassembly of edited blocks into the plan document.

use crate::block::Block;

/// Category priority for emission: aerobic names first, strength second,
/// flexibility third.  Matching is substring containment, first hit wins;
/// unmatched categories sort last in their original relative order.
const CATEGORY_ORDER: [&str; 7] = [
    "유산소",
    "유산소 운동",
    "심폐",
    "근력",
    "근력/근지구력",
    "유연성",
    "스트레칭",
];

const PLACEHOLDER: &str = "-";
const DEFAULT_HEADING: &str = "운동";

/// Render blocks back into plan text.  Pure and total; an empty slice yields
/// the empty string.
pub fn serialize(blocks: &[Block]) -> String {
    let mut ordered: Vec<&Block> = blocks.iter().collect();
    ordered.sort_by_key(|b| order_index(&b.category));
    ordered
        .iter()
        .map(|b| render_block(b))
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string()
}

fn order_index(category: &str) -> usize {
    CATEGORY_ORDER
        .iter()
        .position(|name| category.contains(name))
        .unwrap_or(CATEGORY_ORDER.len())
}

fn render_block(b: &Block) -> String {
    let heading = if b.category.is_empty() {
        DEFAULT_HEADING
    } else {
        &b.category
    };

    let mut lines = vec![format!("### {heading}")];
    if !b.title.is_empty() {
        lines.push(format!("종목: {}", b.title));
    }
    lines.push(format!("빈도(F): {}", or_dash(&b.freq)));
    lines.push(format!("강도(I): {}", or_dash(&b.intensity)));
    lines.push(format!("시간(T): {}", or_dash(&b.time)));
    lines.push(kind_line(b));
    if !b.notes.is_empty() {
        lines.push(format!("진행규칙·주의: {}", b.notes));
    }
    if !b.csv_id.is_empty() {
        lines.push(format!("CSV: {}", b.csv_id));
    }
    lines.join("\n")
}

/// The combined type/video line.  The video clause is appended with a
/// middle-dot separator only when either video field is present.
fn kind_line(b: &Block) -> String {
    let kind = format!("유형(T): {}", or_dash(&b.kind));
    if b.video_title.is_empty() && b.video_url.is_empty() {
        return kind;
    }
    let mut video = format!("대표영상: {}", or_dash(&b.video_title));
    if !b.video_url.is_empty() {
        video.push_str(" (YouTube: ");
        video.push_str(&b.video_url);
        video.push(')');
    }
    format!("{kind} · {video}")
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { PLACEHOLDER } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(category: &str, title: &str) -> Block {
        Block {
            category: category.to_string(),
            title: title.to_string(),
            ..Block::default()
        }
    }

    #[test]
    fn empty_list_serializes_to_empty_string() {
        assert_eq!(serialize(&[]), "");
    }

    #[test]
    fn shuffled_categories_emit_in_fixed_priority_order() {
        let blocks = vec![
            block("유연성", "스트레칭"),
            block("근력/근지구력", "스쿼트"),
            block("유산소 운동", "걷기"),
        ];
        let md = serialize(&blocks);
        let aerobic = md.find("### 유산소 운동").unwrap();
        let strength = md.find("### 근력/근지구력").unwrap();
        let flexibility = md.find("### 유연성").unwrap();
        assert!(aerobic < strength && strength < flexibility);
    }

    #[test]
    fn unknown_categories_sort_last_preserving_input_order() {
        let blocks = vec![
            block("기타B", "b"),
            block("유연성", "스트레칭"),
            block("기타A", "a"),
        ];
        let md = serialize(&blocks);
        let flexibility = md.find("### 유연성").unwrap();
        let other_b = md.find("### 기타B").unwrap();
        let other_a = md.find("### 기타A").unwrap();
        assert!(flexibility < other_b && other_b < other_a);
    }

    #[test]
    fn category_matching_is_substring_based() {
        // "가벼운 심폐 운동" contains the aerobic alias "심폐".
        let blocks = vec![block("근력 강화", "s"), block("가벼운 심폐 운동", "a")];
        let md = serialize(&blocks);
        assert!(md.find("심폐").unwrap() < md.find("근력 강화").unwrap());
    }

    #[test]
    fn fitt_lines_always_emitted_with_placeholder() {
        let md = serialize(&[block("유산소 운동", "")]);
        assert!(md.contains("빈도(F): -"));
        assert!(md.contains("강도(I): -"));
        assert!(md.contains("시간(T): -"));
        assert!(md.contains("유형(T): -"));
        // Empty title, notes, and reference id emit no line at all.
        assert!(!md.contains("종목:"));
        assert!(!md.contains("진행규칙·주의:"));
        assert!(!md.contains("CSV:"));
    }

    #[test]
    fn empty_category_falls_back_to_generic_heading() {
        let md = serialize(&[Block::default()]);
        assert!(md.starts_with("### 운동"));
    }

    #[test]
    fn video_clause_forms() {
        let mut b = block("유산소 운동", "걷기");
        b.kind = "걷기".to_string();
        assert!(serialize(std::slice::from_ref(&b)).ends_with("유형(T): 걷기"));

        b.video_title = "실내걷기".to_string();
        let md = serialize(std::slice::from_ref(&b));
        assert!(md.contains("유형(T): 걷기 · 대표영상: 실내걷기"));
        assert!(!md.contains("YouTube"));

        b.video_url = "http://x".to_string();
        let md = serialize(std::slice::from_ref(&b));
        assert!(md.contains("유형(T): 걷기 · 대표영상: 실내걷기 (YouTube: http://x)"));

        // URL without a title gets the placeholder title.
        b.video_title.clear();
        let md = serialize(std::slice::from_ref(&b));
        assert!(md.contains("대표영상: - (YouTube: http://x)"));
    }

    #[test]
    fn blocks_are_separated_by_blank_lines_and_trimmed() {
        let md = serialize(&[block("유산소 운동", "걷기"), block("유연성", "요가")]);
        assert!(md.contains("\n\n### 유연성"));
        assert!(!md.starts_with('\n'));
        assert!(!md.ends_with('\n'));
    }
}
