use serde::{Deserialize, Serialize};

/// One prescription section of the plan document.
///
/// Every field is free text; empty strings mean "not filled in".  The
/// serialized field name for [`kind`](Block::kind) is `type`, matching the
/// card layout the reviewer sees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Block {
    /// Section name, e.g. "유산소 운동".  Ordering key and card heading.
    pub category: String,
    /// Exercise name (종목).
    pub title: String,
    /// Frequency (빈도(F)), e.g. "주 3회".
    pub freq: String,
    /// Intensity (강도(I)), e.g. "RPE 11-13".
    pub intensity: String,
    /// Duration (시간(T)), e.g. "20-30분".
    pub time: String,
    /// Exercise modality (유형(T)), parsed out of the combined type/video line.
    #[serde(rename = "type")]
    pub kind: String,
    /// Reference video title (대표영상), from the combined line.
    pub video_title: String,
    /// Reference video URL, from the `(YouTube: …)` clause of the combined line.
    pub video_url: String,
    /// Caveats and progression rules (진행규칙·주의).  May span multiple lines.
    pub notes: String,
    /// Digits-only id referencing an external evidence row (CSV).
    pub csv_id: String,
}

impl Block {
    /// A blank block carrying only a category heading.
    pub fn seed(category: &str) -> Self {
        Self {
            category: category.to_string(),
            ..Self::default()
        }
    }
}

/// The editor always works on exactly this many blocks.  An editor contract,
/// not a domain law — parsing pads or truncates to this count.
pub const BLOCK_COUNT: usize = 3;

/// Preset categories assigned by position when the document supplies none.
pub(crate) const SEED_CATEGORIES: [&str; BLOCK_COUNT] = ["유산소 운동", "근력/근지구력", "유연성"];

/// The three blank blocks a reviewer starts from when there is no plan text.
pub fn seed_blocks() -> Vec<Block> {
    SEED_CATEGORIES.iter().map(|c| Block::seed(c)).collect()
}

/// Built-in template document used when a session arrives with no plan text.
pub const SEED_TEMPLATE: &str = "### 유산소 운동
종목: -
빈도(F): 주 3회
강도(I): RPE 11-13
시간(T): 20-30분
유형(T): 빠른 걷기 · 대표영상: -
진행규칙·주의: -
CSV: -

### 근력/근지구력
종목: -
빈도(F): 주 2-3회
강도(I): 10-15RM
시간(T): 20-30분
유형(T): 하체/코어
진행규칙·주의: -
CSV: -

### 유연성
종목: -
빈도(F): 매일
강도(I): 통증 없는 범위
시간(T): 10-15분
유형(T): 대근육군 스트레칭
진행규칙·주의: -
CSV: -";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_blocks_carry_preset_categories_and_nothing_else() {
        let seeds = seed_blocks();
        assert_eq!(seeds.len(), BLOCK_COUNT);
        assert_eq!(seeds[0].category, "유산소 운동");
        assert_eq!(seeds[1].category, "근력/근지구력");
        assert_eq!(seeds[2].category, "유연성");
        for seed in &seeds {
            assert!(seed.title.is_empty());
            assert!(seed.freq.is_empty());
            assert!(seed.notes.is_empty());
            assert!(seed.csv_id.is_empty());
        }
    }

    #[test]
    fn block_serializes_kind_as_type() {
        let block = Block {
            kind: "걷기".to_string(),
            ..Block::default()
        };
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains("\"type\":\"걷기\""));
        assert!(!json.contains("\"kind\""));
    }

    #[test]
    fn block_deserializes_missing_fields_to_empty() {
        let block: Block = serde_json::from_str(r#"{"category":"유연성"}"#).unwrap();
        assert_eq!(block.category, "유연성");
        assert!(block.video_url.is_empty());
    }
}
