//! Advisory evidence shown beside the plan: survey-derived ACSM notes,
//! grouped under a title and merged with whatever the session supplies.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One advisory note group.  `title` is the merge key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceBlock {
    pub title: String,
    pub items: Vec<String>,
}

impl EvidenceBlock {
    pub fn new(title: &str, items: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Merge two block lists keyed by trimmed title.
///
/// Titles keep first-insertion order (defaults first); items under a title
/// are the deduplicated union in first-seen order.  Idempotent, and
/// commutative in content (though not in title order).
pub fn merge(defaults: &[EvidenceBlock], supplied: &[EvidenceBlock]) -> Vec<EvidenceBlock> {
    let mut merged: Vec<EvidenceBlock> = Vec::new();
    let mut seen: Vec<HashSet<String>> = Vec::new();

    for block in defaults.iter().chain(supplied) {
        let key = block.title.trim();
        let slot = match merged.iter().position(|b| b.title == key) {
            Some(i) => i,
            None => {
                merged.push(EvidenceBlock {
                    title: key.to_string(),
                    items: Vec::new(),
                });
                seen.push(HashSet::new());
                merged.len() - 1
            }
        };
        for item in &block.items {
            if seen[slot].insert(item.clone()) {
                merged[slot].items.push(item.clone());
            }
        }
    }
    merged
}

/// Built-in survey-derived advisory blocks, shown whenever the session does
/// not supply its own (and merged with them when it does).
pub fn default_blocks() -> Vec<EvidenceBlock> {
    vec![
        EvidenceBlock::new(
            "설문 1·4 기반 주의사항 (ACSM 근거)",
            &[
                "운동 시 흉통이 발생하므로 저강도로 시작하고, 증상을 지속적으로 모니터링하며 필요시 의료 상담을 권장합니다.",
                "노쇠 신호가 있어 균형과 기능 중심의 운동을 권장하며, 세트 및 시간 축소, 휴식 연장을 고려합니다.",
            ],
        ),
        EvidenceBlock::new(
            "설문 2 기반 상담/동기부여 (ACSM 근거)",
            &[
                "체력 측정이 목적이므로 기본기 향상 및 규칙적인 운동을 강조합니다.",
                "흥미의 부재를 해소하기 위해 게임화 또는 챌린지를 도입하고, 효과의 불확실성을 줄이기 위해 주간 지표(예: RPE, 휴식 심박수)를 시각화합니다.",
            ],
        ),
        EvidenceBlock::new(
            "설문 3 기반 달성 전략",
            &[
                "활동적인 일정을 고려하여 주 3회의 유산소 운동을 20분씩 나누어 진행하고, 중간중간 30~45분마다 1~2분 기립 및 보행을 포함합니다.",
                "고강도 운동을 피하고 중강도 운동 및 휴식일을 적절히 배치합니다.",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_unions_items_for_equal_titles() {
        let a = vec![EvidenceBlock::new("공통", &["하나", "둘"])];
        let b = vec![EvidenceBlock::new("공통", &["둘", "셋"])];
        let merged = merge(&a, &b);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].items, vec!["하나", "둘", "셋"]);
    }

    #[test]
    fn merge_is_idempotent() {
        let x = default_blocks();
        let merged = merge(&x, &x);
        assert_eq!(merged.len(), x.len());
        for (m, original) in merged.iter().zip(&x) {
            assert_eq!(m.title, original.title);
            assert_eq!(m.items, original.items);
        }
    }

    #[test]
    fn merge_is_commutative_in_content() {
        let a = vec![
            EvidenceBlock::new("제목A", &["a1", "공유"]),
            EvidenceBlock::new("제목B", &["b1"]),
        ];
        let b = vec![EvidenceBlock::new("제목A", &["공유", "a2"])];

        let ab = merge(&a, &b);
        let ba = merge(&b, &a);
        for block in &ab {
            let twin = ba.iter().find(|t| t.title == block.title).unwrap();
            let mut left = block.items.clone();
            let mut right = twin.items.clone();
            left.sort();
            right.sort();
            assert_eq!(left, right);
        }
    }

    #[test]
    fn titles_keep_first_insertion_order() {
        let a = vec![EvidenceBlock::new("첫째", &["x"])];
        let b = vec![
            EvidenceBlock::new("둘째", &["y"]),
            EvidenceBlock::new("첫째", &["z"]),
        ];
        let merged = merge(&a, &b);
        assert_eq!(merged[0].title, "첫째");
        assert_eq!(merged[1].title, "둘째");
        assert_eq!(merged[0].items, vec!["x", "z"]);
    }

    #[test]
    fn titles_are_trimmed_before_keying() {
        let a = vec![EvidenceBlock::new("  공백  ", &["하나"])];
        let b = vec![EvidenceBlock::new("공백", &["둘"])];
        let merged = merge(&a, &b);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "공백");
        assert_eq!(merged[0].items, vec!["하나", "둘"]);
    }
}
