//! Read-only subject summary: profile, BMI badge, and measurement scores.
//!
//! Scores normalize a raw measurement into 0–100 against a fixed healthy
//! range; grades bucket that score into four Korean labels.  Display glue,
//! kept here so the thresholds live in one place.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub sex: String,
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurements {
    pub situp_reps: Option<f64>,
    pub reach_cm: Option<f64>,
    pub step_bpm: Option<f64>,
    pub vo2max: Option<f64>,
}

/// One scored measurement row for the summary panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub name: &'static str,
    pub value: f64,
    pub unit: &'static str,
    pub score: u32,
}

/// BMI to one decimal, or `None` when either input is missing/zero.
pub fn bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = weight_kg.unwrap_or(0.0);
    let height = height_cm.unwrap_or(0.0);
    if weight <= 0.0 || height <= 0.0 {
        return None;
    }
    let meters = height / 100.0;
    Some((weight / (meters * meters) * 10.0).round() / 10.0)
}

/// Korean BMI classification (KOSSO cutoffs: 18.5 / 23 / 25).
pub fn bmi_badge(bmi: Option<f64>) -> &'static str {
    match bmi {
        None => "-",
        Some(v) if v < 18.5 => "저체중",
        Some(v) if v < 23.0 => "정상",
        Some(v) if v < 25.0 => "과체중",
        Some(_) => "비만",
    }
}

/// Clamp `value` into `[min, max]` and scale to 0–100.  `invert` flips the
/// scale for measurements where lower is better (e.g. recovery heart rate).
/// Bounds must be ordered `min < max`.
pub fn normalize(value: f64, min: f64, max: f64, invert: bool) -> u32 {
    if !value.is_finite() || min >= max {
        return 0;
    }
    let clamped = value.clamp(min, max);
    let ratio = (clamped - min) / (max - min);
    let ratio = if invert { 1.0 - ratio } else { ratio };
    (ratio * 100.0).round() as u32
}

/// Grade label for a 0–100 score (cuts at 80 / 60 / 40).
pub fn grade(score: u32) -> &'static str {
    match score {
        80.. => "우수",
        60..=79 => "보통",
        40..=59 => "주의",
        _ => "개선필요",
    }
}

/// Score every measurement against its healthy range.  Missing values are
/// scored as a measured zero, matching the summary panel's behavior.
pub fn score_rows(m: &Measurements) -> Vec<ScoreRow> {
    let situp = m.situp_reps.unwrap_or(0.0);
    let reach = m.reach_cm.unwrap_or(0.0);
    let step = m.step_bpm.unwrap_or(0.0);
    let vo2 = m.vo2max.unwrap_or(0.0);
    vec![
        ScoreRow {
            name: "윗몸일으키기",
            value: situp,
            unit: "회",
            score: normalize(situp, 10.0, 50.0, false),
        },
        ScoreRow {
            name: "좌전굴",
            value: reach,
            unit: "cm",
            score: normalize(reach, -5.0, 12.0, false),
        },
        ScoreRow {
            name: "스텝 회복기",
            value: step,
            unit: "BPM",
            score: normalize(step, 80.0, 120.0, true),
        },
        ScoreRow {
            name: "추정 VO₂max",
            value: vo2,
            unit: "ml/kg/min",
            score: normalize(vo2, 30.0, 55.0, false),
        },
    ]
}
