//! Plain-text rendering of the review page.
//!
//! The calendar and the markdown preview are external collaborators behind
//! traits; the page treats them as opaque and falls back to a one-line
//! notice when they are absent.  Nothing here can fail — a panel with no
//! data renders placeholders.

use rxdesk_plan::evidence::{self, EvidenceBlock};

use crate::controller::ReviewController;
use crate::session::Session;
use crate::summary::{self, Measurements, UserProfile};

/// Renders a read-only weekly calendar from the applied plan.
pub trait CalendarView {
    fn render(&self, plan_md: &str, weeks: u32, start_iso: Option<&str>) -> String;
}

/// Renders the raw edited document for human inspection.
pub trait MarkdownPreview {
    fn render(&self, md: &str) -> String;
}

/// Notice shown in place of a missing calendar collaborator.
pub const CALENDAR_FALLBACK: &str = "캘린더 구성요소를 사용할 수 없습니다.";

/// The review page with its optional collaborators.
#[derive(Default)]
pub struct ReviewPage<'a> {
    pub calendar: Option<&'a dyn CalendarView>,
    pub preview: Option<&'a dyn MarkdownPreview>,
}

impl ReviewPage<'_> {
    /// Render the whole page: header, summary panels, prescription cards,
    /// evidence, and the calendar section.
    pub fn render(&self, controller: &ReviewController, session: &Session) -> String {
        let mut out = String::new();

        // ── Header ──
        push_line(&mut out, "운동처방 검수");
        push_line(
            &mut out,
            &format!(
                "trace_id: {} · 상태: {}",
                controller.trace_id(),
                controller.status().as_str()
            ),
        );
        if let Some(message) = controller.last_message() {
            push_line(&mut out, &format!("[알림] {message}"));
        }

        // ── Read-only summary ──
        out.push('\n');
        push_line(&mut out, "== 개인 프로필 ==");
        render_profile(&mut out, session.user.as_ref());

        out.push('\n');
        push_line(&mut out, "== 측정 결과 ==");
        render_measurements(&mut out, session.measurements.as_ref());

        // ── Prescription cards ──
        out.push('\n');
        push_line(&mut out, "== 맞춤 운동처방 (검수용 카드) ==");
        for (i, block) in controller.blocks().iter().enumerate() {
            let heading = if block.category.is_empty() {
                format!("섹션 {}", i + 1)
            } else {
                block.category.clone()
            };
            push_line(&mut out, &format!("[{heading}]"));
            push_line(&mut out, &format!("  종목: {}", dash(&block.title)));
            push_line(
                &mut out,
                &format!(
                    "  빈도(F): {} | 강도(I): {}",
                    dash(&block.freq),
                    dash(&block.intensity)
                ),
            );
            push_line(
                &mut out,
                &format!(
                    "  시간(T): {} | 유형(T): {}",
                    dash(&block.time),
                    dash(&block.kind)
                ),
            );
            push_line(
                &mut out,
                &format!(
                    "  대표영상: {} {}",
                    dash(&block.video_title),
                    if block.video_url.is_empty() {
                        String::new()
                    } else {
                        format!("({})", block.video_url)
                    }
                ),
            );
            push_line(&mut out, &format!("  진행규칙·주의: {}", dash(&block.notes)));
            push_line(&mut out, &format!("  CSV 근거 ID: {}", dash(&block.csv_id)));
        }

        // ── Markdown preview (optional collaborator) ──
        if let Some(preview) = self.preview {
            out.push('\n');
            push_line(&mut out, "== 마크다운 원문 ==");
            push_line(&mut out, &preview.render(controller.edited_md()));
        }

        // ── Survey evidence ──
        out.push('\n');
        push_line(&mut out, "== 검수 참고: 설문 근거 ==");
        for block in merged_evidence(session) {
            push_line(&mut out, &block.title);
            for item in &block.items {
                push_line(&mut out, &format!("  - {item}"));
            }
        }

        // ── Calendar ──
        out.push('\n');
        push_line(
            &mut out,
            &format!("== 주간 계획표 ({}주) ==", controller.weeks()),
        );
        match self.calendar {
            Some(calendar) => push_line(
                &mut out,
                &calendar.render(
                    controller.edited_md(),
                    controller.weeks(),
                    controller.start_iso(),
                ),
            ),
            None => push_line(&mut out, CALENDAR_FALLBACK),
        }

        out
    }
}

/// Built-in advisory blocks, merged with the session's when it carries any.
fn merged_evidence(session: &Session) -> Vec<EvidenceBlock> {
    let defaults = evidence::default_blocks();
    match session.evidence.as_deref() {
        Some(supplied) if !supplied.is_empty() => evidence::merge(&defaults, supplied),
        _ => defaults,
    }
}

fn render_profile(out: &mut String, user: Option<&UserProfile>) {
    let empty = UserProfile::default();
    let user = user.unwrap_or(&empty);
    let bmi = summary::bmi(user.weight_kg, user.height_cm);
    push_line(out, &format!("이름: {}", dash(&user.name)));
    push_line(out, &format!("성별: {}", dash(&user.sex)));
    push_line(out, &format!("나이: {} 세", opt_num(user.age.map(f64::from))));
    push_line(out, &format!("키: {} cm", opt_num(user.height_cm)));
    push_line(out, &format!("체중: {} kg", opt_num(user.weight_kg)));
    push_line(
        out,
        &format!("BMI: {} ({})", opt_num(bmi), summary::bmi_badge(bmi)),
    );
}

fn render_measurements(out: &mut String, measurements: Option<&Measurements>) {
    let empty = Measurements::default();
    let m = measurements.unwrap_or(&empty);
    for row in summary::score_rows(m) {
        push_line(
            out,
            &format!(
                "{}: {} {} — {}점 ({})",
                row.name,
                row.value,
                row.unit,
                row.score,
                summary::grade(row.score)
            ),
        );
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn opt_num(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => "-".to_string(),
    }
}
