//! Built-in text calendar collaborator.
//!
//! A deliberately small stand-in for the real calendar component: one line
//! per week with its date range, plus a header listing each prescribed
//! category and its frequency.  The review core treats it as opaque.

use chrono::{Days, NaiveDate};

use rxdesk_plan::parse;
use rxdesk_review::CalendarView;

pub struct TextCalendar;

impl CalendarView for TextCalendar {
    fn render(&self, plan_md: &str, weeks: u32, start_iso: Option<&str>) -> String {
        let mut lines = Vec::new();

        let categories: Vec<String> = parse(plan_md)
            .iter()
            .filter(|b| !b.category.is_empty())
            .map(|b| {
                if b.freq.is_empty() {
                    b.category.clone()
                } else {
                    format!("{} ({})", b.category, b.freq)
                }
            })
            .collect();
        if !categories.is_empty() {
            lines.push(categories.join(" · "));
        }

        let start = start_iso.and_then(parse_start_date);
        for week in 0..weeks {
            match start.and_then(|d| week_range(d, week)) {
                Some((from, to)) => lines.push(format!("{}주차: {from} ~ {to}", week + 1)),
                None => lines.push(format!("{}주차: 시작일 미정", week + 1)),
            }
        }
        lines.join("\n")
    }
}

/// Accepts the persisted `YYYY-MM-DDTHH:MM:SS` form as well as a bare date.
fn parse_start_date(iso: &str) -> Option<NaiveDate> {
    let date_part = iso.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn week_range(start: NaiveDate, week: u32) -> Option<(NaiveDate, NaiveDate)> {
    let from = start.checked_add_days(Days::new(u64::from(week) * 7))?;
    let to = from.checked_add_days(Days::new(6))?;
    Some((from, to))
}
