use dinnerforge_core::{HistoricalPairs, PreviousHosting};
use dinnerforge_test::{nine, roster};
use dinnerforge_verify::ScheduleVerifier;

use super::*;

#[test]
fn test_parse_some() {
    assert_eq!(parse_some("Some(12)"), Some(12));
    assert_eq!(parse_some("None"), None);
    assert_eq!(parse_some("Some(x)"), None);
}

#[test]
fn test_format_duration_ms() {
    assert_eq!(format_duration_ms(250), "250ms");
    assert_eq!(format_duration_ms(1500), "1.50s");
    assert_eq!(format_duration_ms(125_000), "2m 5s");
}

#[test]
fn test_format_score_keeps_levels() {
    let rendered = format_score("0hard/-3soft");
    assert!(rendered.contains("0hard"));
    assert!(rendered.contains("-3soft"));
    assert!(format_score("n/a").contains("n/a"));
}

#[test]
fn test_unknown_event_is_silent() {
    let visitor = EventVisitor {
        event: Some("backend_start".to_string()),
        ..EventVisitor::default()
    };
    assert!(format_event(&visitor).is_empty());
}

#[test]
fn test_new_best_mentions_objective() {
    let visitor = EventVisitor {
        event: Some("new_best".to_string()),
        objective: Some(4),
        worker: Some(2),
        nodes: Some(12_345),
        ..EventVisitor::default()
    };
    let line = format_event(&visitor);
    assert!(line.contains("New best"));
    assert!(line.contains("12,345"));
}

#[test]
fn test_render_report_lists_every_check() {
    let roster = roster(9);
    let previous = PreviousHosting::new();
    let history = HistoricalPairs::new();
    let report = ScheduleVerifier::new(&roster, &previous, &history)
        .verify(&nine::schedule(&roster));

    let rendered = render_report(&report);
    for check in report.checks() {
        assert!(rendered.contains(check.name));
    }
    assert!(rendered.contains("ALL CHECKS PASSED"));
}

#[test]
fn test_render_schedule_groups_sections() {
    let roster = roster(9);
    let rendered = render_schedule(&nine::schedule(&roster));
    assert!(rendered.contains("Section 1"));
    assert!(rendered.contains("Section 3"));
    assert_eq!(rendered.lines().count(), 9 + 3);
}
