//! Integration tests for a full monitoring run over the default household.

mod common;

use smartload::io::export::write_csv;
use smartload::model::{GroupStatus, Severity};
use smartload::runner::run_monitor;

#[test]
fn full_run_produces_requested_tick_count() {
    let mut service = common::started_service(common::scripted_settings());
    let summary = run_monitor(&mut service, 36, true, true);
    assert_eq!(summary.snapshots.len(), 36);
    assert_eq!(service.tick_count(), 36);
}

#[test]
fn full_run_accumulates_energy_and_cost() {
    let mut service = common::started_service(common::scripted_settings());
    let summary = run_monitor(&mut service, 36, true, true);
    // fast runs still see non-zero (if tiny) elapsed time per tick
    assert!(summary.session_energy_kwh >= 0.0);
    assert!(summary.session_cost >= 0.0);
    assert!(summary.peak_current_a > 0.0);
}

#[test]
fn group_statuses_stay_consistent_with_totals() {
    let mut service = common::started_service(common::scripted_settings());
    run_monitor(&mut service, 36, true, true);

    for group in service.socket_groups() {
        let pct = group.load_percentage();
        // half-percent tolerance for float rounding at the band edges
        match group.status {
            GroupStatus::Ok => assert!(pct < 77.5),
            GroupStatus::Warning => assert!(pct >= 76.5 && pct < 100.5),
            GroupStatus::Danger => assert!(pct >= 99.5),
        }
    }
}

#[test]
fn tight_limit_run_raises_overload_alerts() {
    let mut service = common::started_service(common::tight_limit_settings());
    let summary = run_monitor(&mut service, 10, true, true);

    assert!(summary.overload_ticks > 0);
    assert!(service.alerts().entries().iter().any(|a| {
        a.severity == Severity::Danger && a.message.contains("exceeded main limit")
    }));
}

#[test]
fn shedding_recommendation_names_only_non_essential_appliances() {
    let mut service = common::started_service(common::tight_limit_settings());
    run_monitor(&mut service, 5, true, true);

    let essential = ["Refrigerator", "Decoder/Router", "Laptop Charger", "LED Lights"];
    for action in service.shed_plan() {
        assert!(
            !essential.contains(&action.appliance.as_str()),
            "essential appliance {} in shed plan",
            action.appliance
        );
    }
}

#[test]
fn alert_log_never_exceeds_capacity() {
    let mut service = common::started_service(common::tight_limit_settings());
    run_monitor(&mut service, 200, true, true);
    assert!(service.alerts().len() <= 100);
}

#[test]
fn run_summary_exports_one_csv_row_per_tick() {
    let mut service = common::started_service(common::scripted_settings());
    let summary = run_monitor(&mut service, 12, true, true);

    let mut buf = Vec::new();
    write_csv(&summary.snapshots, &mut buf).unwrap();
    let output = String::from_utf8(buf).unwrap();
    assert_eq!(output.lines().count(), 13); // header + 12 rows
}

#[test]
fn stopped_service_ignores_further_ticks() {
    let mut service = common::started_service(common::scripted_settings());
    run_monitor(&mut service, 5, true, true);
    service.stop();
    assert!(service.tick().is_none());
    assert_eq!(service.tick_count(), 5);
}
