//! Whole acquisition cycles through `MonitorService` with port mocks.

use smartchair::app::events::AppEvent;
use smartchair::app::ports::UplinkError;
use smartchair::app::reading::EnvironmentSample;
use smartchair::app::service::MonitorService;
use smartchair::app::status::StatusState;
use smartchair::config::SystemConfig;

use crate::mock_hw::{MockChair, MockUplink, PortCall, RecordingSink};

fn service() -> MonitorService {
    MonitorService::new(SystemConfig::default()).unwrap()
}

/// `active` channels at 900, the rest at 100 (threshold 500).
fn seat(active: usize) -> MockChair {
    let samples: Vec<u16> = (0..12).map(|i| if i < active { 900 } else { 100 }).collect();
    MockChair::with_samples(&samples)
}

#[test]
fn cycle_runs_sweep_before_external_reads() {
    let mut svc = service();
    let mut chair = seat(2);
    let mut sink = RecordingSink::default();

    svc.acquire(&mut chair, &mut sink);

    assert_eq!(
        chair.calls,
        vec![
            PortCall::Sweep {
                channel_count: 12,
                threshold: 500
            },
            PortCall::Environment,
            PortCall::Inertial,
            PortCall::Show(StatusState::Normal),
        ]
    );
}

#[test]
fn alert_above_four_active_sensors() {
    let mut svc = service();
    let mut sink = RecordingSink::default();

    let mut four = seat(4);
    assert_eq!(svc.acquire(&mut four, &mut sink).status, StatusState::Normal);

    let mut five = seat(5);
    let reading = svc.acquire(&mut five, &mut sink);
    assert_eq!(reading.status, StatusState::Alert);
    assert_eq!(reading.pressure.active_count(), 5);
    assert_eq!(five.last_shown(), Some(StatusState::Alert));
}

#[test]
fn status_follows_current_cycle_only() {
    let mut svc = service();
    let mut sink = RecordingSink::default();

    assert!(svc.acquire(&mut seat(12), &mut sink).status.is_alert());
    assert!(!svc.acquire(&mut seat(0), &mut sink).status.is_alert());
    assert!(svc.acquire(&mut seat(5), &mut sink).status.is_alert());
    assert_eq!(svc.cycle_count(), 3);
}

#[test]
fn reading_is_emitted_and_uploaded() {
    let mut svc = service();
    let mut chair = seat(1);
    let mut sink = RecordingSink::default();
    let mut uplink = MockUplink::ok();

    let reading = svc.acquire(&mut chair, &mut sink);
    assert_eq!(svc.upload(&reading, &mut uplink, &mut sink), Ok(200));

    assert_eq!(uplink.queries.len(), 1);
    let q = &uplink.queries[0];
    assert!(q.starts_with("FSR0=900&FSR1=100&"));
    assert!(q.ends_with("&MPUTemp=30.25&DHTTemp=22.50&DHTHumidity=41.00"));
    assert_eq!(q.split('&').count(), 12 + 9);

    assert!(matches!(&sink.events[0], AppEvent::Reading(r) if r.cycle == 1));
    assert!(matches!(
        sink.events[1],
        AppEvent::UploadSucceeded { cycle: 1, status: 200 }
    ));
}

#[test]
fn failed_upload_is_reported_not_retried() {
    let mut svc = service();
    let mut chair = seat(0);
    let mut sink = RecordingSink::default();
    let mut uplink = MockUplink::failing(UplinkError::Status(500));

    let reading = svc.acquire(&mut chair, &mut sink);
    assert_eq!(
        svc.upload(&reading, &mut uplink, &mut sink),
        Err(UplinkError::Status(500))
    );

    assert_eq!(uplink.queries.len(), 1);
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::UploadFailed {
            cycle: 1,
            error: UplinkError::Status(500)
        })
    ));
}

#[test]
fn skipped_upload_reports_link_down() {
    let mut svc = service();
    let mut sink = RecordingSink::default();

    let reading = svc.acquire(&mut seat(3), &mut sink);
    svc.skip_upload(&reading, &mut sink);

    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::UploadFailed {
            error: UplinkError::LinkDown,
            ..
        })
    ));
}

#[test]
fn unavailable_environment_renders_sentinels() {
    let mut svc = service();
    let mut chair = seat(0);
    chair.environment = EnvironmentSample::UNAVAILABLE;
    let mut sink = RecordingSink::default();
    let mut uplink = MockUplink::ok();

    let reading = svc.acquire(&mut chair, &mut sink);
    svc.upload(&reading, &mut uplink, &mut sink).unwrap();

    assert!(uplink.queries[0].ends_with("&DHTTemp=-1.00&DHTHumidity=-1.00"));
}

#[test]
fn start_announces_channel_count() {
    let svc = service();
    let mut sink = RecordingSink::default();

    svc.start(&mut sink);

    assert!(matches!(sink.events[..], [AppEvent::Started { channel_count: 12 }]));
}
