use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

use vehicle_guardian::{
    config::environment::EnvironmentConfig,
    models::{EngagementStatus, NotificationKind, Severity, VehicleRecord},
    repositories::fleet_repository::FleetRepository,
    services::{alert_derivation::urgency_score, DialFailure, EngagementDialer},
    AppState,
};

fn create_state(delay_ms: u64) -> AppState {
    let config = EnvironmentConfig {
        call_simulation_delay: Duration::from_millis(delay_ms),
        ..EnvironmentConfig::default()
    };
    AppState::new(config, FleetRepository::seed().unwrap())
}

#[tokio::test]
async fn test_vh001_end_to_end() {
    let state = create_state(50);

    let alert = state.classify("VH001").await.unwrap();
    assert_eq!(alert.severity, Severity::High);
    assert_eq!(alert.days_until_failure, 5);

    assert!(state.request_engagement("VH001").await);

    let session = state.current_session().await;
    assert!(session.active);
    assert_eq!(session.vehicle_id(), Some("VH001"));

    state.orchestrator.wait_for_completion().await.unwrap();

    let session = state.current_session().await;
    assert!(!session.active);
    assert!(session.vehicle.is_none());

    let vehicle = state.vehicle("VH001").await.unwrap();
    assert_eq!(vehicle.status, EngagementStatus::Scheduled);

    // Más reciente primero: completed, luego initiated
    let last_two = state.recent_notifications(2).await;
    assert_eq!(last_two.len(), 2);
    assert_eq!(last_two[0].kind, NotificationKind::CallCompleted);
    assert_eq!(last_two[1].kind, NotificationKind::CallInitiated);
    assert!(last_two.iter().all(|e| e.vehicle_id == "VH001"));
    assert!(last_two.iter().all(|e| e.registration == "DL-3C-AB-1234"));

    // Ya agendado: no se puede volver a llamar
    assert!(!state.request_engagement("VH001").await);
    assert_eq!(state.recent_notifications(10).await.len(), 2);
}

#[tokio::test]
async fn test_vh002_already_scheduled() {
    let state = create_state(50);

    assert!(!state.request_engagement("VH002").await);
    assert!(state.recent_notifications(10).await.is_empty());
    assert!(!state.current_session().await.active);
    assert_eq!(
        state.vehicle("VH002").await.unwrap().status,
        EngagementStatus::Scheduled
    );
}

#[tokio::test]
async fn test_concurrent_requests_single_flight() {
    let state = Arc::new(create_state(500));

    let requests = (0..10).map(|i| {
        let state = Arc::clone(&state);
        let vehicle_id = if i % 2 == 0 { "VH001" } else { "VH003" };
        tokio::spawn(async move { state.request_engagement(vehicle_id).await })
    });
    let accepted = join_all(requests)
        .await
        .into_iter()
        .map(|result| result.unwrap())
        .filter(|accepted| *accepted)
        .count();

    assert_eq!(accepted, 1);
    assert_eq!(state.recent_notifications(50).await.len(), 1);

    state.orchestrator.wait_for_completion().await.unwrap();

    let events = state.recent_notifications(50).await;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].vehicle_id, events[1].vehicle_id);

    let scheduled = state
        .list_vehicles()
        .await
        .into_iter()
        .filter(|v| v.status == EngagementStatus::Scheduled)
        .count();
    // VH002 ya estaba agendado
    assert_eq!(scheduled, 2);
}

#[tokio::test]
async fn test_recent_notifications_is_idempotent() {
    let state = create_state(10);
    assert!(state.request_engagement("VH003").await);
    state.orchestrator.wait_for_completion().await.unwrap();

    let first = state.recent_notifications(5).await;
    let second = state.recent_notifications(5).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_summary_reflects_completed_engagement() {
    let state = create_state(10);

    let before = state.fleet_summary().await;
    assert_eq!(before.vehicles_needing_action, 2);

    assert!(state.request_engagement("VH001").await);
    state.orchestrator.wait_for_completion().await.unwrap();

    let after = state.fleet_summary().await;
    assert_eq!(after.vehicles_needing_action, 1);
    assert_eq!(after.action_list[0].vehicle_id, "VH003");
}

#[tokio::test]
async fn test_second_waiter_sees_finished_call() {
    let state = Arc::new(create_state(300));
    assert!(state.request_engagement("VH001").await);

    let first_waiter = {
        let state = Arc::clone(&state);
        tokio::spawn(async move { state.orchestrator.wait_for_completion().await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    state.orchestrator.wait_for_completion().await.unwrap();
    assert!(!state.current_session().await.active);
    assert_eq!(
        state.vehicle("VH001").await.unwrap().status,
        EngagementStatus::Scheduled
    );

    first_waiter.await.unwrap().unwrap();
}

struct UnreachableDialer;

#[async_trait]
impl EngagementDialer for UnreachableDialer {
    async fn place_call(&self, _vehicle: &VehicleRecord) -> Result<(), DialFailure> {
        Err(DialFailure("no answer".to_string()))
    }
}

#[tokio::test]
async fn test_failed_call_keeps_vehicle_actionable() {
    let state = AppState::with_dialer(
        EnvironmentConfig::default(),
        FleetRepository::seed().unwrap(),
        Arc::new(UnreachableDialer),
    );

    assert!(state.request_engagement("VH001").await);
    state.orchestrator.wait_for_completion().await.unwrap();

    assert!(!state.current_session().await.active);
    assert_eq!(
        state.vehicle("VH001").await.unwrap().status,
        EngagementStatus::ActionNeeded
    );

    let events = state.recent_notifications(5).await;
    assert_eq!(events[0].kind, NotificationKind::CallFailed);
    assert!(events[0].message.contains("no answer"));

    // El vehículo puede volver a intentarse
    assert!(state.request_engagement("VH001").await);
    state.orchestrator.wait_for_completion().await.unwrap();
}

#[test]
fn test_urgency_reference_pair() {
    assert!(urgency_score(Severity::High, 5, 91.0) > urgency_score(Severity::Medium, 12, 88.0));
}
