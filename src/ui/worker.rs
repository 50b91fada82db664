//! The background task that owns the API client.
//!
//! All network traffic happens here, off the drawing loop. Snapshots and
//! action results flow out over one channel; commands flow in over another.
//! Because a single task serves both the timer and user commands, display
//! mutations are serialized by construction.

use crate::core::application::poller;
use crate::core::domain::model::{GuestAction, GuestKind, PollSnapshot};
use crate::core::domain::value_object::NodeName;
use crate::core::infrastructure::api_client::ApiClient;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Requests from the UI to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run one poll tick now.
    Refresh,
    /// Issue a lifecycle action against a guest.
    Act {
        kind: GuestKind,
        vmid: u32,
        action: GuestAction,
    },
}

/// Results from the worker to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A poll tick completed; replace the displayed snapshot.
    Snapshot(PollSnapshot),
    /// An action was accepted by the backend; a re-poll is scheduled.
    ActionDone {
        kind: GuestKind,
        vmid: u32,
        action: GuestAction,
    },
    /// An action failed; the detail must be surfaced to the operator.
    ActionFailed {
        kind: GuestKind,
        vmid: u32,
        action: GuestAction,
        detail: String,
    },
}

/// Timer-driven poll loop plus command servicing.
pub struct PollWorker {
    client: Option<ApiClient>,
    node: NodeName,
    first_tick: Duration,
    interval: Duration,
    repoll_delay: Duration,
}

impl PollWorker {
    /// Delay before the first tick, so the display is not empty while the
    /// first round trip is outstanding.
    pub const FIRST_TICK: Duration = Duration::from_millis(150);
    /// Delay between an accepted action and the follow-up re-poll; the
    /// backend applies transitions asynchronously.
    pub const REPOLL_DELAY: Duration = Duration::from_secs(2);

    pub fn new(client: Option<ApiClient>, node: NodeName, interval: Duration) -> Self {
        Self {
            client,
            node,
            first_tick: Self::FIRST_TICK,
            interval,
            repoll_delay: Self::REPOLL_DELAY,
        }
    }

    /// Overrides the fixed delays. Tests use this to keep runtimes short.
    #[cfg(test)]
    pub(crate) fn with_timings(mut self, first_tick: Duration, repoll_delay: Duration) -> Self {
        self.first_tick = first_tick;
        self.repoll_delay = repoll_delay;
        self
    }

    /// Runs until the command channel closes or the UI stops listening.
    ///
    /// `commands` is the receiving end of the channel `command_tx` feeds;
    /// the worker keeps the sender so an accepted action can schedule its
    /// own deferred `Refresh` through the same queue.
    pub async fn run(
        self,
        command_tx: mpsc::Sender<Command>,
        mut commands: mpsc::Receiver<Command>,
        events: mpsc::Sender<Event>,
    ) {
        let mut ticker = interval_at(Instant::now() + self.first_tick, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.publish(&events).await.is_err() {
                        break;
                    }
                }
                command = commands.recv() => match command {
                    None => break,
                    Some(Command::Refresh) => {
                        if self.publish(&events).await.is_err() {
                            break;
                        }
                    }
                    Some(Command::Act { kind, vmid, action }) => {
                        if self
                            .act(kind, vmid, action, &command_tx, &events)
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                },
            }
        }
        tracing::debug!("poll worker stopped");
    }

    /// One poll tick. A failed tick is logged and publishes nothing, so the
    /// previous snapshot stays on display.
    async fn publish(&self, events: &mpsc::Sender<Event>) -> Result<(), ()> {
        let snapshot = match &self.client {
            None => poller::disconnected_snapshot(),
            Some(client) => match poller::poll(client, &self.node).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::error!(error = %e, "poll tick failed; keeping previous snapshot");
                    return Ok(());
                }
            },
        };
        events.send(Event::Snapshot(snapshot)).await.map_err(|_| ())
    }

    async fn act(
        &self,
        kind: GuestKind,
        vmid: u32,
        action: GuestAction,
        command_tx: &mpsc::Sender<Command>,
        events: &mpsc::Sender<Event>,
    ) -> Result<(), ()> {
        let Some(client) = &self.client else {
            let event = Event::ActionFailed {
                kind,
                vmid,
                action,
                detail: "not connected to the backend".to_string(),
            };
            return events.send(event).await.map_err(|_| ());
        };

        match client.guest_action(&self.node, kind, vmid, action).await {
            Ok(()) => {
                tracing::info!(%kind, vmid, %action, "guest action accepted");
                // One deferred re-poll through the same queue; if the UI is
                // gone by then the send fails silently and nothing runs.
                let tx = command_tx.clone();
                let delay = self.repoll_delay;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Command::Refresh).await;
                });
                events
                    .send(Event::ActionDone { kind, vmid, action })
                    .await
                    .map_err(|_| ())
            }
            Err(e) => {
                tracing::error!(%kind, vmid, %action, error = %e, "guest action failed");
                let event = Event::ActionFailed {
                    kind,
                    vmid,
                    action,
                    detail: e.to_string(),
                };
                events.send(event).await.map_err(|_| ())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::model::{PveConnection, Session};
    use crate::core::domain::value_object::{
        PveCsrfToken, PveHost, PvePassword, PvePort, PveRealm, PveTicket, PveUsername,
    };
    use tokio::time::timeout;
    use url::Url;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const RECV_WINDOW: Duration = Duration::from_secs(5);
    const QUIET_WINDOW: Duration = Duration::from_millis(300);

    fn create_test_client(server_url: &str) -> ApiClient {
        let connection = PveConnection::new_unchecked(
            PveHost::new_unchecked(server_url.trim_start_matches("http://").to_string()),
            PvePort::new_unchecked(8006),
            PveUsername::new_unchecked("testuser".to_string()),
            PvePassword::new_unchecked("testpass".to_string()),
            PveRealm::new_unchecked("pam".to_string()),
            false,
            Url::parse(server_url).unwrap(),
        );
        let session = Session::new(
            PveTicket::new_unchecked("PVE:testuser@pam:4EEC61E2::sig".to_string()),
            PveCsrfToken::new_unchecked("4EEC61E2:token".to_string()),
        );
        ApiClient::new(connection, session).unwrap()
    }

    async fn mount_healthy_node(mock_server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api2/json/nodes/pve/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "cpu": 0.2,
                    "memory": { "total": 1024, "used": 512 }
                }
            })))
            .mount(mock_server)
            .await;
        for segment in ["qemu", "lxc"] {
            Mock::given(method("GET"))
                .and(path(format!("/api2/json/nodes/pve/{}", segment)))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
                )
                .mount(mock_server)
                .await;
        }
    }

    fn spawn_worker(
        client: Option<ApiClient>,
        first_tick: Duration,
        repoll_delay: Duration,
    ) -> (mpsc::Sender<Command>, mpsc::Receiver<Event>) {
        let node = NodeName::new_unchecked("pve".to_string());
        // A long period isolates the behavior under test from the timer.
        let worker = PollWorker::new(client, node, Duration::from_secs(600))
            .with_timings(first_tick, repoll_delay);
        let (command_tx, command_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::channel(32);
        tokio::spawn(worker.run(command_tx.clone(), command_rx, event_tx));
        (command_tx, event_rx)
    }

    #[tokio::test]
    async fn test_first_tick_publishes_snapshot() {
        let mock_server = MockServer::start().await;
        mount_healthy_node(&mock_server).await;

        let client = create_test_client(&mock_server.uri());
        let (_command_tx, mut events) =
            spawn_worker(Some(client), Duration::from_millis(10), Duration::from_secs(2));

        let event = timeout(RECV_WINDOW, events.recv()).await.unwrap().unwrap();
        assert!(matches!(
            event,
            Event::Snapshot(PollSnapshot::Connected { .. })
        ));
    }

    #[tokio::test]
    async fn test_disconnected_worker_publishes_placeholder() {
        let (_command_tx, mut events) =
            spawn_worker(None, Duration::from_millis(10), Duration::from_secs(2));

        let event = timeout(RECV_WINDOW, events.recv()).await.unwrap().unwrap();
        assert_eq!(event, Event::Snapshot(PollSnapshot::Disconnected));
    }

    #[tokio::test]
    async fn test_failed_tick_publishes_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api2/json/nodes/pve/status"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let (_command_tx, mut events) =
            spawn_worker(Some(client), Duration::from_millis(10), Duration::from_secs(2));

        let quiet = timeout(QUIET_WINDOW, events.recv()).await;
        assert!(quiet.is_err(), "a failed tick must not publish a snapshot");
    }

    #[tokio::test]
    async fn test_action_success_schedules_exactly_one_repoll() {
        let mock_server = MockServer::start().await;
        mount_healthy_node(&mock_server).await;
        Mock::given(method("POST"))
            .and(path("/api2/json/nodes/pve/qemu/101/status/start"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": "UPID:pve:0001:start"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let (command_tx, mut events) = spawn_worker(
            Some(client),
            Duration::from_millis(10),
            Duration::from_millis(50),
        );

        // Drain the startup snapshot.
        let first = timeout(RECV_WINDOW, events.recv()).await.unwrap().unwrap();
        assert!(matches!(first, Event::Snapshot(_)));

        command_tx
            .send(Command::Act {
                kind: GuestKind::Vm,
                vmid: 101,
                action: GuestAction::Start,
            })
            .await
            .unwrap();

        let done = timeout(RECV_WINDOW, events.recv()).await.unwrap().unwrap();
        assert_eq!(
            done,
            Event::ActionDone {
                kind: GuestKind::Vm,
                vmid: 101,
                action: GuestAction::Start,
            }
        );

        // Exactly one deferred re-poll arrives...
        let repoll = timeout(RECV_WINDOW, events.recv()).await.unwrap().unwrap();
        assert!(matches!(repoll, Event::Snapshot(_)));

        // ...and no second one.
        let quiet = timeout(QUIET_WINDOW, events.recv()).await;
        assert!(quiet.is_err(), "only one re-poll may follow an action");
    }

    #[tokio::test]
    async fn test_action_failure_surfaces_error_and_skips_repoll() {
        let mock_server = MockServer::start().await;
        mount_healthy_node(&mock_server).await;
        Mock::given(method("POST"))
            .and(path("/api2/json/nodes/pve/lxc/200/status/stop"))
            .respond_with(ResponseTemplate::new(500).set_body_string("lock timeout"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let (command_tx, mut events) = spawn_worker(
            Some(client),
            Duration::from_millis(10),
            Duration::from_millis(50),
        );

        let first = timeout(RECV_WINDOW, events.recv()).await.unwrap().unwrap();
        assert!(matches!(first, Event::Snapshot(_)));

        command_tx
            .send(Command::Act {
                kind: GuestKind::Container,
                vmid: 200,
                action: GuestAction::Stop,
            })
            .await
            .unwrap();

        let failed = timeout(RECV_WINDOW, events.recv()).await.unwrap().unwrap();
        match failed {
            Event::ActionFailed { vmid, detail, .. } => {
                assert_eq!(vmid, 200);
                assert!(detail.contains("lock timeout"));
            }
            other => panic!("expected ActionFailed, got {:?}", other),
        }

        let quiet = timeout(QUIET_WINDOW, events.recv()).await;
        assert!(quiet.is_err(), "a failed action must not trigger a re-poll");
    }
}
