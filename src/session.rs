//! Async driver for one match.
//!
//! A [`MatchSession`] runs as a single tokio task that owns the
//! [`MatchController`]. Front ends talk to it through a [`SessionHandle`]:
//! commands go in over an mpsc channel, snapshots come out over a watch
//! channel. The task also owns the computer's think timer and the
//! bookkeeping for in-flight notifications.

use crate::notifier::Notifier;
use derive_more::Display;
use serde::Serialize;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tictactoe_engine::{MatchController, MatchState, Opponent, OutcomeEvent, TurnResult};
use tokio::sync::{mpsc, watch};
use tokio::time::Sleep;
use tracing::{debug, info, instrument, warn};

/// Default pause before the computer replies.
pub const DEFAULT_THINK_DELAY: Duration = Duration::from_millis(400);

/// A notification still in flight after this long counts as failed.
pub const NOTIFY_DEADLINE: Duration = Duration::from_secs(10);

/// Requests accepted by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Player places a mark at index 0-8.
    PlayerMove(usize),
    /// Clear the board, keep the score.
    NewRound,
    /// Clear the board and the score.
    ResetAll,
}

/// Progress of the notification for the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    /// Nothing sent this round.
    #[default]
    #[display("idle")]
    Idle,
    /// Request in flight.
    #[display("sending")]
    Sending,
    /// Relay accepted the notification.
    #[display("delivered")]
    Delivered,
    /// Delivery failed. The game is unaffected.
    #[display("failed")]
    Failed,
}

/// What observers see after every transition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionSnapshot {
    /// Match state.
    pub state: MatchState,
    /// Notification progress for the current round.
    pub notification: NotificationStatus,
}

/// Result of a spawned notification, tagged with the round that sent it.
#[derive(Debug)]
struct Delivery {
    round: u64,
    delivered: bool,
}

/// Cloneable front-end handle to a running session.
///
/// The session shuts down once every handle is dropped.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Queues a command. Returns `false` if the session has stopped.
    pub fn send(&self, command: SessionCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Queues a player move at `index` (0-8).
    pub fn player_move(&self, index: usize) -> bool {
        self.send(SessionCommand::PlayerMove(index))
    }

    /// Queues a new round.
    pub fn new_round(&self) -> bool {
        self.send(SessionCommand::NewRound)
    }

    /// Queues a full reset.
    pub fn reset_all(&self) -> bool {
        self.send(SessionCommand::ResetAll)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Fresh receiver for snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Waits until a snapshot satisfies `predicate` and returns it.
    ///
    /// Returns `None` if the session stops first.
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> Option<SessionSnapshot> {
        self.snapshots
            .wait_for(predicate)
            .await
            .ok()
            .map(|snapshot| snapshot.clone())
    }
}

/// The task that owns a match.
pub struct MatchSession<O: Opponent> {
    controller: MatchController<O>,
    notifier: Arc<dyn Notifier>,
    think_delay: Duration,
    /// Bumped by every new round; stale deliveries carry an older value.
    round: u64,
    notification: NotificationStatus,
    snapshots: watch::Sender<SessionSnapshot>,
    deliveries: mpsc::UnboundedSender<Delivery>,
}

impl<O: Opponent + Send + 'static> MatchSession<O> {
    /// Starts the session task and returns a handle to it.
    #[instrument(skip(controller, notifier), fields(think_ms = think_delay.as_millis() as u64))]
    pub fn spawn(
        controller: MatchController<O>,
        notifier: Arc<dyn Notifier>,
        think_delay: Duration,
    ) -> SessionHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (delivery_tx, delivery_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(SessionSnapshot {
            state: controller.state().clone(),
            notification: NotificationStatus::Idle,
        });

        let session = Self {
            controller,
            notifier,
            think_delay,
            round: 0,
            notification: NotificationStatus::Idle,
            snapshots: snapshot_tx,
            deliveries: delivery_tx,
        };
        tokio::spawn(session.run(command_rx, delivery_rx));
        info!("Match session started");

        SessionHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
        mut deliveries: mpsc::UnboundedReceiver<Delivery>,
    ) {
        let mut pending: Option<Pin<Box<Sleep>>> = None;

        loop {
            // Commands first: a NewRound queued alongside an expired timer
            // must cancel the computer move rather than follow it.
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(command) => self.handle(command, &mut pending),
                    None => break,
                },
                () = think_timer(&mut pending) => {
                    pending = None;
                    self.computer_turn(&mut pending);
                }
                Some(delivery) = deliveries.recv() => self.delivered(delivery),
            }
        }

        info!("All handles dropped, match session stopped");
    }

    fn handle(&mut self, command: SessionCommand, pending: &mut Option<Pin<Box<Sleep>>>) {
        debug!(?command, "Handling command");
        match command {
            SessionCommand::PlayerMove(index) => {
                let result = self.controller.player_move(index);
                self.after_turn(result, pending);
            }
            SessionCommand::NewRound => {
                *pending = None;
                self.controller.start_new_round();
                self.begin_round();
            }
            SessionCommand::ResetAll => {
                *pending = None;
                self.controller.reset_all();
                self.begin_round();
            }
        }
    }

    fn computer_turn(&mut self, pending: &mut Option<Pin<Box<Sleep>>>) {
        let result = self.controller.computer_move();
        self.after_turn(result, pending);
    }

    fn after_turn(&mut self, result: TurnResult, pending: &mut Option<Pin<Box<Sleep>>>) {
        match result {
            TurnResult::Ignored => return,
            TurnResult::ComputerToMove => {
                *pending = Some(Box::pin(tokio::time::sleep(self.think_delay)));
            }
            TurnResult::PlayerToMove => {}
            TurnResult::RoundOver { status, event } => {
                info!(%status, round = self.round, "Round finished");
                if let Some(event) = event {
                    self.dispatch(event);
                }
            }
        }
        self.publish();
    }

    fn begin_round(&mut self) {
        self.round += 1;
        self.notification = NotificationStatus::Idle;
        self.publish();
    }

    /// Sends `event` in the background; the result comes back as a [`Delivery`].
    fn dispatch(&mut self, event: OutcomeEvent) {
        self.notification = NotificationStatus::Sending;
        let notifier = Arc::clone(&self.notifier);
        let deliveries = self.deliveries.clone();
        let round = self.round;
        tokio::spawn(async move {
            let attempt = tokio::time::timeout(NOTIFY_DEADLINE, notifier.notify(&event));
            let delivered = match attempt.await {
                Ok(delivered) => delivered,
                Err(_) => {
                    warn!(round, "Notification still pending at deadline, treating as failed");
                    false
                }
            };
            // Receiver is gone once the session stops; nothing left to update.
            let _ = deliveries.send(Delivery { round, delivered });
        });
    }

    fn delivered(&mut self, delivery: Delivery) {
        if delivery.round != self.round {
            debug!(
                round = delivery.round,
                current = self.round,
                "Ignoring delivery result from an earlier round"
            );
            return;
        }
        self.notification = if delivery.delivered {
            NotificationStatus::Delivered
        } else {
            warn!(round = delivery.round, "Outcome notification failed");
            NotificationStatus::Failed
        };
        self.publish();
    }

    fn publish(&self) {
        self.snapshots.send_replace(SessionSnapshot {
            state: self.controller.state().clone(),
            notification: self.notification,
        });
    }
}

/// Resolves when the pending computer move is due; never resolves if none is.
async fn think_timer(pending: &mut Option<Pin<Box<Sleep>>>) {
    match pending {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}
