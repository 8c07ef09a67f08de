//! Timing and notification tests for the match session.
//!
//! All tests run with a paused clock, so the think delay elapses instantly
//! once every task is idle.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tictactoe_promo::{
    Board, DEFAULT_THINK_DELAY, HeuristicOpponent, Mark, MatchController, MatchSession,
    NOTIFY_DEADLINE, NotificationStatus, Notifier, Opponent, OutcomeEvent, Position, RoundStatus,
    SessionHandle, SessionSnapshot, Square,
};
use tokio::time::Instant;

/// Plays a fixed list of squares, then falls back to the heuristic.
struct Scripted {
    moves: VecDeque<usize>,
    fallback: HeuristicOpponent,
}

impl Scripted {
    fn new(moves: &[usize]) -> Self {
        Self {
            moves: moves.iter().copied().collect(),
            fallback: HeuristicOpponent::seeded(5),
        }
    }
}

impl Opponent for Scripted {
    fn select_move(&mut self, board: &Board, me: Mark) -> Option<Position> {
        match self.moves.pop_front() {
            Some(index) => Position::from_index(index),
            None => self.fallback.select_move(board, me),
        }
    }
}

/// Records every event and answers with a fixed result after `latency`.
#[derive(Clone)]
struct RecordingNotifier {
    events: Arc<Mutex<Vec<OutcomeEvent>>>,
    delivered: bool,
    latency: Duration,
}

impl RecordingNotifier {
    fn new(delivered: bool) -> Self {
        Self {
            events: Arc::default(),
            delivered,
            latency: Duration::from_millis(10),
        }
    }

    fn slow(delivered: bool, latency: Duration) -> Self {
        Self {
            latency,
            ..Self::new(delivered)
        }
    }

    fn events(&self) -> Vec<OutcomeEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, event: &OutcomeEvent) -> bool {
        self.events.lock().unwrap().push(event.clone());
        tokio::time::sleep(self.latency).await;
        self.delivered
    }
}

fn spawn(script: &[usize], notifier: &RecordingNotifier) -> SessionHandle {
    MatchSession::spawn(
        MatchController::with_opponent(Scripted::new(script)),
        Arc::new(notifier.clone()),
        DEFAULT_THINK_DELAY,
    )
}

/// Places a mark and waits until the session is ready for the next one.
async fn play(session: &mut SessionHandle, index: usize) -> SessionSnapshot {
    let before = session.snapshot().state.board().occupied_count();
    assert!(session.player_move(index));
    session
        .wait_for(|s| {
            s.state.board().occupied_count() > before && !s.state.computer_thinking()
        })
        .await
        .expect("session running")
}

#[tokio::test(start_paused = true)]
async fn test_computer_replies_after_think_delay() {
    let notifier = RecordingNotifier::new(true);
    let mut session = spawn(&[], &notifier);

    session.player_move(0);
    let thinking = session
        .wait_for(|s| s.state.computer_thinking())
        .await
        .unwrap();
    assert_eq!(thinking.state.board().occupied_count(), 1);
    assert_eq!(thinking.state.to_move(), Mark::O);
    let started = Instant::now();

    tokio::time::sleep(Duration::from_millis(399)).await;
    assert!(session.snapshot().state.computer_thinking());

    let replied = session
        .wait_for(|s| !s.state.computer_thinking())
        .await
        .unwrap();
    assert!(started.elapsed() >= DEFAULT_THINK_DELAY);
    assert_eq!(replied.state.board().occupied_count(), 2);
    assert_eq!(replied.state.board().get(Position::Center), Square::Occupied(Mark::O));
    assert_eq!(replied.state.to_move(), Mark::X);
}

#[tokio::test(start_paused = true)]
async fn test_moves_while_thinking_are_ignored() {
    let notifier = RecordingNotifier::new(true);
    let mut session = spawn(&[], &notifier);

    session.player_move(0);
    session.player_move(1);
    let snapshot = session
        .wait_for(|s| s.state.board().occupied_count() == 2 && !s.state.computer_thinking())
        .await
        .unwrap();

    assert_eq!(snapshot.state.board().get(Position::TopLeft), Square::Occupied(Mark::X));
    assert_eq!(snapshot.state.board().get(Position::TopCenter), Square::Empty);
}

#[tokio::test(start_paused = true)]
async fn test_new_round_cancels_pending_computer_move() {
    let notifier = RecordingNotifier::new(true);
    let mut session = spawn(&[], &notifier);

    session.player_move(0);
    session.wait_for(|s| s.state.computer_thinking()).await.unwrap();
    session.new_round();
    session
        .wait_for(|s| !s.state.computer_thinking() && s.state.board().occupied_count() == 0)
        .await
        .unwrap();

    tokio::time::sleep(DEFAULT_THINK_DELAY * 3).await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.state.board(), &Board::new());
    assert_eq!(snapshot.state.status(), RoundStatus::Active);
    assert_eq!(snapshot.state.to_move(), Mark::X);
}

#[tokio::test(start_paused = true)]
async fn test_reset_all_cancels_pending_move_and_score() {
    let notifier = RecordingNotifier::new(true);
    let mut session = spawn(&[4, 8], &notifier);
    for index in [0, 1, 2] {
        play(&mut session, index).await;
    }
    assert_eq!(session.snapshot().state.score().player_wins, 1);

    session.new_round();
    session.player_move(6);
    session.wait_for(|s| s.state.computer_thinking()).await.unwrap();
    session.reset_all();
    tokio::time::sleep(DEFAULT_THINK_DELAY * 3).await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.state.board(), &Board::new());
    assert_eq!(snapshot.state.score().rounds(), 0);
    assert_eq!(snapshot.notification, NotificationStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_win_is_notified_with_promo_code() {
    let notifier = RecordingNotifier::new(true);
    let mut session = spawn(&[4, 8], &notifier);

    play(&mut session, 0).await;
    play(&mut session, 1).await;
    let won = play(&mut session, 2).await;

    assert_eq!(won.state.status(), RoundStatus::PlayerWon);
    let code = won.state.promo_code().cloned().expect("winner gets a code");
    assert_eq!(won.notification, NotificationStatus::Sending);

    let delivered = session
        .wait_for(|s| s.notification == NotificationStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(delivered.state, won.state);
    assert_eq!(notifier.events(), vec![OutcomeEvent::Win { promo_code: code }]);
}

#[tokio::test(start_paused = true)]
async fn test_failed_notification_leaves_state_unchanged() {
    let notifier = RecordingNotifier::new(false);
    let mut session = spawn(&[3, 4], &notifier);

    play(&mut session, 0).await;
    play(&mut session, 8).await;
    let lost = play(&mut session, 1).await;
    assert_eq!(lost.state.status(), RoundStatus::ComputerWon);

    let failed = session
        .wait_for(|s| s.notification == NotificationStatus::Failed)
        .await
        .unwrap();
    assert_eq!(failed.state, lost.state);
    assert_eq!(failed.state.score().computer_wins, 1);
    assert_eq!(notifier.events(), vec![OutcomeEvent::Loss]);

    // The session keeps working after a failed delivery.
    session.new_round();
    session
        .wait_for(|s| s.state.status() == RoundStatus::Active)
        .await
        .unwrap();
    let next = play(&mut session, 4).await;
    assert_eq!(next.state.status(), RoundStatus::Active);
}

#[tokio::test(start_paused = true)]
async fn test_new_round_beats_expired_think_timer() {
    let notifier = RecordingNotifier::new(true);
    let mut session = spawn(&[3, 4], &notifier);
    play(&mut session, 0).await;
    play(&mut session, 8).await;

    // The computer's next move would complete the middle row.
    session.player_move(1);
    session
        .wait_for(|s| s.state.computer_thinking() && s.state.board().occupied_count() == 5)
        .await
        .unwrap();

    // Queue the command, then let the timer expire before the session wakes.
    session.new_round();
    tokio::time::advance(DEFAULT_THINK_DELAY * 2).await;

    session
        .wait_for(|s| s.state.board().occupied_count() == 0)
        .await
        .unwrap();
    tokio::time::sleep(DEFAULT_THINK_DELAY * 3).await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.state.board(), &Board::new());
    assert_eq!(snapshot.state.score().rounds(), 0);
    assert_eq!(snapshot.notification, NotificationStatus::Idle);
    assert!(notifier.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_hung_notification_times_out_as_failed() {
    let notifier = RecordingNotifier::slow(true, Duration::from_secs(3600));
    let mut session = spawn(&[3, 4], &notifier);

    play(&mut session, 0).await;
    play(&mut session, 8).await;
    let lost = play(&mut session, 1).await;
    assert_eq!(lost.state.status(), RoundStatus::ComputerWon);
    assert_eq!(lost.notification, NotificationStatus::Sending);
    let sent_at = Instant::now();

    let failed = session
        .wait_for(|s| s.notification == NotificationStatus::Failed)
        .await
        .unwrap();
    assert!(sent_at.elapsed() >= NOTIFY_DEADLINE);
    assert!(sent_at.elapsed() < Duration::from_secs(3600));
    assert_eq!(failed.state, lost.state);
    assert_eq!(notifier.events(), vec![OutcomeEvent::Loss]);
}

#[tokio::test(start_paused = true)]
async fn test_draw_is_not_notified() {
    let notifier = RecordingNotifier::new(true);
    let mut session = spawn(&[4, 1, 6, 5], &notifier);

    for index in [0, 2, 7, 3] {
        play(&mut session, index).await;
    }
    let last = play(&mut session, 8).await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(last.state.status(), RoundStatus::Drawn);
    assert_eq!(session.snapshot().notification, NotificationStatus::Idle);
    assert!(notifier.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_delivery_from_previous_round_is_ignored() {
    let notifier = RecordingNotifier::slow(true, Duration::from_secs(5));
    let mut session = spawn(&[4, 8], &notifier);
    for index in [0, 1, 2] {
        play(&mut session, index).await;
    }
    assert_eq!(session.snapshot().notification, NotificationStatus::Sending);

    session.new_round();
    session
        .wait_for(|s| s.state.status() == RoundStatus::Active)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(session.snapshot().notification, NotificationStatus::Idle);
    assert_eq!(notifier.events().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_session_stops_when_handles_dropped() {
    let notifier = RecordingNotifier::new(true);
    let session = spawn(&[], &notifier);
    let mut updates = session.subscribe();

    drop(session);

    assert!(updates.changed().await.is_err());
}
