use std::collections::VecDeque;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use api::balance::AccountHandle;
use api::balance::BalanceFeed;
use api::balance::BalanceState;
use api::balance::Clock;
use api::balance::Entropy;
use api::balance::InMemoryAccount;
use api::balance::PlayerAccount;
use api::FeedConfig;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::watch;

/// Replays fixed draws, then repeats the fallbacks forever.
struct Scripted {
    units: VecDeque<f64>,
    deltas: VecDeque<f64>,
    fallback_unit: f64,
    fallback_delta: f64,
}

impl Scripted {
    /// Every coin flip succeeds and every delta is `delta`.
    fn always(delta: f64) -> Box<Self> {
        Box::new(Self {
            units: VecDeque::new(),
            deltas: VecDeque::new(),
            fallback_unit: 0.0,
            fallback_delta: delta,
        })
    }

    fn units(units: &[f64]) -> Box<Self> {
        Box::new(Self {
            units: units.iter().copied().collect(),
            deltas: VecDeque::new(),
            fallback_unit: 0.99,
            fallback_delta: 0.0,
        })
    }
}

impl Entropy for Scripted {
    fn next_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(self.fallback_unit)
    }

    fn next_delta(&mut self, _span: f64) -> f64 {
        self.deltas.pop_front().unwrap_or(self.fallback_delta)
    }
}

struct TickingClock(Mutex<DateTime<Utc>>);

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut t = self.0.lock().unwrap();
        *t += chrono::Duration::milliseconds(1);
        *t
    }
}

fn clock() -> Arc<dyn Clock> {
    Arc::new(TickingClock(Mutex::new(DateTime::UNIX_EPOCH)))
}

/// An in-memory account that counts mutation calls.
struct CountingAccount {
    inner: InMemoryAccount,
    applied: AtomicUsize,
}

impl CountingAccount {
    fn new(balance: Option<f64>) -> (Arc<Self>, AccountHandle) {
        let account = Arc::new(Self {
            inner: InMemoryAccount::new(balance),
            applied: AtomicUsize::new(0),
        });
        let handle = AccountHandle::from(account.clone() as Arc<dyn PlayerAccount>);
        (account, handle)
    }

    fn applied(&self) -> usize {
        self.applied.load(Ordering::SeqCst)
    }
}

impl PlayerAccount for CountingAccount {
    fn balance(&self) -> Option<f64> {
        self.inner.balance()
    }

    fn apply_balance_delta(&self, delta: f64) {
        self.applied.fetch_add(1, Ordering::SeqCst);
        self.inner.apply_balance_delta(delta);
    }

    fn watch_balance(&self) -> watch::Receiver<Option<f64>> {
        self.inner.watch_balance()
    }
}

async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

async fn advance(by: Duration) {
    tokio::time::advance(by).await;
    settle().await;
}

const TICK: Duration = Duration::from_secs(5);

#[tokio::test(start_paused = true)]
async fn binds_to_starting_balance_and_follows_external_writes() {
    let (account, handle) = CountingAccount::new(Some(100.0));
    let (feed, driver) = BalanceFeed::bind_with(
        "p1",
        Some(handle),
        FeedConfig::default(),
        Scripted::always(3.0),
        clock(),
    );
    tokio::spawn(driver.expect("bound feed has a driver"));
    settle().await;

    assert_eq!(feed.state().balance, 100.0);
    assert!(feed.state().is_connected);

    feed.force_update();
    assert_eq!(feed.state().balance, 103.0);

    account.inner.set_balance(Some(42.0));
    settle().await;
    assert_eq!(feed.state().balance, 42.0);
}

#[tokio::test(start_paused = true)]
async fn force_update_applies_pinned_delta() {
    let (account, handle) = CountingAccount::new(Some(10.0));
    let (feed, _driver) = BalanceFeed::bind_with(
        "p1",
        Some(handle),
        FeedConfig::default(),
        Scripted::always(3.0),
        clock(),
    );

    let before = feed.state().last_update.expect("bound feed is stamped");
    feed.force_update();

    let after = feed.state();
    assert_eq!(after.balance, 13.0);
    assert!(after.last_update.expect("stamped") > before);
    assert_eq!(account.balance(), Some(13.0));
    assert_eq!(account.applied(), 1);
}

#[tokio::test(start_paused = true)]
async fn timers_follow_their_cadence() {
    let (account, handle) = CountingAccount::new(Some(50.0));
    let (feed, driver) = BalanceFeed::bind_with(
        "p1",
        Some(handle),
        FeedConfig::default(),
        Scripted::always(1.0),
        clock(),
    );
    let mut states = feed.subscribe();
    tokio::spawn(driver.expect("driver"));
    settle().await;

    advance(Duration::from_millis(4_999)).await;
    assert_eq!(account.applied(), 0);
    assert!(!states.has_changed().unwrap());

    for n in 1..=6 {
        advance(if n == 1 { Duration::from_millis(1) } else { TICK }).await;
        assert_eq!(account.applied(), n);
    }
    assert_eq!(feed.state().balance, 56.0);
    assert!(states.has_changed().unwrap());
    assert_eq!(states.borrow_and_update().balance, 56.0);
}

#[tokio::test(start_paused = true)]
async fn liveness_flaps_without_debounce() {
    let config = FeedConfig {
        update_interval: Duration::from_secs(3600),
        ..FeedConfig::default()
    };
    let (_account, handle) = CountingAccount::new(Some(1.0));
    let (feed, driver) = BalanceFeed::bind_with(
        "p1",
        Some(handle),
        config,
        Scripted::units(&[0.95, 0.1, 0.97]),
        clock(),
    );
    tokio::spawn(driver.expect("driver"));
    settle().await;

    let mut seen = Vec::new();
    for _ in 0..3 {
        advance(config.connection_interval).await;
        seen.push(feed.state().is_connected);
    }
    assert_eq!(seen, vec![false, true, false]);
}

#[tokio::test(start_paused = true)]
async fn balance_stays_non_negative_under_timer_updates() {
    let (account, handle) = CountingAccount::new(Some(0.0));
    let (feed, driver) = BalanceFeed::bind_with(
        "p1",
        Some(handle),
        FeedConfig::default(),
        Scripted::always(-5.0),
        clock(),
    );
    tokio::spawn(driver.expect("driver"));
    settle().await;

    for _ in 0..4 {
        advance(TICK).await;
        assert_eq!(feed.state().balance, 0.0);
        assert_eq!(account.balance(), Some(0.0));
    }
}

#[tokio::test(start_paused = true)]
async fn teardown_stops_all_timer_work() {
    let (account, handle) = CountingAccount::new(Some(50.0));
    let (feed, driver) = BalanceFeed::bind_with(
        "p1",
        Some(handle),
        FeedConfig::default(),
        Scripted::always(1.0),
        clock(),
    );
    let task = tokio::spawn(driver.expect("driver"));
    settle().await;

    advance(TICK).await;
    assert_eq!(account.applied(), 1);
    assert!(feed.is_live());

    feed.shutdown();
    feed.shutdown();
    settle().await;
    assert!(task.is_finished());
    assert!(!feed.is_live());

    let frozen = feed.state();
    for _ in 0..24 {
        advance(TICK).await;
    }
    assert_eq!(account.applied(), 1);
    assert_eq!(feed.state(), frozen);
    assert!(feed.force_update().is_inert());
    assert_eq!(account.applied(), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_feed_cancels_its_driver() {
    let (account, handle) = CountingAccount::new(Some(50.0));
    let (feed, driver) = BalanceFeed::bind_with(
        "p1",
        Some(handle),
        FeedConfig::default(),
        Scripted::always(1.0),
        clock(),
    );
    let task = tokio::spawn(driver.expect("driver"));
    settle().await;

    drop(feed);
    settle().await;
    assert!(task.is_finished());

    advance(TICK * 4).await;
    assert_eq!(account.applied(), 0);
}

#[tokio::test(start_paused = true)]
async fn unbound_feed_is_inert() {
    let (feed, driver) = BalanceFeed::bind("nobody", None, FeedConfig::default());
    assert!(driver.is_none());
    assert!(!feed.is_live());
    assert_eq!(feed.state(), BalanceState::INERT);
    assert!(feed.force_update().is_inert());
    assert_eq!(feed.state().balance, 0.0);
}

/// An account whose change channel is owned by the test, so the test can
/// make the player disappear.
struct DetachedAccount {
    rx: watch::Receiver<Option<f64>>,
}

impl PlayerAccount for DetachedAccount {
    fn balance(&self) -> Option<f64> {
        *self.rx.borrow()
    }

    fn apply_balance_delta(&self, _delta: f64) {}

    fn watch_balance(&self) -> watch::Receiver<Option<f64>> {
        self.rx.clone()
    }
}

#[tokio::test(start_paused = true)]
async fn driver_stops_when_player_disappears() {
    let (tx, rx) = watch::channel(Some(7.0));
    let handle = AccountHandle::new(DetachedAccount { rx });
    let (feed, driver) = BalanceFeed::bind_with(
        "p1",
        Some(handle),
        FeedConfig::default(),
        Scripted::always(1.0),
        clock(),
    );
    let task = tokio::spawn(driver.expect("driver"));
    settle().await;

    tx.send_replace(Some(9.0));
    settle().await;
    assert_eq!(feed.state().balance, 9.0);

    drop(tx);
    settle().await;
    assert!(task.is_finished());
    assert_eq!(feed.state(), BalanceState::INERT);
    assert!(!feed.is_live());
    assert!(feed.force_update().is_inert());
    assert_eq!(feed.state(), BalanceState::INERT);
}

#[tokio::test(start_paused = true)]
async fn seeded_feeds_draw_identical_deltas() {
    let config = FeedConfig {
        seed: Some(7),
        ..FeedConfig::default()
    };
    let balances: Vec<f64> = (0..2)
        .map(|_| {
            let account = AccountHandle::new(InMemoryAccount::new(Some(100.0)));
            let (feed, _driver) = BalanceFeed::bind("p1", Some(account), config);
            feed.force_update();
            feed.force_update();
            feed.state().balance
        })
        .collect();
    assert_eq!(balances[0], balances[1]);
    assert!((90.0..=110.0).contains(&balances[0]));
}
