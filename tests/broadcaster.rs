use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::StreamExt;
use replaycast::{Broadcaster, BroadcasterConfig, RetentionPolicy, Subscription, TryRecvError};

fn drain<T>(sub: &mut Subscription<T>) -> Vec<T> {
    std::iter::from_fn(|| sub.try_recv().ok()).collect()
}

#[tokio::test]
async fn replay_delivers_last_k_values_in_order() {
    for k in 1..=4usize {
        let b = Broadcaster::new(RetentionPolicy::RetainNewest(k));
        for v in 1..=10u32 {
            b.publish(v);
        }
        let mut sub = b.subscribe();
        let mut got = Vec::new();
        for _ in 0..k {
            got.push(sub.next().await.expect("replayed value"));
        }
        let expected: Vec<u32> = (11 - k as u32..=10).collect();
        assert_eq!(got, expected, "k={k}");
        assert_eq!(sub.try_recv(), Err(TryRecvError::Empty));
    }
}

#[tokio::test]
async fn zero_retention_only_delivers_live_values() {
    let b = Broadcaster::new(RetentionPolicy::RetainNewest(0));
    let mut sub = b.subscribe();

    let idle = tokio::time::timeout(Duration::from_millis(20), sub.next()).await;
    assert!(idle.is_err(), "nothing should arrive before the first publish");

    b.publish("x");
    assert_eq!(sub.next().await, Some("x"));
    assert_eq!(sub.try_recv(), Err(TryRecvError::Empty));

    let mut late = b.subscribe();
    assert_eq!(late.try_recv(), Err(TryRecvError::Empty));
    assert_eq!(b.last_value(), None);
}

#[tokio::test]
async fn example_scenario_newest_two() {
    let b = Broadcaster::new(RetentionPolicy::RetainNewest(2));
    b.publish("a");
    b.publish("b");
    b.publish("c");

    let mut sub = b.subscribe();
    assert_eq!(sub.next().await, Some("b"));
    assert_eq!(sub.next().await, Some("c"));

    b.publish("d");
    assert_eq!(sub.next().await, Some("d"));
    assert_eq!(b.last_value(), Some("d"));
}

#[tokio::test]
async fn subscribers_are_independent() {
    let b = Broadcaster::new(RetentionPolicy::RetainNewest(1));
    let mut first = b.subscribe();
    b.publish(1u32);
    b.publish(2);
    let mut second = b.subscribe();
    b.publish(3);

    // `second` is consumed eagerly, `first` not at all until the end.
    assert_eq!(drain(&mut second), vec![2, 3]);
    let third = b.subscribe();
    drop(third);
    b.publish(4);
    assert_eq!(drain(&mut second), vec![4]);
    assert_eq!(drain(&mut first), vec![1, 2, 3, 4]);
}

#[test]
fn publish_does_not_wait_for_stalled_subscriber() {
    let b = Broadcaster::new(RetentionPolicy::RetainNewest(0));
    let stalled = b.subscribe();

    let start = Instant::now();
    for v in 0..200_000u64 {
        b.publish(v);
    }
    assert!(
        start.elapsed() < Duration::from_secs(10),
        "publishing into an undrained subscription took {:?}",
        start.elapsed()
    );
    assert_eq!(stalled.pending(), 200_000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancelled_consumer_is_eventually_unregistered() {
    let b = Broadcaster::<u32>::new(RetentionPolicy::RetainNewest(0));
    let mut sub = b.subscribe();
    let consumer = tokio::spawn(async move {
        while sub.next().await.is_some() {}
    });

    b.publish(1);
    assert!(b.has_subscribers());
    consumer.abort();
    let _ = consumer.await;

    let mut steps = 0;
    while b.has_subscribers() {
        steps += 1;
        assert!(steps < 1_000, "subscription was never cleaned up");
        tokio::task::yield_now().await;
    }
    for v in 0..100 {
        b.publish(v);
    }
    assert_eq!(b.subscriber_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn teardown_ends_every_subscription() {
    let b = Broadcaster::<u32>::new(RetentionPolicy::events());
    let consumers: Vec<_> = (0..8)
        .map(|_| {
            let sub = b.subscribe();
            tokio::spawn(async move { sub.count().await })
        })
        .collect();

    for v in 0..10 {
        b.publish(v);
    }
    drop(b);

    for c in consumers {
        let n = tokio::time::timeout(Duration::from_secs(5), c)
            .await
            .expect("consumer blocked after teardown")
            .expect("consumer task panicked");
        assert_eq!(n, 10);
    }
}

#[test]
fn last_value_tracks_retained_tail() {
    let newest = Broadcaster::new(RetentionPolicy::RetainNewest(3));
    let oldest = Broadcaster::new(RetentionPolicy::RetainOldest(3));
    let all = Broadcaster::new(RetentionPolicy::RetainAll);
    for v in 1..=5u32 {
        newest.publish(v);
        oldest.publish(v);
        all.publish(v);
    }
    assert_eq!(newest.last_value(), Some(5));
    assert_eq!(oldest.last_value(), Some(3));
    assert_eq!(all.last_value(), Some(5));
    assert_eq!(all.retained().len(), 5);
}

#[test]
fn concurrent_subscribe_sees_gap_free_history() {
    const N: u64 = 20_000;
    let b = Broadcaster::from_config(
        BroadcasterConfig::default()
            .with_policy(RetentionPolicy::RetainAll)
            .with_label("gap-free"),
        None,
    );

    let producer = {
        let b = b.clone();
        std::thread::spawn(move || {
            for v in 0..N {
                b.publish(v);
            }
        })
    };

    let mut subs = Vec::new();
    for _ in 0..16 {
        subs.push(b.subscribe());
        std::thread::yield_now();
    }
    producer.join().expect("producer panicked");

    for mut sub in subs {
        let got = drain(&mut sub);
        assert_eq!(got.len() as u64, N, "replay + live must cover every value once");
        assert!(got.iter().copied().eq(0..N), "values must be in publish order");
    }
}

#[test]
fn many_producers_keep_per_producer_order() {
    let b = Arc::new(Broadcaster::new(RetentionPolicy::events()));
    let mut sub = b.subscribe();

    let producers: Vec<_> = (0..4u64)
        .map(|p| {
            let b = Arc::clone(&b);
            std::thread::spawn(move || {
                for i in 0..1_000u64 {
                    b.publish((p, i));
                }
            })
        })
        .collect();
    for p in producers {
        p.join().expect("producer panicked");
    }

    let got = drain(&mut sub);
    assert_eq!(got.len(), 4_000);
    for p in 0..4u64 {
        let seq: Vec<u64> = got.iter().filter(|(q, _)| *q == p).map(|(_, i)| *i).collect();
        assert!(seq.iter().copied().eq(0..1_000), "producer {p} out of order");
    }
}

#[tokio::test]
async fn subscribe_after_close_is_empty() {
    let b = Broadcaster::with_initial(RetentionPolicy::latest(), 7u8);
    b.close();
    let sub = b.subscribe();
    assert_eq!(sub.collect::<Vec<_>>().await, Vec::<u8>::new());
    assert_eq!(b.last_value(), Some(7));
}
