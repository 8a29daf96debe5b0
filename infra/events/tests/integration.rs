use rhub_event_bus::{EventBus, EventBusError, EventReceiverExt};

#[derive(Clone, Debug, PartialEq)]
struct TestEvent(u64);

#[derive(Clone, Debug, PartialEq)]
struct QueueJob(u64);

#[tokio::test]
async fn broadcast_delivers_to_every_subscriber() {
    let bus = EventBus::new();
    let mut first = bus.subscribe::<TestEvent>().unwrap();
    let mut second = bus.subscribe::<TestEvent>().unwrap();

    let delivered = bus.publish(TestEvent(42)).unwrap();
    assert_eq!(delivered, 2);

    assert_eq!(*first.recv_event().await.unwrap(), TestEvent(42));
    assert_eq!(*second.recv_event().await.unwrap(), TestEvent(42));
}

#[tokio::test]
async fn publish_without_subscribers_is_dropped() {
    let bus = EventBus::new();
    assert_eq!(bus.publish(TestEvent(1)).unwrap(), 0);
}

#[tokio::test]
async fn mpsc_queues_until_the_consumer_drains() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe_mpsc::<QueueJob>(8).unwrap();

    bus.publish_mpsc(QueueJob(1)).unwrap();
    bus.publish_mpsc(QueueJob(2)).unwrap();

    assert_eq!(*rx.recv_event().await.unwrap(), QueueJob(1));
    assert_eq!(*rx.recv_event().await.unwrap(), QueueJob(2));
}

#[tokio::test]
async fn mpsc_receiver_can_only_be_taken_once() {
    let bus = EventBus::new();
    let _rx = bus.subscribe_mpsc::<QueueJob>(8).unwrap();
    assert!(matches!(
        bus.subscribe_mpsc::<QueueJob>(8),
        Err(EventBusError::ReceiverTaken { .. })
    ));
}

#[tokio::test]
async fn bounded_queue_rejects_overflow() {
    let bus = EventBus::new();
    let _rx = bus.subscribe_mpsc::<QueueJob>(1).unwrap();

    bus.publish_mpsc(QueueJob(1)).unwrap();
    assert!(matches!(bus.publish_mpsc(QueueJob(2)), Err(EventBusError::ChannelFull { .. })));
}

#[tokio::test]
async fn kinds_do_not_mix_for_one_event_type() {
    let bus = EventBus::new();
    let _rx = bus.subscribe::<TestEvent>().unwrap();
    assert!(matches!(bus.publish_mpsc(TestEvent(1)), Err(EventBusError::KindMismatch { .. })));
}

#[tokio::test]
async fn lagged_broadcast_receiver_recovers() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe_with_capacity::<TestEvent>(2).unwrap();

    for i in 0..100 {
        bus.publish(TestEvent(i)).unwrap();
    }

    let first = rx.recv_event().await.expect("should recover after lag");
    assert!(first.0 >= 98, "expected the fresh tail of the buffer, got {}", first.0);
}

#[tokio::test]
async fn shutdown_closes_all_channels() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<TestEvent>().unwrap();
    assert_eq!(bus.shutdown(), 1);
    assert!(rx.recv_event().await.is_none());
}
