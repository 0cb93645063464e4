//! Event registry behaviour seen through the public API.

use std::sync::{Arc, Mutex};

use evoke::{EventBus, Handler, HandlerError};
use proptest::prelude::*;
use serde_json::{Value, json};

type Calls = Arc<Mutex<Vec<(String, Vec<Value>)>>>;

fn recorder(name: &str, calls: &Calls) -> Handler {
    let name = name.to_string();
    let calls = Arc::clone(calls);
    Handler::infallible(move |args| {
        calls.lock().unwrap().push((name.clone(), args.to_vec()));
    })
}

#[test]
fn handlers_run_in_subscription_order_with_bound_argument() {
    let bus = EventBus::new();
    let calls: Calls = Arc::default();
    let a = recorder("a", &calls);
    let b = recorder("b", &calls);

    bus.subscribe("x", &a, None);
    bus.subscribe("x", &b, Some(json!("bound")));

    assert_eq!(bus.publish("x", &[json!(1), json!(2)]).unwrap(), 2);
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            ("a".to_string(), vec![json!(1), json!(2)]),
            ("b".to_string(), vec![json!(1), json!(2), json!("bound")]),
        ]
    );
}

#[test]
fn subscribing_during_publish_waits_for_the_next_one() {
    let bus = EventBus::new();
    let calls: Calls = Arc::default();
    let late = recorder("late", &calls);

    let registrar = {
        let bus = bus.clone();
        let late = late.clone();
        Handler::infallible(move |_| bus.subscribe("x", &late, None))
    };
    bus.subscribe("x", &registrar, None);

    assert_eq!(bus.publish("x", &[]).unwrap(), 1);
    assert!(calls.lock().unwrap().is_empty());

    assert_eq!(bus.publish("x", &[]).unwrap(), 2);
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[test]
fn unknown_handler_unsubscribe_is_noop() {
    let bus = EventBus::new();
    let calls: Calls = Arc::default();
    let known = recorder("known", &calls);
    let stranger = recorder("stranger", &calls);

    bus.subscribe("x", &known, None);
    bus.unsubscribe("x", &stranger);
    bus.unsubscribe("never-used", &stranger);

    assert_eq!(bus.subscriber_count("x"), 1);
    assert_eq!(bus.event_names(), vec!["x".to_string()]);
}

#[test]
fn failing_and_panicking_handlers_do_not_stop_delivery() {
    let bus = EventBus::new();
    let calls: Calls = Arc::default();
    let fails = Handler::new(|_| Err(HandlerError::failed("nope")));
    let panics = Handler::infallible(|_| panic!("kaboom"));
    let last = recorder("last", &calls);

    bus.subscribe("x", &fails, None);
    bus.subscribe("x", &panics, None);
    bus.subscribe("x", &last, None);

    let err = bus.publish("x", &[json!("go")]).unwrap_err();
    assert_eq!(err.as_label(), "publish_subscriber_failed");

    let faults = err.faults();
    assert_eq!(faults.len(), 2);
    assert_eq!(faults[0].index, 0);
    assert_eq!(faults[0].error.as_label(), "handler_failed");
    assert_eq!(faults[1].index, 1);
    assert_eq!(
        faults[1].error,
        HandlerError::Panicked {
            info: "kaboom".into()
        }
    );
    assert_eq!(calls.lock().unwrap().len(), 1);

    // Faulty handlers stay subscribed.
    assert_eq!(bus.subscriber_count("x"), 3);
}

#[test]
fn emitter_chains_events() {
    let bus = EventBus::new();
    let calls: Calls = Arc::default();
    let sink = recorder("sink", &calls);

    bus.subscribe("loaded", &sink, None);
    let forward = bus.emitter("loaded").to_handler();
    bus.subscribe("fetched", &forward, Some(json!("via-fetched")));

    assert_eq!(bus.emitter("fetched").emit(&[json!(7)]).unwrap(), 1);
    assert_eq!(
        *calls.lock().unwrap(),
        vec![("sink".to_string(), vec![json!(7), json!("via-fetched")])]
    );
}

proptest! {
    #[test]
    fn repeated_subscribe_keeps_one_subscription(
        ops in proptest::collection::vec((0usize..3, any::<bool>()), 0..40),
    ) {
        let bus = EventBus::new();
        let handlers: Vec<Handler> = (0..3).map(|_| Handler::infallible(|_| {})).collect();
        let mut model = [false; 3];

        for (i, subscribe) in ops {
            if subscribe {
                bus.subscribe("e", &handlers[i], None);
            } else {
                bus.unsubscribe("e", &handlers[i]);
            }
            model[i] = subscribe;
        }

        let expected = model.iter().filter(|&&on| on).count();
        prop_assert_eq!(bus.subscriber_count("e"), expected);
        for (i, h) in handlers.iter().enumerate() {
            prop_assert_eq!(bus.is_subscribed("e", h), model[i]);
        }
        prop_assert_eq!(bus.publish("e", &[]).unwrap(), expected);
    }
}
