use std::cell::RefCell;
use std::rc::Rc;

use super::*;

type Log = Rc<RefCell<Vec<(&'static str, TilePos)>>>;

fn recorder(log: &Log, tag: &'static str) -> Callback {
    let log = Rc::clone(log);
    Callback::new(move |tile| log.borrow_mut().push((tag, tile)))
}

fn emit(listeners: &Listeners<Callback>, tile: TilePos) {
    emit_tile_clicked(&listeners.tile_clicked_snapshot(), tile);
}

fn subscribed(listeners: &Listeners<Callback>) -> usize {
    listeners.tile_clicked_snapshot().len()
}

// =============================================================
// EventKind
// =============================================================

#[test]
fn event_kind_parses_tile_clicked() {
    assert_eq!("tileClicked".parse::<EventKind>().unwrap(), EventKind::TileClicked);
}

#[test]
fn event_kind_rejects_unknown_name() {
    let err = "tileclicked".parse::<EventKind>().unwrap_err();
    assert!(matches!(err, ViewerError::UnknownEvent(name) if name == "tileclicked"));
}

// =============================================================
// Callback identity
// =============================================================

#[test]
fn callback_clone_is_same_listener() {
    let a = Callback::new(|_| {});
    let b = a.clone();
    assert_eq!(a, b);
}

#[test]
fn separate_callbacks_differ() {
    let a = Callback::new(|_| {});
    let b = Callback::new(|_| {});
    assert_ne!(a, b);
}

// =============================================================
// Subscribe / emit
// =============================================================

#[test]
fn emit_with_no_listeners_is_noop() {
    let listeners: Listeners<Callback> = Listeners::new();
    emit(&listeners, TilePos::new(1, 2));
    assert_eq!(subscribed(&listeners), 0);
}

#[test]
fn emit_calls_in_subscription_order() {
    let log: Log = Rc::default();
    let mut listeners = Listeners::new();
    listeners.subscribe(EventKind::TileClicked, recorder(&log, "first"));
    listeners.subscribe(EventKind::TileClicked, recorder(&log, "second"));
    emit(&listeners, TilePos::new(3, 4));
    assert_eq!(
        *log.borrow(),
        vec![("first", TilePos::new(3, 4)), ("second", TilePos::new(3, 4))]
    );
}

#[test]
fn unsubscribe_removes_exact_listener() {
    let log: Log = Rc::default();
    let a = recorder(&log, "a");
    let b = recorder(&log, "b");
    let mut listeners = Listeners::new();
    listeners.subscribe(EventKind::TileClicked, a.clone());
    listeners.subscribe(EventKind::TileClicked, b);
    listeners.unsubscribe(EventKind::TileClicked, &a);
    emit(&listeners, TilePos::new(0, 0));
    assert_eq!(*log.borrow(), vec![("b", TilePos::new(0, 0))]);
}

#[test]
fn unsubscribe_twice_is_idempotent() {
    let log: Log = Rc::default();
    let a = recorder(&log, "a");
    let b = recorder(&log, "b");
    let mut listeners = Listeners::new();
    listeners.subscribe(EventKind::TileClicked, a.clone());
    listeners.subscribe(EventKind::TileClicked, b);
    listeners.unsubscribe(EventKind::TileClicked, &a);
    listeners.unsubscribe(EventKind::TileClicked, &a);
    assert_eq!(subscribed(&listeners), 1);
    emit(&listeners, TilePos::new(2, 2));
    assert_eq!(*log.borrow(), vec![("b", TilePos::new(2, 2))]);
}

#[test]
fn unsubscribe_never_subscribed_keeps_others() {
    let log: Log = Rc::default();
    let mut listeners = Listeners::new();
    listeners.subscribe(EventKind::TileClicked, recorder(&log, "a"));
    listeners.unsubscribe(EventKind::TileClicked, &recorder(&log, "stranger"));
    assert_eq!(subscribed(&listeners), 1);
}

#[test]
fn duplicate_subscription_removed_one_at_a_time() {
    let log: Log = Rc::default();
    let a = recorder(&log, "a");
    let mut listeners = Listeners::new();
    listeners.subscribe(EventKind::TileClicked, a.clone());
    listeners.subscribe(EventKind::TileClicked, a.clone());
    listeners.unsubscribe(EventKind::TileClicked, &a);
    emit(&listeners, TilePos::new(1, 1));
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn snapshot_survives_unsubscribe_during_emit() {
    let log: Log = Rc::default();
    let listeners: Rc<RefCell<Listeners<Callback>>> = Rc::default();

    let remover_slot: Rc<RefCell<Option<Callback>>> = Rc::default();
    let remover = {
        let listeners = Rc::clone(&listeners);
        let slot = Rc::clone(&remover_slot);
        let log = Rc::clone(&log);
        Callback::new(move |tile| {
            log.borrow_mut().push(("remover", tile));
            if let Some(me) = slot.borrow().as_ref() {
                listeners.borrow_mut().unsubscribe(EventKind::TileClicked, me);
            }
        })
    };
    *remover_slot.borrow_mut() = Some(remover.clone());

    listeners.borrow_mut().subscribe(EventKind::TileClicked, remover);
    listeners.borrow_mut().subscribe(EventKind::TileClicked, recorder(&log, "after"));

    let snapshot = listeners.borrow().tile_clicked_snapshot();
    emit_tile_clicked(&snapshot, TilePos::new(5, 5));

    assert_eq!(
        *log.borrow(),
        vec![("remover", TilePos::new(5, 5)), ("after", TilePos::new(5, 5))]
    );
    assert_eq!(subscribed(&listeners.borrow()), 1);
}
