use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use super::{BLINK_RATE, Cursor, CursorView};
use crate::event::DirtyHandlers;

const PERIOD: Duration = Duration::from_millis(20);

/// Helper: a cursor with a fast blink and a counter of dirty notifications.
fn counting_cursor() -> (Cursor, Arc<AtomicUsize>) {
    let dirty = Arc::new(DirtyHandlers::new());
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    dirty.add(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    (Cursor::with_period(dirty, PERIOD), count)
}

#[test]
fn starts_hidden() {
    let cursor = Cursor::new(Arc::new(DirtyHandlers::new()));
    assert!(!cursor.is_visible());
    assert!(!cursor.is_blink_on());
    assert_eq!(cursor.period(), BLINK_RATE);
}

#[test]
fn zero_period_is_raised_to_minimum() {
    let cursor = Cursor::with_period(Arc::new(DirtyHandlers::new()), Duration::ZERO);
    assert!(cursor.period() > Duration::ZERO);
}

#[test]
fn show_makes_visible_and_blinks() {
    let (cursor, count) = counting_cursor();
    cursor.show();
    assert!(cursor.is_visible());

    thread::sleep(PERIOD * 6);
    assert!(count.load(Ordering::SeqCst) >= 2, "blink task should notify repeatedly");
    cursor.hide();
}

#[test]
fn hide_stops_notifications() {
    let (cursor, count) = counting_cursor();
    cursor.show();
    thread::sleep(PERIOD * 3);
    cursor.hide();
    assert!(!cursor.is_visible());

    let after_hide = count.load(Ordering::SeqCst);
    thread::sleep(PERIOD * 3);
    assert_eq!(count.load(Ordering::SeqCst), after_hide);
}

#[test]
fn hide_when_hidden_is_noop() {
    let (cursor, count) = counting_cursor();
    cursor.hide();
    cursor.hide();
    assert!(!cursor.is_visible());
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn double_hide_after_show_does_not_block() {
    let (cursor, _count) = counting_cursor();
    cursor.show();
    cursor.hide();
    cursor.hide();
    assert!(!cursor.is_visible());
}

#[test]
fn double_show_runs_a_single_task() {
    let (cursor, count) = counting_cursor();
    cursor.show();
    cursor.show();
    thread::sleep(PERIOD * 2);
    cursor.hide();

    // A leaked second task would keep notifying after hide.
    let after_hide = count.load(Ordering::SeqCst);
    thread::sleep(PERIOD * 3);
    assert_eq!(count.load(Ordering::SeqCst), after_hide);
}

#[test]
fn first_flip_turns_block_on() {
    // Long period: the phase observed is the one set by the first flip.
    let cursor = Cursor::with_period(Arc::new(DirtyHandlers::new()), Duration::from_secs(60));
    cursor.show();
    thread::sleep(Duration::from_millis(50));
    assert!(cursor.is_blink_on());
    cursor.hide();
}

#[test]
fn hide_clears_phase() {
    let cursor = Cursor::with_period(Arc::new(DirtyHandlers::new()), Duration::from_secs(60));
    cursor.show();
    thread::sleep(Duration::from_millis(50));
    cursor.hide();
    assert!(!cursor.is_blink_on());
}

#[test]
fn restart_while_hidden_is_noop() {
    let (cursor, count) = counting_cursor();
    cursor.restart();
    assert!(!cursor.is_visible());
    thread::sleep(PERIOD * 2);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn restart_resets_phase_to_off_then_flips_on() {
    let cursor = Cursor::with_period(Arc::new(DirtyHandlers::new()), Duration::from_secs(60));
    cursor.show();
    thread::sleep(Duration::from_millis(50));
    assert!(cursor.is_blink_on());

    cursor.restart();
    thread::sleep(Duration::from_millis(50));
    // Fresh task: Off at start, flipped On by its first iteration.
    assert!(cursor.is_visible());
    assert!(cursor.is_blink_on());
    cursor.hide();
}

#[test]
fn drop_stops_blink_thread() {
    let (cursor, count) = counting_cursor();
    cursor.show();
    thread::sleep(PERIOD * 2);
    drop(cursor);

    let after_drop = count.load(Ordering::SeqCst);
    thread::sleep(PERIOD * 3);
    assert_eq!(count.load(Ordering::SeqCst), after_drop);
}

#[test]
fn concurrent_show_hide_leaves_consistent_state() {
    let (cursor, count) = counting_cursor();
    let cursor = Arc::new(cursor);
    let workers: Vec<_> = (0..4)
        .map(|i| {
            let cursor = Arc::clone(&cursor);
            thread::spawn(move || {
                for _ in 0..25 {
                    if i % 2 == 0 {
                        cursor.show();
                    } else {
                        cursor.hide();
                    }
                    cursor.restart();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    cursor.hide();
    let after_hide = count.load(Ordering::SeqCst);
    thread::sleep(PERIOD * 3);
    assert_eq!(count.load(Ordering::SeqCst), after_hide);
}

#[test]
fn view_draws_only_when_enabled_and_on() {
    let view = CursorView {
        enabled: true,
        blink_on: true,
        position: 3,
    };
    assert!(view.draws_at(3));
    assert!(!view.draws_at(2));
    assert!(!CursorView { blink_on: false, ..view }.draws_at(3));
    assert!(!CursorView { enabled: false, ..view }.draws_at(3));
    assert!(!CursorView::default().draws_at(0));
}

#[test]
fn view_reports_current_state() {
    let cursor = Cursor::new(Arc::new(DirtyHandlers::new()));
    let view = cursor.view(7);
    assert_eq!(
        view,
        CursorView {
            enabled: false,
            blink_on: false,
            position: 7,
        }
    );
}

#[test]
fn hide_with_block_on_notifies_once() {
    let dirty = Arc::new(DirtyHandlers::new());
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    dirty.add(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    let cursor = Cursor::with_period(dirty, Duration::from_secs(60));
    cursor.show();
    thread::sleep(Duration::from_millis(50));
    assert!(cursor.is_blink_on());
    assert_eq!(count.load(Ordering::SeqCst), 1);

    cursor.hide();
    assert_eq!(count.load(Ordering::SeqCst), 2, "erasing the block needs a redraw");
}

#[test]
fn hide_handler_may_query_cursor() {
    let dirty = Arc::new(DirtyHandlers::new());
    let cursor = Arc::new(Cursor::with_period(Arc::clone(&dirty), Duration::from_secs(60)));
    let seen = Arc::new(AtomicUsize::new(0));
    let (c, s) = (Arc::downgrade(&cursor), Arc::clone(&seen));
    dirty.add(move || {
        // Restarting a hidden cursor takes the transition lock and does
        // nothing else; it must be free by the time hide notifies.
        if let Some(cursor) = c.upgrade().filter(|c| !c.is_visible()) {
            cursor.restart();
            s.fetch_add(1, Ordering::SeqCst);
        }
    });
    cursor.show();
    thread::sleep(Duration::from_millis(50));
    assert!(cursor.is_blink_on());
    cursor.hide();
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert!(!cursor.is_visible());
}
