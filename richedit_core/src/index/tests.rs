use super::{Point, Rect};

#[test]
fn edges_are_exclusive() {
    let rect = Rect::new(2, 3, 10, 4);
    assert_eq!(rect.right(), 12);
    assert_eq!(rect.bottom(), 7);
    assert_eq!(rect.origin(), Point::new(2, 3));
}

#[test]
fn contains_respects_edges() {
    let rect = Rect::new(1, 1, 3, 2);
    assert!(rect.contains(Point::new(1, 1)));
    assert!(rect.contains(Point::new(3, 2)));
    assert!(!rect.contains(Point::new(4, 1)));
    assert!(!rect.contains(Point::new(1, 3)));
    assert!(!rect.contains(Point::new(0, 1)));
}

#[test]
fn zero_size_is_empty() {
    assert!(Rect::new(5, 5, 0, 3).is_empty());
    assert!(Rect::new(5, 5, 3, 0).is_empty());
    assert!(!Rect::new(0, 0, 1, 1).is_empty());
}

#[test]
fn inset_shrinks_every_side() {
    let inner = Rect::new(0, 0, 10, 5).inset(1);
    assert_eq!(inner, Rect::new(1, 1, 8, 3));
}

#[test]
fn inset_saturates_at_zero() {
    let inner = Rect::new(0, 0, 1, 1).inset(1);
    assert_eq!(inner.width, 0);
    assert_eq!(inner.height, 0);
    assert!(inner.is_empty());
}

#[test]
fn edges_saturate_near_usize_max() {
    let rect = Rect::new(usize::MAX - 1, 0, 10, 1);
    assert_eq!(rect.right(), usize::MAX);
}
