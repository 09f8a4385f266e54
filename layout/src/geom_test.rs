#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_distance_is_euclidean() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert_eq!(a.distance(b), 5.0);
    assert_eq!(b.distance(a), 5.0);
}

#[test]
fn point_distance_to_self_is_zero() {
    let p = Point::new(-12.5, 40.0);
    assert_eq!(p.distance(p), 0.0);
}

#[test]
fn rect_edges() {
    let r = Rect::new(10.0, 20.0, 100.0, 60.0);
    assert_eq!(r.right(), 110.0);
    assert_eq!(r.bottom(), 80.0);
}

#[test]
fn rect_center() {
    let r = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(r.center(), Point::new(50.0, 50.0));
}

#[test]
fn rect_center_negative_origin() {
    let r = Rect::new(-10.0, -10.0, 100.0, 100.0);
    assert_eq!(r.center(), Point::new(40.0, 40.0));
}
