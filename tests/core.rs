// tests/core.rs
use build_finder::refine_det;
use std::cell::RefCell;
use std::rc::Rc;

/* ──────────────────────────────────────────────────────────────────────────
1) Newton's method for √2: converges well before the iteration cap
────────────────────────────────────────────────────────────────────────── */

#[test]
fn newton_sqrt_two_converges() {
    let simulate = |x: &f64| *x;
    let measure = |d: &f64| *d;
    let update = |_x: &f64, m: &f64| 0.5 * (m + 2.0 / m);
    let converged = |a: &f64, b: &f64| (a - b).abs() < 1e-12;

    let root = refine_det(1.0_f64, simulate, measure, update, converged, 100);

    assert!(
        (root - std::f64::consts::SQRT_2).abs() < 1e-12,
        "not at sqrt(2): {root}"
    );
}

/* ──────────────────────────────────────────────────────────────────────────
2) Never-converging loop: runs exactly max_iters steps
────────────────────────────────────────────────────────────────────────── */

#[test]
fn stops_at_max_iters_without_convergence() {
    let calls = Rc::new(RefCell::new(0usize));

    let simulate = {
        let calls = Rc::clone(&calls);
        move |t: &u32| -> u32 {
            *calls.borrow_mut() += 1;
            *t
        }
    };
    let measure = |d: &u32| *d;
    let update = |t: &u32, _m: &u32| t + 1;
    let converged = |_a: &u32, _b: &u32| false;

    let last = refine_det(0u32, simulate, measure, update, converged, 37);

    assert_eq!(last, 37);
    assert_eq!(*calls.borrow(), 37, "simulate ran a different number of times");
}

/* ──────────────────────────────────────────────────────────────────────────
3) Early stop: returns the step that satisfied the predicate
────────────────────────────────────────────────────────────────────────── */

#[test]
fn early_stop_returns_next_theta() {
    let last = refine_det(
        1u64,
        |t: &u64| *t,
        |d: &u64| *d,
        |_t: &u64, m: &u64| m * 2,
        |_a: &u64, b: &u64| *b >= 64,
        1_000,
    );
    assert_eq!(last, 64);
}

/* ──────────────────────────────────────────────────────────────────────────
4) Zero iterations: θ₀ comes back untouched
────────────────────────────────────────────────────────────────────────── */

#[test]
fn zero_iters_is_identity() {
    let theta = vec!["probe".to_string(), "pylon".to_string()];
    let out = refine_det(
        theta.clone(),
        |t: &Vec<String>| t.len(),
        |d: &usize| *d,
        |_t: &Vec<String>, _m: &usize| Vec::new(),
        |_a: &Vec<String>, _b: &Vec<String>| false,
        0,
    );
    assert_eq!(out, theta);
}
