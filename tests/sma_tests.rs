use deriv_signal_bot::indicator::sma::{sma_series, Sma};

#[test]
fn window_average_after_warmup() {
    let mut sma = Sma::new(3);
    assert_eq!(sma.push(1.0), None);
    assert_eq!(sma.push(2.0), None);
    assert!(!sma.is_ready());

    let v = sma.push(6.0).unwrap();
    assert!((v - 3.0).abs() < f64::EPSILON);

    // 2, 6, 10
    let v = sma.push(10.0).unwrap();
    assert!((v - 6.0).abs() < f64::EPSILON);
}

#[test]
fn reset_restarts_warmup() {
    let mut sma = Sma::new(2);
    sma.push(4.0);
    sma.push(8.0);
    assert!(sma.is_ready());

    sma.reset();
    assert!(!sma.is_ready());
    assert_eq!(sma.value(), None);
    assert_eq!(sma.push(1.0), None);
    assert!((sma.push(3.0).unwrap() - 2.0).abs() < f64::EPSILON);
}

#[test]
fn series_is_aligned_with_input() {
    let input: Vec<Option<f64>> = [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().map(Some).collect();
    let out = sma_series(&input, 5);
    assert_eq!(out.len(), input.len());
    assert!(out[..4].iter().all(Option::is_none));
    assert!((out[4].unwrap() - 3.0).abs() < f64::EPSILON);
}

#[test]
fn series_window_never_spans_a_gap() {
    let input = vec![Some(1.0), Some(2.0), None, Some(4.0), Some(6.0)];
    let out = sma_series(&input, 2);
    assert_eq!(out[1], Some(1.5));
    assert_eq!(out[2], None);
    assert_eq!(out[3], None);
    assert_eq!(out[4], Some(5.0));
}
