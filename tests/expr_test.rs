use koto::prelude::*;

#[test]
fn long_chain_evaluates_in_one_pass() {
    let a: Array<f64, Dim1> = Array::from_vec(vec![1.0, 2.0, 3.0, 4.0], [4]).unwrap();
    let b: Array<f64, Dim1> = Array::from_vec(vec![4.0, 3.0, 2.0, 1.0], [4]).unwrap();

    // seven operators composed without materializing intermediates
    let node = ((((&a + &b) * scalar(2.0)) - &a).sqrt() + scalar(1.0)).square() - scalar(1.0);
    let out: Array<f64, Dim1> = node.realize().unwrap();

    for (i, (&x, &y)) in a.to_vec().iter().zip(b.to_vec().iter()).enumerate() {
        let expected = (((x + y) * 2.0 - x).sqrt() + 1.0).powi(2) - 1.0;
        assert!((out.at(i) - expected).abs() < 1e-12);
    }
}

#[test]
fn math_catalogue_on_expressions() {
    let a: Array<f64, Dim1> = Array::from_vec(vec![0.25, 1.0, 4.0], [3]).unwrap();
    let out: Array<f64, Dim1> = (&a).sqrt().ln().exp().realize().unwrap();
    for i in 0..3 {
        assert!((out.at(i) - a.at(i).sqrt()).abs() < 1e-12);
    }
}

#[test]
fn comparisons_produce_boolean_arrays() {
    let a: Array<i64, Dim1> = Array::from_vec(vec![1, 5, 3, 7], [4]).unwrap();
    let b: Array<i64, Dim1> = Array::from_vec(vec![2, 5, 1, 9], [4]).unwrap();

    let le: Array<bool, Dim1> = (&a).less_equal(&&b).unwrap().realize().unwrap();
    assert_eq!(le.to_vec(), vec![true, true, false, true]);

    let ne: Array<bool, Dim1> = (&a).not_equal(&&b).unwrap().realize().unwrap();
    assert_eq!(ne.to_vec(), vec![true, false, true, true]);
}

#[test]
fn logical_ops_fold_truthiness() {
    let a: Array<i32, Dim1> = Array::from_vec(vec![0, 1, 2, 0], [4]).unwrap();
    let b: Array<i32, Dim1> = Array::from_vec(vec![0, 0, 3, 4], [4]).unwrap();

    let and: Array<bool, Dim1> = (&a).logical_and(&&b).unwrap().realize().unwrap();
    assert_eq!(and.to_vec(), vec![false, false, true, false]);

    let xor: Array<bool, Dim1> = (&a).logical_xor(&&b).unwrap().realize().unwrap();
    assert_eq!(xor.to_vec(), vec![false, true, false, true]);
}

#[test]
fn map_with_a_custom_closure() {
    let a: Array<i64, Dim1> = Array::from_vec(vec![1, 2, 3], [3]).unwrap();
    let out: Array<i64, Dim1> = (&a).map(|x| x * x + 1).realize().unwrap();
    assert_eq!(out.to_vec(), vec![2, 5, 10]);
}

#[test]
fn mixed_rank_chain_broadcasts_to_the_widest_shape() {
    let cube: Array<f64, Dim3> = Array::from_vec(vec![1.0; 8], [2, 2, 2]).unwrap();
    let plane: Array<f64, Dim2> = Array::from_vec(vec![1.0, 2.0, 3.0, 4.0], [2, 2]).unwrap();
    let line: Array<f64, Dim1> = Array::from_vec(vec![10.0, 20.0], [2]).unwrap();

    let node = (&cube * &plane) + &line;
    assert_eq!(node.shape().dims(), &[2, 2, 2]);
    let out: Array<f64, Dim3> = node.realize().unwrap();
    assert_eq!(out.get(&[0, 0, 0]).unwrap(), 11.0);
    assert_eq!(out.get(&[1, 1, 1]).unwrap(), 24.0);
}
