#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use symopt_expr::{
    Constant, ConstantMatrix, ConstantVector, Environment, ExprError, ExprOps, Expression, Form,
    Monomial, Polynomial, PolynomialVector, ScalarKind, Shape, Vector,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[test]
#[allow(clippy::approx_constant)]
fn test_variable_plus_constant_is_two_term_polynomial() {
    init_tracing();
    let env = Environment::new("scenarios");
    let x = env.new_variable();

    let sum = x.plus(3.14).expect("plus failed");
    let Expression::Polynomial(p) = sum else {
        panic!("expected a polynomial");
    };
    assert_eq!(p.len(), 2);
    assert!(p.monomials().iter().any(|m| m.is_constant() && m.coefficient() == 3.14));
    assert!(
        p.monomials()
            .iter()
            .any(|m| m.degree() == 1 && m.contains(&x) && m.coefficient() == 1.0)
    );
}

#[test]
fn test_monomial_degree_mismatch_message() {
    let env = Environment::new("scenarios");
    let v1 = env.new_variable();
    let m = Monomial::new(1.0, vec![v1], vec![1, 2]);

    let err = m.check().unwrap_err();
    assert_eq!(
        err,
        ExprError::DegreeMismatch {
            degrees: 2,
            variables: 1
        }
    );
    let msg = format!("{}", err);
    assert!(msg.contains("the number of degrees (2) does not match the number of variables (1)"));
}

#[test]
fn test_identity_matrices_of_different_size_do_not_add() {
    init_tracing();
    let err = ConstantMatrix::identity(3)
        .plus(ConstantMatrix::identity(4))
        .unwrap_err();

    assert_eq!(err.code(), "MATRIX_SHAPE_MISMATCH");
    assert_eq!(
        err.shape_mismatch(),
        Some(("plus", Shape::new(3, 3), Shape::new(4, 4)))
    );
    let msg = format!("{}", err);
    assert!(msg.contains("(3, 3)"));
    assert!(msg.contains("(4, 4)"));
}

#[test]
fn test_quadratic_form_reduces_to_scalar_polynomial() {
    init_tracing();
    let env = Environment::new("scenarios");
    let x = env.new_variable_vector(2);
    let q = ConstantMatrix::from_diagonal(&[1.0, 2.0]);

    let result = x
        .transpose()
        .and_then(|xt| xt.multiply(q))
        .and_then(|xtq| xtq.multiply(x.clone()))
        .expect("quadratic form failed");

    assert_eq!(result.form(), Form::Scalar);
    assert_eq!(result.scalar_kind(), ScalarKind::Polynomial);
    let expected = Polynomial::new(vec![
        Monomial::new(1.0, vec![x[0]], vec![2]),
        Monomial::new(2.0, vec![x[1]], vec![2]),
    ]);
    assert_eq!(result.simplify().unwrap(), Expression::Polynomial(expected));
}

#[test]
fn test_polynomial_vector_plus_constant_vector() {
    let env = Environment::new("scenarios");
    let x = env.new_variable_vector(2);
    let polys: PolynomialVector = x.iter().map(|v| Polynomial::from(*v)).collect();

    let sum = polys
        .plus(ConstantVector::from_values(&[1.0, 1.0]))
        .expect("plus failed");
    let Expression::PolynomialVector(v) = sum else {
        panic!("expected a polynomial vector");
    };
    assert_eq!(v.len(), 2);
    assert!(v.iter().all(|p| p.len() == 2));
}

#[test]
fn test_transpose_reverses_dims() {
    let env = Environment::new("properties");
    let x = env.new_variable();
    let cases: Vec<Expression> = vec![
        Expression::from(2.0),
        Expression::from(x),
        Expression::from(env.new_variable_vector(3)),
        Expression::from(env.new_variable_matrix(2, 4)),
        Expression::from(ConstantMatrix::identity(2)),
        x.multiply(env.new_variable_vector(3)).unwrap(),
    ];
    for e in cases {
        let t = e.transpose().unwrap();
        assert_eq!(t.dims(), e.dims().transposed(), "transpose of {}", e);
        if e.is_scalar() {
            assert_eq!(t, e);
        }
    }
}

#[test]
fn test_simplify_is_idempotent() {
    let env = Environment::new("properties");
    let x = env.new_variable();
    let y = env.new_variable();
    let p = Polynomial::new(vec![
        Monomial::term(x, 1.0),
        Monomial::term(y, 2.0),
        Monomial::new(3.0, vec![x, x], vec![1, 0]),
        Monomial::constant(0.0),
    ]);
    let once = p.simplify().unwrap();
    assert_eq!(once.len(), 2);
    assert_eq!(once.simplify().unwrap(), once);

    let cancelled = Polynomial::new(vec![Monomial::term(x, 1.0), Monomial::term(x, -1.0)])
        .simplify()
        .unwrap();
    assert_eq!(cancelled, Polynomial::new(vec![Monomial::constant(0.0)]));
    assert_eq!(cancelled.simplify().unwrap(), cancelled);

    let m = Vector::new(vec![p.clone(), cancelled]);
    let m = Expression::from(m);
    let simplified = m.simplify().unwrap();
    assert_eq!(simplified.simplify().unwrap(), simplified);
    assert_eq!(simplified.dims(), m.dims());
}

#[test]
fn test_check_does_not_mutate() {
    let env = Environment::new("properties");
    let x = env.new_variable_vector(2);
    let e = x.plus(1.0).unwrap();
    let before = e.clone();
    assert!(e.check().is_ok());
    assert!(e.check().is_ok());
    assert_eq!(e, before);

    let bad = Monomial::new(1.0, vec![x[0]], vec![]);
    let bad_before = bad.clone();
    assert!(bad.check().is_err());
    assert!(bad.check().is_err());
    assert_eq!(bad, bad_before);
}

#[test]
fn test_invalid_operand_is_reported_with_side() {
    init_tracing();
    let env = Environment::new("errors");
    let x = env.new_variable();
    let bad = Monomial::new(1.0, vec![x], vec![1, 1]);

    let err = x.plus(bad).unwrap_err();
    assert_eq!(err.code(), "OPERAND_INVALID");
    assert_eq!(err.root_cause().code(), "MONOMIAL_DEGREE_MISMATCH");
}

#[test]
fn test_derivative_then_evaluate() {
    let env = Environment::new("calculus");
    let x = env.new_variable();
    let y = env.new_variable();
    // 3x^2 + xy
    let f = x
        .multiply(x)
        .and_then(|xx| xx.multiply(3.0))
        .and_then(|t| t.plus(x.multiply(y)?))
        .unwrap();

    let df = f.derivative_wrt(&x).unwrap();
    let point = HashMap::from([(x, 2.0), (y, 5.0)]);
    assert_eq!(
        df.evaluate(&point).unwrap(),
        Expression::Constant(Constant(17.0))
    );

    let g = f.substitute(&y, 1.0).unwrap();
    assert_eq!(g.variables(), vec![x]);
    assert_eq!(
        g.evaluate(&point).unwrap(),
        Expression::Constant(Constant(14.0))
    );
}

#[test]
fn test_dense_round_trip() {
    let q = ConstantMatrix::from_diagonal(&[1.0, 2.0, 3.0]);
    let dense = q.to_dense();
    assert_eq!(dense.nrows(), 3);
    assert_eq!(ConstantMatrix::from(&dense), q);
}

#[test]
fn test_expression_serializes_to_json() {
    let env = Environment::new("serde");
    let b = env.new_binary_variable();
    let e = b.multiply(4.0).and_then(|t| t.plus(1.0)).unwrap();

    let json = serde_json::to_string(&e).expect("serialize");
    let back: Expression = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, e);
    assert_eq!(back.variables()[0].upper(), 1.0);
}

#[test]
fn test_unbounded_variable_expression_round_trips() {
    let env = Environment::new("serde");
    let x = env.new_variable();
    let e = x.plus(1.0).unwrap();

    let json = serde_json::to_string(&e).expect("serialize");
    let back: Expression = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, e);
    let restored = back.variables()[0];
    assert_eq!(restored.lower(), f64::NEG_INFINITY);
    assert_eq!(restored.upper(), f64::INFINITY);
}
