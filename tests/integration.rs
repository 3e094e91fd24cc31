//! Integration tests for the calculator catalog
//!
//! Every test goes through `Registry::invoke`, the same path the MCP
//! server and the CLI use.


use calculator::ops::{self, GROUPS};
use calculator::registry::CatalogFilter;
use calculator::{CalcError, Registry};
use serde_json::{Value, json};
use test_utils::{approx, assert_close, invoke, matrix_rows, registry, reject, value};

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_catalog_lists_every_group() {
    let list = registry().list();
    assert_eq!(list.len(), 101);
    for group in GROUPS {
        assert!(list.iter().any(|op| op.group == *group), "{} is empty", group);
    }
}

#[test]
fn test_catalog_json_shape() {
    let list = registry().list();
    let json = serde_json::to_value(&list[0]).unwrap();
    assert_eq!(json["name"], "add");
    assert_eq!(json["inputSchema"]["type"], "object");
}

#[test]
fn test_filtered_catalog() {
    let filter = CatalogFilter {
        disabled_groups: ["financial".to_string()].into_iter().collect(),
        disabled_operations: ["add".to_string()].into_iter().collect(),
    };
    let registry = Registry::filtered(filter).unwrap();
    assert_eq!(registry.len(), 101 - 7 - 1);
    assert!(registry.lookup("add").is_err());
    assert!(registry.lookup("internal_rate_of_return").is_err());
    assert!(registry.lookup("subtract").is_ok());
}

#[test]
fn test_unknown_operation() {
    let err = reject("frobnicate", json!({}));
    assert!(matches!(err, CalcError::UnknownOperation(ref n) if n == "frobnicate"));
    assert!(err.is_protocol_error());
}

#[test]
fn test_validation_reports_parameter() {
    match reject("add", json!({"a": 1, "b": "two"})) {
        CalcError::Validation(v) => assert_eq!(v.parameter, "b"),
        other => panic!("expected validation error, got {}", other),
    }
}

// ============================================================================
// Arithmetic and roots
// ============================================================================

#[test]
fn test_basic_arithmetic_is_finite() {
    let pairs = [(2.0, 3.0), (-7.5, 0.25), (1e10, -3.0), (0.0, 9.0)];
    for op in ["add", "subtract", "multiply", "divide"] {
        for (a, b) in pairs {
            let r = invoke(op, json!({"a": a, "b": b}));
            assert!(value(&r).is_finite(), "{}({}, {}) not finite", op, a, b);
        }
    }
}

#[test]
fn test_division_by_zero() {
    for op in ["divide", "modulo"] {
        let r = invoke(op, json!({"a": 5, "b": 0}));
        assert!(r.is_error());
        assert!(r.text().contains("cannot be zero"), "{}", r.text());
    }
}

#[test]
fn test_sqrt_squares_back() {
    for a in [0.0, 2.0, 16.0, 1234.5678] {
        let v = value(&invoke("sqrt", json!({"a": a})));
        assert_close(v * v, a, 1e-9 * a.max(1.0));
    }
    assert!(invoke("sqrt", json!({"a": -1})).is_error());
}

// ============================================================================
// Combinatorics and number theory
// ============================================================================

#[test]
fn test_factorial_bounds() {
    assert_eq!(value(&invoke("factorial", json!({"n": 5}))), 120.0);
    assert_eq!(value(&invoke("factorial", json!({"n": 0}))), 1.0);
    assert!(!invoke("factorial", json!({"n": 170})).is_error());
    assert!(invoke("factorial", json!({"n": 171})).is_error());
}

#[test]
fn test_gcd_lcm() {
    assert_eq!(value(&invoke("gcd", json!({"numbers": [12, 18]}))), 6.0);
    assert_eq!(value(&invoke("lcm", json!({"numbers": [12, 18]}))), 36.0);
}

#[test]
fn test_gcd_lcm_order_independent() {
    let lists = [[12, 18, 30], [30, 12, 18], [18, 30, 12]];
    for op in ["gcd", "lcm"] {
        let results: Vec<f64> = lists
            .iter()
            .map(|l| value(&invoke(op, json!({"numbers": l}))))
            .collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]), "{} {:?}", op, results);
    }
    // lcm(lcm(12, 18), 30) == lcm(12, 18, 30)
    let inner = value(&invoke("lcm", json!({"numbers": [12, 18]})));
    let nested = value(&invoke("lcm", json!({"numbers": [inner, 30]})));
    assert_eq!(nested, value(&invoke("lcm", json!({"numbers": [12, 18, 30]}))));
}

// ============================================================================
// Matrices
// ============================================================================

#[test]
fn test_determinants() {
    let r = invoke("matrix_determinant", json!({"matrix": [[1, 2], [3, 4]]}));
    assert_close(value(&r), -2.0, 1e-12);
    let identity = json!({"matrix": [[1, 0, 0], [0, 1, 0], [0, 0, 1]]});
    assert_eq!(value(&invoke("matrix_determinant", identity)), 1.0);
    assert!(invoke("matrix_determinant", json!({"matrix": [[1, 2, 3], [4, 5, 6]]})).is_error());
}

#[test]
fn test_inverse_reconstructs_identity() {
    let original = json!([[1, 2], [3, 4]]);
    let r = invoke("matrix_inverse", json!({"matrix": original.clone()}));
    assert!(!r.is_error());
    let inverse = matrix_rows(r.text());

    let product = invoke(
        "matrix_multiply",
        json!({"matrix_a": original, "matrix_b": inverse}),
    );
    let rows = matrix_rows(product.text());
    for (i, row) in rows.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_close(*cell, expected, 1e-6);
        }
    }
}

#[test]
fn test_singular_inverse() {
    let r = invoke("matrix_inverse", json!({"matrix": [[1, 2], [2, 4]]}));
    assert!(r.is_error());
    assert!(r.text().contains("singular"));
}

#[test]
fn test_ragged_matrix_is_domain_error() {
    let r = invoke("matrix_transpose", json!({"matrix": [[1, 2], [3]]}));
    assert!(r.is_error());
}

// ============================================================================
// Trigonometry and logarithms
// ============================================================================

#[test]
fn test_angle_round_trip() {
    for x in [0.0, 1.0, -2.5, 180.0, 1e-3, 12345.678] {
        let rad = value(&invoke("degToRad", json!({"degrees": x})));
        let back = value(&invoke("radToDeg", json!({"radians": rad})));
        assert_close(back, x, 1e-9 * x.abs().max(1.0));

        let deg = value(&invoke("radToDeg", json!({"radians": x})));
        let back = value(&invoke("degToRad", json!({"degrees": deg})));
        assert_close(back, x, 1e-9 * x.abs().max(1.0));
    }
}

#[test]
fn test_inverse_trig_domain() {
    for op in ["asin", "acos"] {
        assert!(invoke(op, json!({"value": 1.5})).is_error());
        assert!(invoke(op, json!({"value": -1.01})).is_error());
        assert!(!invoke(op, json!({"value": 1})).is_error());
    }
}

#[test]
fn test_logarithm_domain() {
    for v in [0.0, -3.0] {
        assert!(invoke("ln", json!({"value": v})).is_error());
        assert!(invoke("log10", json!({"value": v})).is_error());
        assert!(invoke("log", json!({"value": v, "base": 2})).is_error());
    }
    for base in [0.0, -2.0, 1.0] {
        assert!(invoke("log", json!({"value": 8, "base": base})).is_error());
    }
    assert_close(value(&invoke("log", json!({"value": 8, "base": 2}))), 3.0, 1e-12);
}

// ============================================================================
// Numerical methods
// ============================================================================

#[test]
fn test_newton_and_bisection_agree() {
    let f = json!({"function_type": "polynomial", "coefficients": [-4, 0, 1]});
    let mut newton = f.clone();
    newton["initial_guess"] = json!(3);
    let mut bisection = f;
    bisection["left_bound"] = json!(0);
    bisection["right_bound"] = json!(3);

    let a = approx(&invoke("newton_method", newton));
    let b = approx(&invoke("bisection_method", bisection));
    assert_close(a, 2.0, 1e-6);
    assert_close(b, 2.0, 1e-5);
    assert_close(a, b, 1e-5);
}

#[test]
fn test_lagrange_reproduces_nodes() {
    let xs = [0.0, 1.0, 2.5, 4.0];
    let ys = [1.0, -2.0, 3.5, 0.25];
    for (x, y) in xs.iter().zip(ys) {
        let r = invoke(
            "lagrange_interpolation",
            json!({"x_points": xs, "y_points": ys, "interpolation_point": x}),
        );
        assert_close(approx(&r), y, 1e-12);
    }
}

// ============================================================================
// Conversion, geometry, financial
// ============================================================================

#[test]
fn test_conversions() {
    let r = invoke(
        "temperature_conversion",
        json!({"value": 100, "from_unit": "celsius", "to_unit": "fahrenheit"}),
    );
    assert!(r.text().contains("212.0000°F"), "{}", r.text());
    let r = invoke(
        "temperature_conversion",
        json!({"value": -5, "from_unit": "kelvin", "to_unit": "celsius"}),
    );
    assert!(r.is_error());
    assert!(matches!(
        reject(
            "length_conversion",
            json!({"value": 1, "from_unit": "parsec", "to_unit": "m"})
        ),
        CalcError::Validation(_)
    ));
}

#[test]
fn test_geometry_rejects_non_positive() {
    assert!(matches!(
        reject("circle_calculation", json!({"radius": -1})),
        CalcError::Validation(_)
    ));
    assert!(invoke("triangle_calculation", json!({"side_a": 1, "side_b": 2, "side_c": 10})).is_error());
}

#[test]
fn test_financial_compound_interest() {
    let r = invoke(
        "compound_interest",
        json!({"principal": 1000, "annual_rate": 0.05, "periods": 10, "compounding_frequency": 1}),
    );
    assert!(r.text().contains("1628.89"), "{}", r.text());
}

// ============================================================================
// Concurrency
// ============================================================================

fn workload() -> Vec<(&'static str, Value)> {
    let base: Vec<(&'static str, Value)> = vec![
        ("add", json!({"a": 1.5, "b": 2.25})),
        ("divide", json!({"a": 1, "b": 0})),
        ("sqrt", json!({"a": 2})),
        ("factorial", json!({"n": 20})),
        ("gcd", json!({"numbers": [84, 126, 210]})),
        ("matrix_inverse", json!({"matrix": [[4, 7], [2, 6]]})),
        ("matrix_determinant", json!({"matrix": [[2, 0, 1], [1, 3, 2], [1, 1, 2]]})),
        ("sin", json!({"angle": 0.5})),
        ("mean", json!({"numbers": [1, 2, 3, 4]})),
        ("isPrime", json!({"n": 7919})),
        ("newton_method", json!({"function_type": "polynomial", "coefficients": [-2, 0, 1], "initial_guess": 1})),
        ("numerical_integration", json!({"function_type": "exponential", "coefficients": [1, 1], "lower_bound": 0, "upper_bound": 1})),
        ("complex_divide", json!({"a_real": 1, "a_imag": 2, "b_real": 3, "b_imag": -1})),
        ("net_present_value", json!({"initial_investment": 1000, "cash_flows": [300, 400, 500], "discount_rate": 0.1})),
        ("speed_conversion", json!({"value": 100, "from_unit": "kmh", "to_unit": "mph"})),
        ("regular_polygon", json!({"sides": 6, "side_length": 2})),
        ("log", json!({"value": 1, "base": 1})),
        ("fibonacci", json!({"n": 50})),
        ("variance", json!({"numbers": [2, 4, 4, 4, 5, 5, 7, 9], "sample": true})),
        ("divisorList", json!({"n": 360})),
    ];
    base.into_iter().cycle().take(100).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_invocations_match_sequential() {
    let calls = workload();
    let sequential: Vec<_> = calls.iter().map(|(op, args)| invoke(op, args.clone())).collect();

    let handles = calls.into_iter().map(|(op, args)| {
        tokio::task::spawn_blocking(move || invoke(op, args))
    });
    let concurrent: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(sequential, concurrent);
}

#[test]
fn test_every_operation_is_reachable() {
    let registry = registry();
    for name in ops::all_operation_names() {
        assert!(registry.lookup(name).is_ok(), "{} missing", name);
    }
}
