use assert_float_eq::{afe_abs, afe_relative_error_msg, afe_is_relative_eq, assert_float_relative_eq};
use pretty_assertions::assert_eq;
use symcalc_compute::{
    error::kind::UndefinedFunction,
    evaluate,
    execute,
    symbolic::{analyze, differentiate, infer, simplify, Differentiator, Simplifier, TypeAnalyzer},
    Access,
    Bindings,
    ResultType,
    SymbolTable,
    Value,
};
use symcalc_error::ErrorCategory;
use symcalc_parser::{parse, parser::{ast::Expr, token::op::BinOpKind}};

fn eval_str(source: &str) -> Value {
    evaluate(&parse(source).unwrap()).unwrap()
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(eval_str("2 + 3 * 4"), Value::Number(14.0));
    assert_eq!(eval_str("true & false | true"), Value::Boolean(true));
}

#[test]
fn simplify_like_terms() {
    let simplified = simplify(&parse("2*x + 3*x").unwrap());
    assert_eq!(
        simplified,
        Expr::binary(BinOpKind::Mul, Expr::Number(5.0), Expr::symbol("x")),
    );
}

#[test]
fn derivative_of_square() {
    let derivative = differentiate(&parse("x^2").unwrap(), "x").unwrap();
    assert_eq!(
        simplify(&derivative),
        Expr::binary(BinOpKind::Mul, Expr::Number(2.0), Expr::symbol("x")),
    );
}

#[test]
fn pythagorean_identity_is_not_folded() {
    let simplified = simplify(&parse("sin(x)^2 + cos(x)^2").unwrap());
    assert_ne!(simplified, Expr::Number(1.0));
}

#[test]
fn unbound_function() {
    let err = execute(&parse("func(1,2)").unwrap(), &mut SymbolTable::new()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::UndefinedBinding);
    assert_eq!(err.downcast_ref::<UndefinedFunction>().unwrap().name, "func");
}

#[test]
fn numerical_derivative() {
    const H: f64 = 1e-6;

    let f = parse("sin(x)*x^2").unwrap();
    let derivative = differentiate(&f, "x").unwrap();

    let at = |expr: &Expr, x: f64| {
        let mut table = SymbolTable::default();
        table.insert("x", x, Access::Mutable);
        execute(expr, &mut table).unwrap().as_number().unwrap()
    };
    let numerical = (at(&f, 1.0 + H) - at(&f, 1.0 - H)) / (2.0 * H);
    assert_float_relative_eq!(at(&derivative, 1.0), numerical);
}

#[test]
fn format_round_trip() {
    let sources = [
        "2 + 3 * 4",
        "-2^2",
        "2^-1 + 10 % 4",
        "(1 + 2) * (3 - 4) / 5",
        "2^3^2",
        "5! - 3!",
        "!(1 < 2) | 3 >= 3",
        "true -> false <-> true",
        "1 << 3 >> 1",
        "{1, 2, 3} * 2",
        "{{1, 2}, {3, 4}} * {1, -1}",
        "det({{2, 0}, {0, 2}}) + abs(-3)",
        "\"ab\" + \"cd\"",
        "if(2 > 1, sqrt(16), 0)",
        "summation(k, 1, 5, k^2) + product(k, 1, 4, k)",
        "convert(3 ft, \"m\")",
        "log(8, 2) + ln(e) + sin(pi / 2)",
        "2 * i + 1",
        "-(3 - 5) * 2",
    ];
    for source in sources {
        let expr = parse(source).unwrap();
        let formatted = expr.to_string();
        let reparsed = parse(&formatted)
            .unwrap_or_else(|err| panic!("`{}` formatted as `{}` which fails to parse: {}", source, formatted, err));
        assert_eq!(reparsed, expr, "`{}` formatted as `{}`", source, formatted);
        assert_eq!(evaluate(&reparsed).unwrap(), evaluate(&expr).unwrap());
    }
}

#[test]
fn simplify_is_idempotent() {
    let sources = [
        "x^2 * 3 + 4 * x^2 - x",
        "a * b * a - b * a * a",
        "(x + 1)^2 * (x + 1)^3",
        "sin(x) * cos(x) / sin(x)",
        "-(-(y * 2)) + 0",
        "if(true & p, x * 1, 0)",
    ];
    for source in sources {
        let once = simplify(&parse(source).unwrap());
        assert_eq!(simplify(&once), once, "simplifying `{}` is not idempotent", source);
    }
}

#[test]
fn analyzers_share_one_entry_point() {
    let expr = parse("x^3 + x").unwrap();

    let derivative = analyze(&expr, &mut Differentiator::new("x")).unwrap();
    assert_eq!(derivative.to_string(), "3 * x^2 + 1");

    let simplified = analyze(&parse("x + x").unwrap(), &mut Simplifier::default()).unwrap();
    assert_eq!(simplified.to_string(), "2 * x");

    let ty = analyze(&expr, &mut TypeAnalyzer::new()).unwrap();
    assert_eq!(ty, ResultType::Number);
}

#[test]
fn session() {
    let mut table = SymbolTable::default();
    for line in ["a = 3", "f(x) = a * x^2", "b = f(2) + 1"] {
        execute(&parse(line).unwrap(), &mut table).unwrap();
    }
    assert_eq!(table.get("b"), Some(&Value::Number(13.0)));

    // derivatives see the functions defined so far
    let derivative = Differentiator::from_bindings("x", &table)
        .differentiate(&parse("f(x)").unwrap())
        .unwrap();
    assert_eq!(derivative.to_string(), "2 * a * x");
    assert_eq!(execute(&derivative.substitute("x", &Expr::Number(5.0)), &mut table).unwrap(), Value::Number(30.0));

    // and the type analyzer sees the variables
    let ty = TypeAnalyzer::with_bindings(&table).infer(&parse("b * i").unwrap()).unwrap();
    assert_eq!(ty, ResultType::Complex);
    assert_eq!(infer(&parse("b * i").unwrap()).unwrap(), ResultType::Complex);
}

#[test]
fn type_errors_are_found_before_execution() {
    let expr = parse("if(x > 0, true, false) + 1").unwrap();
    let err = infer(&expr).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Type);

    let mut table = SymbolTable::default();
    table.insert("x", 1.0, Access::Mutable);
    assert!(execute(&expr, &mut table).is_err());
}
