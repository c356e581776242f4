use pretty_assertions::assert_eq;
use symcalc_error::ErrorCategory;
use symcalc_parser::{
    parse,
    parse_tokens,
    parser::{
        ast::{Expr, Func},
        error::kind,
        token::op::BinOpKind,
    },
    tokenizer::tokenize,
};

#[test]
fn parse_from_tokens() {
    let source = "sqrt(x) + 1";
    let tokens = tokenize(source).unwrap();
    assert_eq!(parse_tokens(tokens).unwrap(), parse(source).unwrap());
}

#[test]
fn arguments_keep_their_order() {
    let expr = parse("f(3, 2, 1) - g(a)").unwrap();
    assert_eq!(
        expr,
        Expr::binary(
            BinOpKind::Sub,
            Expr::Call("f".to_string(), vec![Expr::Number(3.0), Expr::Number(2.0), Expr::Number(1.0)]),
            Expr::Call("g".to_string(), vec![Expr::symbol("a")]),
        ),
    );
}

#[test]
fn nested_calls() {
    let expr = parse("ln(exp(sin(x)))").unwrap();
    assert_eq!(
        expr,
        Expr::call1(Func::Ln, Expr::call1(Func::Exp, Expr::call1(Func::Sin, Expr::symbol("x")))),
    );
}

#[test]
fn lex_errors_are_categorized() {
    let err = parse("2 $ 3").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Lex);
    assert_eq!(err.spans, vec![2..3]);
    assert!(err.is::<kind::InvalidCharacter>());

    let err = parse("2e+").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Lex);
    assert_eq!(err.spans, vec![0..3]);
    assert!(err.is::<kind::MalformedNumber>());
}

#[test]
fn parse_errors_are_categorized() {
    let err = parse("(1 + 2").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Parse);
    assert_eq!(err.spans, vec![0..1]);
}

#[test]
fn rendered_report_mentions_function() {
    let source = "cos(1, 2)";
    let err = parse(source).unwrap_err();
    let report = String::from_utf8(strip_ansi_escapes::strip(err.render(source).as_bytes())).unwrap();
    assert!(report.contains("wrong number of arguments given to the `cos` function"));
    assert!(report.contains("the `cos` function takes 1 argument(s); 2 given"));
}

#[test]
fn whitespace_and_newlines_are_insignificant() {
    assert_eq!(parse("1 +\n  2").unwrap(), parse("1+2").unwrap());
}

#[test]
fn format_round_trip() {
    for source in [
        "2 + 3 * 4",
        "-x^2 + 3!",
        "a -> b <-> !c",
        "{{1, 0}, {0, 1}} * {2, 3}",
        "summation(k, 1, n, k^2) / product(k, 1, 3, k)",
        "f(x) = x / (1 - x)",
        "convert(3 ft, m) + 2 m",
        "sin(30 deg)^2 % 7",
    ] {
        let expr = parse(source).unwrap();
        let formatted = expr.to_string();
        assert_eq!(parse(&formatted).unwrap(), expr, "{} formatted as {}", source, formatted);
    }
}
