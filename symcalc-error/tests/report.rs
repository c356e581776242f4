use symcalc_attrs::ErrorKind;
use symcalc_error::{Error, ErrorCategory};

/// A test error with a single label.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = "unexpected end of file",
    labels = ["add something here"],
)]
pub struct Foo;

/// A test error whose message depends on its fields.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = UndefinedBinding,
    message = format!("`{}` is not defined", name),
    labels = ["this variable"],
    help = format!("to define it, type: {} = <expression>", self.name),
)]
pub struct Undefined {
    pub name: String,
}

fn strip(s: String) -> String {
    String::from_utf8(strip_ansi_escapes::strip(s.as_bytes())).unwrap()
}

#[test]
fn category_and_message() {
    let err = Error::new(vec![0..1], Foo);
    assert_eq!(err.category(), ErrorCategory::Parse);
    assert_eq!(err.to_string(), "parse error: unexpected end of file");
    assert!(err.is::<Foo>());
    assert!(!err.is::<Undefined>());
}

#[test]
fn downcast_fields() {
    let err = Error::spanless(Undefined { name: "func".to_string() });
    assert_eq!(err.category(), ErrorCategory::UndefinedBinding);
    assert_eq!(err.downcast_ref::<Undefined>().unwrap().name, "func");
}

#[test]
fn render_report() {
    let input = "x + 1";
    let err = Error::new(vec![0..1], Undefined { name: "x".to_string() });
    let rendered = strip(err.render(input));

    assert!(rendered.contains("`x` is not defined"));
    assert!(rendered.contains("this variable"));
    assert!(rendered.contains("to define it, type: x = <expression>"));
}

#[test]
fn spanless_report_does_not_panic() {
    let err = Error::spanless(Foo).or_span(0..3);
    assert_eq!(err.spans, vec![0..3]);

    let rendered = strip(Error::spanless(Foo).render("abc"));
    assert!(rendered.contains("unexpected end of file"));
}
