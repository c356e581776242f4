use symcalc_compute::{
    execute,
    symbolic::{Differentiator, Simplifier, TypeAnalyzer},
    Access,
    SymbolTable,
    Value,
};
use symcalc_error::Error;
use symcalc_parser::{parse, parser::ast::Expr};
use tracing::debug;
use crate::command::{Command, CommandError, HELP};

/// An error produced by a line of input, along with the source it should be reported against.
pub enum Failure<'a> {
    /// The line was not a valid command.
    Command(CommandError),

    /// Parsing or running the expression failed.
    Expr { error: Error, source: &'a str },
}

impl Failure<'_> {
    /// Report the failure to stderr.
    pub fn report_to_stderr(&self) {
        match self {
            Self::Command(err) => eprintln!("{}", err),
            Self::Expr { error, source } => error.report_to_stderr(source),
        }
    }
}

impl From<CommandError> for Failure<'_> {
    fn from(err: CommandError) -> Self {
        Self::Command(err)
    }
}

/// The state of a REPL session: every variable and function defined so far.
#[derive(Debug, Default)]
pub struct Session {
    table: SymbolTable,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a line of input, returning the text to print, if any.
    pub fn run<'a>(&mut self, line: &'a str) -> Result<Option<String>, Failure<'a>> {
        let command = Command::parse(line)?;
        debug!(?command, "running command");
        match command {
            Command::Eval(source) => {
                let value = with_source(source, |expr| execute(expr, &mut self.table))?;
                Ok(match value {
                    // definitions print nothing
                    Value::Lambda(_) => None,
                    value => Some(value.to_string()),
                })
            },
            Command::Derivative { var, n, source } => {
                let differentiator = Differentiator::from_bindings(var, &self.table);
                let derivative = with_source(source, |expr| differentiator.differentiate_n(expr, n))?;
                Ok(Some(derivative.to_string()))
            },
            Command::Simplify(source) => {
                let simplified = with_source(source, |expr| Ok(Simplifier::new().simplify(expr)))?;
                Ok(Some(simplified.to_string()))
            },
            Command::Steps(source) => {
                let (simplified, steps) = with_source(source, |expr| {
                    Ok(Simplifier::new().simplify_with_steps(expr))
                })?;
                let mut out = steps.iter()
                    .map(|step| format!("  {:?}", step))
                    .collect::<Vec<_>>();
                out.push(simplified.to_string());
                Ok(Some(out.join("\n")))
            },
            Command::Type(source) => {
                let ty = with_source(source, |expr| TypeAnalyzer::with_bindings(&self.table).infer(expr))?;
                Ok(Some(ty.to_string()))
            },
            Command::Mode(None) => Ok(Some(self.table.trig_mode.to_string())),
            Command::Mode(Some(mode)) => {
                self.table.trig_mode = mode;
                Ok(None)
            },
            Command::Vars => {
                let mut names = self.table.iter()
                    .filter(|(_, _, access)| *access != Access::Constant)
                    .map(|(name, value, _)| match value {
                        Value::Lambda(lambda) => format!("{}({}) = {}", name, lambda.params.join(", "), lambda.body),
                        value => format!("{} = {}", name, value),
                    })
                    .collect::<Vec<_>>();
                names.sort();
                Ok((!names.is_empty()).then(|| names.join("\n")))
            },
            Command::Help => Ok(Some(HELP.to_string())),
        }
    }
}

/// Parses the source and passes the tree to `f`. Errors from `f` carry no span, so they are
/// pointed at the whole source.
fn with_source<T>(
    source: &str,
    f: impl FnOnce(&Expr) -> Result<T, Error>,
) -> Result<T, Failure<'_>> {
    let fail = |error: Error| Failure::Expr { error: error.or_span(0..source.len()), source };
    let expr = parse(source).map_err(fail)?;
    f(&expr).map_err(fail)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn run(session: &mut Session, line: &str) -> Option<String> {
        match session.run(line) {
            Ok(out) => out,
            Err(Failure::Command(err)) => panic!("`{}` is not a command: {}", line, err),
            Err(Failure::Expr { error, .. }) => panic!("`{}` failed: {}", line, error),
        }
    }

    fn strip(s: String) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s.as_bytes())).unwrap()
    }

    #[test]
    fn evaluate_and_define() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "2 + 3 * 4").as_deref(), Some("14"));
        assert_eq!(run(&mut session, "f(x) = x^2 + a"), None);
        assert_eq!(run(&mut session, "a = 1").as_deref(), Some("1"));
        assert_eq!(run(&mut session, "f(3)").as_deref(), Some("10"));
        assert_eq!(
            run(&mut session, ":vars").as_deref(),
            Some("a = 1\nf(x) = x^2 + a"),
        );
    }

    #[test]
    fn symbolic_commands() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, ":d x x^2").as_deref(), Some("2 * x"));
        assert_eq!(run(&mut session, ":d2 x x^3").as_deref(), Some("6 * x"));
        assert_eq!(run(&mut session, ":s 2*x + 3*x").as_deref(), Some("5 * x"));
        assert_eq!(run(&mut session, ":steps x^1").as_deref(), Some("  PowerOne\nx"));
        assert_eq!(run(&mut session, ":t x + 1").as_deref(), Some("number"));

        run(&mut session, "g(t) = t^2");
        assert_eq!(run(&mut session, ":d x g(x)").as_deref(), Some("2 * x"));
    }

    #[test]
    fn mode() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, ":mode").as_deref(), Some("radians"));
        run(&mut session, ":mode degrees");
        assert_eq!(run(&mut session, "sin(90)").as_deref(), Some("1"));
    }

    #[test]
    fn errors_point_at_the_input() {
        let mut session = Session::new();
        let Err(Failure::Expr { error, source }) = session.run("1 / 0") else {
            panic!("dividing by zero should fail");
        };
        assert_eq!(source, "1 / 0");
        assert_eq!(error.spans, vec![0..5]);

        let rendered = strip(error.render(source));
        assert!(rendered.contains("1 / 0"), "{}", rendered);

        let Err(Failure::Expr { error, source }) = session.run(":d x x!") else {
            panic!("factorials have no derivative");
        };
        assert_eq!(source, "x!");
        assert_eq!(error.spans, vec![0..2]);
    }

    #[test]
    fn command_errors() {
        let mut session = Session::new();
        assert!(matches!(session.run(":nope"), Err(Failure::Command(CommandError::Unknown(_)))));
    }
}
