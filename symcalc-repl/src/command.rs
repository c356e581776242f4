use std::fmt::{self, Display, Formatter};
use symcalc_compute::TrigMode;

/// A line of input to the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Execute the expression.
    Eval(&'a str),

    /// Differentiate the expression with respect to the variable, `n` times.
    Derivative { var: &'a str, n: usize, source: &'a str },

    /// Simplify the expression.
    Simplify(&'a str),

    /// Simplify the expression and list the rules that were applied.
    Steps(&'a str),

    /// Infer the type of the expression.
    Type(&'a str),

    /// Show the trigonometric mode, or switch to a new one.
    Mode(Option<TrigMode>),

    /// List the variables and functions that are defined.
    Vars,

    /// Show the available commands.
    Help,
}

/// A command that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    MissingArgument(&'static str),
    InvalidMode(String),
    InvalidOrder(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(name) => write!(f, "unknown command `:{}`, type :help for a list", name),
            Self::MissingArgument(usage) => write!(f, "usage: {}", usage),
            Self::InvalidMode(mode) => {
                write!(f, "unknown mode `{}`, expected `radians` or `degrees`", mode)
            },
            Self::InvalidOrder(order) => write!(f, "`{}` is not a valid derivative order", order),
        }
    }
}

pub const HELP: &str = "\
<expr>               evaluate an expression, assign a variable, or define a function
:d <var> <expr>      differentiate with respect to <var>
:d<n> <var> <expr>   differentiate <n> times
:s <expr>            simplify
:steps <expr>        simplify, listing the rules applied
:t <expr>            infer the type without evaluating
:mode [rad|deg]      show or set the trigonometric mode
:vars                list the defined names
:help                show this message";

/// Splits off the first whitespace-separated word.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], s[end..].trim_start()),
        None => (s, ""),
    }
}

/// Returns the argument, or an error showing the usage if it is empty.
fn require<'a>(arg: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(usage))
    } else {
        Ok(arg)
    }
}

impl<'a> Command<'a> {
    /// Parses a line of input.
    pub fn parse(line: &'a str) -> Result<Self, CommandError> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Eval(line));
        };

        let (name, arg) = split_word(rest);
        match name {
            "s" | "simplify" => Ok(Command::Simplify(require(arg, ":s <expr>")?)),
            "steps" => Ok(Command::Steps(require(arg, ":steps <expr>")?)),
            "t" | "type" => Ok(Command::Type(require(arg, ":t <expr>")?)),
            "mode" if arg.is_empty() => Ok(Command::Mode(None)),
            "mode" => arg.parse::<TrigMode>()
                .map(|mode| Command::Mode(Some(mode)))
                .map_err(|_| CommandError::InvalidMode(arg.to_owned())),
            "vars" => Ok(Command::Vars),
            "help" | "h" => Ok(Command::Help),
            name if name.starts_with('d') => {
                let order = &name[1..];
                let n = if order.is_empty() {
                    1
                } else {
                    order.parse().map_err(|_| CommandError::InvalidOrder(order.to_owned()))?
                };
                let (var, source) = split_word(arg);
                if var.is_empty() || source.is_empty() {
                    return Err(CommandError::MissingArgument(":d <var> <expr>"));
                }
                Ok(Command::Derivative { var, n, source })
            },
            name => Err(CommandError::Unknown(name.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn plain_input() {
        assert_eq!(Command::parse("  x = 2  "), Ok(Command::Eval("x = 2")));
    }

    #[test]
    fn derivative() {
        assert_eq!(
            Command::parse(":d x x^2 + 1"),
            Ok(Command::Derivative { var: "x", n: 1, source: "x^2 + 1" }),
        );
        assert_eq!(
            Command::parse(":d3 t  sin(t)"),
            Ok(Command::Derivative { var: "t", n: 3, source: "sin(t)" }),
        );
        assert_eq!(
            Command::parse(":d x"),
            Err(CommandError::MissingArgument(":d <var> <expr>")),
        );
        assert_eq!(
            Command::parse(":dx x x"),
            Err(CommandError::InvalidOrder("x".to_string())),
        );
    }

    #[test]
    fn mode() {
        assert_eq!(Command::parse(":mode"), Ok(Command::Mode(None)));
        assert_eq!(Command::parse(":mode deg"), Ok(Command::Mode(Some(TrigMode::Degrees))));
        assert_eq!(
            Command::parse(":mode gradians"),
            Err(CommandError::InvalidMode("gradians".to_string())),
        );
    }

    #[test]
    fn unknown() {
        assert_eq!(Command::parse(":quit"), Err(CommandError::Unknown("quit".to_string())));
        assert_eq!(Command::parse(":s"), Err(CommandError::MissingArgument(":s <expr>")));
    }
}
