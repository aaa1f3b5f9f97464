use std::collections::BTreeMap;
use std::fmt;

/// How a single argument was read. Parsing never fails: anything that is not
/// a flag is plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// `value` is empty when the flag carries none.
    Flag {
        name: String,
        value: String,
        has_value: bool,
    },
    Plain(&'a str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub program_name: String,
    pub args: Vec<String>,
    pub command: String,
    /// An empty value means the flag was given without one.
    pub flags: BTreeMap<String, String>,
    pub trailing_text: String,
}

impl ParsedCommand {
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    pub fn flag(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(String::as_str)
    }

    /// First of `names` that was given.
    pub fn flag_any(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.flag(name))
    }

    /// True when `name` took its value from the final argument. That argument
    /// is also kept in the trailing text, so callers combining the two must
    /// not count it twice.
    pub fn flag_value_is_trailing(&self, name: &str) -> bool {
        let n = self.args.len();
        if n < 3 {
            return false;
        }
        match classify(n - 2, &self.args) {
            Token::Flag {
                name: flag,
                has_value,
                ..
            } => has_value && flag == name && !self.args[n - 2].contains('='),
            Token::Plain(_) => false,
        }
    }
}

impl fmt::Display for ParsedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program Name:\t{}", self.program_name)?;
        if !self.command.is_empty() {
            writeln!(f, "Command:\t{}", self.command)?;
        }
        writeln!(f, "Flags:")?;
        for (flag, value) in &self.flags {
            writeln!(f, "\t{flag}:\t{value}")?;
        }
        if !self.trailing_text.is_empty() {
            write!(f, "Extra:\n\t{}", self.trailing_text)?;
        }
        Ok(())
    }
}

fn is_flag(arg: &str) -> bool {
    arg.starts_with('-')
}

fn strip_dashes(arg: &str) -> String {
    arg.replace('-', "")
}

/// Reads `args[idx]` in the context of its neighbour. Supported shapes:
///
/// - `-p` / `--ppa`            no value
/// - `-p tw` / `--ppa tw`      value from the next argument
/// - `-p=tws` / `--ppa=tw`     value after the first `=`
///
/// Combined short flags are not split: `-pa` is a single flag named `pa`.
pub fn classify<S: AsRef<str>>(idx: usize, args: &[S]) -> Token<'_> {
    let arg = args[idx].as_ref();
    if !is_flag(arg) {
        return Token::Plain(arg);
    }

    if let Some((name, value)) = arg.split_once('=') {
        return Token::Flag {
            name: strip_dashes(name),
            value: value.to_string(),
            has_value: true,
        };
    }

    match args.get(idx + 1).map(AsRef::as_ref) {
        Some(next) if !is_flag(next) => Token::Flag {
            name: strip_dashes(arg),
            value: next.to_string(),
            has_value: true,
        },
        _ => Token::Flag {
            name: strip_dashes(arg),
            value: String::new(),
            has_value: false,
        },
    }
}

/// Splits process arguments into command, flags and trailing text.
///
/// `args[0]` is the program name. `args[1]` is the command unless it looks
/// like a flag. A plain argument right after a flag with a value is that
/// value and is left out of the trailing text, except for the final argument
/// which is always kept.
pub fn parse<S: AsRef<str>>(args: &[S]) -> ParsedCommand {
    let mut parsed = ParsedCommand {
        program_name: args
            .first()
            .map(|arg| arg.as_ref().to_string())
            .unwrap_or_default(),
        args: args.iter().map(|arg| arg.as_ref().to_string()).collect(),
        ..ParsedCommand::default()
    };

    let mut extra: Vec<&str> = Vec::new();
    let mut after_value_flag = false;
    let last = args.len().saturating_sub(1);

    for idx in 1..args.len() {
        match classify(idx, args) {
            Token::Plain(text) if idx == 1 => {
                parsed.command = text.to_string();
                after_value_flag = false;
            }
            Token::Plain(text) => {
                if !after_value_flag || idx == last {
                    extra.push(text);
                }
                after_value_flag = false;
            }
            Token::Flag {
                name,
                value,
                has_value,
            } => {
                after_value_flag = has_value;
                parsed.flags.insert(name, value);
            }
        }
    }

    parsed.trailing_text = extra.join(" ");
    parsed
}
