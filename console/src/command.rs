//! Parsing of console input lines.

use recommendation_core::{Action, Field};

pub const HELP: &str = "\
commands:
  set <field> <value>   edit a slot (id, product_a, product_b, recom_type, likes)
  create | update | like | retrieve | delete | clear | search
  show                  print the form again
  help                  this text
  quit                  exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(Field, String),
    Run(Action),
    Show,
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (line, ""),
    };
    let command = match word {
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim_start()),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            Command::Set(field.parse()?, value.to_string())
        }
        "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Run(other.parse()?),
    };
    Ok(Some(command))
}
