//! Parsing of REPL input lines.

use employee_core::{EmployeeId, Field};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  /                     list employees
  /add                  add an employee
  /view/<id>            show one employee
  /edit/<id>            edit an employee
  reload                fetch the current view again
  delete <id>           delete an employee from the list (asks first)
  edit                  edit the employee on screen
  set <field> <value>   fill a form field (firstName, lastName, email,
                        department, salary, dateOfJoining)
  submit                save the form
  cancel                leave the form without saving
  back                  go back one step
  help                  show this text
  quit                  exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Reload,
    Delete(EmployeeId),
    Edit,
    Set(Field, String),
    Submit,
    Cancel,
    Back,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not an employee id")]
    InvalidId(String),
    #[error(transparent)]
    UnknownField(#[from] employee_core::validation::UnknownField),
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        if line.starts_with('/') {
            return Ok(Some(Command::Go(line.to_string())));
        }

        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let command = match word.to_ascii_lowercase().as_str() {
            "reload" | "r" => Command::Reload,
            "delete" | "rm" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("delete"));
                }
                let id = rest.parse().map_err(|_| CommandError::InvalidId(rest.to_string()))?;
                Command::Delete(id)
            }
            "edit" => Command::Edit,
            "set" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if name.is_empty() {
                    return Err(CommandError::MissingArgument("set"));
                }
                Command::Set(name.parse()?, value.trim().to_string())
            }
            "submit" | "save" => Command::Submit,
            "cancel" => Command::Cancel,
            "back" => Command::Back,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_navigate() {
        assert_eq!(Command::parse(" /view/3 ").unwrap(), Some(Command::Go("/view/3".to_string())));
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn delete_takes_an_id() {
        assert_eq!(Command::parse("delete 12").unwrap(), Some(Command::Delete(EmployeeId(12))));
        assert_eq!(Command::parse("delete").unwrap_err(), CommandError::MissingArgument("delete"));
        assert_eq!(Command::parse("delete x").unwrap_err(), CommandError::InvalidId("x".to_string()));
    }

    #[test]
    fn set_keeps_spaces_in_value() {
        assert_eq!(
            Command::parse("set department Human Resources").unwrap(),
            Some(Command::Set(Field::Department, "Human Resources".to_string()))
        );
    }

    #[test]
    fn set_without_value_clears_field() {
        assert_eq!(
            Command::parse("set salary").unwrap(),
            Some(Command::Set(Field::Salary, String::new()))
        );
    }

    #[test]
    fn set_rejects_unknown_field() {
        assert!(matches!(Command::parse("set age 4"), Err(CommandError::UnknownField(_))));
    }

    #[test]
    fn unknown_word() {
        assert_eq!(Command::parse("dance").unwrap_err(), CommandError::Unknown("dance".to_string()));
    }
}
