//! Interactive commands read from stdin.

use anyhow::{bail, Result};
use std::str::FromStr;

pub const HELP: &str = "\
commands:
  t, toggle <id>   expand or collapse a reply
  l, list          show the visible replies
  r, reload        fetch the topic again
  h, help          show this help
  q, quit          exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Toggle(String),
    List,
    Reload,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            bail!("empty command");
        };

        let command = match verb {
            "t" | "toggle" => match parts.next() {
                Some(id) => Command::Toggle(id.to_string()),
                None => bail!("toggle needs an item id"),
            },
            "l" | "list" => Command::List,
            "r" | "reload" => Command::Reload,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => bail!("unknown command: {}", other),
        };

        if parts.next().is_some() {
            bail!("too many arguments for {}", verb);
        }
        Ok(command)
    }
}
