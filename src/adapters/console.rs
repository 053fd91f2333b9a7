use crate::domain::ports::OperatorConsole;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Interactive terminal: prompts on stdout, reads lines from stdin.
pub struct StdConsole {
    lines: Lines<BufReader<Stdin>>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OperatorConsole for StdConsole {
    async fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(message.as_bytes())?;
            stdout.flush()?;
        }
        Ok(self.lines.next_line().await?)
    }

    fn say(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Console fed from a fixed list of lines. Everything shown to the
/// operator is kept in a transcript.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    transcript: Vec<String>,
    echo: bool,
}

impl ScriptedConsole {
    pub fn new<I, T>(inputs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
            echo: false,
        }
    }

    /// Also print to stdout, for non-interactive runs of the binary.
    pub fn echoing(mut self) -> Self {
        self.echo = true;
        self
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    fn record(&mut self, message: &str) {
        if self.echo {
            println!("{}", message);
        }
        self.transcript.push(message.to_string());
    }
}

#[async_trait]
impl OperatorConsole for ScriptedConsole {
    async fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        let line = self.inputs.pop_front();
        match &line {
            Some(input) => self.record(&format!("{}{}", message, input)),
            None => self.record(message),
        }
        Ok(line)
    }

    fn say(&mut self, message: &str) {
        self.record(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_console_replays_inputs() {
        let mut console = ScriptedConsole::new(["1,2,3", "4,5,6"]);

        let first = tokio_test::block_on(console.prompt("> ")).unwrap();
        console.say("ok");
        let second = tokio_test::block_on(console.prompt("> ")).unwrap();
        let third = tokio_test::block_on(console.prompt("> ")).unwrap();

        assert_eq!(first.as_deref(), Some("1,2,3"));
        assert_eq!(second.as_deref(), Some("4,5,6"));
        assert_eq!(third, None);
        assert_eq!(console.transcript(), &["> 1,2,3", "ok", "> 4,5,6", "> "]);
        assert_eq!(console.remaining_inputs(), 0);
    }
}
