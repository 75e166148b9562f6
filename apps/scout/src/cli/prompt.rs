//! Line-based terminal prompts over any async reader/writer pair.
//!
//! An empty answer takes the default; EOF takes the default too. Answers that
//! cannot be understood are asked again.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub struct Choice<T> {
    pub label: &'static str,
    pub value: T,
    pub checked: bool,
}

impl<T> Choice<T> {
    pub fn new(label: &'static str, value: T) -> Self {
        Self {
            label,
            value,
            checked: false,
        }
    }

    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }
}

pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Prompter<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    async fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.writer.write_all(prompt.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await
    }

    pub async fn input(&mut self, message: &str, default: &str) -> io::Result<String> {
        let answer = self.ask(&format!("? {message} ({default}) ")).await?;
        Ok(match answer {
            Some(a) if !a.is_empty() => a,
            _ => default.to_string(),
        })
    }

    /// Single choice by 1-based number.
    pub async fn select<T: Clone>(
        &mut self,
        message: &str,
        choices: &[Choice<T>],
        default: usize,
    ) -> io::Result<T> {
        self.say(&format!("? {message}")).await?;
        for (i, choice) in choices.iter().enumerate() {
            let marker = if i == default { ">" } else { " " };
            self.say(&format!("  {marker} {}) {}", i + 1, choice.label)).await?;
        }

        loop {
            let Some(answer) = self.ask(&format!("  Choose 1-{} ({}) ", choices.len(), default + 1)).await? else {
                return Ok(choices[default].value.clone());
            };
            if answer.is_empty() {
                return Ok(choices[default].value.clone());
            }
            match parse_index(&answer, choices.len()) {
                Some(i) => return Ok(choices[i].value.clone()),
                None => self.say("  Please enter a number from the list.").await?,
            }
        }
    }

    /// Several choices as comma-separated numbers; empty keeps the checked ones.
    pub async fn multi_select<T: Clone>(
        &mut self,
        message: &str,
        choices: &[Choice<T>],
    ) -> io::Result<Vec<T>> {
        self.say(&format!("? {message}")).await?;
        for (i, choice) in choices.iter().enumerate() {
            let marker = if choice.checked { "[x]" } else { "[ ]" };
            self.say(&format!("  {marker} {}) {}", i + 1, choice.label)).await?;
        }

        let preselected = || -> Vec<T> {
            choices
                .iter()
                .filter(|c| c.checked)
                .map(|c| c.value.clone())
                .collect()
        };

        loop {
            let Some(answer) = self.ask("  Numbers, comma-separated (enter keeps [x]) ").await? else {
                return Ok(preselected());
            };
            if answer.is_empty() {
                return Ok(preselected());
            }
            let picked: Option<Vec<usize>> = answer
                .split(',')
                .map(|part| parse_index(part.trim(), choices.len()))
                .collect();
            match picked {
                Some(mut indices) => {
                    indices.sort_unstable();
                    indices.dedup();
                    return Ok(indices.into_iter().map(|i| choices[i].value.clone()).collect());
                }
                None => self.say("  Please enter numbers from the list.").await?,
            }
        }
    }

    pub async fn confirm(&mut self, message: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            let Some(answer) = self.ask(&format!("? {message} ({hint}) ")).await? else {
                return Ok(default);
            };
            match answer.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("  Please answer y or n.").await?,
            }
        }
    }
}

fn parse_index(answer: &str, len: usize) -> Option<usize> {
    answer
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}
