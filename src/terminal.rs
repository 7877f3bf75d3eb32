use std::time::Duration;

use log::{debug, warn};
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// What came back while a question was on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Line(String),
    TimedOut,
    Closed,
}

/// Lines typed by the player, read on a background task.
///
/// Reading never stops while the quiz pauses, so anything typed between
/// questions can be thrown away with [`LineInput::discard_pending`] instead of
/// being graded against the next question.
pub struct LineInput {
    lines: UnboundedReceiver<String>,
}

impl LineInput {
    pub fn new(lines: UnboundedReceiver<String>) -> Self {
        Self { lines }
    }

    /// Starts forwarding stdin. Must be called inside a tokio runtime.
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        warn!("Failed to read from stdin: {}", err);
                        break;
                    }
                }
            }
        });
        Self::new(rx)
    }

    /// Next line, `None` once input is closed.
    pub async fn next_line(&mut self) -> Option<String> {
        self.lines.recv().await
    }

    /// Like [`LineInput::next_line`] but gives up after `limit`, if there is one.
    pub async fn reply_within(&mut self, limit: Option<Duration>) -> Reply {
        let line = match limit {
            Some(limit) => match tokio::time::timeout(limit, self.lines.recv()).await {
                Ok(line) => line,
                Err(_) => return Reply::TimedOut,
            },
            None => self.lines.recv().await,
        };
        match line {
            Some(line) => Reply::Line(line),
            None => Reply::Closed,
        }
    }

    /// Drops lines that were typed before the current prompt was shown.
    pub fn discard_pending(&mut self) -> usize {
        let mut dropped = 0;
        while self.lines.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            debug!("Ignored {} line(s) typed between questions", dropped);
        }
        dropped
    }
}
