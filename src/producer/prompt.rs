//! Console prompts collecting a course record from the user

use std::future::Future;
use std::io::{BufRead, Write};

use tokio::sync::mpsc;
use tracing::warn;

use crate::{Error, domain::CourseRecord, error::invalid_input};

const AFFIRMATIVE: [&str; 4] = ["t", "tak", "y", "yes"];

/// Source of answer lines. `None` marks the end of the input.
pub trait LineSource {
    fn next_line(&mut self) -> impl Future<Output = Result<Option<String>, Error>>;
}

/// Lines read from any in-memory or otherwise non-interactive reader.
pub struct Lines<R>(pub R);

impl<R: BufRead> LineSource for Lines<R> {
    async fn next_line(&mut self) -> Result<Option<String>, Error> {
        let mut line = String::new();
        if self.0.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Standard input read on a detached thread, so waiting for the user never blocks the runtime and an
/// interrupt can be observed while a prompt is open.
pub struct ConsoleInput {
    lines: mpsc::UnboundedReceiver<std::io::Result<String>>,
}

impl ConsoleInput {
    pub fn spawn() -> Self {
        let (tx, lines) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            loop {
                let mut line = String::new();
                match stdin.lock().read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        if tx.send(Ok(line)).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        let _ = tx.send(Err(err));
                        break;
                    }
                }
            }
        });
        Self { lines }
    }
}

impl LineSource for ConsoleInput {
    async fn next_line(&mut self) -> Result<Option<String>, Error> {
        match self.lines.recv().await {
            Some(line) => Ok(Some(line?)),
            None => Ok(None),
        }
    }
}

/// Line-oriented console. Prompts go to `output`, answers come from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: LineSource, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `text` and returns the trimmed answer. End of input is [`Error::InputClosed`].
    pub async fn ask(&mut self, text: &str) -> Result<String, Error> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        match self.input.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(Error::InputClosed),
        }
    }

    pub fn say(&mut self, text: &str) -> Result<(), Error> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub async fn read_subject(&mut self) -> Result<String, Error> {
        self.ask("Subject name: ").await
    }

    /// Asks for the ECTS credits until a non-negative integer is given.
    pub async fn read_ects(&mut self) -> Result<u64, Error> {
        loop {
            let answer = self.ask("ECTS credits: ").await?;
            match parse_ects(&answer) {
                Ok(ects) => return Ok(ects),
                Err(err) => self.say(&format!("{err}. Try again."))?,
            }
        }
    }

    pub async fn read_grades(&mut self) -> Result<Vec<f64>, Error> {
        self.say("Grades, comma separated (e.g. 5,4.5,3), or leave empty:")?;
        let answer = self.ask("Grades: ").await?;
        Ok(parse_grades(&answer))
    }

    /// Returns `true` only for an explicit yes (`t`, `tak`, `y`, `yes`).
    pub async fn confirm(&mut self, question: &str) -> Result<bool, Error> {
        let answer = self
            .ask(&format!("{question} (t/n): "))
            .await?
            .to_lowercase();
        Ok(AFFIRMATIVE.contains(&answer.as_str()))
    }
}

/// Runs the prompts in order and stamps the record with the current local time.
pub async fn read_course<R: LineSource, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<CourseRecord, Error> {
    prompter.say("\n=== Course details ===")?;
    let subject = prompter.read_subject().await?;
    let ects = prompter.read_ects().await?;
    let grades = prompter.read_grades().await?;
    Ok(CourseRecord::stamped_now(subject, ects, grades))
}

pub(crate) fn parse_ects(answer: &str) -> Result<u64, Error> {
    let value: i128 = answer
        .trim()
        .parse()
        .map_err(|_| invalid_input("ECTS credits must be a whole number"))?;
    if value < 0 {
        return Err(invalid_input("ECTS credits cannot be negative"));
    }
    u64::try_from(value).map_err(|_| invalid_input("ECTS credits value is too large"))
}

/// Parses a comma separated list of grades, keeping the typed order.
///
/// Blank tokens are skipped. A single unparseable token discards the whole list.
pub fn parse_grades(line: &str) -> Vec<f64> {
    let parsed: Result<Vec<f64>, _> = line
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<f64>().map_err(|e| (token, e)))
        .collect();

    match parsed {
        Ok(grades) => grades,
        Err((token, e)) => {
            warn!("Could not parse grade {token:?}: {e}. Using an empty list.");
            Vec::new()
        }
    }
}
