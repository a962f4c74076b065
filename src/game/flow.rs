//! Question Flow
//!
//! Drives one [`Session`] through the quiz:
//!
//! ```text
//!   Idle ──start_game──▶ Asking ──input / expiry──▶ Resolving
//!                          ▲  ▲                        │
//!                          │  └──────── Invalid ───────┤
//!                          │                           ▼
//!                          └──── more questions ─── Advancing
//!                                                      │ last question
//!                                                      ▼
//!   Idle ◀──────── "yes" ──────────────────────── Finished
//! ```
//!
//! While asking, three sources race in one `select!`: shutdown, the next
//! input line and the question deadline. Whichever wins, the others are
//! dropped before anything is applied to the session, so a question settles
//! exactly once.

use std::io;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::config::GameConfig;
use crate::core::shutdown::ShutdownListener;
use crate::core::timer::{CountdownTimer, TimerCycle};
use crate::game::answer::{validate, Outcome, OutcomeKind};
use crate::game::bank::{Question, QuestionBank, OPTION_COUNT};
use crate::game::events::{EventLog, QuizEvent, QuizEventData};
use crate::game::report::{percentage, SessionReport};
use crate::game::session::{Session, SessionError, SessionStatus};
use crate::terminal::console::Console;

/// How the game ended. Every variant is a clean exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameExit {
    /// Player answered anything but yes to "play again".
    Declined,
    /// Input closed or became unreadable.
    InputClosed,
    /// Shutdown requested.
    Interrupted,
}

/// Game errors.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    /// Writing to the terminal failed.
    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),

    /// Session transition out of order.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Session pointed past the bank.
    #[error("No question at index {0}")]
    MissingQuestion(usize),
}

/// Reply to a plain prompt.
enum Reply {
    Line(String),
    Closed,
    Shutdown,
}

/// Winner of the asking race.
enum Race {
    Shutdown,
    Input(Option<String>),
    Expired(TimerCycle),
}

/// Result of one asking attempt.
enum Attempt {
    Outcome(Outcome),
    Closed,
    Shutdown,
}

/// How a round stopped.
enum RoundEnd {
    Finished,
    Closed,
    Shutdown,
}

/// The quiz state machine plus everything it drives.
pub struct QuizGame {
    config: GameConfig,
    bank: QuestionBank,
    session: Session,
    timer: CountdownTimer,
    console: Console,
    shutdown: ShutdownListener,
    events: EventLog,
    stopped: bool,
}

impl QuizGame {
    /// Create a game. Nothing is written until [`QuizGame::run`].
    pub fn new(
        config: GameConfig,
        bank: QuestionBank,
        console: Console,
        shutdown: ShutdownListener,
    ) -> Self {
        let session = Session::new(bank.len());
        Self {
            config,
            bank,
            session,
            timer: CountdownTimer::new(),
            console,
            shutdown,
            events: EventLog::new(),
            stopped: false,
        }
    }

    /// Play until the player declines, input closes, or shutdown.
    #[instrument(skip(self), fields(bank = %self.config.bank, questions = self.bank.len()))]
    pub async fn run(&mut self) -> Result<GameExit, QuizError> {
        self.write_welcome()?;

        match self.prompt("Press ENTER to start: ").await? {
            Reply::Line(_) => {}
            Reply::Closed => return self.farewell(GameExit::InputClosed),
            Reply::Shutdown => return self.interrupt(),
        }

        loop {
            match self.play_round().await? {
                RoundEnd::Finished => {}
                RoundEnd::Closed => return self.farewell(GameExit::InputClosed),
                RoundEnd::Shutdown => return self.interrupt(),
            }

            self.console.discard_pending();
            match self.prompt("\nPlay again? (yes/no): ").await? {
                Reply::Line(answer) if wants_replay(&answer) => {
                    info!(round = self.session.round() + 1, "Replaying");
                }
                Reply::Line(_) => return self.farewell(GameExit::Declined),
                Reply::Closed => return self.farewell(GameExit::InputClosed),
                Reply::Shutdown => return self.interrupt(),
            }
        }
    }

    /// Teardown after a stop request. Safe to call any number of times.
    pub fn interrupt(&mut self) -> Result<GameExit, QuizError> {
        self.timer.cancel();
        self.session.disarm();

        if !self.stopped {
            self.stopped = true;
            self.record(QuizEventData::Interrupted);
            warn!(
                status = ?self.session.status(),
                index = self.session.current_index(),
                "Game interrupted"
            );
            self.console.write_line("\n\nGame stopped. Goodbye!")?;
        }
        Ok(GameExit::Interrupted)
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Question timer.
    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    /// Transition history.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    // =========================================================================
    // ROUND
    // =========================================================================

    async fn play_round(&mut self) -> Result<RoundEnd, QuizError> {
        self.start_game()?;

        while self.session.status() == SessionStatus::Asking {
            let index = self.session.current_index();
            let question = self
                .bank
                .get(index)
                .cloned()
                .ok_or(QuizError::MissingQuestion(index))?;

            let mut attempt = 1;
            loop {
                let outcome = match self.ask(index, &question, attempt).await? {
                    Attempt::Outcome(outcome) => outcome,
                    Attempt::Closed => return Ok(RoundEnd::Closed),
                    Attempt::Shutdown => return Ok(RoundEnd::Shutdown),
                };

                if self.resolve(index, &question, &outcome)? == SessionStatus::Advancing {
                    break;
                }
                attempt += 1;
            }

            if !self.advance().await? {
                return Ok(RoundEnd::Shutdown);
            }
        }

        self.finish()?;
        Ok(RoundEnd::Finished)
    }

    /// Idle entry plus `start_game`.
    fn start_game(&mut self) -> Result<(), QuizError> {
        self.timer.cancel();
        self.session.reset();
        self.session.start_game()?;

        self.record(QuizEventData::RoundStarted {
            total: self.bank.len(),
        });
        info!(round = self.session.round(), "Round started");
        self.console.write_line("Game starting...\n")?;
        Ok(())
    }

    /// Show the question (first attempt only), arm the deadline, race.
    async fn ask(
        &mut self,
        index: usize,
        question: &Question,
        attempt: u32,
    ) -> Result<Attempt, QuizError> {
        if attempt == 1 {
            self.console.discard_pending();
            self.write_question(index, question)?;
        }
        self.console
            .write_line(&format!("\nTime: {} seconds", self.config.question_seconds()))?;

        let cycle = self.timer.start(self.config.question_time);
        if let Some(deadline) = self.timer.deadline() {
            self.session.arm(cycle, deadline)?;
        }
        self.record(QuizEventData::QuestionAsked { index, attempt });
        debug!(index, attempt, cycle, "Question armed");

        self.console.write("\nYour answer: ")?;

        let race = tokio::select! {
            biased;
            _ = self.shutdown.requested() => Race::Shutdown,
            line = self.console.next_line() => Race::Input(line),
            fired = self.timer.expired() => Race::Expired(fired),
        };

        match race {
            Race::Shutdown => Ok(Attempt::Shutdown),
            Race::Input(None) => {
                self.timer.cancel();
                self.session.disarm();
                Ok(Attempt::Closed)
            }
            Race::Input(Some(line)) => {
                let cancelled = self.timer.cancel();
                debug_assert!(cancelled, "input won but cycle {cycle} was not pending");
                self.session.disarm();

                let outcome = validate(&line, question);
                if outcome.kind == OutcomeKind::Invalid {
                    self.record(QuizEventData::InvalidAnswer {
                        index,
                        input: line,
                    });
                }
                Ok(Attempt::Outcome(outcome))
            }
            Race::Expired(fired) => {
                debug_assert_eq!(Some(fired), self.session.active_timer());
                self.session.disarm();
                debug!(index, cycle = fired, "Question timed out");
                self.console.write_line("\nTime's up!")?;
                Ok(Attempt::Outcome(Outcome::timed_out(question)))
            }
        }
    }

    /// Apply the outcome. Returns `Asking` for a re-ask, `Advancing` otherwise.
    fn resolve(
        &mut self,
        index: usize,
        question: &Question,
        outcome: &Outcome,
    ) -> Result<SessionStatus, QuizError> {
        self.session.begin_resolving()?;
        let status = self.session.resolve(outcome.kind)?;

        match outcome.kind {
            OutcomeKind::Invalid => {
                self.console.write_line(&format!(
                    "\nPlease enter a number between 1 and {OPTION_COUNT}."
                ))?;
                return Ok(status);
            }
            OutcomeKind::Correct => self.console.write_line("\n✓ Correct!")?,
            OutcomeKind::Incorrect => {
                self.console.write_line("\n✗ Wrong!")?;
                self.reveal(question, outcome)?;
            }
            OutcomeKind::TimedOut => self.reveal(question, outcome)?,
        }

        let score = self.session.score();
        let resolved = self.session.resolved();
        self.record(QuizEventData::Resolved {
            index,
            kind: outcome.kind,
            score,
        });
        debug!(index, kind = ?outcome.kind, score, "Question resolved");

        self.console.write_line(&format!(
            "Score: {}/{} ({}%)\n",
            score,
            resolved,
            percentage(score, resolved)
        ))?;
        Ok(status)
    }

    /// Fixed pause, then move on. Returns `false` if shutdown cut it short.
    async fn advance(&mut self) -> Result<bool, QuizError> {
        let pause = self.config.advance_delay;
        tokio::select! {
            biased;
            _ = self.shutdown.requested() => return Ok(false),
            _ = sleep(pause) => {}
        }

        let status = self.session.advance()?;
        debug!(?status, index = self.session.current_index(), "Advanced");
        Ok(true)
    }

    fn finish(&mut self) -> Result<SessionReport, QuizError> {
        let report = SessionReport::new(&self.session, &self.bank);
        self.record(QuizEventData::RoundFinished {
            score: report.score,
            total: report.total,
            percentage: report.percentage,
        });

        for line in report.lines() {
            self.console.write_line(&line)?;
        }

        match report.to_json() {
            Ok(json) => debug!(report = %json, "Round report"),
            Err(e) => warn!("Failed to serialize report: {}", e),
        }
        info!(
            score = report.score,
            total = report.total,
            percentage = report.percentage,
            "Round finished"
        );
        Ok(report)
    }

    // =========================================================================
    // OUTPUT
    // =========================================================================

    fn write_welcome(&mut self) -> io::Result<()> {
        self.console.write_line("=== TRIVIA GAME ===")?;
        self.console.write_line("\nHow to play:")?;
        self.console.write_line(&format!(
            "- You have {} seconds per question",
            self.config.question_seconds()
        ))?;
        self.console.write_line("- Type 1, 2, 3, or 4 to answer")?;
        self.console.write_line("- Try to get the highest score!\n")
    }

    fn write_question(&mut self, index: usize, question: &Question) -> io::Result<()> {
        self.console
            .write_line(&format!("Question {}/{}", index + 1, self.bank.len()))?;
        self.console.write_line(&format!("\n{}\n", question.prompt()))?;
        for (i, option) in question.options().iter().enumerate() {
            self.console.write_line(&format!("{}. {}", i + 1, option))?;
        }
        Ok(())
    }

    fn reveal(&mut self, question: &Question, outcome: &Outcome) -> io::Result<()> {
        let text = outcome
            .revealed_option
            .as_deref()
            .unwrap_or_else(|| question.correct_option());
        self.console.write_line(&format!(
            "Correct answer: {}. {}",
            question.correct_index() + 1,
            text
        ))
    }

    fn farewell(&mut self, exit: GameExit) -> Result<GameExit, QuizError> {
        self.timer.cancel();
        self.session.disarm();
        self.console.write_line("\nThanks for playing!")?;
        info!(?exit, "Game over");
        Ok(exit)
    }

    async fn prompt(&mut self, text: &str) -> Result<Reply, QuizError> {
        self.console.write(text)?;
        let reply = tokio::select! {
            biased;
            _ = self.shutdown.requested() => Reply::Shutdown,
            line = self.console.next_line() => match line {
                Some(line) => Reply::Line(line),
                None => Reply::Closed,
            },
        };
        Ok(reply)
    }

    fn record(&mut self, data: QuizEventData) {
        let event = QuizEvent::new(self.session.round(), data);
        if let Ok(json) = event.to_json() {
            debug!(event = %json, "Quiz event");
        }
        self.events.push(event);
    }
}

/// `yes` or `y`, any case, surrounding whitespace ignored.
pub fn wants_replay(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shutdown::Shutdown;
    use crate::game::bank::BankKind;
    use crate::terminal::console::MemoryOutput;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::task::JoinHandle;

    struct Player {
        input: mpsc::Sender<String>,
        output: MemoryOutput,
        shutdown: Shutdown,
    }

    impl Player {
        async fn type_after(&self, delay: Duration, line: &str) {
            sleep(delay).await;
            self.input.send(line.to_string()).await.unwrap();
        }
    }

    type Finished = (Result<GameExit, QuizError>, QuizGame);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn two_plus_two() -> Question {
        Question::new("2+2?", ["3", "4", "5", "6"], 1, None).unwrap()
    }

    fn setup(bank: QuestionBank) -> (QuizGame, Player) {
        let (tx, rx) = mpsc::channel(16);
        let output = MemoryOutput::new();
        let console = Console::new(rx, Box::new(output.clone()));
        let shutdown = Shutdown::new();
        let game = QuizGame::new(GameConfig::default(), bank, console, shutdown.subscribe());
        (game, Player { input: tx, output, shutdown })
    }

    fn spawn(mut game: QuizGame) -> JoinHandle<Finished> {
        tokio::spawn(async move {
            let exit = game.run().await;
            (exit, game)
        })
    }

    fn single_question() -> QuestionBank {
        QuestionBank::new(vec![two_plus_two()]).unwrap()
    }

    fn assert_settled_once(game: &QuizGame, round: u32) {
        let outcomes = game.events().outcomes(round);
        let mut indices: Vec<usize> = outcomes.iter().map(|(i, _)| *i).collect();
        indices.dedup();
        assert_eq!(indices.len(), outcomes.len(), "question settled twice: {outcomes:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_correct_answer_scores() {
        let (game, player) = setup(single_question());
        let task = spawn(game);

        player.type_after(ms(1), "").await;
        player.type_after(ms(1), "2").await;
        player.type_after(Duration::from_secs(3), "no").await;

        let (exit, game) = task.await.unwrap();
        assert_eq!(exit.unwrap(), GameExit::Declined);
        assert_eq!(game.session().score(), 1);
        assert_eq!(game.events().outcomes(1), vec![(0, OutcomeKind::Correct)]);
        assert!(!game.timer().is_armed());

        let text = player.output.contents();
        assert!(text.contains("✓ Correct!"));
        assert!(text.contains("Score: 1/1 (100%)"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_input_reasks_same_question() {
        let (game, player) = setup(single_question());
        let task = spawn(game);

        player.type_after(ms(1), "").await;
        player.type_after(ms(1), "9").await;
        player.type_after(ms(1), "banana").await;
        player.type_after(ms(1), "2").await;
        player.type_after(Duration::from_secs(3), "no").await;

        let (exit, game) = task.await.unwrap();
        assert_eq!(exit.unwrap(), GameExit::Declined);
        assert_eq!(game.session().score(), 1);
        assert_eq!(game.events().outcomes(1), vec![(0, OutcomeKind::Correct)]);

        let attempts: Vec<u32> = game
            .events()
            .events()
            .iter()
            .filter_map(|e| match e.data {
                QuizEventData::QuestionAsked { index: 0, attempt } => Some(attempt),
                _ => None,
            })
            .collect();
        assert_eq!(attempts, vec![1, 2, 3]);

        let text = player.output.contents();
        assert_eq!(text.matches("Please enter a number between 1 and 4.").count(), 2);
        assert_eq!(text.matches("Question 1/1").count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_reveals_answer() {
        let (game, player) = setup(single_question());
        let task = spawn(game);

        player.type_after(ms(1), "").await;
        player.type_after(Duration::from_secs(15), "no").await;

        let (exit, game) = task.await.unwrap();
        assert_eq!(exit.unwrap(), GameExit::Declined);
        assert_eq!(game.session().score(), 0);
        assert_eq!(game.events().outcomes(1), vec![(0, OutcomeKind::TimedOut)]);

        let text = player.output.contents();
        assert!(text.contains("Time's up!"));
        assert!(text.contains("Correct answer: 2. 4"));
        assert!(!text.contains("Correct!"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_answer_reveals_answer() {
        let (game, player) = setup(single_question());
        let task = spawn(game);

        player.type_after(ms(1), "").await;
        player.type_after(ms(1), "1").await;
        player.type_after(Duration::from_secs(3), "n").await;

        let (_, game) = task.await.unwrap();
        assert_eq!(game.events().outcomes(1), vec![(0, OutcomeKind::Incorrect)]);

        let text = player.output.contents();
        assert!(text.contains("✗ Wrong!\nCorrect answer: 2. 4\nScore: 0/1 (0%)"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_perfect_game() {
        let bank = QuestionBank::builtin(BankKind::General).unwrap();
        let answers: Vec<String> = bank.iter().map(|q| (q.correct_index() + 1).to_string()).collect();
        let (game, player) = setup(bank);
        let task = spawn(game);

        player.type_after(ms(1), "").await;
        player.type_after(ms(1), &answers[0]).await;
        for answer in &answers[1..] {
            player.type_after(ms(2500), answer).await;
        }
        player.type_after(Duration::from_secs(3), "no").await;

        let (exit, game) = task.await.unwrap();
        assert_eq!(exit.unwrap(), GameExit::Declined);
        assert_eq!(game.session().score(), 5);
        assert_eq!(game.session().status(), SessionStatus::Finished);
        assert_settled_once(&game, 1);

        let finished = game.events().events().iter().find_map(|e| match e.data {
            QuizEventData::RoundFinished { percentage, .. } => Some(percentage),
            _ => None,
        });
        assert_eq!(finished, Some(100));

        let text = player.output.contents();
        assert!(text.contains("Final score: 5/5"));
        assert!(text.contains("Perfect! You're amazing!"));
        assert!(text.contains("- Easy questions: 3"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_input_is_discarded() {
        let bank = QuestionBank::new(vec![
            two_plus_two(),
            Question::new("3+3?", ["5", "6", "7", "8"], 1, None).unwrap(),
        ])
        .unwrap();
        let (game, player) = setup(bank);
        let task = spawn(game);

        player.type_after(ms(1), "").await;
        // Question 1 expires at ~10s; this lands during the pause.
        player.type_after(Duration::from_secs(11), "1").await;
        player.type_after(ms(1500), "2").await;
        player.type_after(Duration::from_secs(3), "no").await;

        let (_, game) = task.await.unwrap();
        assert_eq!(
            game.events().outcomes(1),
            vec![(0, OutcomeKind::TimedOut), (1, OutcomeKind::Correct)]
        );
        assert_eq!(game.session().score(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_at_deadline_settles_once() {
        let (game, player) = setup(single_question());
        let task = spawn(game);

        player.type_after(ms(1), "").await;
        player.type_after(Duration::from_secs(10), "2").await;
        player.type_after(Duration::from_secs(3), "no").await;

        let (_, game) = task.await.unwrap();
        let outcomes = game.events().outcomes(1);
        assert_eq!(outcomes.len(), 1);

        let (_, kind) = outcomes[0];
        assert!(matches!(kind, OutcomeKind::Correct | OutcomeKind::TimedOut));
        assert_eq!(game.session().score(), u32::from(kind == OutcomeKind::Correct));
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_again_resets_session() {
        let (game, player) = setup(single_question());
        let task = spawn(game);

        player.type_after(ms(1), "").await;
        player.type_after(ms(1), "2").await;
        player.type_after(Duration::from_secs(3), "YES").await;
        player.type_after(ms(1), "1").await;
        player.type_after(Duration::from_secs(3), "no").await;

        let (exit, game) = task.await.unwrap();
        assert_eq!(exit.unwrap(), GameExit::Declined);
        assert_eq!(game.session().round(), 2);
        assert_eq!(game.session().score(), 0);
        assert_eq!(game.events().outcomes(1), vec![(0, OutcomeKind::Correct)]);
        assert_eq!(game.events().outcomes(2), vec![(0, OutcomeKind::Incorrect)]);

        let restart = game
            .events()
            .events()
            .iter()
            .position(|e| e.round == 2 && e.data == QuizEventData::RoundStarted { total: 1 });
        assert!(restart.is_some());

        let text = player.output.contents();
        assert_eq!(text.matches("Game starting...").count(), 2);
        assert!(text.ends_with("Play again? (yes/no): \nThanks for playing!\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_mid_question() {
        let (game, player) = setup(single_question());
        let task = spawn(game);

        player.type_after(ms(1), "").await;
        sleep(Duration::from_secs(5)).await;
        player.shutdown.trigger();
        player.shutdown.trigger();

        let (exit, game) = task.await.unwrap();
        assert_eq!(exit.unwrap(), GameExit::Interrupted);
        assert!(!game.timer().is_armed());
        assert!(game.session().active_timer().is_none());
        assert_eq!(game.session().score(), 0);
        assert!(game.events().outcomes(1).is_empty());

        let text = player.output.contents();
        assert_eq!(text.matches("Game stopped. Goodbye!").count(), 1);
        assert!(text.ends_with("Game stopped. Goodbye!\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_during_pause_stops_advancing() {
        let bank = QuestionBank::builtin(BankKind::Space).unwrap();
        let (game, player) = setup(bank);
        let task = spawn(game);

        player.type_after(ms(1), "").await;
        player.type_after(ms(1), "3").await;
        sleep(Duration::from_secs(1)).await;
        player.shutdown.trigger();

        let (exit, mut game) = task.await.unwrap();
        assert_eq!(exit.unwrap(), GameExit::Interrupted);
        assert_eq!(game.session().status(), SessionStatus::Advancing);
        assert_eq!(game.session().current_index(), 0);
        assert_eq!(game.session().score(), 1);

        // Teardown again is a no-op.
        assert_eq!(game.interrupt().unwrap(), GameExit::Interrupted);
        assert_eq!(player.output.contents().matches("Game stopped. Goodbye!").count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_at_start_prompt() {
        let (game, player) = setup(single_question());
        let task = spawn(game);

        sleep(ms(1)).await;
        player.shutdown.trigger();

        let (exit, game) = task.await.unwrap();
        assert_eq!(exit.unwrap(), GameExit::Interrupted);
        assert_eq!(game.session().round(), 0);
        assert_eq!(game.session().status(), SessionStatus::Idle);
        assert!(player
            .output
            .contents()
            .ends_with("Press ENTER to start: \n\nGame stopped. Goodbye!\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_at_play_again_prompt() {
        let (game, player) = setup(single_question());
        let task = spawn(game);

        player.type_after(ms(1), "").await;
        player.type_after(ms(1), "2").await;
        sleep(Duration::from_secs(3)).await;
        player.shutdown.trigger();

        let (exit, game) = task.await.unwrap();
        assert_eq!(exit.unwrap(), GameExit::Interrupted);
        assert_eq!(game.session().status(), SessionStatus::Finished);
        assert_eq!(game.session().score(), 1);
        assert!(!game.timer().is_armed());

        let text = player.output.contents();
        assert!(text.contains("Final score: 1/1"));
        assert!(text.ends_with("Play again? (yes/no): \n\nGame stopped. Goodbye!\n"));
        assert!(!text.contains("Thanks for playing!"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_garbled_answer_reasks() {
        let (game, player) = setup(single_question());
        let task = spawn(game);

        player.type_after(ms(1), "").await;
        player.type_after(ms(1), &String::from_utf8_lossy(b"\xe9")).await;
        player.type_after(ms(1), "2").await;
        player.type_after(Duration::from_secs(3), "no").await;

        let (exit, game) = task.await.unwrap();
        assert_eq!(exit.unwrap(), GameExit::Declined);
        assert_eq!(game.session().score(), 1);
        assert_eq!(game.events().outcomes(1), vec![(0, OutcomeKind::Correct)]);
        assert!(game
            .events()
            .events()
            .iter()
            .any(|e| matches!(&e.data, QuizEventData::InvalidAnswer { index: 0, input } if input == "\u{FFFD}")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_input_ends_gracefully() {
        let (game, player) = setup(single_question());
        let task = spawn(game);

        player.type_after(ms(1), "").await;
        sleep(ms(1)).await;
        let Player { input, output, .. } = player;
        drop(input);

        let (exit, game) = task.await.unwrap();
        assert_eq!(exit.unwrap(), GameExit::InputClosed);
        assert!(!game.timer().is_armed());
        assert!(output.contents().ends_with("Thanks for playing!\n"));
    }

    #[test]
    fn test_wants_replay() {
        assert!(wants_replay("yes"));
        assert!(wants_replay("Y"));
        assert!(wants_replay(" Yes \r"));
        assert!(!wants_replay("no"));
        assert!(!wants_replay(""));
        assert!(!wants_replay("yess"));
    }
}
