use std::io::Write;
use std::time::{Duration, Instant};

use dotenv::dotenv;
use log::{debug, info};
use times_tables::quiz::settings::{
    parse_question_count, parse_tables, parse_time_per_question, QUESTION_COUNT_CHOICES, TIME_CHOICES,
};
use times_tables::{Config, DifficultyPreset, Quiz, QuizGenerator, Settings};
use times_tables::terminal::{LineInput, Reply};

type HandlerResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
type Generator = QuizGenerator<rand::rngs::StdRng>;

pub enum State {
    Setup,
    Quiz(Quiz),
    Results(Quiz),
    Exit,
}

#[tokio::main]
async fn main() -> HandlerResult {
    dotenv().ok();
    pretty_env_logger::init();
    info!("Starting times tables quiz...");

    let config = Config::from_env()?;
    debug!("Loaded config: {:?}", config);

    let mut generator = match config.seed {
        Some(seed) => QuizGenerator::seeded(seed),
        None => QuizGenerator::from_entropy(),
    };
    let mut input = LineInput::stdin();

    let mut state = State::Setup;
    loop {
        state = match state {
            State::Setup => setup(&config, &mut generator, &mut input).await?,
            State::Quiz(quiz) => run_quiz(&config, quiz, &mut input).await?,
            State::Results(quiz) => results(&mut generator, quiz, &mut input).await?,
            State::Exit => break,
        };
    }

    info!("Quiz closed");
    Ok(())
}

async fn ask(input: &mut LineInput, text: &str) -> HandlerResult<Option<String>> {
    print!("{}", text);
    std::io::stdout().flush()?;
    Ok(input.next_line().await)
}

async fn setup(config: &Config, generator: &mut Generator, input: &mut LineInput) -> HandlerResult<State> {
    println!("\n=== Multiplication for Kids - Times Tables Quiz ===");
    let presets = DifficultyPreset::ALL
        .iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(", ");
    println!("Pick tables from 2 to 12, or one of the presets: {}", presets);

    let selected_tables = loop {
        let Some(line) = ask(input, "Which times tables? ").await? else {
            return Ok(State::Exit);
        };
        match parse_tables(&line) {
            Ok(tables) => break tables,
            Err(err) => println!("⚠ {}", err),
        }
    };

    let choices = QUESTION_COUNT_CHOICES.map(|c| c.to_string()).join("/");
    let question_count = loop {
        let text = format!("How many questions? {} or any 3-100 [{}]: ", choices, config.question_count);
        let Some(line) = ask(input, &text).await? else {
            return Ok(State::Exit);
        };
        if line.trim().is_empty() {
            break config.question_count;
        }
        match parse_question_count(&line) {
            Ok(count) => break count,
            Err(err) => println!("⚠ {}", err),
        }
    };

    let Some(line) = ask(input, "Enable timer? [y/N]: ").await? else {
        return Ok(State::Exit);
    };
    let timer_enabled = matches!(line.trim().to_lowercase().as_str(), "y" | "yes");

    let mut time_per_question = config.time_per_question;
    if timer_enabled {
        let choices = TIME_CHOICES.map(|c| c.to_string()).join("/");
        time_per_question = loop {
            let text = format!("Seconds per question? {} [{}]: ", choices, config.time_per_question);
            let Some(line) = ask(input, &text).await? else {
                return Ok(State::Exit);
            };
            if line.trim().is_empty() {
                break config.time_per_question;
            }
            match parse_time_per_question(&line) {
                Ok(seconds) => break seconds,
                Err(err) => println!("⚠ {}", err),
            }
        };
    } else {
        println!("Take your time! No time pressure.");
    }

    let settings = Settings {
        selected_tables,
        question_count,
        timer_enabled,
        time_per_question,
    };
    if let Err(err) = settings.validate() {
        println!("⚠ {}", err);
        return Ok(State::Setup);
    }

    let quiz = Quiz::start(settings, generator);
    if quiz.total() < quiz.settings.question_count {
        println!(
            "Only {} different questions exist for these tables, so the quiz has {}.",
            quiz.total(),
            quiz.total()
        );
    }
    info!(
        "Starting quiz: tables {:?}, {} questions",
        quiz.settings.selected_tables,
        quiz.total()
    );
    Ok(State::Quiz(quiz))
}

async fn run_quiz(config: &Config, mut quiz: Quiz, input: &mut LineInput) -> HandlerResult<State> {
    let timer = quiz
        .settings
        .timer_enabled
        .then(|| Duration::from_secs(quiz.settings.time_per_question));

    while let Some(question) = quiz.current() {
        let expected = question.answer;
        println!(
            "\nQuestion {} of {}    Score: {}/{}",
            question.id,
            quiz.total(),
            quiz.score,
            quiz.answered()
        );
        if let Some(limit) = timer {
            println!("⏱ {}s", limit.as_secs());
        }
        // Late answers to the last question or keys hit during the pause.
        input.discard_pending();
        print!("{} = ", question);
        std::io::stdout().flush()?;

        let shown = Instant::now();
        let answer = match input.reply_within(timer).await {
            Reply::Closed => return Ok(State::Exit),
            // Anything that is not a number counts as 0.
            Reply::Line(text) => Some(text.trim().parse().unwrap_or(0)),
            Reply::TimedOut => {
                println!("\nTime's up!");
                None
            }
        };

        if quiz.submit_answer(answer, shown.elapsed()) {
            println!("Correct! 🎉");
        } else {
            println!("Not quite. The correct answer is {}", expected);
        }
        tokio::time::sleep(config.feedback_delay).await;
    }

    info!(
        "Quiz finished: {}/{} in {:.1}s",
        quiz.score,
        quiz.total(),
        quiz.total_time().as_secs_f64()
    );
    Ok(State::Results(quiz))
}

async fn results(generator: &mut Generator, mut quiz: Quiz, input: &mut LineInput) -> HandlerResult<State> {
    println!("\n{}", "=".repeat(40));
    println!("Final Score: {}/{}", quiz.score, quiz.total());
    println!("{}% Correct", quiz.percentage());
    println!("{}", quiz.achievement());
    println!("{}", "=".repeat(40));

    println!("Times Tables Answers Review");
    for question in &quiz.questions {
        let given = question
            .user_answer
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        if question.is_correct == Some(true) {
            println!("  {}: {} = {}  ✓ Correct", question.label(), question, given);
        } else {
            println!(
                "  {}: {} = {}  ✗ Correct answer: {}",
                question.label(),
                question,
                given,
                question.answer
            );
        }
    }

    input.discard_pending();
    loop {
        let Some(line) = ask(input, "\n[r] try again, [n] new quiz, [q] quit: ").await? else {
            return Ok(State::Exit);
        };
        match line.trim().to_lowercase().as_str() {
            "r" => {
                quiz.restart(generator);
                info!("Restarting quiz with {} questions", quiz.total());
                return Ok(State::Quiz(quiz));
            }
            "n" => return Ok(State::Setup),
            "q" => return Ok(State::Exit),
            _ => println!("Please choose r, n or q"),
        }
    }
}
