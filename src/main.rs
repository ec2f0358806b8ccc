use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inggris::{
    activity::{
        ActivityView, ContentBatch, ContentRequester, Letter, Mode, QuizQuestion, VocabularyItem,
    },
    menu::{self, MenuEntry, Route},
    GeminiConfig,
};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Parser, Debug)]
#[command(name = "inggris", version)]
#[command(
    about = "Learn English with vocabulary and exercises generated on demand",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the home menu, or the casual level index
    Menu {
        #[arg(long)]
        casual: bool,
    },
    /// Learn new words for a category and level (e.g. casual beginner)
    Vocabulary { category: String, level: String },
    /// Answer multiple-choice questions for a category and level
    Exercises { category: String, level: String },
    /// Open a menu link such as /activity/idioms/general
    Open {
        route: String,
        /// "vocabulary" or "exercises"
        #[arg(short, long, default_value = "vocabulary")]
        mode: Mode,
    },
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Menu { casual } => print_menu(casual),
        Command::Vocabulary { category, level } => study(&category, &level, Mode::Vocabulary),
        Command::Exercises { category, level } => study(&category, &level, Mode::Exercises),
        Command::Open { route, mode } => {
            match Route::parse(&route).context(format!("unknown route '{}'", route))? {
                Route::Home => print_menu(false),
                Route::CasualIndex => print_menu(true),
                Route::Activity { category, level } => study(&category, &level, mode),
            }
        }
    }
}

fn print_menu(casual: bool) -> anyhow::Result<()> {
    let (title, entries): (&str, &[MenuEntry]) = if casual {
        ("Bahasa Inggris Casual", &menu::CASUAL_LEVELS[..])
    } else {
        ("Inggris-Chan", &menu::HOME_MENU[..])
    };

    println!("{BOLD}{}{RESET}\n", title);
    for entry in entries {
        println!("{BOLD}{}{RESET}  {}", entry.label, entry.href);
        println!("    {}", entry.description);
    }

    Ok(())
}

/// What to do after a batch has been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Load(Mode),
    Reload,
}

fn parse_choice(line: &str) -> Option<Choice> {
    match line.trim().to_lowercase().as_str() {
        "k" => Some(Choice::Load(Mode::Vocabulary)),
        "s" => Some(Choice::Load(Mode::Exercises)),
        "u" => Some(Choice::Reload),
        _ => None,
    }
}

fn study(category: &str, level: &str, mode: Mode) -> anyhow::Result<()> {
    let config = GeminiConfig::from_env().context("failed to load configuration")?;
    let requester = ContentRequester::new(config);
    let mut view = ActivityView::new(Some(category), Some(level));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    writeln!(out, "{BOLD}Aktivitas Belajar: {}{RESET}\n", view.title())?;
    writeln!(out, "Memuat konten...")?;
    let mut result = view.load(&requester, mode);

    loop {
        match result {
            Ok(()) => present(&mut view, &mut input, &mut out)?,
            Err(e) => writeln!(out, "\n{BOLD}Error:{RESET} {}", e)?,
        }

        let line = prompt(
            &mut input,
            &mut out,
            "\nMuat konten baru: [k] Kosakata, [s] Soal, [u] ulangi, Enter untuk kembali: ",
        )?;
        let Some(choice) = line.as_deref().and_then(parse_choice) else {
            writeln!(out, "Kembali ke {}", view.back_path())?;
            return Ok(());
        };

        writeln!(out, "Memuat konten...")?;
        result = match choice {
            Choice::Load(mode) => view.load(&requester, mode),
            Choice::Reload => view.reload(&requester),
        };
    }
}

fn present(
    view: &mut ActivityView,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match view.content().cloned() {
        Some(ContentBatch::Vocabulary(items)) => print_vocabulary(&items, out),
        Some(ContentBatch::Exercises(questions)) => run_exercises(view, &questions, input, out),
        None => Ok(()),
    }
}

fn print_vocabulary(items: &[VocabularyItem], out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "\n{BOLD}Kosakata Baru:{RESET}")?;
    for item in items {
        writeln!(out, "\n{BOLD}{}{RESET}", item.word)?;
        writeln!(out, "  Arti: {}", item.meaning)?;
        writeln!(out, "  Contoh: \"{}\"", item.example)?;
    }
    Ok(())
}

/// Asks every question once, then lets the learner revisit any of them by
/// number until they submit with an empty line.
fn run_exercises(
    view: &mut ActivityView,
    questions: &[QuizQuestion],
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    writeln!(out, "\n{BOLD}Latihan Soal:{RESET}")?;

    for (index, question) in questions.iter().enumerate() {
        ask(view, index, question, input, out)?;
    }

    loop {
        let summary: Vec<String> = (0..questions.len())
            .map(|index| {
                let chosen = view.quiz().answer(index);
                format!("{}. {}", index + 1, chosen.map_or("-", Letter::as_str))
            })
            .collect();
        writeln!(out, "\nJawaban kamu: {}", summary.join(", "))?;

        let Some(line) = prompt(input, out, "Ubah jawaban (nomor soal), Enter untuk kumpulkan: ")?
        else {
            break;
        };
        if line.trim().is_empty() {
            break;
        }

        match line.trim().parse::<usize>() {
            Ok(number) if (1..=questions.len()).contains(&number) => {
                ask(view, number - 1, &questions[number - 1], input, out)?
            }
            _ => writeln!(out, "Pilih nomor 1 sampai {}", questions.len())?,
        }
    }

    view.reveal();
    print_results(view, questions, out)
}

/// Reads one answer for `question`. A blank line keeps the current answer.
fn ask(
    view: &mut ActivityView,
    index: usize,
    question: &QuizQuestion,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    writeln!(out, "\n{BOLD}{}. {}{RESET}", index + 1, question.question)?;
    for (letter, text) in &question.options {
        writeln!(out, "  {}. {}", letter, text)?;
    }

    loop {
        let Some(line) = prompt(input, out, "Jawaban (A-D, kosong untuk lewati): ")? else {
            return Ok(());
        };
        if line.trim().is_empty() {
            return Ok(());
        }
        match line.parse::<Letter>() {
            Ok(letter) => {
                view.record_answer(index, letter);
                return Ok(());
            }
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
}

fn print_results(
    view: &ActivityView,
    questions: &[QuizQuestion],
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let results = view.quiz().results().unwrap_or_default();

    for (result, question) in results.iter().zip(questions) {
        let verdict = if result.is_correct { "Benar" } else { "Salah" };
        let chosen = result.chosen.map_or("-", Letter::as_str);

        writeln!(
            out,
            "\n{BOLD}{}. {}{RESET} (jawaban kamu: {})",
            result.index + 1,
            verdict,
            chosen
        )?;
        writeln!(
            out,
            "  Jawaban yang Benar: {}. {}",
            result.correct_answer,
            question.correct_option().unwrap_or_default()
        )?;
        writeln!(out, "  Penjelasan: {}", question.explanation)?;
    }

    if let Some((correct, total)) = view.quiz().score() {
        writeln!(out, "\nSkor: {BOLD}{}/{}{RESET}", correct, total)?;
    }

    Ok(())
}

/// `None` once input is exhausted.
fn prompt(
    input: &mut impl BufRead,
    out: &mut impl Write,
    message: &str,
) -> anyhow::Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).context("failed to read input")? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end().to_string()))
}
