use crate::infra::{catalog_path, load_catalog};
use clap::Args;
use stack_advisor::advisor::{
    minimum_questions, Candidate, Catalog, Question, QuestionKind, SessionOutcome, Walker,
};
use stack_advisor::config::AppConfig;
use stack_advisor::error::AppError;
use stack_advisor::telemetry::{self, LogSink};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct AskArgs {
    /// Decision tree (.json) or catalog export (.csv) to load instead of the built-in stacks
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Decision tree (.json) or catalog export (.csv) to load instead of the built-in stacks
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Stack whose answers drive the walkthrough (case-insensitive)
    #[arg(long, default_value = "T3 Stack")]
    pub(crate) stack: String,
    /// Decision tree (.json) or catalog export (.csv) to load instead of the built-in stacks
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) fn run_ask(args: AskArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;

    let path = args.catalog.or(config.catalog.path);
    let catalog = load_catalog(path.as_deref())?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    ask_session(&catalog, stdin.lock(), stdout.lock())?;
    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = load_catalog(catalog_path(args.catalog)?.as_deref())?;
    render_catalog(&catalog, &mut io::stdout().lock())?;
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;

    let path = args.catalog.or(config.catalog.path);
    let catalog = load_catalog(path.as_deref())?;
    let mut out = io::stdout().lock();

    let Some(target) = catalog.find(&args.stack) else {
        writeln!(out, "Unknown stack '{}'. Available stacks:", args.stack)?;
        for candidate in catalog.candidates() {
            writeln!(out, "  - {}", candidate.name)?;
        }
        return Ok(());
    };

    let walker = scripted_walk(&catalog, target);
    render_walkthrough(&walker, target, &mut out)?;
    Ok(())
}

/// Runs one advisory session against a line-oriented reader. Stops early when
/// the input closes.
pub(crate) fn ask_session<R, W>(catalog: &Catalog, mut input: R, mut output: W) -> io::Result<Walker>
where
    R: BufRead,
    W: Write,
{
    let mut walker = Walker::with_standard_questions(catalog);
    writeln!(
        output,
        "Stack advisor: {} stacks in play, at least {} questions to single one out",
        catalog.len(),
        minimum_questions(catalog.len())
    )?;

    while let Some(question) = walker.next_question().cloned() {
        writeln!(output)?;
        writeln!(output, "{} [{}]", question.text, question.kind.label())?;
        if let Some(description) = question.description {
            writeln!(output, "  {description}")?;
        }
        for (position, answer) in question.answers.iter().enumerate() {
            writeln!(output, "  {}. {}", position + 1, answer)?;
        }

        let Some(answer) = prompt_answer(&question, &mut input, &mut output)? else {
            writeln!(output)?;
            writeln!(output, "Input closed, stopping early.")?;
            break;
        };
        walker.record_answer(question.id, answer);
        writeln!(output, "  {} stack(s) remain", walker.remaining().len())?;
    }

    writeln!(output)?;
    render_outcome(&walker, &mut output)?;
    Ok(walker)
}

fn prompt_answer<R, W>(
    question: &Question,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<&'static str>>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match parse_answer(question, line.trim()) {
            Some(answer) => return Ok(Some(answer)),
            None => writeln!(
                output,
                "  Enter 1-{} or one of the listed answers.",
                question.answers.len()
            )?,
        }
    }
}

/// Accepts an answer's 1-based position, its text (case-insensitive) or y/n
/// for boolean questions.
pub(crate) fn parse_answer(question: &Question, raw: &str) -> Option<&'static str> {
    if let Ok(position) = raw.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| question.answers.get(index).copied());
    }

    if question.kind == QuestionKind::Boolean {
        match raw.to_ascii_lowercase().as_str() {
            "y" => return question.answers.first().copied(),
            "n" => return question.answers.get(1).copied(),
            _ => {}
        }
    }

    question
        .answers
        .iter()
        .copied()
        .find(|answer| answer.eq_ignore_ascii_case(raw))
}

/// Answers every question the way `target` would.
pub(crate) fn scripted_walk(catalog: &Catalog, target: &Candidate) -> Walker {
    let mut walker = Walker::with_standard_questions(catalog);
    while let Some(question) = walker.next_question().cloned() {
        let Some(answer) = question.expected_answer(target) else {
            break;
        };
        walker.record_answer(question.id, answer);
    }
    walker
}

pub(crate) fn render_catalog<W: Write>(catalog: &Catalog, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{} stacks (at least {} yes/no questions to single one out)",
        catalog.len(),
        minimum_questions(catalog.len())
    )?;
    for candidate in catalog.candidates() {
        writeln!(out, "- {}: {}", candidate.name, candidate.description)?;
        if !candidate.url.is_empty() {
            writeln!(out, "  {}", candidate.url)?;
        }
        if !candidate.tags.is_empty() {
            writeln!(out, "  tags: {}", candidate.tags.join(", "))?;
        }
    }
    Ok(())
}

fn render_walkthrough<W: Write>(walker: &Walker, target: &Candidate, out: &mut W) -> io::Result<()> {
    writeln!(out, "Answering as {}", target.name)?;
    for (line, entry) in walker.path_summary().iter().zip(walker.history()) {
        writeln!(out, "- {line} ({} left)", entry.candidates_remaining)?;
    }
    writeln!(out)?;
    render_outcome(walker, out)
}

pub(crate) fn render_outcome<W: Write>(walker: &Walker, out: &mut W) -> io::Result<()> {
    let outcome = walker.outcome();
    match &outcome {
        SessionOutcome::Found(stack) => {
            writeln!(out, "Recommended stack: {}", stack.name)?;
            writeln!(out, "  {}", stack.description)?;
            if !stack.url.is_empty() {
                writeln!(out, "  {}", stack.url)?;
            }
            for reason in stack.reasons.iter().flatten() {
                writeln!(out, "  * {reason}")?;
            }
        }
        SessionOutcome::Empty => writeln!(out, "No stack matched every answer.")?,
        SessionOutcome::Exhausted | SessionOutcome::Active => {
            writeln!(out, "Still in play:")?;
            for candidate in walker.remaining() {
                writeln!(out, "  - {}", candidate.name)?;
            }
        }
    }
    writeln!(
        out,
        "Asked {} question(s) [{}]",
        walker.history().len(),
        outcome.status().label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use stack_advisor::advisor::QuestionBank;

    fn rendered(walker: &Walker) -> String {
        let mut buffer = Vec::new();
        render_outcome(walker, &mut buffer).expect("render");
        String::from_utf8(buffer).expect("utf8")
    }

    #[test]
    fn parse_answer_accepts_positions_text_and_shortcuts() {
        let bank = QuestionBank::standard();
        let team = bank.get("team_size").expect("team size question");

        assert_eq!(parse_answer(team, "1"), Some("Solo/Small team"));
        assert_eq!(parse_answer(team, "large team"), Some("Large team"));
        assert_eq!(parse_answer(team, "n"), Some("Large team"));
        assert_eq!(parse_answer(team, "3"), None);
        assert_eq!(parse_answer(team, "0"), None);
        assert_eq!(parse_answer(team, "medium"), None);

        let deployment = bank.get("deployment_target").expect("deployment question");
        assert_eq!(parse_answer(deployment, "4"), Some("Mobile app stores"));
        assert_eq!(parse_answer(deployment, "y"), None);
    }

    #[test]
    fn interactive_session_matches_scripted_walk() {
        let catalog = Catalog::standard();
        let target = catalog.find("Ruby on Rails").expect("rails present");
        let scripted = scripted_walk(&catalog, target);
        let input: String = scripted
            .history()
            .iter()
            .map(|entry| format!("{}\n", entry.answer))
            .collect();

        let mut output = Vec::new();
        let walker = ask_session(&catalog, input.as_bytes(), &mut output).expect("session runs");

        assert_eq!(walker.history(), scripted.history());
        let transcript = String::from_utf8(output).expect("utf8");
        assert!(transcript.contains("Recommended stack: Ruby on Rails"));
        assert!(transcript.starts_with("Stack advisor: 15 stacks in play, at least 4 questions"));
    }

    #[test]
    fn interactive_session_reprompts_and_stops_on_eof() {
        let catalog = Catalog::standard();
        let mut output = Vec::new();
        let walker =
            ask_session(&catalog, "maybe\n".as_bytes(), &mut output).expect("session runs");

        assert!(walker.history().is_empty());
        let transcript = String::from_utf8(output).expect("utf8");
        assert!(transcript.contains("Enter 1-2 or one of the listed answers."));
        assert!(transcript.contains("Input closed, stopping early."));
        assert!(transcript.contains("Still in play:"));
    }

    #[test]
    fn single_stack_catalog_recommends_immediately() {
        let catalog = Catalog::from_candidates(vec![Candidate {
            name: "Phoenix LiveView".to_string(),
            description: "Real-time server-rendered UI".to_string(),
            url: "https://www.phoenixframework.org".to_string(),
            tags: vec!["realtime".to_string()],
            reasons: Some(vec!["No separate frontend build".to_string()]),
        }])
        .expect("catalog");

        let mut output = Vec::new();
        let walker = ask_session(&catalog, io::empty(), &mut output).expect("session runs");
        assert!(walker.history().is_empty());

        let transcript = String::from_utf8(output).expect("utf8");
        assert!(transcript.contains("Recommended stack: Phoenix LiveView"));
        assert!(transcript.contains("* No separate frontend build"));
    }

    #[test]
    fn outcome_reports_empty_sessions() {
        let catalog = Catalog::standard();
        let mut walker = Walker::with_standard_questions(&catalog);
        walker.record_answer("mobile_app", "Sometimes");

        let text = rendered(&walker);
        assert!(text.contains("No stack matched every answer."));
        assert!(text.contains("[No Match]"));
    }

    #[test]
    fn walkthrough_lists_each_answer() {
        let catalog = Catalog::standard();
        let target = catalog.find("Shopify Hydrogen").expect("hydrogen present");
        let walker = scripted_walk(&catalog, target);

        let mut buffer = Vec::new();
        render_walkthrough(&walker, target, &mut buffer).expect("render");
        let text = String::from_utf8(buffer).expect("utf8");

        assert!(text.starts_with("Answering as Shopify Hydrogen"));
        assert_eq!(text.matches(" left)").count(), walker.history().len());
        assert!(text.contains("Recommended stack: Shopify Hydrogen"));
    }

    #[test]
    fn catalog_listing_includes_every_stack() {
        let catalog = Catalog::standard();
        let mut buffer = Vec::new();
        render_catalog(&catalog, &mut buffer).expect("render");
        let text = String::from_utf8(buffer).expect("utf8");

        assert!(text.starts_with("15 stacks (at least 4 yes/no questions"));
        for candidate in catalog.candidates() {
            assert!(text.contains(&format!("- {}:", candidate.name)));
        }
    }
}
