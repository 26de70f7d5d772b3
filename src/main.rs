use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use mentor::{Config, Node, study};

#[derive(Parser)]
#[command(name = "mentor")]
#[command(about = "Render tutoring answers and study material to HTML, Typst, PDF or JSON")]
struct Cli {
    /// Input file: answer text, or a JSON array for study material
    input: PathBuf,

    /// Output file (defaults to input name with the format's extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "html")]
    format: Format,

    /// What the input contains
    #[arg(short, long, value_enum, default_value = "answer")]
    kind: Kind,

    /// Show quiz answers and explanations
    #[arg(long)]
    reveal: bool,

    /// Grade a quiz: the chosen option index (from 0) for each question
    #[arg(long, value_delimiter = ',')]
    answers: Vec<usize>,

    /// Config file (defaults to mentor.toml in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Typst,
    Pdf,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Typst => "typ",
            Format::Pdf => "pdf",
            Format::Json => "json",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Answer,
    Quiz,
    Flashcards,
    Roadmap,
}

fn read_nodes(input: &str, cli: &Cli) -> mentor::Result<Vec<Node>> {
    Ok(match cli.kind {
        Kind::Answer => mentor::parse(input),
        Kind::Quiz if !cli.answers.is_empty() => {
            study::graded_quiz_nodes(&study::parse_quizzes(input)?, &cli.answers)
        }
        Kind::Quiz => study::quiz_nodes(&study::parse_quizzes(input)?, cli.reveal),
        Kind::Flashcards => study::flashcard_nodes(&study::parse_flashcards(input)?),
        Kind::Roadmap => study::roadmap_nodes(&study::parse_roadmap(input)?),
    })
}

fn render(nodes: &[Node], format: Format, config: &Config) -> mentor::Result<Vec<u8>> {
    Ok(match format {
        Format::Html => mentor::nodes_to_html(nodes, &config.html).into_bytes(),
        Format::Typst => mentor::nodes_to_typst(nodes, config).into_bytes(),
        Format::Pdf => mentor::nodes_to_pdf(nodes, config)?,
        Format::Json => serde_json::to_vec_pretty(nodes)?,
    })
}

fn run(cli: Cli) -> mentor::Result<PathBuf> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("mentor.toml"));
    let config = Config::load(&config_path);

    let input = fs::read_to_string(&cli.input)?;
    let nodes = read_nodes(&input, &cli)?;
    let bytes = render(&nodes, cli.format, &config)?;

    let output = cli.output.unwrap_or_else(|| {
        let derived = cli.input.with_extension(cli.format.extension());
        // Never overwrite the input
        if derived == cli.input {
            cli.input.with_extension(format!("out.{}", cli.format.extension()))
        } else {
            derived
        }
    });
    fs::write(&output, bytes)?;

    Ok(output)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => println!("Created {}", output.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
