use clap::Parser;
use log::{debug, info, warn};
use minilang::ast::Ast;
use minilang::backend::DotVisitor;
use minilang::errors::{LangError, LangResult};
use minilang::frontend::{lexer::scan, Parser as SourceParser};
use minilang::interpreter::Interpreter;
use minilang::{init_logging, read};
use std::{fs::File, io, io::BufWriter, path::PathBuf, time::Instant};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Interpreter for the minilang teaching language",
    long_about = "Interpreter for the minilang teaching language.\n\
                 Reads a source file, builds its syntax tree and either runs it\n\
                 against stdin/stdout or renders the tree as a Graphviz graph.\n\
                 \n\
                 Example usage:\n\
                 minilang prog.ml                  # Run the program\n\
                 minilang prog.ml --dot            # Print the tree as DOT\n\
                 minilang prog.ml --dot -o ast.dot # Write the DOT graph to a file\n\
                 minilang prog.ml --timing         # Show phase timings on stderr\n\
                 \n\
                 Set MINILANG_LOG=debug (or trace) for diagnostics."
)]
struct Cli {
    // The path to the program to run
    path: PathBuf,

    // Render the syntax tree as Graphviz instead of running it
    #[arg(long)]
    dot: bool,

    // Output file for --dot (defaults to stdout)
    #[arg(short, long, requires = "dot")]
    output: Option<PathBuf>,

    // Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    // Show phase timing
    #[arg(short, long)]
    timing: bool,
}

// Run statistics for the --timing report
#[derive(Debug, Default)]
struct RunStats {
    lexer_time: f64,
    parser_time: f64,
    backend_time: f64,
    total_time: f64,
    token_count: usize,
    node_count: usize,
}

// Print the diagnostic and exit with error code
fn fatal(err: &LangError) -> ! {
    eprintln!("{}", err);
    std::process::exit(1);
}

fn parse_program(source: &str, file: &str, stats: &mut RunStats) -> LangResult<Ast> {
    let lexer_start = Instant::now();
    let tokens = scan(source, Some(file))?;
    stats.lexer_time = lexer_start.elapsed().as_secs_f64();
    stats.token_count = tokens.len();
    debug!("lexed {} tokens", stats.token_count);

    let parser_start = Instant::now();
    let ast = SourceParser::new(&tokens).parse()?;
    stats.parser_time = parser_start.elapsed().as_secs_f64();
    stats.node_count = ast.reachable_count();
    if stats.token_count == 0 {
        warn!("{} contains no statements", file);
    }
    Ok(ast)
}

fn write_dot(ast: &Ast, output: &Option<PathBuf>) -> LangResult<()> {
    match output {
        Some(path) => {
            let mut visitor = DotVisitor::new(BufWriter::new(File::create(path)?));
            visitor.create_dot(ast)?;
            info!("wrote graph to {}", path.display());
        }
        None => DotVisitor::new(io::stdout().lock()).create_dot(ast)?,
    }
    Ok(())
}

fn run(args: &Cli) -> LangResult<RunStats> {
    let start_time = Instant::now();
    let mut stats = RunStats::default();

    let source = read(&args.path)?;
    debug!("read {} bytes from {}", source.len(), args.path.display());

    let file = args.path.display().to_string();
    let ast = parse_program(&source, &file, &mut stats)?;

    let backend_start = Instant::now();
    if args.dot {
        write_dot(&ast, &args.output)?;
    } else {
        Interpreter::stdio().run(&ast)?;
    }
    stats.backend_time = backend_start.elapsed().as_secs_f64();
    stats.total_time = start_time.elapsed().as_secs_f64();
    Ok(stats)
}

fn print_timing(stats: &RunStats) {
    eprintln!("Timing:");
    eprintln!("  lexing:   {:.6}s ({} tokens)", stats.lexer_time, stats.token_count);
    eprintln!("  parsing:  {:.6}s ({} nodes)", stats.parser_time, stats.node_count);
    eprintln!("  running:  {:.6}s", stats.backend_time);
    eprintln!("  total:    {:.6}s", stats.total_time);
}

fn main() {
    let args = Cli::parse();
    init_logging(args.verbose);
    info!("minilang {}", minilang::VERSION);

    match run(&args) {
        Ok(stats) => {
            if args.timing {
                print_timing(&stats);
            }
        }
        Err(err) => fatal(&err),
    }
}
