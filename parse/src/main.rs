use color_print::ceprintln;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;

use ipparse::{xml, Error, Lexer, Parser, Program, StatFile, Stats};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file (stdin when omitted)
    input: Option<String>,

    /// Output file for the XML (stdout when omitted)
    #[clap(short, long)]
    output: Option<String>,

    /// Stats file: FILE=VALUE,VALUE,... with values loc, comments, labels,
    /// jumps, fwjumps, backjumps, badjumps, frequent, eol and print:TEXT
    #[clap(long = "stats", value_parser = StatFile::parse)]
    stats: Vec<StatFile>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ceprintln!("<red,bold>error</>: {}", e);
            ExitCode::from(e.code())
        }
    }
}

fn run() -> Result<(), Error> {
    use clap::Parser as _;
    let args = Args::parse();

    // reject stats file collisions before doing any work
    for (i, file) in args.stats.iter().enumerate() {
        if args.stats[..i].iter().any(|f| f.path == file.path) {
            return Err(Error::DuplicateStatFile(file.path.clone()));
        }
    }

    let program = match &args.input {
        Some(path) => {
            let file = File::open(path).map_err(|e| Error::FileOpen(path.clone(), e))?;
            parse(BufReader::new(file))?
        }
        None => parse(io::stdin().lock())?,
    };

    match &args.output {
        Some(path) => {
            let mut out = File::create(path).map_err(|e| Error::FileCreate(path.clone(), e))?;
            xml::write_program(&program, &mut out)
                .map_err(|e| Error::FileWrite(path.clone(), e))?;
        }
        None => {
            xml::write_program(&program, &mut io::stdout().lock())
                .map_err(|e| Error::FileWrite("stdout".to_string(), e))?;
        }
    }

    let stats = Stats::new(&program);
    for file in &args.stats {
        stats.write(file)?;
    }

    Ok(())
}

fn parse<R: BufRead>(input: R) -> Result<Program, Error> {
    Parser::new(Lexer::new(input)).parse()
}
