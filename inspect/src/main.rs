
mod loaders;

use clap::{Arg, App, ArgMatches, SubCommand};

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use shiftred::{Config, Grammar, Parser, Symbol};
use shiftred::config::{DEFAULT_EOF, DEFAULT_START};

use loaders::{parse_grammar, parse_tokens};

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Silent unless RUST_LOG is set.
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn read_file(name: &str) -> Result<String, String> {
    let path = Path::new(name);
    let display = path.display();

    let mut file = File::open(&path)
        .map_err(|why| format!("Couldn't open {} : {}", display, why))?;

    let mut s = String::new();
    file.read_to_string(&mut s).map_err(|e| e.to_string())?;

    Ok(s)
}

fn config(matches: &ArgMatches) -> Result<Config, String> {
    let start = matches.value_of("start").unwrap_or(DEFAULT_START);
    let eof = matches.value_of("eof").unwrap_or(DEFAULT_EOF);
    let mut config = Config::new(start, eof);

    if let Some(limit) = matches.value_of("max-branches") {
        let limit = limit.parse::<usize>()
            .map_err(|e| format!("Invalid branch limit \"{}\" : {}", limit, e))?;
        config = config.max_branches(limit);
    }

    Ok(config)
}

fn load_grammar(matches: &ArgMatches) -> Result<Grammar, String> {
    let file_name = matches.value_of("grammar").ok_or("Missing grammar file.")?;
    let productions = parse_grammar(&read_file(file_name)?)
        .map_err(|e| format!("{} : {}", file_name, e))?;

    Grammar::new(config(matches)?, productions).map_err(|e| format!("{} : {}", file_name, e))
}

fn table(matches: &ArgMatches) -> Result<(), String> {
    let grammar = load_grammar(matches)?;
    let table = grammar.table().map_err(|e| e.to_string())?;

    print!("{}", table);

    let overlaps = table.overlaps();
    if !overlaps.is_empty() {
        println!();
        println!("Fork points :");
        for overlap in overlaps {
            let bucket = table.lookup(&overlap.symbol);
            println!(
                "    {} : {} / {}",
                overlap.symbol,
                bucket[overlap.first].item,
                bucket[overlap.second].item
            );
        }
    }

    Ok(())
}

fn parse(matches: &ArgMatches) -> Result<(), String> {
    let grammar = load_grammar(matches)?;
    let table = grammar.table().map_err(|e| e.to_string())?;

    let file_name = matches.value_of("tokens").ok_or("Missing token file.")?;
    let eof: &Symbol = &table.config().eof;
    let tokens = parse_tokens(&read_file(file_name)?, eof)
        .map_err(|e| format!("{} : {}", file_name, e))?;

    let forest = Parser::new(&table).parse(&tokens).map_err(|e| e.to_string())?;

    if forest.is_ambiguous() {
        println!("{} trees.", forest.len());
    }
    for (i, tree) in forest.iter().enumerate() {
        println!("Tree #{} : {}", i + 1, tree.sexpr());
        print!("{}", tree);
    }

    Ok(())
}

fn options<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec!(
        Arg::with_name("start")
            .long("start")
            .takes_value(true)
            .help("The start symbol (defaults to \"start\")"),
        Arg::with_name("eof")
            .long("eof")
            .takes_value(true)
            .help("The end-of-input symbol (defaults to \"EOF\")"),
        Arg::with_name("max-branches")
            .long("max-branches")
            .takes_value(true)
            .help("The maximum number of live parse branches"),
        Arg::with_name("grammar")
            .help("The grammar file, one rule per line")
            .required(true)
            .index(1),
    )
}

fn main() -> Result<(), String> {
    init_tracing();

    let matches = App::new("inspect")
        .version("0.1")
        .about("Dumps decision tables and parse forests")
        .subcommand(SubCommand::with_name("table")
            .about("Prints the decision table of the given grammar")
            .args(&options()))
        .subcommand(SubCommand::with_name("parse")
            .about("Parses the given tokens and prints every tree")
            .args(&options())
            .arg(Arg::with_name("tokens")
                .help("The token file")
                .required(true)
                .index(2)))
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("table") {
        table(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("parse") {
        parse(matches)?;
    } else {
        Err("Expected a subcommand, see --help.")?
    }

    Ok(())
}
