#[macro_use]
extern crate prettytable;

use std::process;

use clap::{App, Arg};
use fnv::FnvHashSet;
use prettytable::Table;

use boxpull::{LoadLevel, Search, INITIAL_PULL_DEPTH};

fn main() {
    env_logger::init();

    let matches = App::new("boxpull")
        .about("Enumerates the puzzle configurations one pull away from the solved position")
        .arg(
            Arg::with_name("initial-depth")
                .short("-d")
                .long("--initial-depth")
                .takes_value(true)
                .help("seed depth for the backward search"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let initial_depth = match matches.value_of("initial-depth") {
        None => INITIAL_PULL_DEPTH,
        Some(s) => s.parse().unwrap_or_else(|err| {
            eprintln!("Bad --initial-depth {}: {}", s, err);
            process::exit(1);
        }),
    };
    let path = matches.value_of("file").unwrap();

    let level = path.load_level().unwrap_or_else(|err| {
        eprintln!("Can't load level {}: {}", path, err);
        process::exit(1);
    });

    println!("Level:");
    println!("{}", level);

    let found = level.goal_states(initial_depth).unwrap_or_else(|err| {
        eprintln!("Search failed: {}", err);
        process::exit(1);
    });

    println!(
        "Boundary configurations next to the solved position: {}",
        found.states.len()
    );
    println!();

    if !found.states.is_empty() {
        let mut table = Table::new();
        table.add_row(row!["#", "player", "depth", "fingerprint"]);
        for (i, state) in found.states.iter().enumerate() {
            let pos = level.graph.pos(state.player);
            table.add_row(row![
                i,
                format!("{},{}", pos.r, pos.c),
                state.move_depth,
                format!("{:016x}", state.fingerprint)
            ]);
        }
        table.printstd();
        println!();

        for state in &found.states {
            println!("{}", level.format_state(state));
        }
    }

    // one more backward step, deduplicated by fingerprint
    let mut board = level.state();
    let mut unique = FnvHashSet::default();
    let mut buf = Vec::new();
    for state in &found.states {
        board.set_state(state);
        buf.clear();
        board.pull_variants(&mut buf);
        for prev in &buf {
            unique.insert(prev.fingerprint);
        }
    }
    println!("Distinct states one more pull back: {}", unique.len());
    println!();
    print!("{}", found.stats);
}
