use colored::Colorize;
use ffmap::commands::command_argument_builder;
use ffmap::handlers::{handle_modify, handle_remove};

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();

    let result = match chosen_command.subcommand() {
        Some(("modify", primary_command)) => handle_modify(primary_command),
        Some(("remove", primary_command)) => handle_remove(primary_command),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
