use crate::CLAP_STYLING;
use clap::{arg, command};

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("ffmap")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("ffmap")
        .about("Manually modify or remove nodes of the map backend")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Only print warnings and errors")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-c --"config" <FILE>)
                .required(false)
                .help("Configuration file (default: /etc/ffmap/ffmap.cfg)")
                .global(true),
        )
        .arg(
            arg!(-d --"dest-dir" <DIR>)
                .required(false)
                .help("Directory with JSON data files")
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(
            command!("modify")
                .about(
                    "Change role or clear the location of nodes. Useful for nodes that are only \
                temporarily switched off, their statistics are kept.",
                )
                .arg(
                    arg!(-i --"nodeid" <ID>)
                        .required(true)
                        .num_args(1..)
                        .help("Node id to modify"),
                )
                .arg(
                    arg!(-r --"role" <ROLE>)
                        .required(false)
                        .help(
                            "Set new role: node, temp, mobile, offloader, service, test, gate, \
                        plan, hidden",
                        ),
                )
                .arg(
                    arg!(-l --"location")
                        .required(false)
                        .help("Clear location information (hides node)")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("remove")
                .about(
                    "Remove nodes from nodedb, nodelist and graph and delete their RRD files and \
                statistics images.",
                )
                .arg(
                    arg!(-i --"nodeid" <ID>)
                        .required(true)
                        .num_args(1..)
                        .help("Node id to remove"),
                )
                .arg(
                    arg!(-n --"nodedb" <RRD_DIR>)
                        .required(false)
                        .help("Directory for node RRD data files"),
                )
                .arg(
                    arg!(--"imgpath" <DIR>)
                        .required(false)
                        .help("Directory with rendered statistics images"),
                ),
        )
}
