use clap::{Arg, ArgAction, Command, arg};

pub const SIZES_CMD: &str = "sizes";

pub fn create_sizes_cli() -> Command {
    Command::new(SIZES_CMD)
        .about("Print the number of bases covered by each region label.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("regions")
                .short('r')
                .long("regions")
                .value_name("SPEC")
                .required(true)
                .action(ArgAction::Append)
                .help("Region file as [=]label:path or path (repeatable)"),
        )
        .arg(arg!(--fixchr "Prefix chr to chromosome names like 1, X or M in region files"))
}
