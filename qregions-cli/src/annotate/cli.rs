use clap::{Arg, ArgAction, Command, arg};

pub const ANNOTATE_CMD: &str = "annotate";
pub const STDIO: &str = "-";

pub fn create_annotate_cli() -> Command {
    Command::new(ANNOTATE_CMD)
        .about("Add a Regions INFO field to every record of a coordinate-sorted VCF.")
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
        .arg(
            arg!(-i --input <input> "VCF to annotate, plain or gzipped, - for stdin")
                .default_value(STDIO),
        )
        .arg(
            arg!(-o --output <output> "Where to write the VCF, .gz to compress, - for stdout")
                .default_value(STDIO),
        )
        .arg(arg!(-q --quiet "Do not show a progress spinner"))
}
