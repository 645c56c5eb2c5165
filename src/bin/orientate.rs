use orientate::{args, help};

fn main() {
    help::maybe_print_help_and_exit("orientate");
    let arguments: Vec<_> = std::env::args_os().collect();

    let result = args::parse_args(arguments).and_then(|plan| plan.execute());
    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
