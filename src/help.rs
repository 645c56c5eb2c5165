use std::ffi::OsStr;

use current_platform::CURRENT_PLATFORM;
use strum::VariantArray;

use crate::args::Arg;

pub fn maybe_print_help_and_exit(bin_name: &str) {
    match std::env::args_os().nth(1) {
        None => print_help_and_exit(bin_name),
        Some(arg) => {
            let arg = arg.as_os_str();
            if arg == OsStr::new("--help") || arg == OsStr::new("-help") {
                print_help_and_exit(bin_name)
            }
        }
    }
}

fn print_help_and_exit(bin_name: &str) -> ! {
    print!("{}", help_text(bin_name));
    std::process::exit(0);
}

fn help_text(bin_name: &str) -> String {
    let mut text = String::new();
    text.push_str(&format!("Version: {}\n", version_string()));
    text.push_str(&format!("License: {}\n", env!("CARGO_PKG_LICENSE")));
    text.push_str(&format!("Usage: {bin_name} [options ...] file [file ...]\n"));
    text.push('\n');
    text.push_str("Rotates each file according to its Exif orientation tag,\n");
    text.push_str("removes the tag and overwrites the file. Files without a tag are left alone.\n");
    text.push('\n');
    text.push_str("Options:\n");
    for arg in Arg::VARIANTS {
        let name: &'static str = arg.into();
        text.push_str(&format!("  -{name:19} {}\n", arg.help_text()));
    }
    text
}

fn version_string() -> String {
    let cpu = CURRENT_PLATFORM.split('-').next().unwrap_or("unknown");
    let version = env!("CARGO_PKG_VERSION");
    let repo = env!("CARGO_PKG_REPOSITORY");

    format!("{} {version} {cpu} {repo}", env!("CARGO_PKG_NAME"))
}
