#![deny(rust_2018_idioms, unused, unused_import_braces, unused_lifetimes, unused_qualifications, warnings)]
#![forbid(unsafe_code)]

use {
    std::{
        io::{
            self,
            prelude::*,
        },
        process::exit,
    },
    chrono::prelude::*,
    clap::Parser,
    datef::{
        Format,
        NAMED_FORMATS,
    },
};

#[derive(Parser)]
#[command(about = "Convert timestamps between formats", after_help = formats_help())]
struct Args {
    /// Input format.
    #[arg(short, default_value = "unix", allow_hyphen_values = true)]
    input: Format,
    /// Output format.
    #[arg(short, default_value = "RFC3339", allow_hyphen_values = true)]
    output: Format,
    /// Timestamps to convert. With no timestamps, the current time is
    /// converted instead; if - is the only timestamp, timestamps are read
    /// line by line from standard input.
    #[arg(allow_hyphen_values = true)]
    timestamps: Vec<String>,
}

fn formats_help() -> String {
    let mut help = String::from("Formats:\n  unix     seconds since the Unix epoch\n  unixms   milliseconds since the Unix epoch\n");
    for named in NAMED_FORMATS {
        help.push_str(&format!("  {:<8} {}\n", named.name(), named.description()));
    }
    help.push_str("\nAny other format specifier is used as a strftime pattern, see\nhttps://docs.rs/chrono/latest/chrono/format/strftime for the supported\nspecifiers. Each conversion is printed on its own line.");
    help
}

fn convert(timestamp: &str, input: &Format, output: &Format) -> bool {
    match input.parse(timestamp) {
        Ok(date_time) => {
            println!("{}", output.render(date_time));
            true
        }
        Err(e) => {
            eprintln!("{e}");
            false
        }
    }
}

fn convert_stdin(input: &Format, output: &Format) -> bool {
    let mut ok = true;
    for line in io::stdin().lock().lines() {
        match line {
            Ok(line) => if !line.is_empty() {
                ok &= convert(&line, input, output);
            },
            Err(e) => {
                eprintln!("{e}");
                return false
            }
        }
    }
    ok
}

fn main() {
    let args = Args::parse();
    if args.timestamps.is_empty() {
        println!("{}", args.output.render(Utc::now()));
        return
    }
    let ok = if args.timestamps == ["-"] {
        convert_stdin(&args.input, &args.output)
    } else {
        let mut ok = true;
        for timestamp in &args.timestamps {
            ok &= convert(timestamp, &args.input, &args.output);
        }
        ok
    };
    if !ok {
        exit(1)
    }
}
