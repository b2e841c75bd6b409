use hexfmt::Dumper;
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::process;

const USAGE: &str = "Usage: hexfmt [OPTIONS] [FILE]

Options:
  -t, --type NAME        word type (byte, char, uint16_le, float64_be, ...)
  -c, --columns N        words per row
  -b, --base N           numeric base: 16, 10, 8, or 2
      --index-base N     base for the offset column
  -g, --group-columns N  extra spacer every N columns
  -s, --skip N           bytes to skip before reading
  -n, --length N         maximum bytes to read
  -z, --zero-pad         decode a trailing partial word as zero-padded
  -r, --repeating        show every row (disable repeat collapsing)
  -C, --no-chars         disable the character column
  -e, --encoding NAME    text encoding for the character column";

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> T {
    let Some(value) = value else {
        eprintln!("ERROR: {} requires an argument.", flag);
        process::exit(1);
    };
    match value.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("ERROR: Invalid argument for {}: {}", flag, value);
            process::exit(1);
        }
    }
}

fn main() {
    let mut args = env::args().skip(1);
    let mut builder = Dumper::builder();
    let mut path: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            "-t" | "--type" => {
                let Some(name) = args.next() else {
                    eprintln!("ERROR: {} requires an argument.", arg);
                    process::exit(1);
                };
                builder = builder.word_type(&name);
            }
            "-c" | "--columns" => builder = builder.columns(parse_number(&arg, args.next())),
            "-b" | "--base" => builder = builder.base(parse_number(&arg, args.next())),
            "--index-base" => builder = builder.index_base(parse_number(&arg, args.next())),
            "-g" | "--group-columns" => {
                builder = builder.group_columns(parse_number(&arg, args.next()))
            }
            "-s" | "--skip" => builder = builder.skip(parse_number(&arg, args.next())),
            "-n" | "--length" => builder = builder.length(parse_number(&arg, args.next())),
            "-z" | "--zero-pad" => builder = builder.zero_pad(true),
            "-r" | "--repeating" => builder = builder.repeating(true),
            "-C" | "--no-chars" => builder = builder.chars_column(false),
            "-e" | "--encoding" => {
                let Some(label) = args.next() else {
                    eprintln!("ERROR: {} requires an argument.", arg);
                    process::exit(1);
                };
                builder = builder.encoding(&label);
            }
            other if other.starts_with('-') => {
                eprintln!("ERROR: Unknown option: {}\n\n{}", other, USAGE);
                process::exit(1);
            }
            other => {
                if path.replace(other.to_string()).is_some() {
                    eprintln!("ERROR: More than one input file given.");
                    process::exit(1);
                }
            }
        }
    }

    let dumper = match builder.build() {
        Ok(dumper) => dumper,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let source: Box<dyn Read> = match &path {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("ERROR: Cannot open {}: {}", path, e);
                process::exit(1);
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut sink = stdout.lock();
    if let Err(e) = dumper.dump(source, &mut sink) {
        eprintln!("ERROR: {}", e);
        process::exit(1);
    }
    let _ = sink.flush();
}
