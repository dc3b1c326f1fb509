/*
 * Copyright (C) 2022 taylor.fish <contact@taylor.fish>
 *
 * This file is part of base32k.
 *
 * base32k is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * base32k is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with base32k. If not, see <https://www.gnu.org/licenses/>.
 */

use std::ffi::OsStr;
use std::fmt::{Debug, Display};
use std::fs::File;
use std::io::{stdin, stdout, Read, Write};
use std::path::Path;
use std::process::exit;

use base32k::decode::{decode_str_with, DecodeConfig};
use base32k::encode::encode_to_string;
use byteorder::{BigEndian, ByteOrder, LittleEndian};

const USAGE: &str = "\
Usage: base32k [options] [file]

Encodes or decodes base32k data from [file] and writes the result to standard
output. If [file] is missing or \"-\", the data is read from standard input.
Input bytes are packed into 32-bit words, so their length must be a multiple
of 4 unless --pad is given.

Options:
  -d --decode   Decode data instead of encoding
  --pad         When encoding, zero-pad the input to a multiple of 4 bytes.
                The padding is kept when decoding.
  --le          Pack words in little-endian order (default: big-endian)
  --relaxed     When decoding, ignore anything after the terminator
  --strict      When decoding, reject input no encoder would produce
  -h --help     Show this help message
  -v --version  Show program version

Set RUST_LOG=debug to see diagnostic messages.
";

#[macro_use]
mod error_exit {
    use super::{exit, Display};

    macro_rules! error_exit {
        ($($args:tt)*) => {
            crate::error_exit::__run(format_args!($($args)*));
        };
    }

    #[doc(hidden)]
    pub fn __run(args: impl Display) -> ! {
        eprintln!("error: {}", args);
        if cfg!(feature = "cli-panic") {
            panic!("error: {}", args);
        } else {
            exit(1);
        }
    }
}

fn expect<T, E: Debug>(result: Result<T, E>, msg: impl Display) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("error: {}", msg);
        if cfg!(feature = "cli-panic") {
            panic!("error: {}: {:?}", msg, e);
        } else {
            exit(1);
        }
    })
}

#[derive(Clone, Copy)]
enum Endian {
    Big,
    Little,
}

struct ParsedArgs<'a> {
    pub decode: bool,
    pub pad: bool,
    pub endian: Endian,
    pub config: DecodeConfig,
    pub path: Option<&'a Path>,
}

fn show_usage() -> ! {
    print!("{}", USAGE);
    exit(0);
}

fn show_version() -> ! {
    println!("{}", env!("CARGO_PKG_VERSION"));
    exit(0);
}

macro_rules! args_error {
    ($($args:tt)*) => {
        error_exit!(
            "{}\n{}",
            format_args!($($args)*),
            "See `base32k --help` for usage information.",
        );
    };
}

fn parse_args<'a, Args>(args: Args) -> ParsedArgs<'a>
where
    Args: IntoIterator<Item = &'a OsStr>,
{
    let mut decode = false;
    let mut pad = false;
    let mut endian = Endian::Big;
    let mut config = DecodeConfig::new();
    let mut file: Option<&'a OsStr> = None;
    let mut options_done = false;

    let mut process_arg = |arg: &'a OsStr, astr: &str| {
        match astr {
            _ if options_done => {}
            "-" => {}
            "--" => {
                options_done = true;
                return;
            }
            "--help" => show_usage(),
            "--version" => show_version(),
            "--decode" => {
                decode = true;
                return;
            }
            "--pad" => {
                pad = true;
                return;
            }
            "--le" => {
                endian = Endian::Little;
                return;
            }
            "--relaxed" => {
                config.relaxed = true;
                return;
            }
            "--strict" => {
                config.strict = true;
                return;
            }
            s if s.starts_with("--") => {
                args_error!("unrecognized option: {}", s);
            }
            s if s.starts_with('-') => {
                s.chars().skip(1).for_each(|c| match c {
                    'h' => show_usage(),
                    'v' => show_version(),
                    'd' => {
                        decode = true;
                    }
                    c => {
                        args_error!("unrecognized option: -{}", c);
                    }
                });
                return;
            }
            _ => {}
        }
        if file.replace(arg).is_some() {
            args_error!("unexpected argument: {}", astr);
        }
    };

    args.into_iter()
        .map(|a| (a, a.to_string_lossy()))
        .for_each(|(arg, astr)| process_arg(arg, &*astr));

    ParsedArgs {
        decode,
        pad,
        endian,
        config,
        path: file.map(Path::new),
    }
}

fn write_stdout(bytes: &[u8]) {
    let mut out = stdout();
    expect(out.write_all(bytes), "could not write to standard output");
    expect(out.flush(), "could not write to standard output");
}

fn encode(stream: &mut impl Read, args: &ParsedArgs<'_>) {
    let mut bytes = Vec::new();
    expect(stream.read_to_end(&mut bytes), "could not read input");
    let rem = bytes.len() % 4;
    if rem != 0 {
        if !args.pad {
            error_exit!(
                "input length ({} bytes) is not a multiple of 4; use --pad",
                bytes.len(),
            );
        }
        log::debug!("padding input with {} zero bytes", 4 - rem);
        bytes.resize(bytes.len() + 4 - rem, 0);
    }

    let mut words = vec![0; bytes.len() / 4];
    match args.endian {
        Endian::Big => BigEndian::read_u32_into(&bytes, &mut words),
        Endian::Little => LittleEndian::read_u32_into(&bytes, &mut words),
    }
    log::info!("encoding {} words", words.len());
    write_stdout(encode_to_string(&words).as_bytes());
}

fn decode(stream: &mut impl Read, args: &ParsedArgs<'_>) {
    let mut text = String::new();
    expect(stream.read_to_string(&mut text), "input is not valid UTF-8");
    let text = text
        .strip_suffix('\n')
        .map_or(&*text, |s| s.strip_suffix('\r').unwrap_or(s));

    let words = decode_str_with(text, args.config).unwrap_or_else(|e| {
        error_exit!("input is not valid base32k data: {}", e);
    });
    log::info!("decoded {} words", words.len());

    let mut bytes = vec![0; words.len() * 4];
    match args.endian {
        Endian::Big => BigEndian::write_u32_into(&words, &mut bytes),
        Endian::Little => LittleEndian::write_u32_into(&words, &mut bytes),
    }
    write_stdout(&bytes);
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .format_target(false)
    .init();

    let args: Vec<_> = std::env::args_os().skip(1).collect();
    let args = parse_args(args.iter().map(|s| s.as_os_str()));

    args.path
        .map(|path| {
            File::open(path).unwrap_or_else(|e| {
                error_exit!("could not open file '{}': {}", path.display(), e);
            })
        })
        .map_or_else(
            || {
                if args.decode {
                    decode(&mut stdin(), &args);
                } else {
                    encode(&mut stdin(), &args);
                }
            },
            |mut file| {
                if args.decode {
                    decode(&mut file, &args);
                } else {
                    encode(&mut file, &args);
                }
            },
        );
}
