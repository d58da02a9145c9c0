//! log-slice: cut a response log down to one subnet and/or time window
//!
//! Usage:
//!   log-slice <log> [--subnet A.B.C.D/M] [--from YYYYMMDDHHMMSS] [--to YYYYMMDDHHMMSS] [-c|--count]
//!
//! Prints matching lines unchanged (or just their count with -c). Use before
//! feeding a large log to the availability engine when only one subnet or one
//! incident window matters.

use availability_engine::{addr, log};
use chrono::NaiveDateTime;
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut file: Option<String> = None;
    let mut subnet: Option<(u32, u8)> = None;
    let mut from: Option<NaiveDateTime> = None;
    let mut to: Option<NaiveDateTime> = None;
    let mut count_only = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--subnet" => {
                i += 1;
                let value = expect_value(&args, i, "--subnet");
                subnet = Some(addr::parse_cidr(value).unwrap_or_else(|e| {
                    eprintln!("log-slice: {}", e);
                    process::exit(2);
                }));
            }
            "--from" => {
                i += 1;
                from = Some(parse_stamp(expect_value(&args, i, "--from")));
            }
            "--to" => {
                i += 1;
                to = Some(parse_stamp(expect_value(&args, i, "--to")));
            }
            "-c" | "--count" => count_only = true,
            other if other.starts_with('-') => usage(),
            other => {
                if file.is_some() {
                    usage();
                }
                file = Some(other.to_string());
            }
        }
        i += 1;
    }

    let file = file.unwrap_or_else(|| usage());
    let contents = fs::read_to_string(&file).unwrap_or_else(|e| {
        eprintln!("log-slice: cannot read {}: {}", file, e);
        process::exit(2);
    });

    let mut matched: u64 = 0;
    for line in contents.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record = match log::parse_line(trimmed) {
            Ok(record) => record,
            Err(e) => {
                eprintln!("log-slice: skipping bad line: {}", e);
                continue;
            }
        };
        if let Some((subnet_addr, mask_len)) = subnet {
            let wanted = addr::subnet_prefix(subnet_addr, mask_len);
            if addr::subnet_prefix(record.address, mask_len) != wanted {
                continue;
            }
        }
        if from.is_some_and(|from| record.timestamp < from) {
            continue;
        }
        if to.is_some_and(|to| record.timestamp > to) {
            continue;
        }
        matched += 1;
        if !count_only {
            println!("{}", trimmed);
        }
    }

    if count_only {
        println!("{}", matched);
    }
    process::exit(if matched > 0 { 0 } else { 1 });
}

fn parse_stamp(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y%m%d%H%M%S").unwrap_or_else(|e| {
        eprintln!("log-slice: invalid timestamp {}: {}", text, e);
        process::exit(2);
    })
}

fn expect_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("log-slice: {} needs a value", flag);
            process::exit(2);
        }
    }
}

fn usage() -> ! {
    eprintln!("Usage: log-slice <log> [--subnet A.B.C.D/M] [--from YYYYMMDDHHMMSS] [--to YYYYMMDDHHMMSS] [-c|--count]");
    eprintln!("  -c  Count matching lines instead of printing them");
    process::exit(2);
}
