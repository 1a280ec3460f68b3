use std::io::{self, Write};
use std::process::exit;

use argparse::{ArgumentParser, Print, Store, StoreOption, StoreTrue};
use libc::{getrusage, rusage, RUSAGE_SELF};
use log::LevelFilter;

pub const EACH_REPORT: &str = "each.out";
pub const TOTAL_REPORT: &str = "totals.out";

pub fn get_cputime_usecs() -> (u64, u64) {
    let mut usage: rusage = unsafe { std::mem::zeroed() };

    unsafe { getrusage(RUSAGE_SELF, (&mut usage) as *mut rusage); }

    let u_secs = usage.ru_utime.tv_sec as u64;
    let u_usecs = usage.ru_utime.tv_usec as u64;
    let s_secs = usage.ru_stime.tv_sec as u64;
    let s_usecs = usage.ru_stime.tv_usec as u64;

    let u_time = (u_secs * 1_000_000) + u_usecs;
    let s_time = (s_secs * 1_000_000) + s_usecs;

    (u_time, s_time)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// directory holding the documents
    pub input: String,
    /// directory for the reports, `input` when unset
    pub output: Option<String>,
    pub extension: String,
    pub each: String,
    pub totals: String,
    pub skip_unreadable: bool,
    pub log: String,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: String::new(),
            output: None,
            extension: "txt".to_string(),
            each: EACH_REPORT.to_string(),
            totals: TOTAL_REPORT.to_string(),
            skip_unreadable: false,
            log: "-".to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Parse `args` (program name first). `Err` carries the exit code,
    /// 0 after `--help` or `--version`.
    pub fn parse_from(
        description: &str,
        args: Vec<String>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Config, i32> {
        let mut conf = Config::default();

        {
            // this block limits scope of borrows by ap.refer() method
            let mut ap = ArgumentParser::new();

            ap.set_description(description);
            ap.add_option(
                &["-V", "--version"],
                Print(env!("CARGO_PKG_VERSION").to_string()),
                "Show version",
            );

            ap.refer(&mut conf.input)
                .add_argument("input", Store, "directory of documents to count")
                .required();

            ap.refer(&mut conf.output).add_option(
                &["-o", "--output"],
                StoreOption,
                "directory for the reports - default: input directory",
            );

            ap.refer(&mut conf.extension).add_option(
                &["-e", "--extension"],
                Store,
                "extension of the documents to count - default: txt",
            );

            ap.refer(&mut conf.each).add_option(
                &["--each"],
                Store,
                "file name of the per-document report - default: each.out",
            );

            ap.refer(&mut conf.totals).add_option(
                &["--totals"],
                Store,
                "file name of the total report - default: totals.out",
            );

            ap.refer(&mut conf.skip_unreadable).add_option(
                &["--skip-unreadable"],
                StoreTrue,
                "skip documents that can't be opened instead of stopping",
            );

            ap.refer(&mut conf.log).add_option(
                &["-l", "--log"],
                Store,
                "log file - default: stderr (-)",
            );

            ap.refer(&mut conf.log_level).add_option(
                &["--log-level"],
                Store,
                "off, error, warn, info, debug or trace - default: info",
            );

            ap.parse(args, stdout, stderr)?;
        }

        Ok(conf)
    }
}

pub fn parse_args(description: &str) -> Config {
    let stdout = io::stdout();
    let stderr = io::stderr();
    let res = Config::parse_from(
        description,
        std::env::args().collect(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    );
    match res {
        Ok(conf) => conf,
        Err(code) => exit(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, i32> {
        let mut args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        args.insert(0, "word-freq".to_string());
        let mut out = Vec::new();
        let mut err = Vec::new();
        Config::parse_from("test", args, &mut out, &mut err)
    }

    #[test]
    fn defaults() {
        let conf = parse(&["docs"]).unwrap();
        assert_eq!(conf.input, "docs");
        assert_eq!(conf.output, None);
        assert_eq!(conf.extension, "txt");
        assert_eq!(conf.each, "each.out");
        assert_eq!(conf.totals, "totals.out");
        assert!(!conf.skip_unreadable);
        assert_eq!(conf.log, "-");
        assert_eq!(conf.log_level, LevelFilter::Info);
    }

    #[test]
    fn all_options() {
        let conf = parse(&[
            "-o", "out", "-e", "md", "--each", "e.txt", "--totals", "t.txt",
            "--skip-unreadable", "-l", "run.log", "--log-level", "debug", "docs",
        ])
        .unwrap();
        assert_eq!(conf.input, "docs");
        assert_eq!(conf.output, Some("out".to_string()));
        assert_eq!(conf.extension, "md");
        assert_eq!(conf.each, "e.txt");
        assert_eq!(conf.totals, "t.txt");
        assert!(conf.skip_unreadable);
        assert_eq!(conf.log, "run.log");
        assert_eq!(conf.log_level, LevelFilter::Debug);
    }

    #[test]
    fn input_is_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn bad_log_level_is_rejected() {
        assert!(parse(&["--log-level", "loud", "docs"]).is_err());
    }

    #[test]
    fn cputime_is_monotonic() {
        let (u1, s1) = get_cputime_usecs();
        let mut x = 0u64;
        for i in 0..100_000u64 {
            x = x.wrapping_add(i * i);
        }
        assert!(x > 0);
        let (u2, s2) = get_cputime_usecs();
        assert!(u2 >= u1);
        assert!(s2 >= s1);
    }
}
