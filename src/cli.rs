use std::ffi::OsString;

use clap::{arg, ArgMatches, Command};

use crate::config::{self, Config};
use crate::error::Result;
use crate::input::STDIN_PATH;
use crate::pipeline::Options;

// Flags which are also accepted in the single dash form of Go's flag package, e.g. "-preview".
const BOOL_FLAGS: [&str; 2] = ["preview", "style"];
const VALUE_FLAGS: [&str; 4] = ["input", "config", "i", "c"];

pub fn cli() -> Command {
    Command::new("rmd")
        .version("0.1")
        .about("Render markdown into html, optionally preview it in the default web page viewer")
        .arg(
            arg!(-i --input <INPUT_PATH> r#"Specify the markdown file path, "-" reads from stdin."#)
                .required(false)
                .allow_hyphen_values(true)
                .default_value(STDIN_PATH),
        )
        .arg(arg!(--preview "Render into a temporary file, open it with the OS's default web page viewer and remove it afterwards."))
        .arg(arg!(--style "Render a complete html page styled like github markdown (light)."))
        .arg(
            arg!(-c --config <CONFIG_PATH> "Specify path of the config file for the styled page, it's optional.")
                .required(false)
                .allow_hyphen_values(true),
        )
}

// Rewrite Go style flags into the form clap expects: "-preview" and "--i" become
// "--preview" and "-i", "-style=false" is dropped and "-style=true" becomes "--style".
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = vec![];
    let mut passthrough = false;
    let mut expect_value = false;
    for (n, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if n == 0 || passthrough || expect_value {
            expect_value = false;
            out.push(arg);
            continue;
        }
        if arg.as_os_str() == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        let rewrite = match arg.to_str() {
            Some(s) => rewrite_flag(s),
            None => Rewrite::Keep,
        };
        match rewrite {
            Rewrite::Keep => out.push(arg),
            Rewrite::Drop => (),
            Rewrite::Replace(s) => out.push(OsString::from(s)),
            Rewrite::ReplaceTakingValue(s) => {
                expect_value = true;
                out.push(OsString::from(s));
            }
        }
    }
    out
}

#[derive(Debug, PartialEq, Eq)]
enum Rewrite {
    Keep,
    Drop,
    Replace(String),
    // The next argument is the flag's value and is passed through untouched.
    ReplaceTakingValue(String),
}

fn rewrite_flag(s: &str) -> Rewrite {
    let Some(rest) = s.strip_prefix("--").or_else(|| s.strip_prefix('-')) else {
        return Rewrite::Keep;
    };
    let (name, value) = match rest.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (rest, None),
    };

    if VALUE_FLAGS.contains(&name) {
        let dashes = if name.len() == 1 { "-" } else { "--" };
        let flag = format!("{}{}", dashes, rest);
        return match value {
            Some(_) => Rewrite::Replace(flag),
            None => Rewrite::ReplaceTakingValue(flag),
        };
    }
    if BOOL_FLAGS.contains(&name) {
        return match value.map(parse_bool) {
            None | Some(Some(true)) => Rewrite::Replace(format!("--{}", name)),
            Some(Some(false)) => Rewrite::Drop,
            // leave the bad value in place, clap reports it
            Some(None) => Rewrite::Replace(format!("--{}", rest)),
        };
    }
    Rewrite::Keep
}

// Boolean values as Go's strconv.ParseBool spells them.
fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

pub fn options_from(matches: &ArgMatches) -> Result<Options> {
    let style = matches.get_flag("style");
    let config = match matches.get_one::<String>("config") {
        None => Config::default(),
        Some(path) => {
            if !style {
                log::warn!("config \"{}\" only applies together with -style", path);
            }
            config::read_config(path)?
        }
    };
    let input = matches
        .get_one::<String>("input")
        .cloned()
        .unwrap_or_else(|| String::from(STDIN_PATH));

    Ok(Options {
        input,
        preview: matches.get_flag("preview"),
        style,
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Options {
        let matches = cli()
            .try_get_matches_from(normalize_args(args.iter().copied()))
            .unwrap();
        options_from(&matches).unwrap()
    }

    #[test]
    fn test_cli_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn test_normalize_args() {
        let args = normalize_args(["rmd", "-preview", "-style", "-i", "a.md", "-config=c.json"]);
        assert_eq!(
            args,
            vec!["rmd", "--preview", "--style", "-i", "a.md", "--config=c.json"]
        );

        // the program name, values and everything after "--" are left alone
        let args = normalize_args(["-style", "-i", "-", "--", "-preview"]);
        assert_eq!(args, vec!["-style", "-i", "-", "--", "-preview"]);

        let args = normalize_args(["rmd", "-i", "-style", "-c", "-preview"]);
        assert_eq!(args, vec!["rmd", "-i", "-style", "-c", "-preview"]);

        let args = normalize_args(["rmd", "--style", "-x"]);
        assert_eq!(args, vec!["rmd", "--style", "-x"]);
    }

    #[test]
    fn test_normalize_bool_values() {
        let args = normalize_args(["rmd", "-preview=false", "-style=true", "--preview=0"]);
        assert_eq!(args, vec!["rmd", "--style"]);

        let args = normalize_args(["rmd", "-style=maybe"]);
        assert_eq!(args, vec!["rmd", "--style=maybe"]);
    }

    #[test]
    fn test_normalize_go_input_forms() {
        let args = normalize_args(["rmd", "--i", "-", "--i=a.md", "-input", "b.md"]);
        assert_eq!(args, vec!["rmd", "-i", "-", "-i=a.md", "--input", "b.md"]);
    }

    #[test]
    fn test_stdin_input() {
        assert_eq!(parse(&["rmd", "-i", "-"]).input, "-");
        assert_eq!(parse(&["rmd", "--i", "-"]).input, "-");
        assert_eq!(parse(&["rmd", "-input", "-", "-style"]).input, "-");
    }

    #[test]
    fn test_go_bool_values() {
        let options = parse(&["rmd", "-preview=false", "-style=true"]);
        assert!(!options.preview);
        assert!(options.style);

        let res = cli().try_get_matches_from(normalize_args(["rmd", "-style=maybe"]));
        assert!(res.is_err());
    }

    #[test]
    fn test_input_value_looking_like_a_flag() {
        let options = parse(&["rmd", "-i", "-style"]);
        assert_eq!(options.input, "-style");
        assert!(!options.style);
    }

    #[test]
    fn test_defaults() {
        let options = parse(&["rmd"]);
        assert_eq!(options, Options::default());
    }

    #[test]
    fn test_go_style_flags() {
        let options = parse(&["rmd", "-i", "README.md", "-preview", "-style"]);
        assert_eq!(options.input, "README.md");
        assert!(options.preview);
        assert!(options.style);
    }

    #[test]
    fn test_double_dash_flags() {
        let options = parse(&["rmd", "--input", "a.md", "--style"]);
        assert_eq!(options.input, "a.md");
        assert!(options.style);
        assert!(!options.preview);
    }

    #[test]
    fn test_config_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rmd.json");
        std::fs::write(&path, r#"{"title": "Notes", "article_class": "doc"}"#).unwrap();

        let options = parse(&["rmd", "-style", "-config", path.to_str().unwrap()]);
        assert_eq!(options.config.title, "Notes");
        assert_eq!(options.config.article_class, "doc");
    }

    #[test]
    fn test_unknown_flag() {
        let res = cli().try_get_matches_from(normalize_args(["rmd", "-bogus"]));
        assert!(res.is_err());
    }
}
