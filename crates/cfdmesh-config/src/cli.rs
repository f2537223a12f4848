//! A flag/positional-argument command line, parsed the way
//! `CommandLine.h`'s original did it: any token starting with one or two
//! dashes opens a new flag; every token after it until the next flag is a
//! positional argument of that flag. Tokens seen before any flag are
//! collected as warnings rather than rejected.

use std::collections::HashMap;

use cfdmesh_common::ConfigError;

#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    options: HashMap<String, Vec<String>>,
    pub warnings: Vec<String>,
}

impl CommandLine {
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options: HashMap<String, Vec<String>> = HashMap::new();
        let mut warnings = Vec::new();
        let mut current: Option<String> = None;

        for arg in args {
            let arg = arg.as_ref();
            if let Some(flag) = arg.strip_prefix("--") {
                options.entry(flag.to_string()).or_default();
                current = Some(flag.to_string());
            } else if let Some(flag) = arg.strip_prefix('-') {
                if flag.is_empty() {
                    continue;
                }
                options.entry(flag.to_string()).or_default();
                current = Some(flag.to_string());
            } else {
                match &current {
                    Some(flag) => options.get_mut(flag).unwrap().push(arg.to_string()),
                    None => warnings.push(arg.to_string()),
                }
            }
        }

        CommandLine { options, warnings }
    }

    /// Parses `std::env::args()`, skipping the program name at index 0.
    pub fn from_env() -> Self {
        Self::parse(std::env::args().skip(1))
    }

    fn get_string(&self, flag: &str, arg: usize) -> Result<&str, ConfigError> {
        let args = self
            .options
            .get(flag)
            .ok_or_else(|| ConfigError::MissingFlag(flag.to_string()))?;
        args.get(arg)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingArgument { flag: flag.to_string(), index: arg })
    }

    pub fn get_string_arg(&self, flag: &str, arg: usize) -> Result<String, ConfigError> {
        self.get_string(flag, arg).map(str::to_string)
    }

    pub fn get_bool_arg(&self, flag: &str, arg: usize) -> Result<bool, ConfigError> {
        match self.get_string(flag, arg)? {
            "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            other => Err(ConfigError::ArgumentConversion {
                flag: flag.to_string(),
                value: other.to_string(),
                expected: "bool",
            }),
        }
    }

    pub fn get_int_arg(&self, flag: &str, arg: usize) -> Result<i64, ConfigError> {
        let value = self.get_string(flag, arg)?;
        value.parse().map_err(|_| ConfigError::ArgumentConversion {
            flag: flag.to_string(),
            value: value.to_string(),
            expected: "int",
        })
    }

    pub fn get_double_arg(&self, flag: &str, arg: usize) -> Result<f64, ConfigError> {
        let value = self.get_string(flag, arg)?;
        value.parse().map_err(|_| ConfigError::ArgumentConversion {
            flag: flag.to_string(),
            value: value.to_string(),
            expected: "double",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_double_dash_flags_collect_their_arguments() {
        let cmd = CommandLine::parse(["--config", "run.json", "-v", "1", "extra"]);
        assert_eq!(cmd.get_string_arg("config", 0).unwrap(), "run.json");
        assert_eq!(cmd.get_int_arg("v", 0).unwrap(), 1);
        assert_eq!(cmd.get_string_arg("v", 1).unwrap(), "extra");
    }

    #[test]
    fn leading_arguments_without_a_flag_become_warnings() {
        let cmd = CommandLine::parse(["orphan", "--flag", "value"]);
        assert_eq!(cmd.warnings, vec!["orphan".to_string()]);
        assert_eq!(cmd.get_string_arg("flag", 0).unwrap(), "value");
    }

    #[test]
    fn missing_flag_is_an_error() {
        let cmd = CommandLine::parse(["--flag", "value"]);
        assert_eq!(
            cmd.get_string_arg("other", 0).unwrap_err(),
            ConfigError::MissingFlag("other".to_string())
        );
    }

    #[test]
    fn missing_argument_position_is_an_error() {
        let cmd = CommandLine::parse(["--flag", "value"]);
        assert_eq!(
            cmd.get_string_arg("flag", 1).unwrap_err(),
            ConfigError::MissingArgument { flag: "flag".to_string(), index: 1 }
        );
    }

    #[test]
    fn unconvertible_argument_reports_the_expected_type() {
        let cmd = CommandLine::parse(["--flag", "notanumber"]);
        assert_eq!(
            cmd.get_int_arg("flag", 0).unwrap_err(),
            ConfigError::ArgumentConversion {
                flag: "flag".to_string(),
                value: "notanumber".to_string(),
                expected: "int",
            }
        );
    }
}
