//! Ordered collection of options with alias lookup

use crate::complete::CompletionNode;
use crate::error::{OptionError, OptionResult};
use crate::option::{Kind, Opt};
use tracing::debug;

/// Options in declaration order
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    options: Vec<Opt>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option. Names and aliases must not collide.
    pub fn add(&mut self, opt: Opt) -> OptionResult<()> {
        let long = format!("--{}", opt.name);
        for spelling in opt.spellings().chain(std::iter::once(long.as_str())) {
            if self.lookup(spelling).is_some() {
                return Err(OptionError::DuplicateOption(spelling.to_string()));
            }
        }
        self.options.push(opt);
        Ok(())
    }

    pub fn with(mut self, opt: Opt) -> OptionResult<Self> {
        self.add(opt)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Opt> {
        self.options.iter()
    }

    /// Option by canonical name
    pub fn get(&self, name: &str) -> Option<&Opt> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Opt> {
        self.options.iter_mut().find(|o| o.name == name)
    }

    /// Option by any spelling
    pub fn lookup(&self, alias: &str) -> Option<&Opt> {
        self.options.iter().find(|o| o.matches(alias))
    }

    fn lookup_mut(&mut self, alias: &str) -> Option<&mut Opt> {
        self.options.iter_mut().find(|o| o.matches(alias))
    }

    /// Save one occurrence of the option spelled `alias`
    pub fn save<S: AsRef<str>>(&mut self, alias: &str, tokens: &[S]) -> OptionResult<()> {
        self.lookup_mut(alias)
            .ok_or_else(|| OptionError::UnknownOption(alias.to_string()))?
            .save_as(alias, tokens)
    }

    /// Check every option's argument-count policy
    pub fn validate(&self) -> OptionResult<()> {
        self.options.iter().try_for_each(Opt::validate)
    }

    /// Required check over all options, first failure in declaration order
    pub fn check_required(&self) -> OptionResult<()> {
        self.options.iter().try_for_each(Opt::check_required)
    }

    /// Options completion node listing every flag spelling
    pub fn completion_node(&self) -> CompletionNode {
        CompletionNode::options(self.options.iter().flat_map(Opt::flags))
    }

    /// Feed a command line through the set and return the positional arguments.
    ///
    /// `--flag=value` (or `-f=value`) supplies one inline value; otherwise an option takes the
    /// following non-flag tokens, up to its maximum. Everything after `--` is
    /// positional.
    pub fn parse<S: AsRef<str>>(&mut self, args: &[S]) -> OptionResult<Vec<String>> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let mut positionals = Vec::new();
        let mut i = 0;

        while i < args.len() {
            let arg = args[i];
            i += 1;

            if arg == "--" {
                positionals.extend(args[i..].iter().map(|a| a.to_string()));
                break;
            }
            if !self.is_flag(arg) {
                positionals.push(arg.to_string());
                continue;
            }

            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag, Some(value)),
                None => (arg, None),
            };

            let opt = self
                .lookup(flag)
                .ok_or_else(|| OptionError::UnknownOption(flag.to_string()))?;
            let (kind, min, max) = (opt.kind(), opt.min_arg_count(), opt.max_arg_count());

            let mut values: Vec<String> = inline.map(String::from).into_iter().collect();
            if kind != Kind::Bool {
                while values.len() < max && i < args.len() && !self.is_flag(args[i]) {
                    values.push(args[i].to_string());
                    i += 1;
                }
                if values.len() < min {
                    return Err(OptionError::MissingValue {
                        alias: flag.to_string(),
                        min,
                    });
                }
            }

            debug!(flag, ?values, "matched option");
            self.save(flag, &values)?;
        }

        Ok(positionals)
    }

    /// Known spellings are flags, and so is any dash token that is not a number
    fn is_flag(&self, token: &str) -> bool {
        let Some(rest) = token.strip_prefix('-') else {
            return false;
        };
        let flag = token.split_once('=').map_or(token, |(f, _)| f);
        if self.lookup(flag).is_some() {
            return true;
        }
        !rest.is_empty() && !rest.starts_with(|c: char| c.is_ascii_digit() || c == '.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::Value;

    fn sample_set() -> OptionSet {
        OptionSet::new()
            .with(Opt::bool("verbose", false).aliases(["-v", "--verbose"]))
            .unwrap()
            .with(Opt::new("name", Kind::String).alias("-n"))
            .unwrap()
            .with(Opt::new("level", Kind::Int).alias("-l"))
            .unwrap()
            .with(Opt::new("files", Kind::StringRepeated).alias("-f").max_args(3))
            .unwrap()
            .with(Opt::new("define", Kind::StringMap).alias("-D"))
            .unwrap()
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let mut set = sample_set();
        let err = set
            .add(Opt::new("verbosity", Kind::Int).alias("-v"))
            .unwrap_err();
        assert_eq!(err, OptionError::DuplicateOption("-v".to_string()));
        assert!(set.add(Opt::new("name", Kind::Int)).is_err());
    }

    #[test]
    fn test_lookup_by_any_spelling() {
        let set = sample_set();
        assert_eq!(set.lookup("-v").map(|o| o.name.as_str()), Some("verbose"));
        assert_eq!(set.lookup("--level").map(|o| o.name.as_str()), Some("level"));
        assert_eq!(set.lookup("name").map(|o| o.name.as_str()), Some("name"));
        assert!(set.lookup("--missing").is_none());
    }

    #[test]
    fn test_parse_mixed_command_line() {
        let mut set = sample_set();
        let rest = set
            .parse(&["-v", "build", "--name=core", "-l", "-3", "-f", "a", "b", "-D", "k=v", "out"])
            .unwrap();
        assert_eq!(rest, vec!["build".to_string(), "out".to_string()]);
        assert_eq!(set.get("verbose").unwrap().as_bool(), Some(true));
        assert_eq!(set.get("name").unwrap().as_str(), Some("core"));
        assert_eq!(set.get("level").unwrap().as_int(), Some(-3));
        assert_eq!(set.get("files").unwrap().as_strings().unwrap().len(), 2);
        assert_eq!(set.get("define").unwrap().used_alias(), Some("-D"));
    }

    #[test]
    fn test_parse_double_dash_ends_options() {
        let mut set = sample_set();
        let rest = set.parse(&["-n", "x", "--", "-v", "--name"]).unwrap();
        assert_eq!(rest, vec!["-v".to_string(), "--name".to_string()]);
        assert_eq!(set.get("verbose").unwrap().as_bool(), Some(false));
    }

    #[test]
    fn test_parse_errors() {
        let mut set = sample_set();
        assert_eq!(
            set.parse(&["--bogus"]).unwrap_err(),
            OptionError::UnknownOption("--bogus".to_string())
        );
        assert!(matches!(
            set.parse(&["-n"]).unwrap_err(),
            OptionError::MissingValue { min: 1, .. }
        ));
        assert!(matches!(
            set.parse(&["-l", "high"]).unwrap_err(),
            OptionError::Conversion(_)
        ));
    }

    #[test]
    fn test_parse_short_flag_inline_value() {
        let mut set = sample_set();
        let rest = set.parse(&["-n=core", "-l=-2", "out"]).unwrap();
        assert_eq!(rest, vec!["out".to_string()]);
        assert_eq!(set.get("name").unwrap().as_str(), Some("core"));
        assert_eq!(set.get("level").unwrap().as_int(), Some(-2));
        assert_eq!(set.get("level").unwrap().used_alias(), Some("-l"));
        assert_eq!(
            set.parse(&["-x=1"]).unwrap_err(),
            OptionError::UnknownOption("-x".to_string())
        );
    }

    #[test]
    fn test_bool_inline_literal() {
        let mut set = OptionSet::new()
            .with(Opt::bool("color", true))
            .unwrap();
        set.parse(&["--color=true"]).unwrap();
        assert_eq!(set.get("color").unwrap().value(), &Value::Bool(true));
        set.parse(&["--color"]).unwrap();
        assert_eq!(set.get("color").unwrap().value(), &Value::Bool(false));
    }

    #[test]
    fn test_check_required_in_declaration_order() {
        let mut set = OptionSet::new()
            .with(Opt::new("first", Kind::String).required(true))
            .unwrap()
            .with(Opt::new("second", Kind::String).required(true))
            .unwrap();
        let err = set.check_required().unwrap_err();
        assert!(err.to_string().contains("--first"));
        set.save("--first", &["x"]).unwrap();
        assert!(set.check_required().unwrap_err().to_string().contains("--second"));
    }

    #[test]
    fn test_completion_node_lists_flags() {
        let set = sample_set();
        let node = set.completion_node();
        assert_eq!(node.self_completions("--n"), vec!["--name".to_string()]);
        assert_eq!(
            node.self_completions("-"),
            vec![
                "-D", "--define", "-f", "--files", "-l", "--level", "-n", "--name", "-v",
                "--verbose",
            ]
        );
    }
}
