use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;

/// Separator between options in a configuration string.
pub const DEFAULT_SEPARATOR: char = '@';

/// A named configuration value. Options given as a bare name carry no value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedOption {
    name: String,
    value: Option<String>,
}

impl NamedOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Converts the value with [`FromStr`].
    pub fn convert<T: FromStr>(&self) -> Result<T, ConfigError> {
        let value = self.value.as_deref().unwrap_or_default();
        value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            name: self.name.clone(),
            value: value.to_string(),
        })
    }

    /// Converts the value and checks it with `validator`.
    pub fn validate<T, V>(&self, validator: &V) -> Result<T, ConfigError>
    where
        T: FromStr,
        V: Validator<T>,
    {
        let value = self.convert()?;
        validator.check(&self.name, &value)?;
        Ok(value)
    }

    /// Parses `name` or `name=value`.
    fn parse(token: &str) -> Result<Self, ConfigError> {
        let parse_error = |reason| ConfigError::Parse {
            token: token.to_string(),
            reason,
        };
        let mut parts = token.split('=');
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(parse_error("an option needs a non-empty name"));
        }
        match (parts.next(), parts.next()) {
            (None, _) => Ok(Self::flag(name)),
            (Some(""), _) => Err(parse_error("an option needs a non-empty value")),
            (Some(value), None) => Ok(Self::new(name, value)),
            (Some(_), Some(_)) => Err(parse_error("an option cannot have multiple values")),
        }
    }
}

impl fmt::Display for NamedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.name, value),
            None => f.write_str(&self.name),
        }
    }
}

/// Checks a converted option value.
pub trait Validator<T> {
    fn check(&self, name: &str, value: &T) -> Result<(), ConfigError>;
}

/// Accepts values `>= min`.
#[derive(Clone, Copy, Debug)]
pub struct Min<T>(pub T);

impl<T: PartialOrd + fmt::Display> Validator<T> for Min<T> {
    fn check(&self, name: &str, value: &T) -> Result<(), ConfigError> {
        if *value >= self.0 {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                name: name.to_string(),
                value: value.to_string(),
                constraint: format!(">= {}", self.0),
            })
        }
    }
}

/// Accepts values in `[min, max]`.
#[derive(Clone, Copy, Debug)]
pub struct MinMax<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + fmt::Display> Validator<T> for MinMax<T> {
    fn check(&self, name: &str, value: &T) -> Result<(), ConfigError> {
        if *value >= self.min && *value <= self.max {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                name: name.to_string(),
                value: value.to_string(),
                constraint: format!("in [{}, {}]", self.min, self.max),
            })
        }
    }
}

/// Accepts one of a fixed set of values.
#[derive(Clone, Debug)]
pub struct OneOf<T>(pub Vec<T>);

impl<T: PartialEq + fmt::Display> Validator<T> for OneOf<T> {
    fn check(&self, name: &str, value: &T) -> Result<(), ConfigError> {
        if self.0.contains(value) {
            Ok(())
        } else {
            Err(ConfigError::NotOneOf {
                name: name.to_string(),
                value: value.to_string(),
                allowed: self.0.iter().map(ToString::to_string).collect(),
            })
        }
    }
}

/// Named options, unique and ordered by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    options: BTreeMap<String, NamedOption>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `name[=value]` tokens separated by `separator`. Empty tokens
    /// are skipped; repeating a name is an error.
    pub fn parse(text: &str, separator: char) -> Result<Self, ConfigError> {
        let mut result = Self::new();
        for token in text.split(separator).filter(|t| !t.is_empty()) {
            let option = NamedOption::parse(token)?;
            if result.has_option(option.name()) {
                return Err(ConfigError::DuplicateOption(option.name));
            }
            result.insert(option);
        }
        Ok(result)
    }

    /// Builder-style [`Options::override_option`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.override_option(NamedOption::new(name, value));
        self
    }

    /// Adds `option` unless one with the same name exists. Returns whether
    /// it was added.
    pub fn insert(&mut self, option: NamedOption) -> bool {
        if self.options.contains_key(&option.name) {
            return false;
        }
        self.options.insert(option.name.clone(), option);
        true
    }

    /// Adds `option`, replacing any option with the same name.
    pub fn override_option(&mut self, option: NamedOption) {
        self.options.insert(option.name.clone(), option);
    }

    /// Adds every option of `other`, replacing same-named ones.
    pub fn override_with(&mut self, other: &Options) {
        for option in other.iter() {
            self.override_option(option.clone());
        }
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn get_option(&self, name: &str) -> Result<&NamedOption, ConfigError> {
        self.options
            .get(name)
            .ok_or_else(|| ConfigError::MissingOption {
                name: name.to_string(),
            })
    }

    pub fn get_value<T: FromStr>(&self, name: &str) -> Result<T, ConfigError> {
        self.get_option(name)?.convert()
    }

    /// Like [`Options::get_value`] but falls back to `default` when the
    /// option is absent. A present but malformed value is still an error.
    pub fn get_value_or<T: FromStr>(&self, name: &str, default: T) -> Result<T, ConfigError> {
        match self.options.get(name) {
            Some(option) => option.convert(),
            None => Ok(default),
        }
    }

    pub fn get_validated<T, V>(&self, name: &str, validator: &V) -> Result<T, ConfigError>
    where
        T: FromStr,
        V: Validator<T>,
    {
        self.get_option(name)?.validate(validator)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedOption> {
        self.options.values()
    }
}

impl FromStr for Options {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text, DEFAULT_SEPARATOR)
    }
}

impl FromIterator<NamedOption> for Options {
    fn from_iter<I: IntoIterator<Item = NamedOption>>(iter: I) -> Self {
        let mut options = Self::new();
        for option in iter {
            options.override_option(option);
        }
        options
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, option) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "{DEFAULT_SEPARATOR}")?;
            }
            write!(f, "{option}")?;
        }
        Ok(())
    }
}
