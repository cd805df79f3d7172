use std::collections::BTreeMap;

use crate::config::error::ConfigError;
use crate::config::options::{Options, DEFAULT_SEPARATOR};
use crate::detection::domain::group_detector::GroupDetector;

use super::grow_detector::GrowDetector;
use super::non_group_detector::NonGroupDetector;
use super::one_group_detector::OneGroupDetector;
use super::shrink2_detector::Shrink2Detector;
use super::shrink_detector::ShrinkDetector;

type Constructor =
    Box<dyn Fn(Options) -> Result<Box<dyn GroupDetector>, ConfigError> + Send + Sync>;

/// Named detector constructors.
///
/// Built once at startup and passed to whatever needs to create detectors.
#[derive(Default)]
pub struct DetectorRegistry {
    constructors: BTreeMap<String, Constructor>,
}

impl DetectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `one`, `none`, `grow`, `shrink` and `shrink2`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register("one", |options| Ok(Box::new(OneGroupDetector::new(options))))
            .register("none", |options| Ok(Box::new(NonGroupDetector::new(options))))
            .register("grow", |options| Ok(Box::new(GrowDetector::new(options)?)))
            .register("shrink", |options| Ok(Box::new(ShrinkDetector::new(options)?)))
            .register("shrink2", |options| Ok(Box::new(Shrink2Detector::new(options)?)));
        registry
    }

    /// Adds a constructor, replacing any registered under the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(Options) -> Result<Box<dyn GroupDetector>, ConfigError> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Box::new(constructor));
        self
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.constructors.keys().cloned().collect()
    }

    pub fn create(&self, name: &str, options: &Options) -> Result<Box<dyn GroupDetector>, ConfigError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| ConfigError::UnknownDetector {
                name: name.to_string(),
                known: self.names(),
            })?;
        log::info!("Using {name} detector with options '{options}'");
        constructor(options.clone())
    }

    /// Creates a detector from `name[@option=value...]`.
    pub fn create_from_config(&self, config: &str) -> Result<Box<dyn GroupDetector>, ConfigError> {
        let (name, options) = Self::parse_config(config)?;
        self.create(&name, &options)
    }

    /// Splits `name[@option=value...]` into the name and its options.
    pub fn parse_config(config: &str) -> Result<(String, Options), ConfigError> {
        let (name, options) = match config.split_once(DEFAULT_SEPARATOR) {
            Some((name, options)) => (name, options),
            None => (config, ""),
        };
        if name.is_empty() {
            return Err(ConfigError::EmptyConfig);
        }
        Ok((name.to_string(), options.parse()?))
    }
}
