
use crate::table::Symbol;

pub const DEFAULT_START: &str = "start";
pub const DEFAULT_EOF: &str = "EOF";
pub const DEFAULT_MAX_BRANCHES: usize = 1024;
pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

/// Settings shared by the table builder and the parser.
///
/// `start` and `eof` name the distinguished symbols of the grammar,
/// the limits bound the branching search of the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub start: Symbol,
    pub eof: Symbol,
    pub max_branches: usize,
    pub max_steps: usize,
}

impl Config {
    pub fn new<S: Into<Symbol>>(start: S, eof: S) -> Config {
        Config {
            start: start.into(),
            eof: eof.into(),
            max_branches: DEFAULT_MAX_BRANCHES,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn max_branches(mut self, limit: usize) -> Config {
        self.max_branches = limit;
        self
    }

    pub fn max_steps(mut self, limit: usize) -> Config {
        self.max_steps = limit;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_START, DEFAULT_EOF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.start, "start");
        assert_eq!(config.eof, "EOF");
        assert_eq!(config.max_branches, DEFAULT_MAX_BRANCHES);
        assert_eq!(config.max_steps, DEFAULT_MAX_STEPS);
    }

    #[test]
    fn builder_methods() {
        let config = Config::new("s", "END").max_branches(4).max_steps(10);
        assert_eq!(config.start, "s");
        assert_eq!(config.eof, "END");
        assert_eq!(config.max_branches, 4);
        assert_eq!(config.max_steps, 10);
    }
}
