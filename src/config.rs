use derive_more::{Display, Error, From};

pub mod grammar;
pub mod run;
pub mod setup;

/// Why a configuration could not be turned into a simulation.
#[derive(Debug, Display, Error, From)]
pub enum ConfigError {
    // Only the last failing line is reported; earlier ones are logged as they are read.
    #[display("syntax error at line {line}: \"{text}\" ({failures} bad line(s) in total)")]
    Syntax {
        line: usize,
        text: String,
        failures: usize,
    },
    #[display("cannot start without control: the PreyControl: section has no movement")]
    NoControl,
    #[display("can't read configuration: {_0}")]
    #[from]
    Io(#[error(source)] std::io::Error),
}

/// Why a single configuration line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LineError {
    #[display("unknown property \"{_0}\"")]
    UnknownProperty(String),
    #[display("can't set property \"{key}\" to \"{value}\"")]
    InvalidValue { key: String, value: String },
    #[display("a rotation duration can't be given in degrees")]
    DegreeDuration,
    #[display("line matches no grammar of the current section")]
    Unrecognized,
}
