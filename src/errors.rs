use thiserror::Error;

/// Class break errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BreaksErr {
    #[error("Too few values ({len}) to build {nb} classes")]
    TooFewValues { nb: usize, len: usize },
    #[error("Invalid number of classes ({0}): it must be an integer greater than or equal to 2")]
    InvalidNumberOfClasses(usize),
    #[error("Invalid precision ({0}): it must be a non-negative integer, or None")]
    InvalidPrecision(i32),
    #[error("An error occurred during numeric conversion")]
    ConversionError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_parameters() {
        let err = BreaksErr::TooFewValues { nb: 5, len: 2 };
        assert_eq!(err.to_string(), "Too few values (2) to build 5 classes");
        assert!(BreaksErr::InvalidPrecision(-1).to_string().contains("-1"));
    }
}
