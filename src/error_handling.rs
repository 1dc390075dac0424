/*
    Error vocabulary shared by the session reader, the grammar and the sampler
*/

use std::fmt::Display;
use std::path::PathBuf;

pub trait ErrorType: Display + PartialEq {}

// Where in a session an error was found. Line 0 means the whole source.
#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub source: PathBuf,
    pub line: usize
}

impl Location {
    pub fn at(source: &PathBuf, line: usize) -> Self {
        Location {
            source: source.clone(),
            line
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.source.display())
        } else {
            write!(f, "{}:{}", self.source.display(), self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

pub type Errors<T> = Vec<Error<T>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Oops;

    impl Display for Oops {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "oops")
        }
    }

    impl ErrorType for Oops {}

    #[test]
    fn location_display() {
        let source = PathBuf::from("session.txt");
        assert_eq!(Location::at(&source, 0).to_string(), "session.txt");
        assert_eq!(Location::at(&source, 7).to_string(), "session.txt:7");
    }

    #[test]
    fn error_display_contains_location_and_message() {
        let error = Error {
            location: Location::at(&PathBuf::from("<stdin>"), 3),
            error: Oops
        };
        let shown = error.to_string();
        assert!(shown.contains("[<stdin>:3]"));
        assert!(shown.contains("oops"));
    }
}
