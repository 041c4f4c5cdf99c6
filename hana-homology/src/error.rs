use derive_more::Display;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Error { 
    #[display("module {symbol} is not free.")]
    NotFree { symbol: String },

    #[display("module {symbol} at {index} is not free.")]
    NotFreeAt { index: String, symbol: String },
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests { 
    use super::*;

    #[test]
    fn display() { 
        let e = Error::NotFreeAt { index: "1".into(), symbol: "Z/2".into() };
        assert_eq!(e.to_string(), "module Z/2 at 1 is not free.");
    }
}
