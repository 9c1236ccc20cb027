/// Failure to parse a CSS value the host understands
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid time '{0}'")]
    Time(String),
    #[error("unknown timing function '{0}'")]
    TimingFunction(String),
    #[error("invalid length '{0}'")]
    Length(String),
    #[error("invalid transition '{0}'")]
    Transition(String),
}
