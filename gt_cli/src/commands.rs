use std::fmt;

/// Suffix that marks a winner announcement, matched case-insensitively.
pub const WINS_SUFFIX: &str = " wins";

/// Errors that can occur while parsing terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Player count is not a whole number.
    InvalidPlayerCount(String),
    /// Line does not end in "wins".
    MissingWinsSuffix(String),
    /// Nothing before "wins".
    MissingWinnerName,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlayerCount(value) => write!(
                f,
                "Invalid player count '{}'. Must be a whole number (e.g., '5')",
                value
            ),
            Self::MissingWinsSuffix(line) => write!(
                f,
                "Invalid winner line '{}'. Use 'NAME wins' (e.g., 'Chris wins')",
                line
            ),
            Self::MissingWinnerName => write!(f, "Winner line is missing a name"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse the player count line.
///
/// # Examples
///
/// ```
/// use gt_cli::commands::parse_player_count;
///
/// assert_eq!(parse_player_count("7\n"), Ok(7));
/// assert!(parse_player_count("seven").is_err());
/// ```
pub fn parse_player_count(input: &str) -> Result<u32, ParseError> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|_| ParseError::InvalidPlayerCount(trimmed.to_string()))
}

/// Parse a `NAME wins` line into the winner's name.
///
/// The suffix is case-insensitive; the name is everything before it.
///
/// # Examples
///
/// ```
/// use gt_cli::commands::parse_winner;
///
/// assert_eq!(parse_winner("Chris wins\n"), Ok("Chris"));
/// assert_eq!(parse_winner("Mary Ann WINS"), Ok("Mary Ann"));
/// assert!(parse_winner("Chris won").is_err());
/// ```
pub fn parse_winner(input: &str) -> Result<&str, ParseError> {
    let trimmed = input.trim();
    let missing_suffix = || ParseError::MissingWinsSuffix(trimmed.to_string());

    let split = trimmed
        .len()
        .checked_sub(WINS_SUFFIX.len())
        .filter(|&at| trimmed.is_char_boundary(at))
        .ok_or_else(missing_suffix)?;

    let (name, suffix) = trimmed.split_at(split);
    if !suffix.eq_ignore_ascii_case(WINS_SUFFIX) {
        return Err(missing_suffix());
    }

    let name = name.trim();
    if name.is_empty() {
        return Err(ParseError::MissingWinnerName);
    }

    Ok(name)
}
