//! Command line parsing
//!
//! Command words are case-insensitive. `ADD` and `DEL` arguments are
//! optional; the session prompts for whatever is missing.

/// One parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// `ADD [name] [phone] [note...]`
    Add {
        name: Option<String>,
        phone: Option<String>,
        note: Option<String>,
    },
    /// `DEL [phone]`
    Delete { phone: Option<String> },
    /// `FIND_NAME <prefix>`
    FindName(String),
    /// `FIND_PHONE <prefix>`
    FindPhone(String),
    /// `LIST`
    List,
    /// `SAVE`
    Save,
    /// `HELP`
    Help,
    /// `EXIT`
    Exit,
}

/// Why a line did not parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseError {
    /// Blank line
    Empty,
    /// Known command, missing argument; holds the usage line
    Usage(&'static str),
    /// Unrecognized command word (upper-cased)
    Unknown(String),
}

impl Command {
    pub(crate) fn parse(line: &str) -> Result<Self, ParseError> {
        let (word, rest) = split_word(line);
        if word.is_empty() {
            return Err(ParseError::Empty);
        }

        match word.to_uppercase().as_str() {
            "ADD" => {
                let (name, rest) = split_word(rest);
                let (phone, rest) = split_word(rest);
                let note = rest.trim();
                Ok(Self::Add {
                    name: non_empty(name),
                    phone: non_empty(phone),
                    note: non_empty(note),
                })
            }
            "DEL" => Ok(Self::Delete {
                phone: non_empty(split_word(rest).0),
            }),
            "FIND_NAME" => non_empty(split_word(rest).0)
                .map(Self::FindName)
                .ok_or(ParseError::Usage("FIND_NAME <prefix>")),
            "FIND_PHONE" => non_empty(split_word(rest).0)
                .map(Self::FindPhone)
                .ok_or(ParseError::Usage("FIND_PHONE <prefix>")),
            "LIST" => Ok(Self::List),
            "SAVE" => Ok(Self::Save),
            "HELP" => Ok(Self::Help),
            "EXIT" => Ok(Self::Exit),
            other => Err(ParseError::Unknown(other.to_owned())),
        }
    }
}

/// First whitespace-delimited word and the remainder
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    s.split_once(char::is_whitespace).unwrap_or((s, ""))
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}
