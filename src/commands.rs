use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::AppError;
use crate::view::PageKind;

pub const HELP: &str = "\
Commands:
  fetch [SYMBOL]    fetch latest prices for SYMBOL (prompts when omitted)
  upload PATH       import a brokerage holdings statement
  holdings          reload the holdings table
  clear             delete every holding (asks first)
  stats             refresh the dashboard cards
  analytics         reload portfolio analytics
  symbols           reload the analysis symbol list
  analyze SYMBOL    price chart and indicators for SYMBOL
  predict [SYMBOL]  price predictions (defaults to the analyzed symbol)
  train             retrain the prediction model
  recent            latest stored prices
  page NAME         open dashboard, portfolio, analytics or data
  help              show this list
  quit              exit";

/// One line typed at the dashboard prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch(Option<String>),
    Upload(PathBuf),
    Holdings,
    Clear,
    Stats,
    Analytics,
    Symbols,
    Analyze(String),
    Predict(Option<String>),
    Train,
    Recent,
    Page(PageKind),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        let missing = |what: &str| AppError::Validation(format!("{} requires {}", name, what));

        let command = match name.to_lowercase().as_str() {
            "fetch" => Command::Fetch(arg),
            "upload" => Command::Upload(arg.map(PathBuf::from).ok_or_else(|| missing("a file path"))?),
            "holdings" => Command::Holdings,
            "clear" => Command::Clear,
            "stats" => Command::Stats,
            "analytics" => Command::Analytics,
            "symbols" => Command::Symbols,
            "analyze" => Command::Analyze(arg.ok_or_else(|| missing("a symbol"))?),
            "predict" => Command::Predict(arg),
            "train" => Command::Train,
            "recent" => Command::Recent,
            "page" => {
                let target = arg.ok_or_else(|| missing("a page name"))?;
                Command::Page(target.parse().map_err(AppError::Validation)?)
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err(AppError::Validation("empty command".into())),
            other => {
                return Err(AppError::Validation(format!(
                    "unknown command '{}', type 'help' for a list",
                    other
                )))
            }
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("fetch".parse::<Command>().unwrap(), Command::Fetch(None));
        assert_eq!(
            "  FETCH  TCS.NS ".parse::<Command>().unwrap(),
            Command::Fetch(Some("TCS.NS".into()))
        );
        assert_eq!(
            "upload /tmp/my holdings.csv".parse::<Command>().unwrap(),
            Command::Upload(PathBuf::from("/tmp/my holdings.csv"))
        );
        assert_eq!(
            "page analytics".parse::<Command>().unwrap(),
            Command::Page(PageKind::Analytics)
        );
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!("predict".parse::<Command>().unwrap(), Command::Predict(None));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("upload".parse::<Command>(), Err(AppError::Validation(_))));
        assert!(matches!("analyze".parse::<Command>(), Err(AppError::Validation(_))));
        assert!(matches!("page settings".parse::<Command>(), Err(AppError::Validation(_))));
        assert!(matches!("".parse::<Command>(), Err(AppError::Validation(_))));
        assert!(matches!("sell TCS".parse::<Command>(), Err(AppError::Validation(_))));
    }
}
