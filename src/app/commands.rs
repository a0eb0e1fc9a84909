use crate::domain::model::EMOJI_NUMBERS;
use crate::utils::error::{BookingError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateFed { name: String },
    ResetFed { target: Option<String> },
    Pick { wrestler: String },
    Roster,
    ShowEnd,
    Ple { title: Option<String> },
    Vote {
        owner: Option<String>,
        show_number: u32,
        choice: usize,
    },
    Finalize { show_number: u32 },
    CreateBelt { name: String },
    SetChamp { belt: String, champion: String },
    Vacate { belt: String },
    Defend { belt: String },
    Match { winners: String, losers: String },
    Fed,
    Rating,
    Rankings,
    Top,
    Help,
}

/// (usage, description) for every command, in help order.
pub const COMMAND_HELP: [(&str, &str); 18] = [
    ("!createfed [name]", "Create your federation"),
    ("!pick [wrestler]", "Draft a wrestler (any name, becomes exclusive)"),
    ("!roster", "Show your roster"),
    ("!fed", "Show your federation's stats"),
    ("!showend", "Announce the end of a show (auto-numbered)"),
    ("!ple [name]", "Announce the end of a premium live event"),
    ("!vote [@owner] [show] [1-10]", "Rate a show (1️⃣=0.5⭐ … 🔟=5⭐)"),
    ("!finalize [number]", "Close the votes of a show"),
    ("!createbelt [name]", "Create a championship"),
    ("!setchamp [belt] [wrestler]", "Crown a champion (tag teams: A & B)"),
    ("!vacate [belt]", "Vacate a championship"),
    ("!defend [belt]", "Record a successful title defense"),
    ("!match [winner] vs [loser]", "Record a match result"),
    ("!rating", "Your federation's TV rating"),
    ("!rankings", "TV rating rankings of the server"),
    ("!top", "Top 5 wrestlers of the server"),
    ("!resetfed [@user]", "Delete a federation (ADMIN)"),
    ("!help", "This list"),
];

fn usage(text: &str) -> BookingError {
    BookingError::Usage {
        usage: text.to_string(),
    }
}

fn mention(token: &str) -> Option<String> {
    token
        .strip_prefix('@')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

fn parse_show_number(token: Option<&&str>) -> Option<u32> {
    token.and_then(|t| t.parse::<u32>().ok()).filter(|n| *n > 0)
}

/// Accepts `1`–`10` or the keycap emoji shown under a show.
fn parse_choice(token: &str) -> Option<usize> {
    if let Some(idx) = EMOJI_NUMBERS.iter().position(|emoji| *emoji == token) {
        return Some(idx + 1);
    }
    token
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=EMOJI_NUMBERS.len()).contains(n))
}

/// `winners vs losers`, also accepting `def.` as separator.
fn parse_match(args: &[&str]) -> Option<(String, String)> {
    let split = args.iter().position(|token| {
        matches!(
            token.to_lowercase().as_str(),
            "vs" | "vs." | "def" | "def."
        )
    })?;

    let winners = args[..split].join(" ");
    let losers = args[split + 1..].join(" ");
    if winners.is_empty() || losers.is_empty() {
        return None;
    }
    Some((winners, losers))
}

/// Parses a chat message. `Ok(None)` means the message is not for the bot.
pub fn parse(content: &str, prefix: &str) -> Result<Option<Command>> {
    let Some(body) = content.strip_prefix(prefix) else {
        return Ok(None);
    };

    let mut tokens = body.split_whitespace();
    let Some(command) = tokens.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = tokens.collect();
    let rest = args.join(" ");

    let command = match command.to_lowercase().as_str() {
        "createfed" => {
            if rest.is_empty() {
                return Err(usage("!createfed Your Federation Name"));
            }
            Command::CreateFed { name: rest }
        }
        "resetfed" => Command::ResetFed {
            target: args.iter().find_map(|t| mention(t)),
        },
        "pick" => {
            if rest.is_empty() {
                return Err(usage("!pick Wrestler Name"));
            }
            Command::Pick { wrestler: rest }
        }
        "roster" => Command::Roster,
        "showend" => Command::ShowEnd,
        "ple" => Command::Ple {
            title: (!rest.is_empty()).then_some(rest),
        },
        "vote" => {
            const VOTE_USAGE: &str = "!vote [@owner] <show number> <1-10>";
            let owner = args.first().and_then(|t| mention(t));
            let numbers = if owner.is_some() { &args[1..] } else { &args[..] };

            let show_number = parse_show_number(numbers.first()).ok_or_else(|| usage(VOTE_USAGE))?;
            let choice = numbers
                .get(1)
                .and_then(|t| parse_choice(t))
                .ok_or_else(|| usage(VOTE_USAGE))?;

            Command::Vote {
                owner,
                show_number,
                choice,
            }
        }
        "finalize" => Command::Finalize {
            show_number: parse_show_number(args.first()).ok_or_else(|| usage("!finalize 1"))?,
        },
        "createbelt" => {
            if rest.is_empty() {
                return Err(usage("!createbelt Title Name"));
            }
            Command::CreateBelt { name: rest }
        }
        "setchamp" => {
            if args.len() < 2 {
                return Err(usage(
                    "!setchamp <title_name> Wrestler Name` (example: `!setchamp WWE_Championship John Cena",
                ));
            }
            Command::SetChamp {
                belt: args[0].to_string(),
                champion: args[1..].join(" "),
            }
        }
        "vacate" => {
            if rest.is_empty() {
                return Err(usage("!vacate Title Name"));
            }
            Command::Vacate { belt: rest }
        }
        "defend" => {
            if rest.is_empty() {
                return Err(usage("!defend Title Name"));
            }
            Command::Defend { belt: rest }
        }
        "match" => {
            let (winners, losers) =
                parse_match(&args).ok_or_else(|| usage("!match Winner vs Loser"))?;
            Command::Match { winners, losers }
        }
        "fed" => Command::Fed,
        "rating" => Command::Rating,
        "rankings" => Command::Rankings,
        "top" => Command::Top,
        "help" => Command::Help,
        other => {
            tracing::debug!("Ignoring unknown command: {}", other);
            return Ok(None);
        }
    };

    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(content: &str) -> Command {
        parse(content, "!").unwrap().unwrap()
    }

    #[test]
    fn test_non_commands_are_ignored() {
        assert_eq!(parse("hello there", "!").unwrap(), None);
        assert_eq!(parse("!", "!").unwrap(), None);
        assert_eq!(parse("!dance", "!").unwrap(), None);
    }

    #[test]
    fn test_command_names_are_case_insensitive() {
        assert_eq!(
            ok("!CreateFed   All  Elite Wrestling"),
            Command::CreateFed {
                name: "All Elite Wrestling".to_string()
            }
        );
        assert_eq!(ok("!ROSTER"), Command::Roster);
    }

    #[test]
    fn test_missing_arguments_give_usage() {
        for content in ["!createfed", "!pick", "!createbelt", "!finalize", "!finalize 0", "!setchamp World"] {
            let err = parse(content, "!").unwrap_err();
            assert!(matches!(err, BookingError::Usage { .. }), "{}", content);
        }
    }

    #[test]
    fn test_setchamp_splits_belt_and_champion() {
        assert_eq!(
            ok("!setchamp WWE_Championship John Cena"),
            Command::SetChamp {
                belt: "WWE_Championship".to_string(),
                champion: "John Cena".to_string()
            }
        );
    }

    #[test]
    fn test_vote_accepts_numbers_emoji_and_owner() {
        assert_eq!(
            ok("!vote 3 8"),
            Command::Vote {
                owner: None,
                show_number: 3,
                choice: 8
            }
        );
        assert_eq!(
            ok("!vote @alice 1 🔟"),
            Command::Vote {
                owner: Some("alice".to_string()),
                show_number: 1,
                choice: 10
            }
        );
        assert!(parse("!vote 1 11", "!").is_err());
        assert!(parse("!vote @alice", "!").is_err());
    }

    #[test]
    fn test_match_separators() {
        assert_eq!(
            ok("!match Edge & Christian vs The Hardys"),
            Command::Match {
                winners: "Edge & Christian".to_string(),
                losers: "The Hardys".to_string()
            }
        );
        assert_eq!(
            ok("!match Sting DEF. Ric Flair"),
            Command::Match {
                winners: "Sting".to_string(),
                losers: "Ric Flair".to_string()
            }
        );
        assert!(parse("!match Sting vs", "!").is_err());
        assert!(parse("!match Sting Ric Flair", "!").is_err());
    }

    #[test]
    fn test_resetfed_mention_and_custom_prefix() {
        assert_eq!(
            parse("?resetfed @bob", "?").unwrap().unwrap(),
            Command::ResetFed {
                target: Some("bob".to_string())
            }
        );
        assert_eq!(ok("!resetfed"), Command::ResetFed { target: None });
        assert_eq!(parse("!resetfed", "?").unwrap(), None);
    }

    #[test]
    fn test_ple_title_is_optional() {
        assert_eq!(ok("!ple"), Command::Ple { title: None });
        assert_eq!(
            ok("!ple Double or Nothing"),
            Command::Ple {
                title: Some("Double or Nothing".to_string())
            }
        );
    }
}
