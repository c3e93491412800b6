//! Commands from key codes and scripts

use std::str::FromStr;

use anyhow::{anyhow, bail};

use crate::Direction;

impl Direction {
    /// Direction for a keyboard key code, `None` for any other key.
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            _ => None,
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            'u' => Some(Direction::Up),
            'd' => Some(Direction::Down),
            _ => None,
        }
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    /// Parse a direction name (`left`), key code (`ArrowLeft`) or letter (`l`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(direction) = Direction::from_key_code(s) {
            return Ok(direction);
        }
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => {
                let mut letters = other.chars();
                match (letters.next().and_then(Direction::from_letter), letters.next()) {
                    (Some(direction), None) => Ok(direction),
                    _ => Err(anyhow!("Unexpected command `{}`", s)),
                }
            }
        }
    }
}

/// Parse a command script.
///
/// Commands are separated by whitespace or commas. Besides single
/// commands, a token may be a run of letters such as `rdru`.
///
/// # Examples
/// ```
/// use corridor_maze::{input::parse_script, Direction};
///
/// let script = parse_script("down, ArrowRight rdl").unwrap();
/// assert_eq!(script.len(), 5);
/// assert_eq!(script[4], Direction::Left);
/// ```
pub fn parse_script(script: &str) -> anyhow::Result<Vec<Direction>> {
    let mut commands = vec![];
    for token in script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
    {
        if let Ok(direction) = token.parse() {
            commands.push(direction);
            continue;
        }
        for letter in token.chars() {
            match Direction::from_letter(letter) {
                Some(direction) => commands.push(direction),
                None => bail!("Unexpected command `{}` in `{}`", letter, token),
            }
        }
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use crate::input::parse_script;
    use crate::Direction;

    #[test]
    fn key_codes() {
        assert_eq!(Direction::from_key_code("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key_code("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key_code("KeyW"), None);
    }

    #[test]
    fn parse_single_commands() {
        assert_eq!("left".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("DOWN".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!("r".parse::<Direction>().unwrap(), Direction::Right);
        assert_eq!("ArrowUp".parse::<Direction>().unwrap(), Direction::Up);
        assert!("rd".parse::<Direction>().is_err());
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn parse_mixed_script() {
        use Direction::*;
        assert_eq!(
            parse_script(" right,down  ArrowLeft\nudLR ").unwrap(),
            vec![Right, Down, Left, Up, Down, Left, Right]
        );
        assert!(parse_script("").unwrap().is_empty());
    }

    #[test]
    fn reject_unknown_letters() {
        let err = parse_script("rdx").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected command `x` in `rdx`");
    }
}
