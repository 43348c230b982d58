use anyhow::{Context, bail};
use sweeper_core::{Coord, Coord2};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Reveal,
    Flag,
    Chord,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Left opens, middle chords, right flags.
    pub const fn action(self) -> Action {
        match self {
            Self::Left => Action::Reveal,
            Self::Middle => Action::Chord,
            Self::Right => Action::Flag,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Action on a cell given as `(row, col)`
    Act(Action, Coord2),
    /// Mouse click at pixel `(x, y)`, possibly outside the grid
    Click(MouseButton, i64, i64),
    New,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  r|reveal ROW COL           open a cell
  f|flag ROW COL             toggle a flag
  c|chord ROW COL            open the neighbors of a satisfied number
  click left|middle|right X Y  click at pixel position
  new                        start over
  help                       show this text
  q|quit                     leave";

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Act(Action::Reveal, parse_cell(&mut words)?),
            "f" | "flag" => Self::Act(Action::Flag, parse_cell(&mut words)?),
            "c" | "chord" => Self::Act(Action::Chord, parse_cell(&mut words)?),
            "click" => {
                let button = match words.next() {
                    Some("left" | "l") => MouseButton::Left,
                    Some("middle" | "m") => MouseButton::Middle,
                    Some("right" | "r") => MouseButton::Right,
                    Some(other) => bail!("unknown mouse button `{}`", other),
                    None => bail!("missing mouse button"),
                };
                let x = parse_number(words.next(), "X")?;
                let y = parse_number(words.next(), "Y")?;
                Self::Click(button, x, y)
            }
            "new" => Self::New,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("unknown command `{}`", other),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument `{}`", extra);
        }
        Ok(command)
    }
}

fn parse_cell<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let row = parse_number(words.next(), "ROW")?;
    let col = parse_number(words.next(), "COL")?;
    Ok((row, col))
}

fn parse_number<T>(word: Option<&str>, name: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(word) = word else {
        bail!("missing {}", name);
    };
    word.parse()
        .with_context(|| format!("invalid {} `{}`", name, word))
}

/// Maps a pixel position to the cell under it, `None` when it falls outside the grid.
pub fn pixel_to_cell((x, y): (i64, i64), cell_size: u32, (rows, cols): Coord2) -> Option<Coord2> {
    if cell_size == 0 || x < 0 || y < 0 {
        return None;
    }
    let col = x / i64::from(cell_size);
    let row = y / i64::from(cell_size);
    if row >= i64::from(rows) || col >= i64::from(cols) {
        return None;
    }
    Some((row as Coord, col as Coord))
}
