//! Terminal command parsing.
//!
//! The terminal has no pointer device, so pointer input is typed as commands
//! (`down 10 20`, `move 30 40`, `up`) in screen coordinates.

use codraw_server::domain::{BrushSize, Color, RoomId};

use crate::{error::ClientError, input::Tool};

pub const HELP: &str = "\
Commands:
  tool <pen|eraser|rect|circle|line|text|pan>   select a tool
  color <css-color>                             set the brush color
  size <n>                                      set the brush size
  down <x> <y> | move <x> <y> | up | leave      pointer input (screen coordinates)
  type <text> | cancel                          commit or cancel the text being edited
  pan <dx> <dy> | zoom <factor> <x> <y>         change the local view
  clear | undo | redo                           room-wide history operations
  join <room>                                   switch to another room
  show | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tool(Tool),
    Color(Color),
    Size(BrushSize),
    Down(f64, f64),
    Move(f64, f64),
    Up,
    Leave,
    Type(String),
    Cancel,
    Pan(f64, f64),
    Zoom { factor: f64, x: f64, y: f64 },
    Clear,
    Undo,
    Redo,
    Join(RoomId),
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ClientError> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match name {
            "tool" => Command::Tool(
                single(&args, name)?
                    .parse::<Tool>()
                    .map_err(ClientError::InvalidCommand)?,
            ),
            "color" => Command::Color(
                Color::new(single(&args, name)?.to_string())
                    .map_err(|e| ClientError::InvalidCommand(e.to_string()))?,
            ),
            "size" => Command::Size(
                BrushSize::new(number(single(&args, name)?)?)
                    .map_err(|e| ClientError::InvalidCommand(e.to_string()))?,
            ),
            "down" => {
                let (x, y) = pair(&args, name)?;
                Command::Down(x, y)
            }
            "move" => {
                let (x, y) = pair(&args, name)?;
                Command::Move(x, y)
            }
            "pan" => {
                let (dx, dy) = pair(&args, name)?;
                Command::Pan(dx, dy)
            }
            "zoom" => match args.as_slice() {
                [factor, x, y] => {
                    let factor = number(factor)?;
                    if factor <= 0.0 {
                        return Err(ClientError::InvalidCommand(
                            "zoom factor must be positive".to_string(),
                        ));
                    }
                    Command::Zoom {
                        factor,
                        x: number(x)?,
                        y: number(y)?,
                    }
                }
                _ => return Err(usage(name)),
            },
            "type" if !rest.is_empty() => Command::Type(rest.to_string()),
            "join" => {
                let room = single(&args, name)?;
                Command::Join(
                    RoomId::new(room.to_string())
                        .map_err(|_| ClientError::InvalidRoomId(room.to_string()))?,
                )
            }
            "up" | "leave" | "cancel" | "clear" | "undo" | "redo" | "show" | "help" | "quit"
                if !args.is_empty() =>
            {
                return Err(usage(name));
            }
            "up" => Command::Up,
            "leave" => Command::Leave,
            "cancel" => Command::Cancel,
            "clear" => Command::Clear,
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "show" => Command::Show,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "type" => return Err(usage(name)),
            other => {
                return Err(ClientError::InvalidCommand(format!(
                    "unknown command '{}' (try 'help')",
                    other
                )));
            }
        };
        Ok(command)
    }
}

fn usage(name: &str) -> ClientError {
    ClientError::InvalidCommand(format!("wrong arguments for '{}' (try 'help')", name))
}

fn single<'a>(args: &[&'a str], name: &str) -> Result<&'a str, ClientError> {
    match args {
        [value] => Ok(*value),
        _ => Err(usage(name)),
    }
}

fn pair(args: &[&str], name: &str) -> Result<(f64, f64), ClientError> {
    match args {
        [x, y] => Ok((number(x)?, number(y)?)),
        _ => Err(usage(name)),
    }
}

/// Parse a finite number (`inf` and `NaN` are rejected)
fn number(value: &str) -> Result<f64, ClientError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ClientError::InvalidCommand(format!("'{}' is not a number", value)))
}
